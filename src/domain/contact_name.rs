//! src/domain/contact_name.rs

#[derive(Debug)]
pub struct ContactName(String);

impl ContactName {
    /// Returns `Ok(ContactName)` if the input is non-empty once trimmed,
    /// `Err(String)` otherwise.
    ///
    /// Presence is the only constraint enforced here: the form is the one
    /// place we shape the input, the server just refuses to dispatch blanks.
    pub fn parse(name: String) -> Result<Self, String> {
        if name.trim().is_empty() {
            Err("A contact name cannot be empty.".into())
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
