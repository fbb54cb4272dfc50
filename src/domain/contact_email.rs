//! src/domain/contact_email.rs

#[derive(Debug)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Returns `Ok(ContactEmail)` if the input is non-empty once trimmed,
    /// `Err(String)` otherwise.
    ///
    /// Address format is not enforced server-side; the form input carries
    /// `type="email"` and the mail API rejects addresses it cannot deliver to.
    pub fn parse(email: String) -> Result<Self, String> {
        if email.trim().is_empty() {
            Err("A contact email cannot be empty.".into())
        } else {
            Ok(Self(email))
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
