//! src/domain/contact_submission.rs

use crate::domain::{ContactEmail, ContactName};

/// One contact-form entry, valid by construction: every required field has
/// already been through its `parse` constructor.
#[derive(Debug)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: Option<String>,
    pub subject: Subject,
    pub message: MessageBody,
}

#[derive(Debug)]
pub struct Subject(String);

impl Subject {
    pub fn parse(subject: String) -> Result<Self, String> {
        if subject.trim().is_empty() {
            Err("A subject cannot be empty.".into())
        } else {
            Ok(Self(subject))
        }
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn parse(message: String) -> Result<Self, String> {
        if message.trim().is_empty() {
            Err("A message cannot be empty.".into())
        } else {
            Ok(Self(message))
        }
    }

    /// The message as it should appear in an HTML email body, with line
    /// breaks turned into `<br>` tags.
    pub fn to_html(&self) -> String {
        self.0.replace('\n', "<br>")
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
