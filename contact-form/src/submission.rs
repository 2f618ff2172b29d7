use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw field values read off the form at submit time.
///
/// `honeypot` maps to a hidden input that humans never see; bots filling
/// every field they find will populate it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub honeypot: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Spam detected.")]
    SpamDetected,

    #[error("Please fill name, email and message.")]
    MissingRequired,
}

impl ContactFields {
    /// Checks run in order: the honeypot first, so trapped submissions are
    /// rejected before the required fields are even looked at. Name, email
    /// and message must be non-empty after trimming; subject is optional.
    pub fn validate(&self) -> Result<ContactRequest, ValidationError> {
        if !self.honeypot.is_empty() {
            return Err(ValidationError::SpamDetected);
        }

        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ValidationError::MissingRequired);
        }

        Ok(ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            subject: self.subject.trim().to_string(),
            message: message.to_string(),
        })
    }

    /// Reset every field, the way a form is blanked after a successful send.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Validated wire shape: what the client POSTs to the proxy and what the
/// proxy expects in the request body. Absent fields deserialize to empty
/// strings so the required-field check can tell "missing" apart from a body
/// that is not JSON at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactRequest {
    /// The proxy-side presence check. No trimming here: the proxy accepts
    /// what it is given and leaves cleanup to the submitting client.
    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }
}
