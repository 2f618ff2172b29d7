use serde::Serialize;

use crate::submission::ContactRequest;

/// Tag the form-processing API uses to tell this site's submissions apart
/// from any other form wired to the same account.
pub const SOURCE_TAG: &str = "portfolio-contact-form";

/// Body the proxy forwards to the form-processing API: the visitor's fields
/// plus the server-held access key and the constant source tag.
#[derive(Debug, Clone, Serialize)]
pub struct ProxyEnvelope {
    pub access_key: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub source: &'static str,
}

impl ProxyEnvelope {
    pub fn new(access_key: &str, request: ContactRequest) -> Self {
        Self {
            access_key: access_key.to_string(),
            name: request.name,
            email: request.email,
            subject: request.subject,
            message: request.message,
            source: SOURCE_TAG,
        }
    }
}
