use axum::body::Bytes;
use contact_form::ContactRequest;
use serde_json::Value;

use crate::error::AppError::{self, InvalidJson, MissingFields};

/// Decode a request body into a submission, keeping the two rejection
/// classes apart: a body that is not JSON at all, and JSON of the wrong
/// shape or with required fields absent.
pub fn parse_submission(body: &Bytes) -> Result<ContactRequest, AppError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| InvalidJson)?;

    let request: ContactRequest = serde_json::from_value(value).map_err(|_| MissingFields)?;

    if !request.has_required_fields() {
        return Err(MissingFields);
    }

    Ok(request)
}
