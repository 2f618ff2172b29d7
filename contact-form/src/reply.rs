use serde_json::Value;

/// Outcome of one exchange with the form-processing API: whether the HTTP
/// status was in the success range, plus the decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub ok: bool,
    pub body: Value,
}

impl UpstreamReply {
    /// A reply is accepted when the HTTP status was a success and the body
    /// either omits `success` or carries `success: true`.
    ///
    /// The omission exemption means an unparseable body (decoded as `{}`)
    /// on a 2xx status still counts as accepted. That leniency is inherited
    /// behavior, kept deliberate and locked by tests rather than corrected.
    pub fn accepted(&self) -> bool {
        if !self.ok {
            return false;
        }

        match self.body.get("success") {
            None => true,
            Some(Value::Bool(true)) => true,
            Some(_) => false,
        }
    }

    /// Best-effort human-facing message. The form-processing API reports
    /// under `message`, the proxy's own error bodies under `error`.
    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| self.body.get("error").and_then(Value::as_str))
    }
}

/// Upstream bodies are JSON in the happy case but are never trusted to be:
/// anything that fails to parse is treated as an empty object.
pub fn decode_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Default::default()))
}
