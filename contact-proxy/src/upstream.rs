use async_trait::async_trait;
use contact_form::{decode_body, ProxyEnvelope};
use reqwest::Client;
use serde_json::Value;
use tracing::error;

use crate::error::AppError;

/// One upstream attempt per invocation. Retries, if anyone wants them,
/// belong to the submitting client, not here.
#[async_trait]
pub trait Forward: Send + Sync {
    async fn forward(&self, envelope: &ProxyEnvelope) -> Result<Value, AppError>;
}

/// Delivers envelopes to the form-processing API.
pub struct Web3Forms {
    client: Client,
    endpoint: String,
}

impl Web3Forms {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl Forward for Web3Forms {
    async fn forward(&self, envelope: &ProxyEnvelope) -> Result<Value, AppError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(envelope)
            .send()
            .await
            .map_err(|e| {
                error!("Error forwarding to upstream: {e}");
                AppError::UpstreamUnreachable
            })?;

        let status = res.status();
        let bytes = res.bytes().await.map_err(|e| {
            error!("Error reading upstream response: {e}");
            AppError::UpstreamUnreachable
        })?;

        let body = decode_body(&bytes);

        if !status.is_success() {
            error!("Upstream returned error: {status} {body}");
            return Err(AppError::UpstreamRejected(body));
        }

        Ok(body)
    }
}
