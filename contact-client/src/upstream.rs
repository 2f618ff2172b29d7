use async_trait::async_trait;
use contact_form::{decode_body, ContactRequest, UpstreamReply};
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Seam between the controller and the network. A transport error means the
/// exchange never completed; a completed exchange is always an
/// [`UpstreamReply`], however unhappy its status.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, request: &ContactRequest) -> Result<UpstreamReply, UpstreamError>;
}

/// Posts submissions as JSON to the forwarding proxy.
pub struct HttpUpstream {
    client: Client,
    endpoint: String,
}

impl HttpUpstream {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn send(&self, request: &ContactRequest) -> Result<UpstreamReply, UpstreamError> {
        let res = self.client.post(&self.endpoint).json(request).send().await?;

        let ok = res.status().is_success();
        let bytes = res.bytes().await?;

        Ok(UpstreamReply {
            ok,
            body: decode_body(&bytes),
        })
    }
}
