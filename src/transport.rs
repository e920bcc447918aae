use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::models::ReportPayload;

/// Fire-and-forget delivery contract.
///
/// Implementations must stay usable during page teardown: a send handed off
/// before shutdown is still expected to make a best-effort delivery attempt.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &ReportPayload) -> Result<()>;
}

/// JSON-over-HTTPS transport. Any 2xx is success; everything else is an
/// error for the dispatcher to log and drop.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// The request timeout bounds teardown-time sends; keep it short.
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, payload: &ReportPayload) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("endpoint {} answered {status}", self.endpoint));
        }

        Ok(())
    }
}
