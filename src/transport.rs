// HTTP transport
// Seam between the dispatcher and the actual HTTP stack

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};

use crate::config::ConnectConfig;
use crate::error::{Result, TransportError};
use crate::types::Params;

/// Asynchronous HTTP adapter: one call, one complete raw text response.
///
/// Timeouts and connection management belong to implementations of this
/// trait, the dispatcher above it never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and deliver the full response body as text
    async fn open_url(
        &self,
        url: &str,
        method: &str,
        params: &Params,
    ) -> std::result::Result<String, TransportError>;
}

/// Default transport over a pooled `reqwest` client
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ConnectConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(TransportError::ClientBuild)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open_url(
        &self,
        url: &str,
        method: &str,
        params: &Params,
    ) -> std::result::Result<String, TransportError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(method.to_string()))?;

        tracing::debug!(method = %method, url = %url, "Sending HTTP request");

        // GET carries parameters in the query string, everything else as a
        // form body
        let request = if method == Method::GET {
            self.client.get(url).query(params)
        } else {
            self.client.request(method, url).form(params)
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, "Received HTTP response");

        Ok(body)
    }
}
