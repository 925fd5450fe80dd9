//! reqwest-backed transport
//!
//! Default [`HttpTransport`] used by `PwintyClient::new`. It sends a single
//! request and returns whatever came back; status interpretation is left to
//! the dispatcher.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

use super::traits::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// HTTP transport over a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with no request timeout
    pub fn new() -> Result<Self, TransportError> {
        let client = Self::builder().build()?;
        Ok(ReqwestTransport { client })
    }

    /// Create a transport that gives up on requests after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Self::builder().timeout(timeout).build()?;
        Ok(ReqwestTransport { client })
    }

    /// Wrap an existing client (shared pools, proxies, custom TLS)
    pub fn from_client(client: Client) -> Self {
        ReqwestTransport { client }
    }

    fn builder() -> reqwest::ClientBuilder {
        Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("pwinty-rs/", env!("CARGO_PKG_VERSION")))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method.into(), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        trace!(status, bytes = body.len(), "Transport response received");

        Ok(HttpResponse { status, body })
    }
}
