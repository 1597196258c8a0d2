//! The transport seam between services and the network.
//!
//! Services build an [`ApiRequest`] and hand it to a [`Transport`]. The
//! production implementation is [`HttpTransport`] over [`reqwest`]; tests use
//! [`ScriptedTransport`](crate::fake::ScriptedTransport).

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::ApiRequest;

/// A 2xx response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes one request. Non-2xx statuses are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

/// HTTP transport for a single Wikift backend.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Share a connection pool with other users of `client`.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`TransportError::Status`], keeping the
    /// body text for diagnostics.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.clone(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, endpoint = %request.endpoint, "Sending request");

        let response = builder
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        let response = Self::ensure_success(response).await?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(TransportError::from_reqwest)?
            .to_vec();

        Ok(RawResponse { status, body })
    }
}
