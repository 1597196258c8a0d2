//! The API client: transport + configuration + session.
//!
//! [`ApiClient`] is cheap to clone. Each resource service borrows it and maps
//! one method to one endpoint; all of them go through [`ApiClient::call`],
//! which builds headers from the session, sends the request and unwraps the
//! result envelope.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wikift_core::unwrap_envelope;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, TransportError};
use crate::request::{ApiRequest, RequestOptions};
use crate::services::{ArticleService, CommentService, RemindService, SpaceService, UserService};
use crate::session::Session;
use crate::transport::{RawResponse, Transport};

/// Shared handle used by services and views.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
    session: Session,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, config: Arc<ClientConfig>, session: Session) -> Self {
        Self {
            transport,
            config,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Same transport and configuration, different session.
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
            session,
        }
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    pub fn articles(&self) -> ArticleService<'_> {
        ArticleService::new(self)
    }

    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(self)
    }

    pub fn spaces(&self) -> SpaceService<'_> {
        SpaceService::new(self)
    }

    pub fn reminds(&self) -> RemindService<'_> {
        RemindService::new(self)
    }

    /// Send a request without a body and unwrap the envelope.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let request = self.build(method, endpoint, options, None);
        self.dispatch(request).await
    }

    /// Send a request with a JSON body and unwrap the envelope.
    pub async fn call_with<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)
            .map_err(|e| TransportError::Decode(format!("unserializable request body: {e}")))?;
        let request = self.build(method, endpoint, options, Some(body));
        self.dispatch(request).await
    }

    /// Send a request to an absolute URL and decode the bare body.
    ///
    /// Only the OAuth token endpoint answers outside the envelope.
    pub(crate) async fn call_bare<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let request = ApiRequest {
            method,
            endpoint: url.to_string(),
            url: url.to_string(),
            headers: options.headers(&self.session, &self.config),
            query: options.query,
            body: None,
        };
        let response = self.send(request).await?;
        serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::Transport(TransportError::Decode(e.to_string())))
    }

    fn build(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
        body: Option<serde_json::Value>,
    ) -> ApiRequest {
        ApiRequest {
            method,
            endpoint: endpoint.to_string(),
            url: self.config.endpoint_url(endpoint),
            headers: options.headers(&self.session, &self.config),
            query: options.query,
            body,
        }
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let method = request.method.clone();
        let endpoint = request.endpoint.clone();
        let response = self.send(request).await?;

        unwrap_envelope(&response.body, self.config.success_code).map_err(|e| {
            let err = ApiError::from(e);
            tracing::debug!(%method, %endpoint, error = %err, "Envelope rejected");
            err
        })
    }

    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let method = request.method.clone();
        let endpoint = request.endpoint.clone();
        self.transport.execute(request).await.map_err(|e| {
            tracing::debug!(%method, %endpoint, error = %e, "Transport failure");
            e
        })
    }
}
