//! Typed REST client for the Wikift backend.
//!
//! Provides configuration loading, the request options builder, a pluggable
//! HTTP transport, the explicit session value with its cookie-backed store,
//! and one service per backend resource.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod fake;
pub mod request;
pub mod services;
pub mod session;
pub mod transport;

pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ApiResult, TransportError};
pub use request::{ApiRequest, AuthMode, RequestOptions};
pub use session::{CookieSessionStore, Session, SessionError};
pub use transport::{HttpTransport, RawResponse, Transport};
