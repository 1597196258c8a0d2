//! Shared building blocks for the Wikift client.
//!
//! Everything here is pure: the result envelope and its unwrap contract, the
//! page cursor, the transport/view records and device fingerprinting. I/O
//! lives in `wikift-client`.

pub mod envelope;
pub mod error;
pub mod fingerprint;
pub mod models;
pub mod page;
pub mod types;

pub use envelope::{unwrap_envelope, Envelope, EnvelopeError, SuccessCode};
pub use error::CoreError;
pub use fingerprint::DeviceInfo;
pub use page::{Page, PageCursor, PageResponse, RawPageInfo};
pub use types::{DbId, Timestamp};
