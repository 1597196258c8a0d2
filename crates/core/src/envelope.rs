//! The `{ code, data }` result envelope wrapped around every API response.
//!
//! The backend reports business failures in-band: a response can arrive with
//! HTTP 200 and still carry a non-success `code`. [`unwrap_envelope`] is the
//! only sanctioned way to get at `data`, and it checks `code` first. When the
//! code is not the success sentinel the payload is never deserialized.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Success sentinel used by the Wikift backend unless configured otherwise.
pub const DEFAULT_SUCCESS_CODE: i64 = 2000;

/// The value of `code` that marks a successful envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessCode(pub i64);

impl Default for SuccessCode {
    fn default() -> Self {
        Self(DEFAULT_SUCCESS_CODE)
    }
}

impl SuccessCode {
    pub fn matches(self, code: i64) -> bool {
        self.0 == code
    }
}

/// Raw envelope as it comes off the wire.
///
/// `data` is kept as an untyped JSON value so that it can be decoded lazily,
/// after the code check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Envelope {
    /// Build a success envelope around a serializable payload.
    pub fn success<T: Serialize>(code: SuccessCode, data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            code: code.0,
            message: None,
            data: Some(serde_json::to_value(data)?),
        })
    }

    /// Build a failure envelope.
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Why an envelope could not be turned into a typed payload.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The backend accepted the request but rejected it for business reasons.
    #[error("Request rejected with code {code}: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { code: i64, message: Option<String> },

    /// The body is not an envelope, or `data` does not have the expected shape.
    #[error("Malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse a raw response body and surface `data` iff `code` is the success
/// sentinel.
///
/// An absent `data` on success is decoded from JSON `null`, so callers that
/// expect nothing (or an `Option`) get it, and callers that need a value get
/// [`EnvelopeError::Malformed`].
pub fn unwrap_envelope<T: DeserializeOwned>(
    body: &[u8],
    success: SuccessCode,
) -> Result<T, EnvelopeError> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    open(envelope, success)
}

/// Same as [`unwrap_envelope`] for an envelope that is already parsed.
pub fn open<T: DeserializeOwned>(envelope: Envelope, success: SuccessCode) -> Result<T, EnvelopeError> {
    if !success.matches(envelope.code) {
        return Err(EnvelopeError::Rejected {
            code: envelope.code,
            message: envelope.message,
        });
    }
    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        id: i64,
    }

    #[test]
    fn success_code_surfaces_data() {
        let body = br#"{"code":2000,"data":{"id":7}}"#;
        let payload: Payload = unwrap_envelope(body, SuccessCode::default()).unwrap();
        assert_eq!(payload, Payload { id: 7 });
    }

    #[test]
    fn non_success_code_is_rejected_even_with_data() {
        let body = br#"{"code":4001,"message":"not allowed","data":{"id":7}}"#;
        let err = unwrap_envelope::<Payload>(body, SuccessCode::default()).unwrap_err();
        assert_matches!(
            err,
            EnvelopeError::Rejected { code: 4001, message: Some(ref m) } if m == "not allowed"
        );
    }

    #[test]
    fn rejected_envelope_never_decodes_data() {
        // `data` has the wrong shape; a decode attempt would yield Malformed.
        let body = br#"{"code":5000,"data":"garbage"}"#;
        let err = unwrap_envelope::<Payload>(body, SuccessCode::default()).unwrap_err();
        assert_matches!(err, EnvelopeError::Rejected { code: 5000, .. });
    }

    #[test]
    fn absent_data_decodes_as_none() {
        let body = br#"{"code":2000}"#;
        let payload: Option<Payload> = unwrap_envelope(body, SuccessCode::default()).unwrap();
        assert!(payload.is_none());
    }

    #[test]
    fn absent_data_for_required_payload_is_malformed() {
        let body = br#"{"code":2000}"#;
        let err = unwrap_envelope::<Payload>(body, SuccessCode::default()).unwrap_err();
        assert_matches!(err, EnvelopeError::Malformed(_));
    }

    #[test]
    fn non_envelope_body_is_malformed() {
        let err = unwrap_envelope::<Payload>(b"<html>", SuccessCode::default()).unwrap_err();
        assert_matches!(err, EnvelopeError::Malformed(_));
    }

    #[test]
    fn custom_success_code() {
        let body = br#"{"code":0,"data":{"id":1}}"#;
        let payload: Payload = unwrap_envelope(body, SuccessCode(0)).unwrap();
        assert_eq!(payload.id, 1);
    }

    #[test]
    fn rejected_display_without_message() {
        let err = EnvelopeError::Rejected {
            code: 4004,
            message: None,
        };
        assert_eq!(err.to_string(), "Request rejected with code 4004: no message");
    }
}
