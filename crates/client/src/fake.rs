//! A scripted, recording [`Transport`] for tests and offline demos.
//!
//! Replies are registered per `(method, endpoint)`. One-shot replies are
//! consumed first, in order; after that the standing reply (if any) answers
//! every call. Every request is recorded, including ones without a reply.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use wikift_core::envelope::{Envelope, SuccessCode};

use crate::error::TransportError;
use crate::request::ApiRequest;
use crate::transport::{RawResponse, Transport};

/// What the scripted backend answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// HTTP 200 with this exact body.
    Body(Vec<u8>),
    /// HTTP 200 with a paged envelope whose `number`/`size` echo the request.
    Page {
        content: Vec<serde_json::Value>,
        total_elements: u64,
    },
    /// Non-2xx status.
    Status(u16),
    /// Network failure.
    Unreachable,
    /// Never resolves.
    Hang,
}

impl Reply {
    /// A success envelope around `data`.
    pub fn data<T: Serialize>(data: T) -> Self {
        let envelope = Envelope {
            code: SuccessCode::default().0,
            message: None,
            data: Some(serde_json::to_value(data).unwrap_or(serde_json::Value::Null)),
        };
        Self::envelope(&envelope)
    }

    /// A success envelope with no `data`.
    pub fn empty() -> Self {
        Self::envelope(&Envelope {
            code: SuccessCode::default().0,
            message: None,
            data: None,
        })
    }

    /// A domain rejection.
    pub fn rejected(code: i64, message: &str) -> Self {
        Self::envelope(&Envelope::failure(code, message))
    }

    /// Any JSON body, unwrapped (e.g. the OAuth token document).
    pub fn json<T: Serialize>(body: T) -> Self {
        Self::Body(serde_json::to_vec(&body).unwrap_or_default())
    }

    /// A page of `content` echoing the requested position.
    pub fn page<T: Serialize>(content: &[T], total_elements: u64) -> Self {
        Self::Page {
            content: content
                .iter()
                .filter_map(|item| serde_json::to_value(item).ok())
                .collect(),
            total_elements,
        }
    }

    fn envelope(envelope: &Envelope) -> Self {
        Self::Body(serde_json::to_vec(envelope).unwrap_or_default())
    }
}

#[derive(Default)]
struct Script {
    once: VecDeque<Reply>,
    standing: Option<Reply>,
}

/// Recording transport answering from a script.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<(Method, String), Script>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `endpoint` with `reply`.
    pub fn respond(&self, method: Method, endpoint: &str, reply: Reply) -> &Self {
        lock(&self.scripts)
            .entry((method, endpoint.to_string()))
            .or_default()
            .standing = Some(reply);
        self
    }

    /// Answer the next call to `endpoint` with `reply`.
    pub fn respond_once(&self, method: Method, endpoint: &str, reply: Reply) -> &Self {
        lock(&self.scripts)
            .entry((method, endpoint.to_string()))
            .or_default()
            .once
            .push_back(reply);
        self
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    /// Requests to one endpoint.
    pub fn requests_to(&self, method: &Method, endpoint: &str) -> Vec<ApiRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| &r.method == method && r.endpoint == endpoint)
            .cloned()
            .collect()
    }

    pub fn count(&self, method: &Method, endpoint: &str) -> usize {
        self.requests_to(method, endpoint).len()
    }

    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    fn next_reply(&self, request: &ApiRequest) -> Option<Reply> {
        let mut scripts = lock(&self.scripts);
        let script = scripts.get_mut(&(request.method.clone(), request.endpoint.clone()))?;
        script.once.pop_front().or_else(|| script.standing.clone())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        lock(&self.requests).push(request.clone());

        let Some(reply) = self.next_reply(&request) else {
            return Err(TransportError::Connection(format!(
                "no scripted reply for {} {}",
                request.method, request.endpoint
            )));
        };

        match reply {
            Reply::Body(body) => Ok(RawResponse { status: 200, body }),
            Reply::Page {
                content,
                total_elements,
            } => Ok(RawResponse {
                status: 200,
                body: page_body(&request, content, total_elements),
            }),
            Reply::Status(status) => Err(TransportError::Status {
                status,
                body: String::new(),
            }),
            Reply::Unreachable => Err(TransportError::Connection(format!(
                "{} unreachable",
                request.url
            ))),
            Reply::Hang => std::future::pending().await,
        }
    }
}

fn page_body(request: &ApiRequest, content: Vec<serde_json::Value>, total_elements: u64) -> Vec<u8> {
    let number: u64 = request
        .query_value("page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let size: u64 = request
        .query_value("size")
        .and_then(|v| v.parse().ok())
        .unwrap_or(wikift_core::page::DEFAULT_PAGE_SIZE.into());
    let total_pages = if size == 0 {
        0
    } else {
        total_elements.div_ceil(size)
    };
    let data = serde_json::json!({
        "content": content,
        "number": number,
        "size": size,
        "totalElements": total_elements,
        "totalPages": total_pages,
    });
    let envelope = Envelope {
        code: SuccessCode::default().0,
        message: None,
        data: Some(data),
    };
    serde_json::to_vec(&envelope).unwrap_or_default()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
