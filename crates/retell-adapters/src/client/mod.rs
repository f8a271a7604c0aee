//! Upstream Retell API clients.
//!
//! [`RetellClient`] covers the documented API (API-key auth) on top of a
//! pluggable [`Transport`]; [`UndocumentedHttpClient`] covers the
//! bearer-token endpoints the documented API does not expose.  Both share the
//! response handling in [`http`].

pub mod http;
pub mod retell;
pub mod undocumented;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

pub use http::HttpTransport;
pub use retell::RetellClient;
pub use undocumented::{RequestOptions, UndocumentedHttpClient};

/// Body of an upstream request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body is sent.
    Empty,
    /// A JSON document.
    Json(Value),
    /// Multipart text fields, in order.
    Form(Vec<(String, String)>),
}

/// A single request against the documented API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base origin, already percent-encoded.
    pub path: String,
    /// Query parameters; null entries are skipped when the URL is built.
    pub query: Map<String, Value>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Map::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach multipart text fields.
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    /// Attach query parameters.
    pub fn query(mut self, query: Map<String, Value>) -> Self {
        self.query = query;
        self
    }

    /// The JSON body, if one was attached.
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(v) => Some(v),
            _ => None,
        }
    }
}

/// Executes [`ApiRequest`]s against the documented API.
///
/// Implementations return the parsed JSON body on success (or the raw text
/// as a JSON string for non-JSON responses) and an
/// [`AdapterError::Api`](crate::AdapterError::Api) for non-success statuses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// Percent-encode a value for use as a single path segment.
///
/// Only RFC 3986 unreserved characters pass through, so phone numbers like
/// `+14155550100` become `%2B14155550100`.
pub fn encode_segment(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 2);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02X}"));
            }
        }
    }
    encoded
}
