//! Client for Retell endpoints that are not part of the documented API.
//!
//! These endpoints authenticate with a dashboard bearer token plus an
//! `Orgid` header rather than the API key.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};
use tracing::debug;

use super::http::{USER_AGENT, build_url, read_response};
use crate::config::UndocumentedCredentials;
use crate::error::{AdapterError, Result};

/// Optional parts of an undocumented-API request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters; null entries are skipped.
    pub query: Map<String, Value>,
    /// JSON body.  Ignored for GET and DELETE.
    pub body: Option<Value>,
    /// Extra headers, applied after the defaults so they can override them.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_query(query: Map<String, Value>) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn with_body(body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }
}

/// Bearer-token HTTP client for the undocumented API.
pub struct UndocumentedHttpClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
    org_id: String,
}

impl UndocumentedHttpClient {
    pub fn new(base_url: impl Into<String>, credentials: &UndocumentedCredentials) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
            bearer_token: credentials.bearer_token.clone(),
            org_id: credentials.org_id.clone(),
        }
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::POST, path, options).await
    }

    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::PUT, path, options).await
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::DELETE, path, options).await
    }

    fn headers(&self, extra: &[(String, String)]) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", self.bearer_token))?);
        headers.insert(HeaderName::from_static("orgid"), header_value(&self.org_id)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| AdapterError::Http {
                url: self.base_url.clone(),
                reason: format!("invalid header name `{name}`: {e}"),
            })?;
            headers.insert(name, header_value(value)?);
        }
        Ok(headers)
    }

    async fn request(&self, method: Method, path: &str, options: RequestOptions) -> Result<Value> {
        let url = build_url(&self.base_url, path, &options.query)?;
        debug!(method = %method, url = %url, "sending undocumented API request");

        let sends_body = !matches!(method, Method::GET | Method::DELETE);
        let mut builder = self
            .client
            .request(method, url.clone())
            .headers(self.headers(&options.headers)?);
        if let Some(body) = options.body.filter(|_| sends_body) {
            builder = builder.body(serde_json::to_vec(&body)?);
        }

        let response = builder.send().await.map_err(|e| AdapterError::Http {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        read_response(response).await
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        AdapterError::ConfigError(format!("credential is not a valid header value: {e}"))
    })
}
