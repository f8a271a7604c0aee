//! reqwest-backed transport and the response handling shared by both clients.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart;
use serde_json::{Map, Value, json};
use tracing::debug;
use url::Url;

use super::{ApiRequest, RequestBody, Transport};
use crate::error::{AdapterError, Result};

/// User agent sent on every upstream request.
pub(crate) const USER_AGENT: &str = concat!("retell-mcp/", env!("CARGO_PKG_VERSION"));

/// Join `base_url` and `path` and append the non-null query parameters in
/// insertion order.
pub(crate) fn build_url(base_url: &str, path: &str, query: &Map<String, Value>) -> Result<Url> {
    let raw = format!("{base_url}{path}");
    let mut url = Url::parse(&raw).map_err(|e| AdapterError::Http {
        url: raw.clone(),
        reason: format!("invalid request URL: {e}"),
    })?;

    let pairs: Vec<(&String, String)> = query
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k, rendered)
        })
        .collect();

    if !pairs.is_empty() {
        let mut serializer = url.query_pairs_mut();
        for (key, value) in pairs {
            serializer.append_pair(key, &value);
        }
    }

    Ok(url)
}

/// Turn an HTTP response into the parsed body or an [`AdapterError::Api`].
///
/// Error bodies are parsed as JSON when possible and otherwise wrapped as
/// `{"message": <text>}`.  Successful JSON responses are parsed (an empty
/// body becomes `null`); any other content type is returned as a JSON string.
pub(crate) async fn read_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let url = response.url().to_string();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    let body_text = response.text().await.map_err(|e| AdapterError::Http {
        url: url.clone(),
        reason: format!("failed to read response body: {e}"),
    })?;

    if !status.is_success() {
        let payload = serde_json::from_str::<Value>(&body_text).unwrap_or_else(|_| {
            if body_text.is_empty() {
                json!({ "message": "Unknown error" })
            } else {
                json!({ "message": body_text })
            }
        });
        debug!(status = status.as_u16(), url = %url, "upstream returned an error status");
        return Err(AdapterError::api(
            status.as_u16(),
            status.canonical_reason(),
            payload,
        ));
    }

    if !is_json {
        return Ok(Value::String(body_text));
    }
    if body_text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body_text).map_err(|e| AdapterError::UnexpectedResponse {
        operation: url,
        reason: format!("response was not valid JSON: {e}"),
    })
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// Sends [`ApiRequest`]s over HTTPS with API-key bearer authentication.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = build_url(&self.base_url, &request.path, &request.query)?;
        debug!(method = %request.method, url = %url, "sending Retell API request");

        let mut builder = self
            .client
            .request(request.method, url.clone())
            .bearer_auth(&self.api_key);

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Form(fields) => {
                let form = fields
                    .into_iter()
                    .fold(multipart::Form::new(), |form, (name, value)| {
                        form.text(name, value)
                    });
                builder.multipart(form)
            }
        };

        let response = builder.send().await.map_err(|e| AdapterError::Http {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        read_response(response).await
    }
}
