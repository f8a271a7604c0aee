//! In-memory transport used by the adapter unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::client::{ApiRequest, RetellClient, Transport};
use crate::error::Result;

/// Records every request and answers with queued responses, in order.
/// Answers `{}` once the queue is empty.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Value>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    pub fn fail(&self, error: crate::AdapterError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `(METHOD, path)` of every recorded request.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.requests()
            .into_iter()
            .map(|r| (r.method.to_string(), r.path))
            .collect()
    }

    pub fn client(self: &Arc<Self>) -> RetellClient {
        RetellClient::new(self.clone())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({})))
    }
}
