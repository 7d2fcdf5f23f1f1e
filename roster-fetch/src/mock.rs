//! Recording transport for tests.
//!
//! Replies are queued up front and handed out in order; every request is
//! kept so tests can assert on exactly what was sent.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::host::http::{ApiRequest, Transport};

/// Status returned once the reply queue is exhausted.
const UNEXPECTED_REQUEST_STATUS: u16 = 599;

/// A [`Transport`] that replays canned replies and records requests.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Value, u16>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Creates a transport with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful JSON reply.
    #[must_use]
    pub fn reply(self, body: Value) -> Self {
        self.push(Ok(body));
        self
    }

    /// Queues a non-success HTTP status.
    #[must_use]
    pub fn fail_with_status(self, status: u16) -> Self {
        self.push(Err(status));
        self
    }

    fn push(&self, reply: Result<Value, u16>) {
        self.replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push_back(reply);
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, request: ApiRequest) -> Result<Value, FetchError> {
        let url = request.url.clone();
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request);

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .unwrap_or(Err(UNEXPECTED_REQUEST_STATUS));

        reply.map_err(|status| FetchError::Status { url, status })
    }
}
