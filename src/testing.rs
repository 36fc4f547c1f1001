//! In-memory transport for exercising commands without a network
//!
//! [`TestServer`] answers requests from a queue of canned responses and
//! records every request it sees, in order.

use reqwest::Method;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::client::{ApiClient, ApiError, ApiRequest, ApiResponse, Transport};

/// One request as seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl From<&ApiRequest> for RecordedRequest {
    fn from(request: &ApiRequest) -> Self {
        Self {
            method: request.method.clone(),
            path: request.path.clone(),
            query: request.query.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        }
    }
}

/// Transport that records requests and replays queued responses
///
/// Once the queue is empty every request gets `200 []`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<ApiResponse>>,
}

impl RecordingTransport {
    pub fn push_response(&self, response: ApiResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.into());

        let response = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        Ok(response.unwrap_or_else(|| ApiResponse::new(200, "[]")))
    }
}

/// Handle that hands out clients sharing one recording transport
#[derive(Debug, Clone, Default)]
pub struct TestServer {
    transport: Arc<RecordingTransport>,
}

impl TestServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `200` response with a JSON body
    pub fn respond_json(&self, body: Value) {
        self.transport.push_response(ApiResponse::json(&body));
    }

    pub fn respond(&self, response: ApiResponse) {
        self.transport.push_response(response);
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(Arc::clone(&self.transport))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.transport.requests()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_responses_are_replayed_in_order() {
        let server = TestServer::new();
        server.respond_json(json!({"n": 1}));
        server.respond(ApiResponse::new(500, "boom"));
        let transport = &server.transport;

        let request = ApiRequest::new(Method::GET, "/a");
        assert_eq!(transport.send(&request).unwrap().body, r#"{"n":1}"#);
        assert_eq!(transport.send(&request).unwrap().status, 500);
        assert_eq!(transport.send(&request).unwrap(), ApiResponse::new(200, "[]"));
        assert_eq!(server.requests().len(), 3);
    }

    #[test]
    fn test_clients_share_the_log() {
        let server = TestServer::new();
        server.client().delete("/a").unwrap();
        server.client().delete("/b").unwrap();

        let paths: Vec<_> = server.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }
}
