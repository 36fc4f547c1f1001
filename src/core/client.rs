//! Blocking JSON API client
//!
//! [`ApiClient`] builds typed list/get/create/update/delete calls on top of a
//! [`Transport`]. The production transport is [`HttpTransport`]; tests use
//! the recording transport from `crate::testing`.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::core::resource::Resource;

/// Errors from the API layer, passed through to the caller untouched
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request {method} {path} failed")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {path} returned {status}: {body}")]
    Status {
        method: Method,
        path: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response from {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode request body")]
    Encode(#[source] serde_json::Error),
}

/// A request as handed to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base URL, starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: vec![(ACCEPT.as_str().to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.headers
            .push((CONTENT_TYPE.as_str().to_string(), "application/json".to_string()));
        self.body = Some(body);
        self
    }
}

/// Raw response: status code plus body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(body: &Value) -> Self {
        Self::new(200, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).send(request)
    }
}

/// Transport over HTTP using a blocking reqwest client
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("resctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url(&request.path))
            .query(&request.query);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let transport_error = |source| ApiError::Transport {
            method: request.method.clone(),
            path: request.path.clone(),
            source,
        };
        let response = builder.send().map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(transport_error)?;

        Ok(ApiResponse { status, body })
    }
}

/// Options for list calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Raw filter expression, passed through verbatim
    pub filter: Option<String>,
}

impl ListOptions {
    pub fn filter(expr: impl Into<String>) -> Self {
        Self {
            filter: Some(expr.into()),
        }
    }
}

/// Typed API client over a transport
pub struct ApiClient {
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// List resources below `path`
    ///
    /// A filter becomes the query parameter `filter[<resource>]`.
    pub fn list<T: Resource>(&self, path: &str, options: &ListOptions) -> Result<Vec<T>, ApiError> {
        let mut request = ApiRequest::new(Method::GET, path);
        if let Some(filter) = &options.filter {
            request = request.with_query(format!("filter[{}]", T::NAME), filter.clone());
        }
        let body = self.execute(&request)?;
        decode(path, &body)
    }

    pub fn get<T: Resource>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.execute(&ApiRequest::new(Method::GET, path))?;
        decode(path, &body)
    }

    pub fn create<T: Resource>(&self, path: &str, resource: &T) -> Result<T, ApiError> {
        let request = ApiRequest::new(Method::POST, path).with_body(encode(resource)?);
        let body = self.execute(&request)?;
        decode(path, &body)
    }

    /// Send a PATCH with the populated resource
    ///
    /// An empty response body returns the resource as sent.
    pub fn update<T: Resource>(&self, path: &str, resource: &T) -> Result<T, ApiError> {
        let request = ApiRequest::new(Method::PATCH, path).with_body(encode(resource)?);
        let body = self.execute(&request)?;
        if body.trim().is_empty() {
            return Ok(resource.clone());
        }
        decode(path, &body)
    }

    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(&ApiRequest::new(Method::DELETE, path))?;
        Ok(())
    }

    fn execute(&self, request: &ApiRequest) -> Result<String, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, query = ?request.query, "sending request");
        let response = self.transport.send(request)?;
        tracing::debug!(status = response.status, "received response");

        if !response.is_success() {
            return Err(ApiError::Status {
                method: request.method.clone(),
                path: request.path.clone(),
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }
}

fn decode<T: serde::de::DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Serialize a resource for the wire
///
/// Unset optional attributes (`null`) and an empty `id` are left out, so the
/// body only carries what was populated.
fn encode<T: Resource>(resource: &T) -> Result<Value, ApiError> {
    let mut value = serde_json::to_value(resource).map_err(ApiError::Encode)?;
    if let Value::Object(map) = &mut value {
        map.retain(|key, v| !v.is_null() && !(key == "id" && v.as_str() == Some("")));
    }
    Ok(value)
}
