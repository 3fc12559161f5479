//! Transport Request & Reply Types
//!
//! The request descriptor, the raw reply produced by a transport before any
//! classification happens, and the async [`Transport`] trait itself.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Result, TransportError};

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

/// Request descriptor
///
/// Owned by the caller and passed by reference into the transport; it is
/// never mutated for the duration of a fetch.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl FetchRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.into()))
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body).map_err(|e| {
            TransportError::Other(format!("JSON serialization failed: {}", e))
        })?;
        self.body = Some(Bytes::from(json));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// A reply that parsed as HTTP
#[derive(Debug)]
pub struct HttpReply {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpReply {
    /// Parse reply body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            TransportError::Other(format!("JSON deserialization failed: {}", e))
        })
    }

    /// Get reply body as a UTF-8 string
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| TransportError::Other(format!("Invalid UTF-8: {}", e)))
    }

    /// Check if the status is in the success range (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the status indicates a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the status indicates a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// A reply that could not be interpreted as HTTP
///
/// Carries the raw response descriptor so the caller can still inspect what
/// the transport actually received.
#[derive(Debug, Clone)]
pub struct NonHttpReply {
    /// URL the reply came from, as the transport saw it.
    pub url: String,
    /// Content type advertised by the reply, if any.
    pub content_type: Option<String>,
    /// Raw reply payload.
    pub body: Bytes,
}

/// What a transport hands back before classification
#[derive(Debug)]
pub enum RawReply {
    /// The reply parsed as an HTTP response.
    Http(HttpReply),
    /// The reply is not classifiable as HTTP (malformed, non-HTTP scheme).
    NonHttp(NonHttpReply),
}

/// Async transport trait
///
/// A transport makes exactly one attempt per [`perform`](Transport::perform)
/// call: no retries, no caching, no streaming. Cancellation is cooperative
/// and Rust-native: dropping the returned future must abort the underlying
/// I/O rather than letting it run detached.
///
/// # Example
///
/// ```ignore
/// use transport_traits::{Transport, FetchRequest, HttpMethod};
///
/// async fn probe(transport: &dyn Transport) -> transport_traits::Result<u16> {
///     let request = FetchRequest::new(HttpMethod::Head, "https://api.example.com/health");
///     match transport.perform(&request).await? {
///         transport_traits::RawReply::Http(reply) => Ok(reply.status),
///         transport_traits::RawReply::NonHttp(_) => Ok(0),
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a single request attempt
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network connection fails
    /// - TLS validation fails
    /// - The request times out
    /// - The in-flight call is aborted
    async fn perform(&self, request: &FetchRequest) -> Result<RawReply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_request_builder() {
        let request = FetchRequest::new(HttpMethod::Get, "https://example.com")
            .header("User-Agent", "test")
            .bearer_token("secret")
            .timeout(Duration::from_secs(30));

        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.headers.get("User-Agent"), Some(&"test".to_string()));
        assert!(request.headers.contains_key("Authorization"));
        assert_eq!(request.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_fetch_request_json_body_sets_content_type() {
        let payload = serde_json::json!({ "name": "value" });
        let request = FetchRequest::new(HttpMethod::Post, "https://example.com")
            .json(&payload)
            .unwrap();

        assert!(request.body.is_some());
        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_http_reply_status_checks() {
        let reply = HttpReply {
            status: 204,
            headers: HashMap::new(),
            body: Bytes::new(),
        };

        assert!(reply.is_success());
        assert!(!reply.is_client_error());
        assert!(!reply.is_server_error());

        let reply = HttpReply {
            status: 404,
            headers: HashMap::new(),
            body: Bytes::from("missing"),
        };

        assert!(!reply.is_success());
        assert!(reply.is_client_error());
    }

    #[test]
    fn test_http_reply_text() {
        let reply = HttpReply {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from("hello"),
        };

        assert_eq!(reply.text().unwrap(), "hello");
    }
}
