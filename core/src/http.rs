//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and interprets `HttpResponse` values; executing the exchange is the
//! job of a `Transport` (see `crate::transport`). A failed exchange in which
//! no response arrived is reported as a `TransportError` so the normalization
//! layer can tell "no answer" apart from "an answer with a bad status".

use std::time::Duration;

/// HTTP method for a request. The API surface is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `query` holds the parameters in the order they should be appended to
/// `url`. `timeout` is the upper bound the transport must enforce for the
/// whole exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Look up a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// An exchange that ended without any response from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The exchange was aborted because it exceeded the request timeout.
    Timeout,
    /// The server could not be reached (refused, DNS failure, reset, ...).
    /// A connection dropped while the body was still streaming also lands
    /// here: the partial response is unusable and is discarded.
    Connect(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        let mut response = HttpResponse {
            status: 200,
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 299;
        assert!(response.is_success());
        response.status = 304;
        assert!(!response.is_success());
        response.status = 199;
        assert!(!response.is_success());
    }

    #[test]
    fn query_param_finds_by_name() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost:8000/api/operadoras".to_string(),
            query: vec![("page".to_string(), "2".to_string())],
            headers: Vec::new(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(req.query_param("page"), Some("2"));
        assert_eq!(req.query_param("q"), None);
    }
}
