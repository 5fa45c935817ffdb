//! Transport seam between the sans-IO client and the network.
//!
//! `Transport` is the only place a request leaves the process. `UreqTransport`
//! is the blocking implementation used in production; tests swap in fakes.

use std::io;

use crate::http::{HttpRequest, HttpResponse, TransportError};

/// Executes one `HttpRequest` and returns whatever response arrived.
///
/// Non-2xx statuses are responses, not errors: implementations return them as
/// `Ok` and leave classification to the caller. `Err` means no response was
/// received.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Largest success or error body `UreqTransport` will read (ureq's own default
/// is 10 MiB).
pub const MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// Blocking transport built on `ureq`.
#[derive(Debug, Default, Clone)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        // Status codes are data here; the timeout covers the whole exchange.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(request.timeout))
            .build()
            .new_agent();

        let mut builder = agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        for (name, value) in &request.query {
            builder = builder.query(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(transport_error)?;

        let status = response.status().as_u16();
        // A body that breaks off mid-stream is reported like a lost connection.
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()
            .map_err(transport_error)?;

        Ok(HttpResponse { status, body })
    }
}

fn transport_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::Io(e) if is_timeout(&e) => TransportError::Timeout,
        other => TransportError::Connect(other.to_string()),
    }
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}
