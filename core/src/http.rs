//! HTTP transport types.
//!
//! # Design
//! Requests and responses are plain data. `SpigetClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and parses the `HttpResponse`
//! it gets back. The default transport is `UreqTransport`; tests and hosts
//! with their own HTTP stack can plug in anything implementing `Transport`.
//!
//! Every request is a GET, so there is no method field. The body is kept as
//! raw bytes because the download endpoints return binary files.

use crate::error::ApiError;

/// A GET request described as plain data.
///
/// `url` is fully composed: base URL, percent-encoded path segments and the
/// query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// Non-2xx statuses are still responses; only failures to obtain a response
/// at all are transport errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Response headers as received. `SpigetClient` never reads them; they
    /// are kept for hosts driving `build_request`/`parse_response` themselves
    /// or wrapping a `Transport` (rate-limit and caching headers).
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Shorthand for a response with no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Executes GET requests.
///
/// Implementations must be usable from several threads at once and must not
/// block past their own timeout. Any failure to obtain a response is reported
/// as `ApiError::Request`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}
