//! Error types for the Spiget client.
//!
//! # Design
//! `ApiError` is flat: one variant per way a call can fail, each carrying
//! just enough context to diagnose the failure. `NotFound` is only produced
//! by endpoints that fetch a single entity; list and search endpoints report
//! a 404 as `UnexpectedStatus(404)`.
//!
//! Downloads add a second layer, `DownloadError`, so callers can tell "the
//! API call failed" apart from "the API call succeeded but writing the bytes
//! locally failed."

use thiserror::Error;

/// Errors returned by every `SpigetClient` endpoint method.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response: connect, DNS, TLS, timeout or
    /// body read failure.
    #[error("request error: {0}")]
    Request(String),

    /// The server returned 404 for a single-entity lookup.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// The server returned a status other than 200 (and other than a 404 the
    /// endpoint knows how to describe).
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// The body could not be decoded into the expected type.
    #[error("failed to unmarshal response: {0}")]
    Unmarshal(String),
}

/// Errors returned by the download operations.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Creating or writing the sink failed after the API call succeeded.
    #[error("failed to write download: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning a `ClientConfig` into a client.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("base url must be http or https: {0}")]
    UnsupportedBaseUrl(String),

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}
