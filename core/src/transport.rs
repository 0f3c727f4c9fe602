//! Default blocking transport backed by `ureq`.

use std::fmt;
use std::time::Duration;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Upper bound on a response body. Plugin jars are far below this; the cap
/// only exists so a misbehaving server cannot exhaust memory.
const MAX_BODY_BYTES: u64 = 512 * 1024 * 1024;

/// `Transport` implementation using a shared `ureq::Agent`.
///
/// The agent is configured so 4xx/5xx statuses come back as responses
/// rather than errors, and so every call is bounded by a global timeout
/// covering connect, send and body read.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}
