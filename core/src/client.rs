//! Typed client for the Spiget API.
//!
//! # Design
//! `SpigetClient` holds a validated base URL, the default headers and a
//! `Transport`; nothing in it changes after construction, so one instance
//! can be shared across threads. Every endpoint method is a thin call into
//! `fetch`, which runs the same four steps: build the request, execute it,
//! classify the status, decode the body.
//!
//! The two halves of that pipeline are public (`build_request` and
//! `parse_response`) so a host that does its own I/O can still use the
//! client for URL composition and response interpretation.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, ConfigError, DownloadError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;
use crate::types::{
    Author, Category, Resource, ResourceReview, ResourceUpdate, ResourceVersion, StatusReport,
};

/// Query parameters passed through verbatim (`size`, `page`, `sort`,
/// `fields`, ...). Sent in key order.
pub type QueryParams = BTreeMap<String, String>;

/// Synchronous client for the Spiget API.
#[derive(Debug, Clone)]
pub struct SpigetClient<T = UreqTransport> {
    base_url: Url,
    headers: Vec<(String, String)>,
    transport: T,
}

impl SpigetClient<UreqTransport> {
    /// Build a client that talks HTTP through `ureq`.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        if config.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> SpigetClient<T> {
    /// Build a client on top of any `Transport`. The timeout in `config` is
    /// the transport's business here.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ConfigError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedBaseUrl(config.base_url));
        }

        let mut headers = Vec::with_capacity(config.headers.len() + 1);
        if let Some(user_agent) = config.user_agent.resolve() {
            headers.push(("user-agent".to_string(), user_agent));
        }
        headers.extend(config.headers);

        Ok(Self {
            base_url,
            headers,
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Compose the GET request for `endpoint`. Path segments are
    /// percent-encoded one by one; an empty query adds no `?`.
    pub fn build_request(&self, endpoint: &Endpoint<'_>, query: Option<&QueryParams>) -> HttpRequest {
        let mut url = self.base_url.clone();
        // The base URL was checked to be a base in `with_transport`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.query_pairs_mut().extend_pairs(query);
        }

        HttpRequest {
            url: url.into(),
            headers: self.headers.clone(),
        }
    }

    /// Classify `response` for `endpoint` and decode its body.
    pub fn parse_response<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<'_>,
        response: &HttpResponse,
    ) -> Result<R, ApiError> {
        check_status(endpoint, response)?;
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Unmarshal(e.to_string()))
    }

    fn execute(&self, endpoint: &Endpoint<'_>, query: Option<&QueryParams>) -> Result<HttpResponse, ApiError> {
        let span = tracing::debug_span!("spiget_get", path = %endpoint);
        let _guard = span.enter();

        let request = self.build_request(endpoint, query);
        debug!(url = %request.url, "dispatching request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }

    fn fetch<R: DeserializeOwned>(&self, endpoint: Endpoint<'_>, query: Option<&QueryParams>) -> Result<R, ApiError> {
        let response = self.execute(&endpoint, query)?;
        self.parse_response(&endpoint, &response)
    }

    pub fn get_status(&self) -> Result<StatusReport, ApiError> {
        self.fetch(Endpoint::Status, None)
    }

    pub fn get_resources(&self, query: Option<&QueryParams>) -> Result<Vec<Resource>, ApiError> {
        self.fetch(Endpoint::Resources, query)
    }

    pub fn get_resource(&self, resource_id: u64) -> Result<Resource, ApiError> {
        self.fetch(Endpoint::Resource(resource_id), None)
    }

    pub fn get_resource_author(&self, resource_id: u64) -> Result<Author, ApiError> {
        self.fetch(Endpoint::ResourceAuthor(resource_id), None)
    }

    pub fn get_resource_versions(
        &self,
        resource_id: u64,
        query: Option<&QueryParams>,
    ) -> Result<Vec<ResourceVersion>, ApiError> {
        self.fetch(Endpoint::ResourceVersions(resource_id), query)
    }

    pub fn get_resource_version(&self, resource_id: u64, version_id: u64) -> Result<ResourceVersion, ApiError> {
        self.fetch(
            Endpoint::ResourceVersion {
                resource: resource_id,
                version: version_id,
            },
            None,
        )
    }

    pub fn get_latest_resource_version(&self, resource_id: u64) -> Result<ResourceVersion, ApiError> {
        self.fetch(Endpoint::LatestResourceVersion(resource_id), None)
    }

    pub fn get_resource_updates(
        &self,
        resource_id: u64,
        query: Option<&QueryParams>,
    ) -> Result<Vec<ResourceUpdate>, ApiError> {
        self.fetch(Endpoint::ResourceUpdates(resource_id), query)
    }

    pub fn get_latest_resource_update(&self, resource_id: u64) -> Result<ResourceUpdate, ApiError> {
        self.fetch(Endpoint::LatestResourceUpdate(resource_id), None)
    }

    pub fn get_resource_reviews(
        &self,
        resource_id: u64,
        query: Option<&QueryParams>,
    ) -> Result<Vec<ResourceReview>, ApiError> {
        self.fetch(Endpoint::ResourceReviews(resource_id), query)
    }

    pub fn get_authors(&self, query: Option<&QueryParams>) -> Result<Vec<Author>, ApiError> {
        self.fetch(Endpoint::Authors, query)
    }

    pub fn get_author(&self, author_id: u64) -> Result<Author, ApiError> {
        self.fetch(Endpoint::Author(author_id), None)
    }

    pub fn get_author_resources(&self, author_id: u64, query: Option<&QueryParams>) -> Result<Vec<Resource>, ApiError> {
        self.fetch(Endpoint::AuthorResources(author_id), query)
    }

    /// Reviews written by the author.
    pub fn get_author_reviews(
        &self,
        author_id: u64,
        query: Option<&QueryParams>,
    ) -> Result<Vec<ResourceReview>, ApiError> {
        self.fetch(Endpoint::AuthorReviews(author_id), query)
    }

    pub fn get_categories(&self, query: Option<&QueryParams>) -> Result<Vec<Category>, ApiError> {
        self.fetch(Endpoint::Categories, query)
    }

    pub fn get_category(&self, category_id: u64) -> Result<Category, ApiError> {
        self.fetch(Endpoint::Category(category_id), None)
    }

    pub fn get_category_resources(
        &self,
        category_id: u64,
        query: Option<&QueryParams>,
    ) -> Result<Vec<Resource>, ApiError> {
        self.fetch(Endpoint::CategoryResources(category_id), query)
    }

    pub fn search_resources(&self, term: &str, query: Option<&QueryParams>) -> Result<Vec<Resource>, ApiError> {
        self.fetch(Endpoint::SearchResources(term), query)
    }

    pub fn search_authors(&self, term: &str, query: Option<&QueryParams>) -> Result<Vec<Author>, ApiError> {
        self.fetch(Endpoint::SearchAuthors(term), query)
    }

    /// Fetch a version's file and write it to `sink`. With `proxy` set the
    /// file is fetched through Spiget's relay instead of the origin host.
    ///
    /// Returns the number of bytes written.
    pub fn download<W: Write + ?Sized>(
        &self,
        resource_id: u64,
        version_id: u64,
        proxy: bool,
        sink: &mut W,
    ) -> Result<u64, DownloadError> {
        let body = self.fetch_file(resource_id, version_id, proxy)?;
        sink.write_all(&body)?;
        sink.flush()?;
        Ok(body.len() as u64)
    }

    pub fn download_version<W: Write + ?Sized>(
        &self,
        version: &ResourceVersion,
        proxy: bool,
        sink: &mut W,
    ) -> Result<u64, DownloadError> {
        self.download(version.resource, version.id, proxy, sink)
    }

    /// Like `download_version`, writing to a file at `path`. The file is only
    /// created once the API has answered 200.
    pub fn download_version_to_path(
        &self,
        version: &ResourceVersion,
        path: impl AsRef<Path>,
        proxy: bool,
    ) -> Result<u64, DownloadError> {
        let body = self.fetch_file(version.resource, version.id, proxy)?;
        let mut file = File::create(path)?;
        file.write_all(&body)?;
        file.sync_all()?;
        Ok(body.len() as u64)
    }

    fn fetch_file(&self, resource_id: u64, version_id: u64, proxy: bool) -> Result<Vec<u8>, ApiError> {
        let endpoint = Endpoint::Download {
            resource: resource_id,
            version: version_id,
            proxy,
        };
        let response = self.execute(&endpoint, None)?;
        check_status(&endpoint, &response)?;
        Ok(response.body)
    }
}

/// Map non-200 statuses to the appropriate `ApiError` variant.
fn check_status(endpoint: &Endpoint<'_>, response: &HttpResponse) -> Result<(), ApiError> {
    match (response.status, endpoint.not_found()) {
        (200, _) => Ok(()),
        (404, Some(message)) => Err(ApiError::NotFound(message)),
        (status, _) => Err(ApiError::UnexpectedStatus(status)),
    }
}
