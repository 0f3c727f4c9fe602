//! Synchronous client for the Spiget resource-catalog API.
//!
//! # Overview
//! `SpigetClient` exposes one method per API endpoint (status, resources,
//! versions, updates, reviews, authors, categories, search, downloads). Each
//! call is a single blocking GET bounded by the configured timeout, and
//! returns a typed value or an `ApiError`.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`);
//!   the network sits behind the `Transport` trait, with `UreqTransport` as
//!   the default.
//! - `Endpoint` is the catalog of paths and their 404 policy; all methods
//!   share one build → execute → classify → decode pipeline.
//! - The client never retries and never logs above `debug`; callers own
//!   retry policy and user-facing messages.
//!
//! ```no_run
//! use spiget_core::{ClientConfig, QueryParams, SpigetClient};
//!
//! let client = SpigetClient::new(ClientConfig::default())?;
//! let query = QueryParams::from([("size".to_string(), "10".to_string())]);
//! for resource in client.get_resources(Some(&query))? {
//!     println!("{} ({} downloads)", resource.name, resource.downloads);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod user_agent;

pub use client::{QueryParams, SpigetClient};
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::{ApiError, ConfigError, DownloadError};
pub use http::{HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
pub use types::{
    Author, Category, Icon, Resource, ResourceFile, ResourceRating, ResourceReview, ResourceUpdate,
    ResourceVersion, StatusReport,
};
pub use user_agent::UserAgent;
