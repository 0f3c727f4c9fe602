//! The Spiget endpoint catalog.
//!
//! # Design
//! Every API path the client knows is one `Endpoint` variant. A variant
//! knows its path segments and, for single-entity lookups, the message a 404
//! maps to. `SpigetClient` drives all of them through the same pipeline, so
//! adding an endpoint means adding a variant and a thin method.

use std::fmt;

/// One API path, with its identifiers filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Status,
    Resources,
    Resource(u64),
    ResourceAuthor(u64),
    ResourceVersions(u64),
    ResourceVersion { resource: u64, version: u64 },
    LatestResourceVersion(u64),
    ResourceUpdates(u64),
    LatestResourceUpdate(u64),
    ResourceReviews(u64),
    Authors,
    Author(u64),
    AuthorResources(u64),
    AuthorReviews(u64),
    Categories,
    Category(u64),
    CategoryResources(u64),
    SearchResources(&'a str),
    SearchAuthors(&'a str),
    Download { resource: u64, version: u64, proxy: bool },
}

impl Endpoint<'_> {
    /// Path segments relative to the base URL, unescaped.
    pub fn segments(&self) -> Vec<String> {
        use Endpoint::*;

        match *self {
            Status => vec!["status".to_string()],
            Resources => vec!["resources".to_string()],
            Resource(id) => join("resources", id, &[]),
            ResourceAuthor(id) => join("resources", id, &["author"]),
            ResourceVersions(id) => join("resources", id, &["versions"]),
            ResourceVersion { resource, version } => {
                let mut segments = join("resources", resource, &["versions"]);
                segments.push(version.to_string());
                segments
            }
            LatestResourceVersion(id) => join("resources", id, &["versions", "latest"]),
            ResourceUpdates(id) => join("resources", id, &["updates"]),
            LatestResourceUpdate(id) => join("resources", id, &["updates", "latest"]),
            ResourceReviews(id) => join("resources", id, &["reviews"]),
            Authors => vec!["authors".to_string()],
            Author(id) => join("authors", id, &[]),
            AuthorResources(id) => join("authors", id, &["resources"]),
            AuthorReviews(id) => join("authors", id, &["reviews"]),
            Categories => vec!["categories".to_string()],
            Category(id) => join("categories", id, &[]),
            CategoryResources(id) => join("categories", id, &["resources"]),
            SearchResources(query) => vec!["search".to_string(), "resources".to_string(), query.to_string()],
            SearchAuthors(query) => vec!["search".to_string(), "authors".to_string(), query.to_string()],
            Download { resource, version, proxy } => {
                let mut segments = join("resources", resource, &["versions"]);
                segments.push(version.to_string());
                segments.push("download".to_string());
                if proxy {
                    segments.push("proxy".to_string());
                }
                segments
            }
        }
    }

    /// Message reported when this endpoint answers 404, or `None` when a 404
    /// is just another unexpected status.
    pub fn not_found(&self) -> Option<&'static str> {
        use Endpoint::*;

        match self {
            Resource(_) => Some("resource not found"),
            ResourceAuthor(_) => Some("resource author not found"),
            ResourceVersion { .. } => Some("resource version not found"),
            LatestResourceVersion(_) => Some("latest resource version not found"),
            LatestResourceUpdate(_) => Some("latest resource update not found"),
            Author(_) => Some("author not found"),
            Category(_) => Some("category not found"),
            _ => None,
        }
    }
}

/// `head`, the identifier, then `tail`.
fn join(head: &str, id: u64, tail: &[&str]) -> Vec<String> {
    [head.to_string(), id.to_string()]
        .into_iter()
        .chain(tail.iter().map(|s| (*s).to_string()))
        .collect()
}

/// Renders the unescaped path, e.g. `/resources/42/versions/latest`.
impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments() {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
