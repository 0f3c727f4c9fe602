//! Domain DTOs for the Spiget API.
//!
//! # Design
//! These types mirror the JSON bodies Spiget returns, field names in
//! camelCase. Nested records the API leaves out for some resources (`file`,
//! `icon`, `rating`, the link fields, a review's response) are `Option`s so
//! "absent" never looks like "present but empty". Only `id` is required:
//! a `fields` query makes Spiget return just the listed keys, so every other
//! scalar and collection defaults to zero or empty when missing. The mock-server
//! defines its own copies of these shapes; the integration tests catch drift.

use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

/// Open-ended body of `/status`.
pub type StatusReport = serde_json::Map<String, serde_json::Value>;

/// File metadata attached to a resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFile {
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: f64,
    pub size_unit: String,
    pub url: String,
    #[serde(default)]
    pub external_url: Option<String>,
}

/// A resource icon or author avatar. Either a URL, inline base64 data, or both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Icon {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceRating {
    pub count: u64,
    pub average: f64,
}

/// A catalog entry, typically a plugin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub contributors: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub file: Option<ResourceFile>,
    #[serde(default)]
    pub tested_versions: Vec<String>,
    #[serde(default)]
    pub links: BTreeMap<String, String>,
    #[serde(default)]
    pub rating: Option<ResourceRating>,
    #[serde(default)]
    pub release_date: i64,
    #[serde(default)]
    pub update_date: i64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub external: bool,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub source_code_link: Option<String>,
    #[serde(default)]
    pub donation_link: Option<String>,
}

/// A released build of a resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceVersion {
    pub id: u64,
    /// Id of the owning resource; `0` when filtered out of the body.
    #[serde(default)]
    pub resource: u64,
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub release_date: i64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub rating: Option<ResourceRating>,
}

/// A changelog entry of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceUpdate {
    pub id: u64,
    #[serde(default)]
    pub resource: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// A rated comment on a resource. Reviews have no id of their own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReview {
    pub author: Author,
    pub rating: ResourceRating,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub response_message: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub date: i64,
}
