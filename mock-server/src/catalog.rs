//! In-memory catalog served by the mock.
//!
//! The DTOs here are the server's view of Spiget's JSON and are defined
//! independently from `spiget-core`. Optional nested objects are omitted
//! from the JSON when absent, as the real API does for sparse resources.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFile {
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: f64,
    pub size_unit: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Icon {
    pub url: String,
    pub data: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Rating {
    pub count: u64,
    pub average: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub tag: String,
    pub contributors: String,
    pub likes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<ResourceFile>,
    pub tested_versions: Vec<String>,
    pub links: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    pub release_date: i64,
    pub update_date: i64,
    pub downloads: u64,
    pub external: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub premium: bool,
    pub price: f64,
    pub currency: String,
    pub description: String,
    pub documentation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_link: Option<String>,
    #[serde(skip)]
    pub author_id: u64,
    #[serde(skip)]
    pub category_id: u64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceVersion {
    pub id: u64,
    pub resource: u64,
    pub uuid: Uuid,
    pub name: String,
    pub release_date: i64,
    pub downloads: u64,
    pub rating: Rating,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResourceUpdate {
    pub id: u64,
    pub resource: u64,
    pub title: String,
    pub description: String,
    pub date: i64,
    pub likes: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReview {
    pub author: Author,
    pub rating: Rating,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,
    pub version: String,
    pub date: i64,
    #[serde(skip)]
    pub resource_id: u64,
}

/// Everything the mock knows about.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub resources: Vec<Resource>,
    pub authors: Vec<Author>,
    pub categories: Vec<Category>,
    pub versions: Vec<ResourceVersion>,
    pub updates: Vec<ResourceUpdate>,
    pub reviews: Vec<ResourceReview>,
    /// When set, every route answers with this status instead.
    pub outage: Option<u16>,
}

/// Bytes served for a version download. Deliberately not valid UTF-8.
pub fn file_bytes(resource: u64, version: u64) -> Vec<u8> {
    let mut bytes = b"PK\x03\x04".to_vec();
    bytes.extend(format!("resource={resource};version={version}").bytes());
    bytes.extend([0x00, 0xff, 0xfe, 0x80]);
    bytes
}

impl Catalog {
    /// Id of the fully populated, directly downloadable resource.
    pub const WORLDGUARD: u64 = 1000;
    /// Id of the sparse resource hosted externally; direct downloads are blocked.
    pub const CHATGUARD: u64 = 1001;
    pub const MD_5: u64 = 100;
    pub const GHOST: u64 = 101;

    /// A small catalog: two authors, three categories, two resources with
    /// versions, one update and two reviews.
    pub fn sample() -> Self {
        let md_5 = Author {
            id: Self::MD_5,
            name: "md_5".to_string(),
            icon: Some(Icon {
                url: "data/avatars/l/0/100.jpg".to_string(),
                data: "iVBORw0KGgo=".to_string(),
            }),
        };
        let ghost = Author {
            id: Self::GHOST,
            name: "Ghost".to_string(),
            icon: None,
        };

        let worldguard = Resource {
            id: Self::WORLDGUARD,
            name: "WorldGuard".to_string(),
            tag: "Protect your world".to_string(),
            contributors: "md_5, Ghost".to_string(),
            likes: 812,
            file: Some(ResourceFile {
                file_type: ".jar".to_string(),
                size: 1.4,
                size_unit: "MB".to_string(),
                url: "resources/worldguard.1000/download?version=5001".to_string(),
                external_url: None,
            }),
            tested_versions: vec!["1.19".to_string(), "1.20".to_string()],
            links: BTreeMap::from([("discussion".to_string(), "threads/worldguard.1/".to_string())]),
            rating: Some(Rating {
                count: 120,
                average: 4.8,
            }),
            release_date: 1_575_822_458,
            update_date: 1_690_000_000,
            downloads: 1_200_000,
            external: false,
            icon: Some(Icon {
                url: "data/resource_icons/1/1000.jpg".to_string(),
                data: String::new(),
            }),
            premium: true,
            price: 4.99,
            currency: "USD".to_string(),
            description: "PGI+V29ybGRHdWFyZDwvYj4=".to_string(),
            documentation: "PGk+ZG9jczwvaT4=".to_string(),
            source_code_link: Some("https://github.com/example/worldguard".to_string()),
            donation_link: Some("https://paypal.me/example".to_string()),
            author_id: Self::MD_5,
            category_id: 2,
        };
        let chatguard = Resource {
            id: Self::CHATGUARD,
            name: "ChatGuard".to_string(),
            tag: String::new(),
            contributors: String::new(),
            likes: 3,
            file: None,
            tested_versions: Vec::new(),
            links: BTreeMap::new(),
            rating: None,
            release_date: 1_600_000_000,
            update_date: 1_600_000_000,
            downloads: 17,
            external: true,
            icon: None,
            premium: false,
            price: 0.0,
            currency: String::new(),
            description: String::new(),
            documentation: String::new(),
            source_code_link: None,
            donation_link: None,
            author_id: Self::GHOST,
            category_id: 4,
        };

        let versions = vec![
            ResourceVersion {
                id: 5000,
                resource: Self::WORLDGUARD,
                uuid: Uuid::from_u128(0x1b4e28ba_2fa1_11d2_883f_0016d3cca427),
                name: "7.2.14".to_string(),
                release_date: 1_680_000_000,
                downloads: 900,
                rating: Rating { count: 4, average: 4.0 },
            },
            ResourceVersion {
                id: 5001,
                resource: Self::WORLDGUARD,
                uuid: Uuid::from_u128(0x6f0c1a3e_8b5d_4f8e_9a44_3f2c5b7d9e10),
                name: "7.2.15".to_string(),
                release_date: 1_690_000_000,
                downloads: 42,
                rating: Rating { count: 1, average: 5.0 },
            },
            ResourceVersion {
                id: 5100,
                resource: Self::CHATGUARD,
                uuid: Uuid::from_u128(0x9a7c3d21_0e4f_4b6a_8c2d_5e1f7a9b3c40),
                name: "1.0".to_string(),
                release_date: 1_600_000_000,
                downloads: 17,
                rating: Rating { count: 0, average: 0.0 },
            },
        ];

        let updates = vec![ResourceUpdate {
            id: 7000,
            resource: Self::WORLDGUARD,
            title: "7.2.15 released".to_string(),
            description: "PHA+Rml4ZXMgZXZlcnl0aGluZzwvcD4=".to_string(),
            date: 1_690_000_000,
            likes: 9,
        }];

        let reviews = vec![
            ResourceReview {
                author: ghost.clone(),
                rating: Rating { count: 1, average: 5.0 },
                message: "Works great".to_string(),
                response_message: Some("Thanks!".to_string()),
                version: "7.2.15".to_string(),
                date: 1_690_100_000,
                resource_id: Self::WORLDGUARD,
            },
            ResourceReview {
                author: md_5.clone(),
                rating: Rating { count: 1, average: 3.0 },
                message: "Needs docs".to_string(),
                response_message: None,
                version: "1.0".to_string(),
                date: 1_600_100_000,
                resource_id: Self::CHATGUARD,
            },
        ];

        Self {
            resources: vec![worldguard, chatguard],
            authors: vec![md_5, ghost],
            categories: vec![
                Category { id: 1, name: "Bungee - Spigot".to_string() },
                Category { id: 2, name: "Spigot".to_string() },
                Category { id: 4, name: "Chat".to_string() },
            ],
            versions,
            updates,
            reviews,
            outage: None,
        }
    }

    /// The same catalog, answering every request with `status`.
    pub fn with_outage(mut self, status: u16) -> Self {
        self.outage = Some(status);
        self
    }
}
