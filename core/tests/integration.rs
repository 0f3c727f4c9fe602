//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port with its own catalog,
//! then drives `SpigetClient` over real HTTP through the default ureq
//! transport. This checks URL composition, status classification and DTO
//! decoding against a server that defines its own copies of the schema.

use std::sync::Arc;
use std::time::{Duration, Instant};

use mock_server::{file_bytes, Catalog};
use spiget_core::{
    ApiError, ClientConfig, DownloadError, HttpRequest, QueryParams, SpigetClient, Transport, UreqTransport, UserAgent,
};

/// Start the mock server on a random port and return its base URL.
fn start_server(catalog: Catalog) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, catalog).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client_for(base_url: &str) -> SpigetClient {
    let config = ClientConfig::default()
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5));
    SpigetClient::new(config).unwrap()
}

fn size(n: usize) -> QueryParams {
    QueryParams::from([("size".to_string(), n.to_string())])
}

#[test]
fn catalog_walkthrough() {
    let client = client_for(&start_server(Catalog::sample()));

    // Step 1: status is an open map.
    let status = client.get_status().unwrap();
    assert_eq!(status["stats"]["resources"], 2);

    // Step 2: list resources, both fully populated and sparse.
    let resources = client.get_resources(Some(&size(20))).unwrap();
    assert_eq!(resources.len(), 2);
    let full = &resources[0];
    assert_eq!(full.id, Catalog::WORLDGUARD);
    assert!(full.file.is_some() && full.rating.is_some() && full.icon.is_some());
    assert_eq!(full.source_code_link.as_deref(), Some("https://github.com/example/worldguard"));
    let sparse = &resources[1];
    assert_eq!(sparse.id, Catalog::CHATGUARD);
    assert!(sparse.file.is_none() && sparse.rating.is_none() && sparse.icon.is_none());
    assert!(sparse.donation_link.is_none());

    // Step 3: single resource equals its list entry.
    let resource = client.get_resource(Catalog::WORLDGUARD).unwrap();
    assert_eq!(&resource, full);

    // Step 4: versions, one by id, latest.
    let versions = client.get_resource_versions(Catalog::WORLDGUARD, Some(&size(20))).unwrap();
    assert_eq!(versions.len(), 2);
    let version = client.get_resource_version(Catalog::WORLDGUARD, versions[0].id).unwrap();
    assert_eq!(version, versions[0]);
    let latest = client.get_latest_resource_version(Catalog::WORLDGUARD).unwrap();
    assert_eq!(latest.id, 5001);
    assert_eq!(latest.uuid.unwrap().to_string(), "6f0c1a3e-8b5d-4f8e-9a44-3f2c5b7d9e10");

    // Step 5: updates and reviews.
    let updates = client.get_resource_updates(Catalog::WORLDGUARD, None).unwrap();
    assert_eq!(updates.len(), 1);
    let latest_update = client.get_latest_resource_update(Catalog::WORLDGUARD).unwrap();
    assert_eq!(latest_update, updates[0]);
    let reviews = client.get_resource_reviews(Catalog::WORLDGUARD, None).unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].author.name, "Ghost");
    assert_eq!(reviews[0].response_message.as_deref(), Some("Thanks!"));

    // Step 6: the resource's author.
    let author = client.get_resource_author(Catalog::WORLDGUARD).unwrap();
    assert_eq!(author.id, Catalog::MD_5);

    // Step 7: authors.
    let authors = client.get_authors(None).unwrap();
    assert_eq!(authors.len(), 2);
    let ghost = client.get_author(Catalog::GHOST).unwrap();
    assert!(ghost.icon.is_none());
    let ghost_resources = client.get_author_resources(Catalog::GHOST, None).unwrap();
    assert_eq!(ghost_resources.len(), 1);
    assert_eq!(ghost_resources[0].id, Catalog::CHATGUARD);
    let ghost_reviews = client.get_author_reviews(Catalog::GHOST, None).unwrap();
    assert_eq!(ghost_reviews.len(), 1);

    // Step 8: categories.
    let categories = client.get_categories(None).unwrap();
    assert_eq!(categories.len(), 3);
    let chat = client.get_category(4).unwrap();
    assert_eq!(chat.name, "Chat");
    let chat_resources = client.get_category_resources(4, None).unwrap();
    assert_eq!(chat_resources.len(), 1);

    // Step 9: search.
    let found = client.search_resources("guard", None).unwrap();
    assert_eq!(found.len(), 2);
    let found = client.search_authors("md_", None).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "md_5");
}

#[test]
fn not_found_for_every_single_entity_endpoint() {
    let client = client_for(&start_server(Catalog::sample()));

    assert_eq!(client.get_resource(9).unwrap_err(), ApiError::NotFound("resource not found"));
    assert_eq!(
        client.get_resource_author(9).unwrap_err(),
        ApiError::NotFound("resource author not found")
    );
    assert_eq!(
        client.get_resource_version(Catalog::WORLDGUARD, 9).unwrap_err(),
        ApiError::NotFound("resource version not found")
    );
    assert_eq!(
        client.get_latest_resource_version(9).unwrap_err(),
        ApiError::NotFound("latest resource version not found")
    );
    assert_eq!(
        client.get_latest_resource_update(Catalog::CHATGUARD).unwrap_err(),
        ApiError::NotFound("latest resource update not found")
    );
    assert_eq!(client.get_author(9).unwrap_err(), ApiError::NotFound("author not found"));
    assert_eq!(client.get_category(9).unwrap_err(), ApiError::NotFound("category not found"));
}

#[test]
fn list_endpoints_return_empty_for_unknown_parent() {
    let client = client_for(&start_server(Catalog::sample()));
    assert!(client.get_resource_versions(9, None).unwrap().is_empty());
    assert!(client.get_author_resources(9, None).unwrap().is_empty());
    assert!(client.search_authors("nobody here", None).unwrap().is_empty());
}

#[test]
fn outage_yields_unexpected_status() {
    let client = client_for(&start_server(Catalog::sample().with_outage(503)));

    assert_eq!(client.get_status().unwrap_err(), ApiError::UnexpectedStatus(503));
    assert_eq!(client.get_resource(Catalog::WORLDGUARD).unwrap_err(), ApiError::UnexpectedStatus(503));
    assert_eq!(client.get_authors(None).unwrap_err(), ApiError::UnexpectedStatus(503));

    let mut sink = Vec::new();
    let err = client.download(Catalog::WORLDGUARD, 5001, true, &mut sink).unwrap_err();
    assert!(matches!(err, DownloadError::Api(ApiError::UnexpectedStatus(503))));
    assert!(sink.is_empty());
}

#[test]
fn query_params_reach_the_server() {
    let client = client_for(&start_server(Catalog::sample()));

    assert_eq!(client.get_resources(Some(&size(1))).unwrap().len(), 1);

    let second_page = QueryParams::from([
        ("size".to_string(), "1".to_string()),
        ("page".to_string(), "2".to_string()),
    ]);
    let page = client.get_resources(Some(&second_page)).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, Catalog::CHATGUARD);
}

#[test]
fn search_term_with_spaces_and_slashes() {
    let client = client_for(&start_server(Catalog::sample()));
    assert!(client.search_resources("world guard/extra", None).unwrap().is_empty());
}

#[test]
fn download_direct_and_proxy_to_files() {
    let client = client_for(&start_server(Catalog::sample()));
    let dir = tempfile::tempdir().unwrap();

    let latest = client.get_latest_resource_version(Catalog::WORLDGUARD).unwrap();
    let direct = dir.path().join("direct.jar");
    let written = client.download_version_to_path(&latest, &direct, false).unwrap();
    let expected = file_bytes(Catalog::WORLDGUARD, latest.id);
    assert_eq!(written, expected.len() as u64);
    assert_eq!(std::fs::read(&direct).unwrap(), expected);

    let proxied = dir.path().join("proxied.jar");
    client.download_version_to_path(&latest, &proxied, true).unwrap();
    assert_eq!(std::fs::read(&proxied).unwrap(), expected);
}

#[test]
fn blocked_direct_download_falls_back_to_proxy() {
    let client = client_for(&start_server(Catalog::sample()));
    let dir = tempfile::tempdir().unwrap();
    let version = client.get_latest_resource_version(Catalog::CHATGUARD).unwrap();
    let path = dir.path().join("chatguard.jar");

    let err = client.download_version_to_path(&version, &path, false).unwrap_err();
    assert!(matches!(err, DownloadError::Api(ApiError::UnexpectedStatus(403))));
    assert!(!path.exists(), "no file is created when the API call fails");

    let mut sink = Vec::new();
    client.download_version(&version, true, &mut sink).unwrap();
    assert_eq!(sink, file_bytes(Catalog::CHATGUARD, version.id));
}

#[test]
fn unwritable_destination_is_io_error() {
    let client = client_for(&start_server(Catalog::sample()));
    let dir = tempfile::tempdir().unwrap();
    let version = client.get_latest_resource_version(Catalog::WORLDGUARD).unwrap();
    let path = dir.path().join("missing-dir").join("file.jar");

    let err = client.download_version_to_path(&version, &path, false).unwrap_err();
    assert!(matches!(err, DownloadError::Io(_)));
}

#[test]
fn repeated_calls_are_equal() {
    let client = client_for(&start_server(Catalog::sample()));
    let first = client.get_resource(Catalog::WORLDGUARD).unwrap();
    let second = client.get_resource(Catalog::WORLDGUARD).unwrap();
    assert_eq!(first, second);
    assert_eq!(client.get_status().unwrap(), client.get_status().unwrap());
}

#[test]
fn one_client_shared_across_threads() {
    let client = Arc::new(client_for(&start_server(Catalog::sample())));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = Arc::clone(&client);
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    client.get_resource(Catalog::WORLDGUARD).unwrap().name
                } else {
                    client.get_author(Catalog::GHOST).unwrap().name
                }
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let name = handle.join().unwrap();
        assert_eq!(name, if i % 2 == 0 { "WorldGuard" } else { "Ghost" });
    }
}

#[test]
fn fixed_user_agent_does_not_break_requests() {
    let base = start_server(Catalog::sample());
    let config = ClientConfig::default()
        .with_base_url(base)
        .with_user_agent(UserAgent::Fixed("spiget-core-tests".to_string()))
        .with_header("accept", "application/json");
    let client = SpigetClient::new(config).unwrap();
    assert_eq!(client.get_categories(None).unwrap().len(), 3);
}

#[test]
fn transport_passes_response_headers_through() {
    let base = start_server(Catalog::sample());
    let transport = UreqTransport::new(Duration::from_secs(5));
    let request = HttpRequest {
        url: format!("{base}/status"),
        headers: Vec::new(),
    };
    let response = transport.execute(&request).unwrap();
    assert_eq!(response.status, 200);
    let content_type = response
        .headers
        .iter()
        .find(|(name, _)| name == "content-type")
        .map(|(_, value)| value.as_str());
    assert_eq!(content_type, Some("application/json"));
}

#[test]
fn connection_refused_is_request_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = client_for(&format!("http://{addr}"));

    assert!(matches!(client.get_status(), Err(ApiError::Request(_))));
    let mut sink = Vec::new();
    assert!(matches!(
        client.download(1, 2, false, &mut sink),
        Err(DownloadError::Api(ApiError::Request(_)))
    ));
}

#[test]
fn silent_server_hits_timeout() {
    // Accepts connections into the backlog but never answers.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ClientConfig::default()
        .with_base_url(format!("http://{addr}"))
        .with_timeout(Duration::from_millis(300));
    let client = SpigetClient::new(config).unwrap();

    let started = Instant::now();
    let err = client.get_resource(1).unwrap_err();
    assert!(matches!(err, ApiError::Request(_)), "{err:?}");
    assert!(started.elapsed() < Duration::from_secs(5));
    drop(listener);
}
