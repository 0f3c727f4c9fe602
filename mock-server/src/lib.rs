pub mod catalog;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub use catalog::{
    file_bytes, Author, Catalog, Category, Icon, Rating, Resource, ResourceFile, ResourceReview,
    ResourceUpdate, ResourceVersion,
};

/// Spiget's default page size.
const DEFAULT_PAGE_SIZE: usize = 10;

pub type Db = Arc<Catalog>;

/// `size` and `page` (1-based) as Spiget accepts them on list routes.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub size: Option<usize>,
    pub page: Option<usize>,
}

impl Pagination {
    fn apply<'a, T: Clone + 'a>(&self, items: impl IntoIterator<Item = &'a T>) -> Vec<T> {
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        let page = self.page.unwrap_or(1).max(1);
        items
            .into_iter()
            .skip((page - 1).saturating_mul(size))
            .take(size)
            .cloned()
            .collect()
    }
}

pub fn app() -> Router {
    app_with(Catalog::sample())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    Router::new()
        .route("/status", get(status))
        .route("/resources", get(list_resources))
        .route("/resources/{id}", get(get_resource))
        .route("/resources/{id}/author", get(get_resource_author))
        .route("/resources/{id}/versions", get(list_versions))
        .route("/resources/{id}/versions/latest", get(latest_version))
        .route("/resources/{id}/versions/{vid}", get(get_version))
        .route("/resources/{id}/versions/{vid}/download", get(download))
        .route("/resources/{id}/versions/{vid}/download/proxy", get(download_proxy))
        .route("/resources/{id}/updates", get(list_updates))
        .route("/resources/{id}/updates/latest", get(latest_update))
        .route("/resources/{id}/reviews", get(list_reviews))
        .route("/authors", get(list_authors))
        .route("/authors/{id}", get(get_author))
        .route("/authors/{id}/resources", get(list_author_resources))
        .route("/authors/{id}/reviews", get(list_author_reviews))
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category))
        .route("/categories/{id}/resources", get(list_category_resources))
        .route("/search/resources/{query}", get(search_resources))
        .route("/search/authors/{query}", get(search_authors))
        .layer(middleware::from_fn_with_state(db.clone(), outage))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Catalog::sample()).await
}

pub async fn run_with(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(catalog)).await
}

async fn outage(State(db): State<Db>, request: Request, next: Next) -> Response {
    match db.outage.and_then(|code| StatusCode::from_u16(code).ok()) {
        Some(status) => (status, "service unavailable").into_response(),
        None => next.run(request).await,
    }
}

fn find_resource(db: &Catalog, id: u64) -> Result<&Resource, StatusCode> {
    db.resources.iter().find(|r| r.id == id).ok_or(StatusCode::NOT_FOUND)
}

fn find_author(db: &Catalog, id: u64) -> Result<&Author, StatusCode> {
    db.authors.iter().find(|a| a.id == id).ok_or(StatusCode::NOT_FOUND)
}

fn find_version(db: &Catalog, id: u64, vid: u64) -> Result<&ResourceVersion, StatusCode> {
    db.versions
        .iter()
        .find(|v| v.resource == id && v.id == vid)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- status ---

async fn status(State(db): State<Db>) -> Json<Value> {
    Json(json!({
        "status": {
            "server": { "name": "mock", "mode": "local" },
        },
        "stats": {
            "resources": db.resources.len(),
            "authors": db.authors.len(),
            "categories": db.categories.len(),
            "resource_updates": db.updates.len(),
            "resource_versions": db.versions.len(),
        },
    }))
}

// --- resources ---

async fn list_resources(State(db): State<Db>, Query(page): Query<Pagination>) -> Json<Vec<Resource>> {
    Json(page.apply(&db.resources))
}

async fn get_resource(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Resource>, StatusCode> {
    find_resource(&db, id).cloned().map(Json)
}

async fn get_resource_author(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Author>, StatusCode> {
    let resource = find_resource(&db, id)?;
    find_author(&db, resource.author_id).cloned().map(Json)
}

async fn list_versions(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(page): Query<Pagination>,
) -> Json<Vec<ResourceVersion>> {
    Json(page.apply(db.versions.iter().filter(|v| v.resource == id)))
}

async fn get_version(
    State(db): State<Db>,
    Path((id, vid)): Path<(u64, u64)>,
) -> Result<Json<ResourceVersion>, StatusCode> {
    find_version(&db, id, vid).cloned().map(Json)
}

async fn latest_version(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<ResourceVersion>, StatusCode> {
    db.versions
        .iter()
        .filter(|v| v.resource == id)
        .max_by_key(|v| v.release_date)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Direct downloads of externally hosted resources are refused, mimicking
/// an origin that blocks the client; the proxy route always serves.
async fn download(State(db): State<Db>, Path((id, vid)): Path<(u64, u64)>) -> Result<Response, StatusCode> {
    let resource = find_resource(&db, id)?;
    if resource.external {
        return Err(StatusCode::FORBIDDEN);
    }
    serve_file(&db, id, vid)
}

async fn download_proxy(State(db): State<Db>, Path((id, vid)): Path<(u64, u64)>) -> Result<Response, StatusCode> {
    serve_file(&db, id, vid)
}

fn serve_file(db: &Catalog, id: u64, vid: u64) -> Result<Response, StatusCode> {
    let version = find_version(db, id, vid)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/java-archive")],
        file_bytes(version.resource, version.id),
    )
        .into_response())
}

async fn list_updates(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(page): Query<Pagination>,
) -> Json<Vec<ResourceUpdate>> {
    Json(page.apply(db.updates.iter().filter(|u| u.resource == id)))
}

async fn latest_update(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<ResourceUpdate>, StatusCode> {
    db.updates
        .iter()
        .filter(|u| u.resource == id)
        .max_by_key(|u| u.date)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_reviews(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(page): Query<Pagination>,
) -> Json<Vec<ResourceReview>> {
    Json(page.apply(db.reviews.iter().filter(|r| r.resource_id == id)))
}

// --- authors ---

async fn list_authors(State(db): State<Db>, Query(page): Query<Pagination>) -> Json<Vec<Author>> {
    Json(page.apply(&db.authors))
}

async fn get_author(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Author>, StatusCode> {
    find_author(&db, id).cloned().map(Json)
}

async fn list_author_resources(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(page): Query<Pagination>,
) -> Json<Vec<Resource>> {
    Json(page.apply(db.resources.iter().filter(|r| r.author_id == id)))
}

/// Reviews written by the author.
async fn list_author_reviews(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(page): Query<Pagination>,
) -> Json<Vec<ResourceReview>> {
    Json(page.apply(db.reviews.iter().filter(|r| r.author.id == id)))
}

// --- categories ---

async fn list_categories(State(db): State<Db>, Query(page): Query<Pagination>) -> Json<Vec<Category>> {
    Json(page.apply(&db.categories))
}

async fn get_category(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Category>, StatusCode> {
    db.categories
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_category_resources(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(page): Query<Pagination>,
) -> Json<Vec<Resource>> {
    Json(page.apply(db.resources.iter().filter(|r| r.category_id == id)))
}

// --- search ---

async fn search_resources(
    State(db): State<Db>,
    Path(query): Path<String>,
    Query(page): Query<Pagination>,
) -> Json<Vec<Resource>> {
    let needle = query.to_lowercase();
    Json(page.apply(db.resources.iter().filter(|r| r.name.to_lowercase().contains(&needle))))
}

async fn search_authors(
    State(db): State<Db>,
    Path(query): Path<String>,
    Query(page): Query<Pagination>,
) -> Json<Vec<Author>> {
    let needle = query.to_lowercase();
    Json(page.apply(db.authors.iter().filter(|a| a.name.to_lowercase().contains(&needle))))
}
