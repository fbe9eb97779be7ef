use std::fs;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tally_bot::{
    dao::{media::MediaLibrary, storage::JsonFileStore},
    routes,
    state::AppState,
};
use tempfile::TempDir;
use tower::util::ServiceExt;

fn app(dir: &TempDir) -> Router {
    let storage = JsonFileStore::new(dir.path().join("tallies-data.json"));
    let media = MediaLibrary::new(dir.path().join("gifs"));
    routes::router(AppState::load(storage, media))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn health_reports_running() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Server is running");
    assert!(body["timestamp"].as_str().is_some_and(|ts| !ts.is_empty()));
}

#[tokio::test]
async fn tallies_mirror_the_persisted_document() {
    let dir = TempDir::new().unwrap();
    let document = json!({
        "Chess": {
            "Alice vs Bob": {
                "Alice": { "wins": 1, "losses": 2 },
                "Bob": { "wins": 2, "losses": 1 },
                "createdAt": "2024-01-01T00:00:00.000Z"
            }
        }
    });
    fs::write(
        dir.path().join("tallies-data.json"),
        serde_json::to_string_pretty(&document).unwrap(),
    )
    .unwrap();

    let (status, body) = get(app(&dir), "/api/tallies").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, document);
}

#[tokio::test]
async fn tallies_are_empty_without_a_data_file() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/tallies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({}));
}

#[tokio::test]
async fn media_files_are_served_statically() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("gifs")).unwrap();
    fs::write(dir.path().join("gifs").join("party.gif"), b"GIF89a").unwrap();

    let (status, body) = get(app(&dir), "/gifs/party.gif").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"GIF89a");

    let (status, _) = get(app(&dir), "/gifs/missing.gif").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_lists_read_routes() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api-doc/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["paths"]["/api/health"].is_object());
    assert!(body["paths"]["/api/tallies"].is_object());
}
