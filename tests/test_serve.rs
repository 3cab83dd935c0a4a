mod common;

use std::time::Duration;

use common::{FolioServer, fixture_path, path_str};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

fn content_type(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn serves_page_with_live_headline() {
    let content = fixture_path("valid.yaml");
    let server = FolioServer::spawn(&["-c", path_str(&content)]).await;

    let page = server.get("/").await;
    assert_eq!(page.status(), StatusCode::OK);
    assert!(content_type(&page).starts_with("text/html"));
    let body = page.text().await.unwrap();
    assert!(body.contains("Ada Lovelace"));
    assert!(body.contains(r#"data-stream="/title/stream""#));

    let health = server.get("/healthz").await;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn serves_content_json() {
    let content = fixture_path("valid.yaml");
    let server = FolioServer::spawn(&["-c", path_str(&content)]).await;

    let response = server.get("/content.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let parsed: serde_json::Value =
        serde_json::from_str(&response.text().await.unwrap()).expect("content JSON");
    assert_eq!(parsed["profile"]["name"], "Ada Lovelace");
    assert_eq!(parsed["title_cycle"]["interval"], "20ms");
}

#[tokio::test]
async fn streams_title_frames() {
    let content = fixture_path("valid.yaml");
    let server = FolioServer::spawn(&["-c", path_str(&content)]).await;

    let stream = server
        .get_for("/title/stream", Duration::from_millis(300))
        .await;
    assert_eq!(stream.status, StatusCode::OK);
    assert!(stream.content_type().unwrap().starts_with("text/event-stream"));
    assert!(stream.body.contains("event: title"));
    assert!(stream.body.contains(r#""text":"A""#), "got: {}", stream.body);
    assert!(stream.body.contains(r#""text":"An""#), "got: {}", stream.body);
}

#[tokio::test]
async fn serves_builtin_sprite() {
    let assets = tempfile::tempdir().unwrap();
    let server = FolioServer::spawn(&["--asset-dir", path_str(assets.path())]).await;

    let sprite = server.get("/assets/icons.svg").await;
    assert_eq!(sprite.status(), StatusCode::OK);
    assert!(content_type(&sprite).starts_with("image/svg+xml"));
    assert!(sprite.text().await.unwrap().contains("<symbol id=\"github\""));

    let missing = server.get("/assets/missing.png").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn serves_profile_image_from_asset_dir() {
    let assets = tempfile::tempdir().unwrap();
    std::fs::write(assets.path().join("ada.png"), b"png").unwrap();
    let content = fixture_path("valid.yaml");
    let server = FolioServer::spawn(&[
        "-c",
        path_str(&content),
        "--asset-dir",
        path_str(assets.path()),
    ])
    .await;

    let image = server.get("/ada.png").await;
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(content_type(&image), "image/png");
    assert_eq!(image.bytes().await.unwrap().as_ref(), b"png");
}

#[tokio::test]
async fn exposes_prometheus_metrics() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .unwrap()
        .port();
    let server = FolioServer::spawn(&["--metrics-port", &port.to_string()]).await;
    assert_eq!(server.get("/").await.status(), StatusCode::OK);

    let metrics = reqwest::Client::new()
        .get(format!("http://127.0.0.1:{port}/metrics"))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("metrics endpoint should respond");
    assert!(metrics.status().is_success());
    let body = metrics.text().await.unwrap();
    assert!(body.contains("folio_page_views_total"), "got: {body}");
}

#[cfg(unix)]
#[tokio::test]
async fn sigterm_shuts_down_gracefully() {
    let server = FolioServer::spawn(&[]).await;
    assert_eq!(server.get("/healthz").await.status(), StatusCode::OK);
    assert_eq!(server.terminate().await, Some(143));
}

#[cfg(unix)]
#[tokio::test]
async fn sigterm_ends_open_title_streams() {
    let server = FolioServer::spawn(&[]).await;
    let stream = server
        .get_for("/title/stream", Duration::from_millis(150))
        .await;
    assert!(stream.body.contains("event: title"));
    assert_eq!(server.terminate().await, Some(143));
}
