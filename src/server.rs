//! HTTP server
//!
//! Serves the rendered page, the content as JSON, a live headline stream
//! over Server-Sent Events and static assets. Each stream client gets its
//! own cycler task, released when the client disconnects or the server
//! shuts down.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::Router;
use axum::extract::{Path as UrlPath, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use folio_core::content::SiteContent;
use folio_core::cycle::TitleFrame;
use folio_render::html::icons::SPRITE_PATH;
use folio_render::{RenderOptions, SPRITE, render_page};
use tokio::net::TcpListener;
use tokio_stream::Stream;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cycler::{TitleCyclerHandle, spawn_title_cycler_until};
use crate::error::{FolioError, ServerError};
use crate::observability::metrics::{
    AssetOutcome, StreamGuard, record_asset_request, record_page_view,
};

/// Path of the live headline stream.
pub const TITLE_STREAM_PATH: &str = "/title/stream";

/// SSE event name carrying a [`TitleFrame`].
pub const TITLE_EVENT: &str = "title";

// ============================================================================
// State
// ============================================================================

/// Shared, read-only server state.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppInner>,
}

#[derive(Debug)]
struct AppInner {
    content: Arc<SiteContent>,
    page: String,
    content_json: String,
    asset_dir: PathBuf,
    shutdown: CancellationToken,
}

impl AppState {
    /// Renders the page and the JSON view once and builds the state.
    ///
    /// # Errors
    ///
    /// Returns a render error if the page cannot be built.
    pub fn new(
        content: Arc<SiteContent>,
        asset_dir: PathBuf,
        reduced_motion: bool,
        shutdown: CancellationToken,
    ) -> Result<Self, FolioError> {
        let options = RenderOptions {
            reduced_motion,
            title_stream: Some(TITLE_STREAM_PATH.to_string()),
            ..RenderOptions::default()
        };
        let page = render_page(&content, &options)?;
        let content_json = serde_json::to_string(&*content)?;
        Ok(Self {
            inner: Arc::new(AppInner {
                content,
                page,
                content_json,
                asset_dir,
                shutdown,
            }),
        })
    }
}

// ============================================================================
// Router / Lifecycle
// ============================================================================

/// Builds the axum router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_page))
        .route("/index.html", get(handle_page))
        .route("/content.json", get(handle_content))
        .route(TITLE_STREAM_PATH, get(handle_title_stream))
        .route("/healthz", get(handle_health))
        .route("/assets/{*path}", get(handle_asset))
        .fallback(handle_root_file)
        .with_state(state)
}

/// Parses a bind address string into a full `host:port` form.
///
/// Accepts:
/// - `:8080` → `0.0.0.0:8080`
/// - `8080` → `0.0.0.0:8080`
/// - `1.2.3.4:8080` → as-is
///
/// # Errors
///
/// Returns [`ServerError::InvalidBindAddr`] if the result is not a valid
/// socket address.
pub fn parse_bind_addr(input: &str) -> Result<SocketAddr, ServerError> {
    let addr = if input.starts_with(':') {
        format!("0.0.0.0{input}")
    } else if input.parse::<u16>().is_ok() {
        format!("0.0.0.0:{input}")
    } else {
        input.to_string()
    };
    addr.parse::<SocketAddr>()
        .map_err(|e| ServerError::InvalidBindAddr {
            input: input.to_string(),
            message: e.to_string(),
        })
}

/// Binds a listener on `addr`.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address is unavailable.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })
}

/// Serves `state` on `listener` until the state's shutdown token is
/// cancelled.
///
/// # Errors
///
/// Returns [`ServerError::Serve`] if the server stops with an error.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    let shutdown = state.inner.shutdown.clone();
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "HTTP server listening");
    }
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
        })
        .await
        .map_err(ServerError::Serve)?;
    debug!("HTTP server shut down");
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

async fn handle_page(State(state): State<AppState>) -> Html<String> {
    record_page_view();
    Html(state.inner.page.clone())
}

async fn handle_content(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.inner.content_json.clone(),
    )
        .into_response()
}

async fn handle_health() -> &'static str {
    "ok"
}

/// `GET /title/stream`.
///
/// Sends the current frame immediately, then one event per tick. Without
/// titles there is nothing to animate and the endpoint answers 204.
async fn handle_title_stream(State(state): State<AppState>) -> Response {
    let content = &state.inner.content;
    let Some(handle) = spawn_title_cycler_until(
        content.profile.titles.clone(),
        content.title_cycle,
        &state.inner.shutdown,
    ) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    debug!("headline stream opened");
    let stream = TitleStream {
        frames: WatchStream::new(handle.frames()),
        _handle: handle,
        _guard: StreamGuard::new(),
    };
    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

/// Frames of one client's cycler as SSE events.
///
/// Owns the cycler handle, so the cycler is disposed when the client
/// disconnects and axum drops the stream.
struct TitleStream {
    frames: WatchStream<TitleFrame>,
    _handle: TitleCyclerHandle,
    _guard: StreamGuard,
}

impl Stream for TitleStream {
    type Item = Result<SseEvent, axum::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.frames)
            .poll_next(cx)
            .map(|frame| frame.map(|f| SseEvent::default().event(TITLE_EVENT).json_data(&f)))
    }
}

impl Drop for TitleStream {
    fn drop(&mut self) {
        debug!("headline stream closed");
    }
}

async fn handle_asset(
    State(state): State<AppState>,
    UrlPath(path): UrlPath<String>,
) -> Response {
    if format!("/assets/{path}") == SPRITE_PATH
        && !tokio::fs::try_exists(state.inner.asset_dir.join(&path))
            .await
            .unwrap_or(false)
    {
        record_asset_request(AssetOutcome::Hit);
        return ([(header::CONTENT_TYPE, "image/svg+xml")], SPRITE).into_response();
    }
    serve_file(&state.inner.asset_dir, &path).await
}

/// Top-level files (the profile image, favicon) come from the asset
/// directory too.
async fn handle_root_file(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    serve_file(&state.inner.asset_dir, path).await
}

async fn serve_file(asset_dir: &Path, relative: &str) -> Response {
    let Some(relative) = safe_relative_path(relative) else {
        record_asset_request(AssetOutcome::Rejected);
        warn!(path = relative, "rejected asset path");
        return (StatusCode::BAD_REQUEST, "invalid asset path").into_response();
    };

    let full = asset_dir.join(&relative);
    match tokio::fs::read(&full).await {
        Ok(bytes) => {
            record_asset_request(AssetOutcome::Hit);
            ([(header::CONTENT_TYPE, content_type(&relative))], bytes).into_response()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            record_asset_request(AssetOutcome::Miss);
            debug!(path = %full.display(), "asset not found");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            record_asset_request(AssetOutcome::Miss);
            warn!(path = %full.display(), error = %e, "asset read failed");
            // Directories and unreadable files look the same to the client
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Accepts only plain relative paths: no `..`, no root, no drive prefix.
pub(crate) fn safe_relative_path(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() || raw.contains('\\') {
        return None;
    }
    let path = Path::new(raw);
    path.components()
        .all(|c| matches!(c, Component::Normal(_)))
        .then(|| path.to_path_buf())
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use folio_core::content::builtin;
    use tower::util::ServiceExt;

    use super::*;

    fn state_with(content: SiteContent, asset_dir: PathBuf) -> AppState {
        AppState::new(
            Arc::new(content),
            asset_dir,
            false,
            CancellationToken::new(),
        )
        .unwrap()
    }

    fn state(asset_dir: PathBuf) -> AppState {
        state_with(builtin().clone(), asset_dir)
    }

    async fn get_uri(app: Router, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(req).await.unwrap()
    }

    async fn body_string(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ------------------------------------------------------------------
    // parse_bind_addr
    // ------------------------------------------------------------------

    #[test]
    fn parse_bind_addr_colon_port() {
        assert_eq!(
            parse_bind_addr(":8080").unwrap(),
            "0.0.0.0:8080".parse().unwrap()
        );
    }

    #[test]
    fn parse_bind_addr_port_only() {
        assert_eq!(
            parse_bind_addr("8080").unwrap(),
            "0.0.0.0:8080".parse().unwrap()
        );
    }

    #[test]
    fn parse_bind_addr_full() {
        assert_eq!(
            parse_bind_addr("127.0.0.1:3000").unwrap(),
            "127.0.0.1:3000".parse().unwrap()
        );
    }

    #[test]
    fn parse_bind_addr_invalid() {
        assert!(matches!(
            parse_bind_addr("not-an-address"),
            Err(ServerError::InvalidBindAddr { .. })
        ));
    }

    // ------------------------------------------------------------------
    // Path handling
    // ------------------------------------------------------------------

    #[test]
    fn safe_relative_path_rules() {
        assert!(safe_relative_path("akriti.jpg").is_some());
        assert!(safe_relative_path("img/a.png").is_some());
        assert!(safe_relative_path("../etc/passwd").is_none());
        assert!(safe_relative_path("img/../../x").is_none());
        assert!(safe_relative_path("/etc/passwd").is_none());
        assert!(safe_relative_path("./a").is_none());
        assert!(safe_relative_path("a\\..\\b").is_none());
        assert!(safe_relative_path("").is_none());
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(content_type(Path::new("icons.svg")), "image/svg+xml");
        assert_eq!(content_type(Path::new("noext")), "application/octet-stream");
    }

    // ------------------------------------------------------------------
    // Routes
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn page_is_served_with_stream_attribute() {
        let dir = tempfile::tempdir().unwrap();
        let resp = get_uri(build_router(state(dir.path().into())), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.starts_with("<!doctype html>"));
        assert!(body.contains("data-stream=\"/title/stream\""));
    }

    #[tokio::test]
    async fn content_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let resp = get_uri(build_router(state(dir.path().into())), "/content.json").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content: SiteContent = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(&content, builtin());
    }

    #[tokio::test]
    async fn healthz_ok() {
        let dir = tempfile::tempdir().unwrap();
        let resp = get_uri(build_router(state(dir.path().into())), "/healthz").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "ok");
    }

    #[tokio::test]
    async fn profile_image_served_from_asset_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("akriti.jpg"), b"\xff\xd8jpeg").unwrap();
        let resp = get_uri(build_router(state(dir.path().into())), "/akriti.jpg").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/jpeg");
    }

    #[tokio::test]
    async fn missing_image_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let resp = get_uri(build_router(state(dir.path().into())), "/akriti.jpg").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let resp = get_uri(
            build_router(state(dir.path().into())),
            "/assets/..%2F..%2Fetc%2Fpasswd",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn builtin_sprite_served_when_not_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let resp = get_uri(build_router(state(dir.path().into())), SPRITE_PATH).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/svg+xml");
        assert!(body_string(resp).await.contains("<symbol id=\"github\""));
    }

    #[tokio::test]
    async fn asset_file_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/cv.pdf"), b"%PDF").unwrap();
        let resp = get_uri(build_router(state(dir.path().into())), "/assets/docs/cv.pdf").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
    }

    #[tokio::test]
    async fn title_stream_without_titles_is_204() {
        let dir = tempfile::tempdir().unwrap();
        let mut content = builtin().clone();
        content.profile.titles.clear();
        let resp = get_uri(
            build_router(state_with(content, dir.path().into())),
            TITLE_STREAM_PATH,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test(start_paused = true)]
    async fn title_stream_sends_frames() {
        use tokio_stream::StreamExt;

        let dir = tempfile::tempdir().unwrap();
        let mut content = builtin().clone();
        content.profile.titles = vec!["Go".to_string()];
        let resp = get_uri(
            build_router(state_with(content, dir.path().into())),
            TITLE_STREAM_PATH,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/event-stream");

        let mut body = resp.into_body().into_data_stream();
        let mut text = String::new();
        while !text.contains("\"text\":\"G\"") {
            let chunk = body.next().await.unwrap().unwrap();
            text.push_str(std::str::from_utf8(&chunk).unwrap());
        }
        assert!(text.starts_with("event: title\ndata: {\"word_index\":0,\"revealed\":0,\"text\":\"\"}"));
    }
}
