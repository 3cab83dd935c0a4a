//! Shared integration-test harness for running the `folio` binary as a
//! child process.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};
use tokio_stream::StreamExt;

/// Default timeout for a server to come up or answer a request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variables the binary reads; cleared so the host
/// environment cannot leak into a test.
const FOLIO_ENV: [&str; 6] = [
    "FOLIO_CONTENT",
    "FOLIO_BIND",
    "FOLIO_ASSET_DIR",
    "FOLIO_COLOR",
    "FOLIO_LOG_LEVEL",
    "FOLIO_MAX_CONTENT_SIZE",
];

fn folio_command() -> std::process::Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_folio"));
    for var in FOLIO_ENV {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Runs `folio` with `args` to completion.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    folio_command()
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run folio")
}

/// Path to a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Converts a path to `&str`, panicking on non-UTF-8 paths.
#[allow(clippy::missing_panics_doc)]
pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("non-UTF-8 path")
}

/// A running `folio serve` process.
///
/// The child process is killed on drop via `kill_on_drop(true)`.
pub struct FolioServer {
    child: Child,
    stderr: BufReader<ChildStderr>,
    base_url: String,
    client: reqwest::Client,
}

impl FolioServer {
    /// Starts `folio serve` on an ephemeral port and waits until it
    /// reports its listening address.
    #[allow(clippy::missing_panics_doc)]
    pub async fn spawn(extra_args: &[&str]) -> Self {
        let mut cmd = Command::from(folio_command());
        let mut child = cmd
            .args(["serve", "--bind", "127.0.0.1:0", "-v", "--color", "never"])
            .args(extra_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn folio serve");

        let stderr = child.stderr.take().expect("stderr not captured");
        let mut stderr = BufReader::new(stderr);

        let addr = tokio::time::timeout(DEFAULT_TIMEOUT, async {
            let mut line = String::new();
            loop {
                line.clear();
                let n = stderr.read_line(&mut line).await.expect("stderr I/O error");
                assert!(n > 0, "server exited before listening");
                if line.contains("HTTP server listening")
                    && let Some(addr) = listening_addr(&line)
                {
                    return addr;
                }
            }
        })
        .await
        .expect("timed out waiting for server to listen");

        Self {
            child,
            stderr,
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    /// `http://host:port` of the running server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `GET path`.
    #[allow(clippy::missing_panics_doc)]
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .timeout(DEFAULT_TIMEOUT)
            .send()
            .await
            .expect("request failed")
    }

    /// Opens `path` and collects the body received within `window`.
    ///
    /// Used for streaming endpoints that never finish on their own.
    #[allow(clippy::missing_panics_doc)]
    pub async fn get_for(&self, path: &str, window: Duration) -> StreamCapture {
        let response = self.get(path).await;
        let status = response.status();
        let headers = response.headers().clone();

        let body = response.bytes_stream();
        tokio::pin!(body);
        let mut raw = Vec::new();
        let deadline = tokio::time::Instant::now() + window;
        loop {
            match tokio::time::timeout_at(deadline, body.next()).await {
                Ok(Some(Ok(chunk))) => raw.extend_from_slice(&chunk),
                Ok(Some(Err(e))) => panic!("stream read failed: {e}"),
                Ok(None) | Err(_) => break,
            }
        }

        StreamCapture {
            status,
            headers,
            body: String::from_utf8_lossy(&raw).into_owned(),
        }
    }

    /// Sends SIGTERM and returns the exit code.
    #[cfg(unix)]
    #[allow(clippy::missing_panics_doc)]
    pub async fn terminate(self) -> Option<i32> {
        let Self {
            mut child,
            mut stderr,
            ..
        } = self;
        let pid = child.id().expect("child already reaped");
        let status = std::process::Command::new("kill")
            .args(["-TERM", &pid.to_string()])
            .status()
            .expect("failed to run kill");
        assert!(status.success(), "kill -TERM failed");

        tokio::time::timeout(DEFAULT_TIMEOUT, async {
            let mut sink = Vec::new();
            let _ = stderr.read_to_end(&mut sink).await;
            child.wait().await.expect("wait failed").code()
        })
        .await
        .expect("server did not exit after SIGTERM")
    }
}

/// Head and partial body of a streaming response.
#[derive(Debug)]
pub struct StreamCapture {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl StreamCapture {
    /// The `Content-Type` header, if present and ASCII.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }
}

/// Extracts the value of `addr=` from a human-format log line.
fn listening_addr(line: &str) -> Option<String> {
    let start = line.find("addr=")? + "addr=".len();
    let rest = &line[start..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(rest[..end].to_string())
}
