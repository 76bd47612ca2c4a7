//! Integration tests for the FlashBricks backend client.
//!
//! Most tests run against a local mock server. The live test needs a backend
//! on the development URL.
//! Run it with: cargo test --test integration -- --ignored

use std::io;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use flashbricks_client::api::ApiClient;
use flashbricks_client::config::{ApiEndpoints, BuildMode};
use flashbricks_client::status::{ApiStatus, StatusPanel, CONNECTION_FAILED_TEXT};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Log output collected from a test-local subscriber.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    fn error_lines(&self) -> Vec<String> {
        self.text()
            .lines()
            .filter(|line| line.contains("ERROR"))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's tracing output into a buffer until the guard drops.
fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

/// Base URL of a local port nothing listens on.
fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Mock backend answering the health endpoint with `status` and `body`.
async fn backend(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health/"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn client_for(base_url: &str) -> Arc<ApiClient> {
    let endpoints = ApiEndpoints::with_base_url(base_url).expect("valid base url");
    Arc::new(ApiClient::new(endpoints).expect("client builds"))
}

async fn settled_status(client: Arc<ApiClient>) -> ApiStatus {
    let mut panel = StatusPanel::mount(client);
    panel.settled().await
}

#[tokio::test]
async fn test_message_is_displayed() {
    let server = backend(200, r#"{"message":"ok"}"#).await;

    let status = settled_status(client_for(&server.uri())).await;

    assert_eq!(status.to_string(), "API: ok");
}

#[tokio::test]
async fn test_missing_message_displays_connected() {
    let server = backend(200, "{}").await;

    let status = settled_status(client_for(&server.uri())).await;

    assert_eq!(status.to_string(), "API: Connected");
}

#[tokio::test]
async fn test_server_error_displays_failure() {
    let server = backend(500, "Internal Server Error").await;

    let status = settled_status(client_for(&server.uri())).await;

    assert_eq!(status, ApiStatus::Failed);
    assert_eq!(status.to_string(), CONNECTION_FAILED_TEXT);
}

#[tokio::test]
async fn test_server_error_is_logged_once_with_status_and_body() {
    let server = backend(500, "db down").await;
    let (logs, _guard) = capture_logs();

    let status = settled_status(client_for(&server.uri())).await;

    assert_eq!(status, ApiStatus::Failed);
    let errors = logs.error_lines();
    assert_eq!(errors.len(), 1, "logs:\n{}", logs.text());
    assert!(errors[0].contains("API error"), "{}", errors[0]);
    assert!(errors[0].contains("status=500"), "{}", errors[0]);
    assert!(errors[0].contains("body=db down"), "{}", errors[0]);
}

#[tokio::test]
async fn test_unreachable_backend_displays_failure() {
    let (logs, _guard) = capture_logs();

    let status = settled_status(client_for(&closed_base_url())).await;

    assert_eq!(status, ApiStatus::Failed);
    assert_eq!(status.to_string(), CONNECTION_FAILED_TEXT);
    let errors = logs.error_lines();
    assert_eq!(errors.len(), 1, "logs:\n{}", logs.text());
    assert!(errors[0].contains("Network error"), "{}", errors[0]);
}

#[tokio::test]
async fn test_each_mount_sends_its_own_request() {
    let server = backend(200, r#"{"message":"ok"}"#).await;
    let client = client_for(&server.uri());

    let first = settled_status(client.clone()).await;
    let second = settled_status(client).await;

    assert_eq!(first, second);
    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 2);
}

/// Test against a backend running on the development URL.
#[tokio::test]
#[ignore = "requires a backend on http://localhost:8000"]
async fn test_live_development_backend() {
    let endpoints = ApiEndpoints::for_mode(BuildMode::Development);
    let client = Arc::new(ApiClient::new(endpoints).expect("client builds"));

    let status = settled_status(client).await;

    println!("{}", status);
    assert!(matches!(status, ApiStatus::Connected(_)));
}
