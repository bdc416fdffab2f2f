//! End-to-end tests for the vote page against a simulated aggregation service
//!
//! Run with: cargo test -p vote-frontend --test page

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use vote_client::AggregatorClient;
use vote_frontend::{
    app,
    config::{default_fetch_timeout, FrontendConfig},
    router, AppState,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMOJIS_PATH: &str = "/tweets/emojis/";

fn frontend(upstream_url: String) -> Router {
    let client = AggregatorClient::new(upstream_url, Duration::from_secs(5))
        .expect("Failed to create client");
    app(AppState::new(client), Duration::from_secs(5))
}

async fn upstream(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMOJIS_PATH))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

async fn request(app: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Formatted log output shared with the test subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
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

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

/// Text of every `<td class="{class}">` cell, in page order
fn cells(html: &str, class: &str) -> Vec<String> {
    let open = format!("<td class=\"{}\">", class);
    html.split(open.as_str())
        .skip(1)
        .filter_map(|rest| rest.split("</td>").next())
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_page_orders_votes_ascending_with_stable_ties() {
    let server = upstream(ResponseTemplate::new(200).set_body_string(
        r#"{"emojis":[{"emoji":"😀","count":3},{"emoji":"😂","count":10},{"emoji":"😀","count":3}]}"#,
    ))
    .await;

    let (status, html) = request(
        frontend(format!("{}{}", server.uri(), EMOJIS_PATH)),
        Method::GET,
        "/",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cells(&html, "symbol"), vec!["😀", "😀", "😂"]);
    assert_eq!(cells(&html, "count"), vec!["3", "3", "10"]);
    assert_eq!(cells(&html, "pct"), vec!["18%", "18%", "62%"]);
    assert_eq!(cells(&html, "rank"), vec!["1", "2", "3"]);
    assert!(html.contains("Total votes: 16"));
}

#[tokio::test]
async fn test_page_is_html() {
    let server = upstream(ResponseTemplate::new(200).set_body_string(r#"{"emojis":[]}"#)).await;
    let app = frontend(format!("{}{}", server.uri(), EMOJIS_PATH));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn test_page_renders_empty_on_upstream_error() {
    let server = upstream(ResponseTemplate::new(503)).await;

    let (status, html) = request(
        frontend(format!("{}{}", server.uri(), EMOJIS_PATH)),
        Method::GET,
        "/",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(cells(&html, "symbol").is_empty());
    assert!(html.contains("No votes yet"));
}

#[tokio::test]
async fn test_upstream_error_is_recorded_with_status() {
    let server = upstream(ResponseTemplate::new(503)).await;
    let app = frontend(format!("{}{}", server.uri(), EMOJIS_PATH));

    let (logs, _guard) = capture_logs();
    let (status, html) = request(app, Method::GET, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No votes yet"));

    let output = logs.contents();
    assert!(output.contains("kind=UpstreamError"), "{}", output);
    assert!(output.contains("status=503"), "{}", output);
}

#[tokio::test]
async fn test_page_renders_empty_when_upstream_hangs() {
    let server = upstream(
        ResponseTemplate::new(200)
            .set_body_string(r#"{"emojis":[{"emoji":"😀","count":1}]}"#)
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let request_timeout = Duration::from_secs(1);
    let config = FrontendConfig {
        addr: "127.0.0.1:0".parse().unwrap(),
        upstream_url: format!("{}{}", server.uri(), EMOJIS_PATH),
        request_timeout,
        fetch_timeout: default_fetch_timeout(request_timeout),
    };

    let (logs, _guard) = capture_logs();
    let (status, html) = request(router(&config).unwrap(), Method::GET, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No votes yet"));
    assert!(logs.contents().contains("kind=TransportError"));
}

#[tokio::test]
async fn test_page_renders_empty_on_empty_list() {
    for body in [r#"{"emojis":[]}"#, r#"{"emoji":[]}"#] {
        let server = upstream(ResponseTemplate::new(200).set_body_string(body)).await;

        let (status, html) = request(
            frontend(format!("{}{}", server.uri(), EMOJIS_PATH)),
            Method::GET,
            "/",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(cells(&html, "pct").is_empty(), "percentages rendered for {}", body);
        assert!(html.contains("Total votes: 0"));
    }
}

#[tokio::test]
async fn test_page_renders_empty_on_malformed_body() {
    let server = upstream(ResponseTemplate::new(200).set_body_string("<html>not json</html>")).await;

    let (status, html) = request(
        frontend(format!("{}{}", server.uri(), EMOJIS_PATH)),
        Method::GET,
        "/",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No votes yet"));
}

#[tokio::test]
async fn test_page_renders_empty_when_upstream_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, html) = request(
        frontend(format!("http://{}{}", addr, EMOJIS_PATH)),
        Method::GET,
        "/",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No votes yet"));
}

#[tokio::test]
async fn test_page_rejects_other_methods() {
    let server = upstream(ResponseTemplate::new(200).set_body_string(r#"{"emojis":[]}"#)).await;

    let (status, _) = request(
        frontend(format!("{}{}", server.uri(), EMOJIS_PATH)),
        Method::POST,
        "/",
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_healthcheck_any_method() {
    for method in [Method::GET, Method::POST, Method::HEAD] {
        let (status, body) = request(
            frontend("http://127.0.0.1:9/tweets/emojis/".to_string()),
            method.clone(),
            "/_healthcheck",
        )
        .await;

        assert_eq!(status, StatusCode::OK, "method {}", method);
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn test_each_page_request_fetches_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMOJIS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"emojis":[]}"#))
        .expect(2)
        .mount(&server)
        .await;

    let app = frontend(format!("{}{}", server.uri(), EMOJIS_PATH));
    request(app.clone(), Method::GET, "/").await;
    request(app, Method::GET, "/").await;

    server.verify().await;
}
