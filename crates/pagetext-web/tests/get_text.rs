//! End-to-end tests for `GET /get-text/`.
//!
//! An upstream fixture is served by axum on an ephemeral localhost port; the
//! proxy router is driven in-process with `tower::ServiceExt::oneshot`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::{Html, Redirect};
use axum::routing::get;
use pagetext_core::FetchConfig;
use pagetext_web::AppState;
use tower::ServiceExt;

const PAGE: &str = "<html><head><title>Fixture</title><style>body { margin: 0; }</style></head>\
    <body><h1>  Welcome </h1><p>Hello<b> world</b></p><script>track();</script></body></html>";

async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/page", get(|| async { Html(PAGE) }))
        .route("/plain", get(|| async { Html("<html><body>Hello<b> world</b></body></html>") }))
        .route(
            "/no-body",
            get(|| async { Html("<html><head><title>Just a title</title></head></html>") }),
        )
        .route("/blank", get(|| async { Html("<html><body>  \n\t </body></html>") }))
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "gone") }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/start", get(|| async { Redirect::permanent("/final") }))
        .route("/final", get(|| async { Html("<body>landed</body>") }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Html("<body>too late</body>")
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// The proxy under test, built with the production client settings.
fn proxy(fetch: &FetchConfig) -> Router {
    pagetext_web::router(Arc::new(AppState::new(fetch).unwrap()))
}

async fn call(uri: &str) -> (StatusCode, Option<String>, String) {
    call_on(proxy(&FetchConfig::default()), uri).await
}

async fn call_on(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

fn detail(body: &str) -> String {
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    json["detail"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn extracts_body_text_as_plain_text() {
    let upstream = spawn_upstream().await;
    let (status, content_type, body) = call(&format!("/get-text/?url=http://{upstream}/page")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert_eq!(body, "Welcome Hello world");
}

#[tokio::test]
async fn inline_markup_round_trip() {
    let upstream = spawn_upstream().await;
    let (status, _, body) = call(&format!("/get-text/?url=http://{upstream}/plain")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello world");
}

#[tokio::test]
async fn route_without_trailing_slash() {
    let upstream = spawn_upstream().await;
    let (status, _, body) = call(&format!("/get-text?url=http://{upstream}/plain")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello world");
}

#[tokio::test]
async fn document_without_body_uses_whole_document() {
    let upstream = spawn_upstream().await;
    let (status, _, body) = call(&format!("/get-text/?url=http://{upstream}/no-body")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Just a title");
}

#[tokio::test]
async fn whitespace_only_body_is_empty_ok() {
    let upstream = spawn_upstream().await;
    let (status, _, body) = call(&format!("/get-text/?url=http://{upstream}/blank")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
}

#[tokio::test]
async fn upstream_404_is_passed_through() {
    let upstream = spawn_upstream().await;
    let target = format!("http://{upstream}/missing");
    let (status, _, body) = call(&format!("/get-text/?url={target}")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let detail = detail(&body);
    assert!(detail.contains("404"), "{detail}");
    assert!(detail.contains(&target), "{detail}");
}

#[tokio::test]
async fn upstream_500_is_passed_through() {
    let upstream = spawn_upstream().await;
    let target = format!("http://{upstream}/broken");
    let (status, _, body) = call(&format!("/get-text/?url={target}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = detail(&body);
    assert!(detail.contains("500"), "{detail}");
    assert!(detail.contains(&target), "{detail}");
}

#[tokio::test]
async fn unreachable_host_is_bad_request() {
    // Bind and immediately release a port so nothing is listening on it.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let target = format!("http://{addr}/");
    let (status, _, body) = call(&format!("/get-text/?url={target}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = detail(&body);
    assert!(detail.starts_with(&format!("Error fetching data from {target}")), "{detail}");
}

#[tokio::test]
async fn invalid_url_is_bad_request() {
    let (status, _, body) = call("/get-text/?url=notaurl").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(detail(&body).contains("notaurl"));
}

#[tokio::test]
async fn missing_url_parameter_is_unprocessable() {
    let (status, _, body) = call("/get-text/").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail(&body).contains("url"));
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let upstream = spawn_upstream().await;
    let uri = format!("/get-text/?url=http://{upstream}/page");
    let first = call(&uri).await;
    let second = call(&uri).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn redirect_is_reported_not_followed() {
    let upstream = spawn_upstream().await;
    let target = format!("http://{upstream}/start");
    let (status, _, body) = call(&format!("/get-text/?url={target}")).await;

    assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
    let detail = detail(&body);
    assert_eq!(detail, format!("HTTP error: 308 for URL: {target}"));
}

#[tokio::test]
async fn timeout_is_bad_request() {
    let upstream = spawn_upstream().await;
    let target = format!("http://{upstream}/slow");
    let app = proxy(&FetchConfig {
        timeout: Some(Duration::from_millis(100)),
        ..Default::default()
    });
    let (status, _, body) = call_on(app, &format!("/get-text/?url={target}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = detail(&body);
    assert!(detail.starts_with(&format!("Error fetching data from {target}")), "{detail}");
}
