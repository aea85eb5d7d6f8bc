use assert_fs::TempDir;
use assert_fs::prelude::*;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use minigit::server::MinigitServer;
use minigit::server::config::ServerConfig;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tower::ServiceExt;

fn router_for(dir: &TempDir) -> Router {
    let config = ServerConfig::new("127.0.0.1:0".parse().unwrap(), dir.path());
    MinigitServer::new(config)
        .router()
        .expect("Failed to build router")
}

#[fixture]
fn app() -> (TempDir, Router) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let router = router_for(&dir);

    (dir, router)
}

async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

#[rstest]
#[tokio::test]
async fn full_flow_over_http(app: (TempDir, Router)) {
    let (dir, router) = app;

    let (status, body) = call(&router, Method::POST, "/api/init", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].as_str().unwrap().starts_with("Initialized empty minigit repository"));

    let files = json!([
        { "name": "a.txt", "content": "hello" },
        { "name": "docs/b.md", "content": "# b" },
    ]);
    let (status, body) = call(&router, Method::POST, "/api/add", Some(files)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["staged"], json!(["a.txt", "docs/b.md"]));
    dir.child("docs/b.md").assert("# b");

    let (status, body) = call(&router, Method::POST, "/api/commit", Some(json!({ "message": "first" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["file_count"], 2);
    assert_eq!(body["parent"], Value::Null);
    let commit_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = call(&router, Method::GET, "/api/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["head"], json!(commit_id));
    assert_eq!(body["staged"], json!([]));
    assert_eq!(body["clean"], true);
    assert_eq!(body["total_commits"], 1);

    let (status, body) = call(&router, Method::GET, "/api/log?limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["message"], "first");

    let uri = format!("/api/commit/{}", &commit_id[..7]);
    let (status, body) = call(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(commit_id));
    assert_eq!(body["files"][1]["path"], "docs/b.md");

    let (status, body) = call(&router, Method::GET, "/api/show", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(commit_id));

    dir.child("a.txt").write_str("hello!").unwrap();
    let (status, body) = call(&router, Method::GET, "/api/diff/a.txt", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["binary"], false);
    assert_eq!(body["additions"], 1);
    assert_eq!(body["deletions"], 1);
    assert_eq!(
        body["diff"],
        "--- a/a.txt\n+++ b/a.txt\n@@ -1,1 +1,1 @@\n-hello\n+hello!\n"
    );

    let (_, body) = call(&router, Method::GET, "/api/status", None).await;
    assert_eq!(body["clean"], false);
    assert_eq!(body["modified"], json!(["a.txt"]));
}

#[rstest]
#[tokio::test]
async fn file_endpoints(app: (TempDir, Router)) {
    let (dir, router) = app;
    call(&router, Method::POST, "/api/init", None).await;
    dir.child("nested/c.txt").write_str("c").unwrap();
    dir.child("blob.bin").write_binary(&[0xff, 0x00, 0xfe]).unwrap();

    let (status, body) = call(&router, Method::GET, "/api/files", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["files"], json!(["blob.bin", "nested/c.txt"]));

    let (_, body) = call(&router, Method::GET, "/api/file/nested/c.txt", None).await;
    assert_eq!(body, json!({ "name": "nested/c.txt", "content": "c", "encoding": "utf-8" }));

    let (_, body) = call(&router, Method::GET, "/api/file/blob.bin", None).await;
    assert_eq!(body["encoding"], "base64");
    assert_eq!(body["content"], "/wD+");

    let (status, body) = call(&router, Method::POST, "/api/stage/nested/c.txt", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "nested/c.txt");

    let (status, body) = call(&router, Method::DELETE, "/api/file/nested/c.txt", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unstaged"], true);
    dir.child("nested").assert(predicates::path::missing());

    let (_, body) = call(&router, Method::GET, "/api/status", None).await;
    assert_eq!(body["staged"], json!([]));

    call(&router, Method::POST, "/api/stage/blob.bin", None).await;
    let (status, body) = call(&router, Method::POST, "/api/unstage/blob.bin", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unstaged"], true);
}

#[rstest]
#[tokio::test]
async fn binary_uploads_are_base64(app: (TempDir, Router)) {
    let (dir, router) = app;
    call(&router, Method::POST, "/api/init", None).await;

    let files = json!([{ "name": "img.bin", "content": "/wD+", "encoding": "base64" }]);
    let (status, _) = call(&router, Method::POST, "/api/add", Some(files)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(std::fs::read(dir.path().join("img.bin")).unwrap(), vec![0xff, 0x00, 0xfe]);
}

#[rstest]
#[case(json!([{ "name": "a.txt", "content": "a" }, { "name": "x", "content": "x" }, { "name": "x/y", "content": "y" }]))]
#[case(json!([{ "name": "a.txt", "content": "a" }, { "name": "dir", "content": "d" }]))]
#[tokio::test]
async fn conflicting_uploads_write_nothing(app: (TempDir, Router), #[case] files: Value) {
    let (dir, router) = app;
    call(&router, Method::POST, "/api/init", None).await;
    dir.child("dir/inner.txt").write_str("inner").unwrap();

    let (status, body) = call(&router, Method::POST, "/api/add", Some(files)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_path");
    dir.child("a.txt").assert(predicates::path::missing());
    dir.child("x").assert(predicates::path::missing());
    let (_, body) = call(&router, Method::GET, "/api/status", None).await;
    assert_eq!(body["staged"], json!([]));
}

#[rstest]
#[case(Method::GET, "/api/status", None, StatusCode::CONFLICT, "not_initialized")]
#[case(Method::GET, "/api/file/missing.txt", None, StatusCode::NOT_FOUND, "file_not_found")]
#[case(Method::GET, "/api/commit/deadbeef", None, StatusCode::NOT_FOUND, "not_found")]
#[case(Method::GET, "/api/show", None, StatusCode::NOT_FOUND, "not_found")]
#[case(Method::POST, "/api/commit", Some(json!({ "message": "m" })), StatusCode::BAD_REQUEST, "nothing_staged")]
#[case(Method::POST, "/api/commit", Some(json!({ "message": "  " })), StatusCode::BAD_REQUEST, "bad_request")]
#[case(Method::POST, "/api/stage/..%2Fescape.txt", None, StatusCode::BAD_REQUEST, "invalid_path")]
#[case(Method::POST, "/api/add", Some(json!([{ "name": "../x", "content": "x" }])), StatusCode::BAD_REQUEST, "invalid_path")]
#[case(Method::POST, "/api/init", None, StatusCode::CONFLICT, "already_initialized")]
#[tokio::test]
async fn errors_map_to_status_codes(
    #[case] method: Method,
    #[case] uri: &str,
    #[case] body: Option<Value>,
    #[case] expected_status: StatusCode,
    #[case] expected_kind: &str,
) {
    let dir = TempDir::new().unwrap();
    let router = router_for(&dir);
    if expected_kind != "not_initialized" {
        call(&router, Method::POST, "/api/init", None).await;
    }

    let (status, response) = call(&router, method, uri, body).await;

    assert_eq!(status, expected_status);
    assert_eq!(response["kind"], expected_kind);
    assert!(response["error"].as_str().is_some_and(|message| !message.is_empty()));
}

#[rstest]
#[tokio::test]
async fn dashboard_is_served(app: (TempDir, Router)) {
    let (_dir, router) = app;
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("<title>minigit</title>"));
}
