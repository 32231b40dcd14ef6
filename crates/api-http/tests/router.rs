//! Router tests for the execution endpoint.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use relay_api_http::build_router;
use relay_core::application::RelayService;
use relay_core::domain::ExecutionResult;
use relay_core::port::script_executor::mocks::{MockBehavior, MockScriptExecutor};
use relay_core::port::script_store::mocks::InMemoryScriptStore;
use relay_core::port::StoreError;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(store: InMemoryScriptStore, executor: Arc<MockScriptExecutor>) -> Router {
    build_router(Arc::new(RelayService::new(Arc::new(store), executor)))
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, &body.to_string()).await
}

// ---------------------------------------------------------------------------
// GET /list_scripts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_scripts_returns_names() {
    let executor = Arc::new(MockScriptExecutor::new_success(""));
    let app = app(InMemoryScriptStore::new(&["a.sh", "b.sh"]), executor);

    let response = get(app, "/list_scripts").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"scripts": ["a.sh", "b.sh"]}));
}

#[tokio::test]
async fn list_scripts_empty_store_is_ok() {
    let executor = Arc::new(MockScriptExecutor::new_success(""));
    let app = app(InMemoryScriptStore::new(&[]), executor);

    let response = get(app, "/list_scripts").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"scripts": []}));
}

#[tokio::test]
async fn list_scripts_permission_error_is_500() {
    let executor = Arc::new(MockScriptExecutor::new_success(""));
    let store = InMemoryScriptStore::new(&["a.sh"])
        .failing_list(StoreError::Io("Permission denied (os error 13)".into()));
    let app = app(store, executor);

    let response = get(app, "/list_scripts").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("Permission denied"));
}

// ---------------------------------------------------------------------------
// POST /run_script
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_script_returns_result() {
    let executor = Arc::new(MockScriptExecutor::new(MockBehavior::Complete(
        ExecutionResult {
            output: "hello".into(),
            error: "".into(),
            return_code: 0,
        },
    )));
    let app = app(InMemoryScriptStore::new(&["hello.sh"]), executor.clone());

    let response = post_json(app, "/run_script", json!({"script_name": "hello.sh"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"output": "hello", "error": "", "return_code": 0})
    );
    assert_eq!(executor.call_count(), 1);
}

#[tokio::test]
async fn run_script_unknown_is_404_and_never_executes() {
    let executor = Arc::new(MockScriptExecutor::new_success(""));
    let app = app(InMemoryScriptStore::new(&["hello.sh"]), executor.clone());

    let response = post_json(app, "/run_script", json!({"script_name": "ghost.sh"})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Script ghost.sh not found");
    assert_eq!(executor.call_count(), 0);
}

#[tokio::test]
async fn run_script_traversal_is_404_and_never_executes() {
    let executor = Arc::new(MockScriptExecutor::new_success(""));
    let app = app(InMemoryScriptStore::new(&["hello.sh"]), executor.clone());

    let response = post_json(
        app,
        "/run_script",
        json!({"script_name": "../../etc/shadow"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["detail"].is_string());
    assert_eq!(executor.call_count(), 0);
}

#[tokio::test]
async fn run_script_spawn_failure_is_500() {
    let executor = Arc::new(MockScriptExecutor::new_spawn_fail(
        "No such file or directory (os error 2)",
    ));
    let app = app(InMemoryScriptStore::new(&["hello.sh"]), executor);

    let response = post_json(app, "/run_script", json!({"script_name": "hello.sh"})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("Spawn failed"));
}

#[tokio::test]
async fn run_script_malformed_body_is_422() {
    let executor = Arc::new(MockScriptExecutor::new_success(""));
    let app = app(InMemoryScriptStore::new(&["hello.sh"]), executor.clone());

    let response = post_raw(app, "/run_script", r#"{"name": "hello.sh"}"#).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["detail"].is_string());
    assert_eq!(executor.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_version() {
    let executor = Arc::new(MockScriptExecutor::new_success(""));
    let app = app(InMemoryScriptStore::new(&[]), executor);

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let executor = Arc::new(MockScriptExecutor::new_success(""));
    let app = app(InMemoryScriptStore::new(&[]), executor);

    let response = get(app, "/run").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
