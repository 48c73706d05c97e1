use super::*;
use crate::auth::normalize::normalize_failure;
use axum::Router;
use axum::extract::{Form, Json};
use axum::http::{HeaderMap, StatusCode as HttpStatus};
use axum::response::{IntoResponse, Response as HttpResponse};
use axum::routing::{get, post};
use serde_json::{Value, json};
use std::collections::HashMap;

// =============================================================================
// helpers
// =============================================================================

#[test]
fn endpoint_joins_without_double_slash() {
    assert_eq!(endpoint("http://h/api/v1/", "/auth/login"), "http://h/api/v1/auth/login");
    assert_eq!(endpoint("http://h/api/v1", "auth/login"), "http://h/api/v1/auth/login");
}

#[test]
fn failure_from_json_body_is_rejected() {
    let failure = failure_from_body(422, r#"{"detail":[{"loc":["body","email"],"type":"value_error","msg":"not an email address"}]}"#);
    assert_eq!(normalize_failure(&failure), "邮箱格式不正确: ");
}

#[test]
fn failure_from_text_body_is_message() {
    assert_eq!(failure_from_body(502, " Bad Gateway \n"), AuthFailure::Message("Bad Gateway".into()));
}

#[test]
fn failure_from_empty_body_reports_status() {
    assert_eq!(failure_from_body(503, ""), AuthFailure::Message("request failed: 503".into()));
}

// =============================================================================
// fake backend
// =============================================================================

const TOKEN: &str = "tok-alice";

async fn login(Form(form): Form<HashMap<String, String>>) -> HttpResponse {
    if form.get("username").map(String::as_str) == Some("alice") && form.get("password").map(String::as_str) == Some("secret") {
        return Json(json!({
            "access_token": TOKEN,
            "token_type": "bearer",
            "user": { "username": "alice", "email": "alice@example.com" },
        }))
        .into_response();
    }
    (HttpStatus::UNAUTHORIZED, Json(json!({ "detail": "Incorrect username or password" }))).into_response()
}

async fn register(Json(body): Json<Value>) -> HttpResponse {
    let email = body["email"].as_str().unwrap_or_default();
    if !email.contains('@') {
        return (
            HttpStatus::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": [{
                    "loc": ["body", "email"],
                    "type": "value_error",
                    "msg": "value is not a valid email address",
                    "ctx": { "reason": "missing @" },
                }]
            })),
        )
            .into_response();
    }
    Json(json!({ "id": 1, "username": body["username"], "email": email })).into_response()
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer tok-alice")
}

async fn verify_token(headers: HeaderMap) -> Json<Value> {
    if bearer_ok(&headers) { Json(json!({ "username": "alice" })) } else { Json(Value::Null) }
}

async fn logout(headers: HeaderMap) -> HttpResponse {
    if bearer_ok(&headers) {
        Json(json!({ "message": "Logged out successfully" })).into_response()
    } else {
        (HttpStatus::UNAUTHORIZED, Json(json!({ "detail": "Invalid token" }))).into_response()
    }
}

async fn spawn_backend() -> HttpAuthService {
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/verify-token", get(verify_token))
        .route("/api/v1/auth/logout", post(logout));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let config = AuthConfig { api_base_url: format!("http://{addr}/api/v1"), ..AuthConfig::default() };
    HttpAuthService::new(&config).unwrap()
}

// =============================================================================
// round trips against the fake backend
// =============================================================================

#[tokio::test]
async fn login_stores_session() {
    let service = spawn_backend().await;
    service.login("alice", "secret").await.unwrap();

    let session = service.session().unwrap();
    assert_eq!(session.access_token, TOKEN);
    assert_eq!(session.user.username, "alice");
}

#[tokio::test]
async fn login_rejection_carries_backend_detail() {
    let service = spawn_backend().await;
    let failure = service.login("alice", "wrong").await.unwrap_err();

    assert_eq!(failure, AuthFailure::Rejected(json!({ "detail": "Incorrect username or password" })));
    assert!(service.session().is_none());
}

#[tokio::test]
async fn register_validation_failure_normalizes() {
    let service = spawn_backend().await;
    let failure = service.register("bob", "bob.example.com", "pw").await.unwrap_err();
    assert_eq!(normalize_failure(&failure), "邮箱格式不正确: missing @");

    service.register("bob", "bob@example.com", "pw").await.unwrap();
}

#[tokio::test]
async fn verify_and_logout_use_stored_token() {
    let service = spawn_backend().await;
    assert_eq!(service.verify_token().await.unwrap(), None, "no session yet");

    service.login("alice", "secret").await.unwrap();
    assert_eq!(service.verify_token().await.unwrap().as_deref(), Some("alice"));

    service.logout().await.unwrap();
    assert!(service.session().is_none());
    assert_eq!(service.verify_token().await.unwrap(), None);
}

#[tokio::test]
async fn unreachable_backend_is_transport_failure() {
    let config = AuthConfig { api_base_url: "http://127.0.0.1:9".into(), ..AuthConfig::default() };
    let service = HttpAuthService::new(&config).unwrap();
    let failure = service.login("alice", "secret").await.unwrap_err();
    assert!(matches!(failure, AuthFailure::Transport(_)), "got {failure:?}");
}

#[tokio::test]
async fn truncated_rejection_body_reports_status() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !String::from_utf8_lossy(&request).contains("password=") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        // Promise more body than is sent, then hang up.
        socket
            .write_all(b"HTTP/1.1 401 Unauthorized\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{\"detail\"")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let config = AuthConfig { api_base_url: format!("http://{addr}/api/v1"), ..AuthConfig::default() };
    let service = HttpAuthService::new(&config).unwrap();
    let failure = service.login("alice", "secret").await.unwrap_err();

    assert_eq!(failure, AuthFailure::Message("request failed: 401".into()));
    assert!(service.session().is_none());
}
