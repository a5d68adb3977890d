use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{any, get, post};
use pragati_api::{ApiClient, ApiConfig, ApiError, ApiResponse, CancellationToken, HttpMethod, LoginRequest, RegisterRequest};
use serde_json::{Value, json};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, backend()).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(ApiConfig::new(&self.base_url).unwrap()).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null)
}

/// Reports back what the server saw.
async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "method": method.as_str(),
            "authorization": header_value(&headers, header::AUTHORIZATION),
            "content_type": header_value(&headers, header::CONTENT_TYPE),
            "body": body,
        }
    }))
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "token": "abc",
                "user": {"id": 1, "email": body["email"], "company_id": 3}
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        )
    }
}

fn backend() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route(
            "/api/items",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"}))) }),
        )
        .route("/api/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/api/no-content", post(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Json(json!({"success": true}))
            }),
        )
        .route("/api/auth/login", post(login))
        .route(
            "/api/auth/register",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"success": false}))) }),
        )
}

#[tokio::test]
async fn get_sends_bearer_and_no_body() {
    let srv = TestServer::spawn().await;
    let client = srv.client();

    let resp: ApiResponse<Value> = client
        .request::<Value, Value>(HttpMethod::Get, "/echo", Some(&json!({"ignored": true})), Some("tok123"))
        .await
        .unwrap();

    let seen = resp.into_data().unwrap();
    assert_eq!(seen["method"], "GET");
    assert_eq!(seen["authorization"], "Bearer tok123");
    assert_eq!(seen["content_type"], "application/json");
    assert_eq!(seen["body"], "");
}

#[tokio::test]
async fn post_sends_json_body_without_auth_when_token_absent() {
    let srv = TestServer::spawn().await;
    let client = srv.client();

    let resp: ApiResponse<Value> = client.post("/echo", &json!({"a": 1}), None).await.unwrap();

    let seen = resp.into_data().unwrap();
    assert_eq!(seen["method"], "POST");
    assert_eq!(seen["authorization"], Value::Null);
    assert_eq!(seen["content_type"], "application/json");
    let body: Value = serde_json::from_str(seen["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({"a": 1}));
}

#[tokio::test]
async fn blank_token_is_not_sent() {
    let srv = TestServer::spawn().await;
    let client = srv.client();

    let resp: ApiResponse<Value> = client.delete("/echo", Some("")).await.unwrap();

    let seen = resp.into_data().unwrap();
    assert_eq!(seen["method"], "DELETE");
    assert_eq!(seen["authorization"], Value::Null);
}

#[tokio::test]
async fn unauthorized_surfaces_server_message_and_notifies() {
    let srv = TestServer::spawn().await;
    let client = srv.client();
    let mut rejections = client.unauthorized();

    let err = client.get::<Value>("/api/items", Some("expired")).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Unauthorized");
    assert_eq!(err.to_string(), "Unauthorized");

    let notice = tokio::time::timeout(Duration::from_secs(1), rejections.recv())
        .await
        .expect("no rejection published")
        .unwrap();
    assert_eq!(notice.token.as_deref(), Some("expired"));
    assert_eq!(notice.path, "/api/items");
}

#[tokio::test]
async fn unauthenticated_401_is_not_published() {
    let srv = TestServer::spawn().await;
    let client = srv.client();
    let mut rejections = client.unauthorized();

    let err = client
        .login(&LoginRequest::new("a@b.com", "wrong"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(matches!(
        rejections.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn failure_without_message_uses_generic_fallback() {
    let srv = TestServer::spawn().await;
    let client = srv.client();

    let err = client.get::<Value>("/api/broken", None).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: "API Error".to_string()
        }
    );
}

#[tokio::test]
async fn empty_success_body_is_an_empty_envelope() {
    let srv = TestServer::spawn().await;
    let client = srv.client();

    let resp: ApiResponse<Value> = client.post("/api/no-content", &json!({}), Some("t")).await.unwrap();

    assert!(resp.is_success());
    assert_eq!(resp.data(), None);
}

#[tokio::test]
async fn login_returns_session() {
    let srv = TestServer::spawn().await;
    let client = srv.client();

    let session = client
        .login(&LoginRequest::new("a@b.com", "secret"))
        .await
        .unwrap();

    assert_eq!(session.token, "abc");
    assert_eq!(session.user.email, "a@b.com");
    assert!(session.validate().is_ok());
}

#[tokio::test]
async fn login_rejection_carries_server_message() {
    let srv = TestServer::spawn().await;
    let client = srv.client();

    let err = client
        .login(&LoginRequest::new("a@b.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Invalid credentials");
}

#[tokio::test]
async fn register_failure_without_message_uses_registration_fallback() {
    let srv = TestServer::spawn().await;
    let client = srv.client();

    let err = client
        .register(&RegisterRequest {
            company_name: "Acme".into(),
            company_email: "ops@acme.test".into(),
            email: "owner@acme.test".into(),
            password: "pw".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), "Registration failed");
}

#[tokio::test]
async fn cancelled_request_resolves_to_cancelled() {
    let srv = TestServer::spawn().await;
    let client = srv.client();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = client
        .request_cancellable::<Value, Value>(HttpMethod::Get, "/api/slow", None, Some("t"), &cancel)
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Cancelled);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let client = ApiClient::new(
        ApiConfig::new("http://127.0.0.1:9")
            .unwrap()
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let err = client.get::<Value>("/api/items", None).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}
