//! Uniform request execution against the configured API.
//!
//! Every call goes through [`ApiClient::request`]:
//! - `Content-Type: application/json` on every request
//! - `Authorization: Bearer <token>` when a token is supplied
//! - JSON body for non-GET methods
//! - non-2xx responses become [`ApiError::Status`] carrying the server message
//!
//! ERROR HANDLING
//! ==============
//! Failures are logged here and then returned; the client never converts an
//! HTTP failure into a successful-looking response. A 401 additionally fans
//! out on the rejection channel so the auth layer can end a stale session.

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use pragati_core::SessionRejected;

use crate::config::ApiConfig;
use crate::error::{ApiError, DEFAULT_ERROR_MESSAGE};
use crate::response::ApiResponse;

const REJECTION_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// HTTP client for the Pragati backend.
///
/// Cheap to clone; clones share the connection pool and rejection channel.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    rejections: broadcast::Sender<SessionRejected>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let (rejections, _) = broadcast::channel(REJECTION_CHANNEL_CAPACITY);
        Ok(Self {
            http,
            config,
            rejections,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Subscribe to credential rejections (HTTP 401 on an authenticated call).
    pub fn unauthorized(&self) -> broadcast::Receiver<SessionRejected> {
        self.rejections.subscribe()
    }

    /// Execute a request and decode the normalized response envelope.
    pub async fn request<T, B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.fetch(method, path, body, token, DEFAULT_ERROR_MESSAGE).await
    }

    /// Like [`request`](Self::request), but resolves to
    /// [`ApiError::Cancelled`] as soon as `cancel` fires. The in-flight
    /// response, if any, is discarded.
    pub async fn request_cancellable<T, B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(method = method.as_str(), path, "request cancelled by caller");
                Err(ApiError::Cancelled)
            }
            result = self.request(method, path, body, token) => result,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request::<T, ()>(HttpMethod::Get, path, None, token).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(HttpMethod::Post, path, Some(body), token).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(HttpMethod::Put, path, Some(body), token).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request::<T, ()>(HttpMethod::Delete, path, None, token).await
    }

    /// Shared request path. `fallback` is the error message used when a
    /// failed response does not carry one.
    pub(crate) async fn fetch<R, B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request_id = Uuid::now_v7();
        let span = tracing::debug_span!("api_request", %request_id, method = method.as_str(), path);

        async move {
            let result = self.execute(method, path, body, token, fallback).await;
            if let Err(err) = &result {
                tracing::error!(error = %err, status = ?err.status(), "API request failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn execute<R, B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(path)?;
        let token = token.filter(|t| !t.trim().is_empty());

        let mut req = self
            .http
            .request(method.into(), url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        if method != HttpMethod::Get {
            if let Some(body) = body {
                let payload = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
                req = req.body(payload);
            }
        }

        tracing::debug!("sending request");
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let message = error_message(&bytes).unwrap_or_else(|| fallback.to_string());
            if status == StatusCode::UNAUTHORIZED {
                self.notify_rejected(token, path);
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        decode_body(&bytes)
    }

    fn notify_rejected(&self, token: Option<&str>, path: &str) {
        // Unauthenticated calls (login, registration) have no session to end.
        let Some(token) = token else { return };

        tracing::warn!(path, "server rejected bearer credential");
        // No subscribers is fine: nobody holds a session to end.
        let _ = self.rejections.send(SessionRejected {
            token: Some(token.to_string()),
            path: path.to_string(),
        });
    }
}

/// Server-provided `message` from an error body, if any.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Decode a 2xx body; an empty body decodes as JSON `null`.
fn decode_body<R: DeserializeOwned>(body: &[u8]) -> Result<R, ApiError> {
    let is_blank = body.iter().all(u8::is_ascii_whitespace);
    let decoded = if is_blank {
        serde_json::from_value(serde_json::Value::Null)
            .or_else(|_| serde_json::from_value(serde_json::Value::Object(Default::default())))
    } else {
        serde_json::from_slice(body)
    };
    decoded.map_err(|e| ApiError::Decode(e.to_string()))
}
