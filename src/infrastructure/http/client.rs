use super::{ApiPayload, AttemptState, RequestDescriptor};
use crate::domain::auth::{RefreshResponse, RefreshTokenRequest};
use crate::error::{ApiError, ApiResult};
use crate::infrastructure::config::Config;
use crate::infrastructure::token_store::TokenStore;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const REFRESH_PATH: &str = "/api/v1/auth/refresh";
pub const LOGOUT_PATH: &str = "/api/v1/auth/logout";
pub const X_REQUEST_ID: &str = "x-request-id";

/// Authenticated client for the nutrition API.
///
/// Attaches the stored bearer token to every request and, when the server
/// answers 401, refreshes the session once and replays the request once.
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
    token_store: Arc<TokenStore>,
    refresh_gate: Mutex<()>,
}

impl ApiClient {
    pub fn new(config: &Config, token_store: Arc<TokenStore>) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_http_client(
            &config.api_base_url,
            http_client,
            token_store,
        ))
    }

    pub fn with_http_client(
        base_url: &str,
        http_client: reqwest::Client,
        token_store: Arc<TokenStore>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            token_store,
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn token_store(&self) -> &Arc<TokenStore> {
        &self.token_store
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one logical API operation, recovering from an expired session once.
    pub async fn execute(&self, request: &RequestDescriptor) -> ApiResult<ApiPayload> {
        self.execute_as(request, AttemptState::Initial).await
    }

    /// Like [`execute`](Self::execute), starting from an explicit attempt state.
    ///
    /// Starting as `Retried` sends the request exactly once and reports a 401
    /// as a plain HTTP error. Login-type calls use this so a bad password is
    /// not mistaken for an expired session.
    pub async fn execute_as(
        &self,
        request: &RequestDescriptor,
        initial: AttemptState,
    ) -> ApiResult<ApiPayload> {
        let mut state = initial;

        loop {
            let sent_token = self.token_store.access_token();
            let result = self.dispatch(request, sent_token.as_deref()).await;

            match (result, state) {
                (Err(error), AttemptState::Initial) if error.is_unauthorized_response() => {
                    tracing::debug!(
                        method = %request.method(),
                        path = %request.path(),
                        "Access token rejected, recovering session"
                    );
                    self.recover_session(sent_token.as_deref()).await?;
                    state = AttemptState::Retried;
                }
                // The refreshed token was rejected too: the session is over
                (Err(error), AttemptState::Retried)
                    if error.is_unauthorized_response() && initial == AttemptState::Initial =>
                {
                    tracing::warn!(
                        method = %request.method(),
                        path = %request.path(),
                        "Request still unauthorized after session refresh"
                    );
                    self.logout().await;
                    return Err(ApiError::SessionExpired);
                }
                (result, _) => return result,
            }
        }
    }

    /// Execute and decode a JSON response body into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> ApiResult<T> {
        self.execute(request).await?.into_json()
    }

    /// Execute a request whose response body is irrelevant (deletes, acks).
    pub async fn send(&self, request: &RequestDescriptor) -> ApiResult<()> {
        self.execute(request).await.map(|_| ())
    }

    /// Refresh with the stored refresh token, one refresh at a time.
    ///
    /// Shares the gate with automatic session recovery, so a manual refresh and a
    /// 401-driven one never present the same refresh token concurrently.
    pub async fn refresh_session(&self) -> ApiResult<RefreshResponse> {
        let _gate = self.refresh_gate.lock().await;

        let refresh_token = self
            .token_store
            .refresh_token()
            .ok_or(ApiError::SessionExpired)?;
        self.refresh(&refresh_token).await
    }

    /// Exchange a refresh token for a new access token and store it.
    ///
    /// Sent as `Retried` from the start: the refresh call can never trigger
    /// another refresh. Failures are returned unchanged and leave the store alone.
    /// Not gated; concurrent callers should use [`refresh_session`](Self::refresh_session).
    pub async fn refresh(&self, refresh_token: &str) -> ApiResult<RefreshResponse> {
        let request = RequestDescriptor::post(REFRESH_PATH).with_json(&RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        })?;

        let access_token = self.token_store.access_token();
        let response: RefreshResponse = self
            .dispatch(&request, access_token.as_deref())
            .await?
            .into_json()?;

        self.token_store
            .set_access_token(&response.access_token, response.expires_in);
        if let Some(rotated) = response.refresh_token.as_deref() {
            self.token_store.set_refresh_token(rotated);
        }

        tracing::info!(expires_in = response.expires_in, "Access token refreshed");
        Ok(response)
    }

    /// Best-effort server-side logout followed by an unconditional local clear.
    ///
    /// The clear runs on every exit path, including when this future is
    /// dropped before the server answers.
    pub async fn logout(&self) {
        let _clear = ClearTokensOnDrop(self.token_store.as_ref());

        let access_token = self.token_store.access_token();
        match self
            .dispatch(&RequestDescriptor::post(LOGOUT_PATH), access_token.as_deref())
            .await
        {
            Ok(_) => tracing::debug!("Server-side session invalidated"),
            Err(e) => tracing::debug!(
                error = %e,
                status = e.status(),
                "Logout request failed, clearing local session anyway"
            ),
        }
    }

    /// Obtain a fresh access token after a 401, at most one refresh at a time.
    ///
    /// A caller that waited on the gate while another request refreshed sees a
    /// different stored token than the one it sent and goes straight to retry.
    async fn recover_session(&self, sent_token: Option<&str>) -> ApiResult<()> {
        let _gate = self.refresh_gate.lock().await;

        let current = self.token_store.access_token();
        if current.is_some() && current.as_deref() != sent_token {
            tracing::debug!("Session already renewed by a concurrent request");
            return Ok(());
        }

        let Some(refresh_token) = self.token_store.refresh_token() else {
            tracing::warn!("No refresh token stored, ending session");
            self.logout().await;
            return Err(ApiError::SessionExpired);
        };

        match self.refresh(&refresh_token).await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, status = e.status(), "Token refresh failed, ending session");
                self.logout().await;
                Err(ApiError::refresh_failed(&e))
            }
        }
    }

    /// One network round trip, no session recovery.
    async fn dispatch(
        &self,
        request: &RequestDescriptor,
        access_token: Option<&str>,
    ) -> ApiResult<ApiPayload> {
        let url = format!("{}{}", self.base_url, request.path());
        let request_id = Uuid::new_v4().to_string();
        let headers = build_headers(request, access_token, &request_id)?;

        let mut builder = self
            .http_client
            .request(request.method().clone(), &url)
            .headers(headers);
        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }
        if let Some(body) = request.body() {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ApiError::InvalidRequest(format!("failed to encode body: {}", e)))?;
            builder = builder.body(bytes);
        }

        tracing::debug!(
            method = %request.method(),
            path = %request.path(),
            request_id = %request_id,
            "Sending API request"
        );

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                method = %request.method(),
                path = %request.path(),
                request_id = %request_id,
                error = %e,
                "API request did not reach the server"
            );
            ApiError::network(e)
        })?;

        let status = response.status();
        tracing::debug!(
            method = %request.method(),
            path = %request.path(),
            request_id = %request_id,
            status = status.as_u16(),
            "Received API response"
        );

        interpret(response).await
    }
}

struct ClearTokensOnDrop<'a>(&'a TokenStore);

impl Drop for ClearTokensOnDrop<'_> {
    fn drop(&mut self) {
        self.0.clear_tokens();
    }
}

fn build_headers(
    request: &RequestDescriptor,
    access_token: Option<&str>,
    request_id: &str,
) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(X_REQUEST_ID),
        header_value(request_id)?,
    );
    if let Some(token) = access_token {
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", token))?);
    }

    for (name, value) in request.headers() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::InvalidRequest(format!("invalid header name {}: {}", name, e)))?;
        headers.insert(name, header_value(value)?);
    }

    Ok(headers)
}

fn header_value(value: &str) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ApiError::InvalidRequest(format!("invalid header value: {}", e)))
}

async fn interpret(response: reqwest::Response) -> ApiResult<ApiPayload> {
    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or_default().to_string();

    if status.is_success() {
        if status == StatusCode::NO_CONTENT {
            return Ok(ApiPayload::NoContent);
        }
        if !is_json(response.headers()) {
            return Ok(ApiPayload::Acknowledged {
                status: status.as_u16(),
                status_text,
            });
        }

        let bytes = response.bytes().await.map_err(ApiError::network)?;
        return serde_json::from_slice(&bytes)
            .map(ApiPayload::Json)
            .map_err(|e| {
                tracing::warn!(status = status.as_u16(), error = %e, "Malformed JSON response");
                ApiError::invalid_response(e)
            });
    }

    let body = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<Value>(&bytes).unwrap_or_else(|_| empty_object()),
        Err(_) => empty_object(),
    };

    Err(ApiError::from_response(status.as_u16(), &status_text, body))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}
