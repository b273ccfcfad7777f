use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::constants::{CREDENTIAL_PATHS, REFRESH_PATH, REFRESH_TOKEN_KEY, TOKEN_KEY};
use crate::error::{SpinwheelError, SpinwheelResult};
use crate::formatting::utils::truncate;
use crate::logging::{log_debug, log_error, log_info};
use crate::models::{ErrorBody, RefreshRequest, RefreshResponse};
use crate::session::SessionStore;

/// HTTP client that attaches the persisted bearer token and recovers once
/// from an expired access token.
///
/// On a 401 the client exchanges the persisted refresh token for a new access
/// token and replays the original request exactly once. If there is no refresh
/// token or the refresh fails, the session is cleared and the caller gets
/// [`SpinwheelError::SessionExpired`]. Credential endpoints are exempt: their
/// 401 means bad credentials and comes back as `Unauthorized`.
/// Refreshes are serialized: requests that fail together with the same stale
/// token share a single call to the refresh endpoint.
pub struct AuthenticatedClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    refresh_lock: Mutex<()>,
}

impl AuthenticatedClient {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> SpinwheelResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issues a request and returns the response if it ended in a 2xx status.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: Option<&[(String, String)]>,
    ) -> SpinwheelResult<Response> {
        let token = self.store.access_token();
        let response = self.send(method.clone(), path, body, params, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || CREDENTIAL_PATHS.contains(&path) {
            return check_status(response).await;
        }

        log_info(&format!("{} {} returned 401, refreshing access token", method, path));
        let access = self.refresh_access_token(token.as_deref()).await?;

        // Single replay; a second 401 goes straight to the caller
        let replayed = self.send(method, path, body, params, Some(&access)).await?;
        check_status(replayed).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: Option<&[(String, String)]>,
        token: Option<&str>,
    ) -> SpinwheelResult<Response> {
        log_debug(&format!("{} {}{}", method, path, if token.is_some() { " (authenticated)" } else { "" }));

        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(params) = params {
            builder = builder.query(params);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    /// Returns a fresh access token, replacing `rejected`.
    async fn refresh_access_token(&self, rejected: Option<&str>) -> SpinwheelResult<String> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.store.access_token() {
            if Some(current.as_str()) != rejected {
                log_debug("Access token was already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        // Also gone if a concurrent refresh failed and cleared the session
        let Some(refresh_token) = self.store.refresh_token() else {
            log_info("No refresh token stored, clearing session");
            return Err(self.expire_session());
        };

        match self.post_refresh(&refresh_token).await {
            Ok(refreshed) => {
                self.store.set(TOKEN_KEY, &refreshed.access)?;
                if let Some(rotated) = &refreshed.refresh {
                    self.store.set(REFRESH_TOKEN_KEY, rotated)?;
                }
                log_info("Access token refreshed");
                Ok(refreshed.access)
            }
            Err(e) => {
                log_error(&format!("Token refresh failed, clearing session: {}", e));
                Err(self.expire_session())
            }
        }
    }

    fn expire_session(&self) -> SpinwheelError {
        if let Err(clear_err) = self.store.clear() {
            log_error(&format!("Failed to clear session: {}", clear_err));
        }
        SpinwheelError::SessionExpired
    }

    /// Calls the refresh endpoint directly, without a bearer token or retry.
    pub async fn post_refresh(&self, refresh_token: &str) -> SpinwheelResult<RefreshResponse> {
        let body = serde_json::to_value(RefreshRequest { refresh: refresh_token })?;
        let response = self.send(Method::POST, REFRESH_PATH, Some(&body), None, None).await?;
        let response = check_status(response).await?;
        decode(response).await
    }
}

/// Maps a non-2xx response to the matching error.
pub async fn check_status(response: Response) -> SpinwheelResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    log_debug(&format!("Request failed with {}: {}", status, message));

    if status == StatusCode::UNAUTHORIZED {
        Err(SpinwheelError::Unauthorized(message))
    } else {
        Err(SpinwheelError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorBody { detail: Some(detail) }) = serde_json::from_str::<ErrorBody>(body) {
        return detail;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return truncate(trimmed, 200);
    }

    status.canonical_reason().unwrap_or("Request failed").to_string()
}

pub async fn decode<T: DeserializeOwned>(response: Response) -> SpinwheelResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
