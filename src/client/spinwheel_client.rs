use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::authenticated::{decode, AuthenticatedClient};
use crate::constants::{HISTORY_PATH, LOGIN_PATH, REGISTER_PATH, TEAMS_PATH, VERIFY_PATH, WHEEL_PATH};
use crate::error::SpinwheelResult;
use crate::logging::log_warn;
use crate::models::*;
use crate::session::SessionStore;

/// Typed access to the wheel, teams, history and auth endpoints.
pub struct SpinwheelClient {
    inner: AuthenticatedClient,
}

impl SpinwheelClient {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> SpinwheelResult<Self> {
        Ok(Self {
            inner: AuthenticatedClient::new(base_url, store)?,
        })
    }

    pub fn http(&self) -> &AuthenticatedClient {
        &self.inner
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        self.inner.store()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&[(String, String)]>,
    ) -> SpinwheelResult<T> {
        let response = self.inner.request(Method::GET, path, None, params).await?;
        decode(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> SpinwheelResult<T> {
        let body = serde_json::to_value(body)?;
        let response = self.inner.request(Method::POST, path, Some(&body), None).await?;
        decode(response).await
    }

    pub async fn login(&self, credentials: &LoginRequest) -> SpinwheelResult<AuthResponse> {
        self.post_json(LOGIN_PATH, credentials).await
    }

    pub async fn register(&self, registration: &RegisterRequest) -> SpinwheelResult<AuthResponse> {
        self.post_json(REGISTER_PATH, registration).await
    }

    pub async fn refresh_token(&self, refresh: &str) -> SpinwheelResult<RefreshResponse> {
        self.inner.post_refresh(refresh).await
    }

    pub async fn verify(&self) -> SpinwheelResult<User> {
        let data: VerifyResponse = self.get_json(VERIFY_PATH, None).await?;
        Ok(data.into_user())
    }

    pub async fn spin(&self) -> SpinwheelResult<SpinResult> {
        self.get_json(WHEEL_PATH, None).await
    }

    pub async fn generate_teams(&self, request: &TeamRequest) -> SpinwheelResult<TeamAssignment> {
        let params = request.query_params();
        let assignment: TeamAssignment = self.get_json(TEAMS_PATH, Some(&params)).await?;

        if !assignment.is_partition_of(request) {
            log_warn(&format!(
                "Backend returned {} teams with {} players for a request of {} teams and {} players",
                assignment.teams.len(),
                assignment.total_players(),
                request.num_teams(),
                request.players().len()
            ));
        }

        Ok(assignment)
    }

    pub async fn get_history(&self) -> SpinwheelResult<Vec<HistoryEntry>> {
        self.get_json(HISTORY_PATH, None).await
    }

    pub async fn add_history(&self, activity: &Activity) -> SpinwheelResult<HistoryEntry> {
        self.post_json(HISTORY_PATH, activity).await
    }
}
