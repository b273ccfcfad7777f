use serde::{Deserialize, Serialize};

use super::User;

#[derive(Debug, Serialize, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Returned by both login and register.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshResponse {
    pub access: String,
    /// Present when the backend rotates refresh tokens.
    #[serde(default)]
    pub refresh: Option<String>,
}

/// The verify endpoint answers with either `{"user": {...}}` or the bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum VerifyResponse {
    Wrapped { user: User },
    Bare(User),
}

impl VerifyResponse {
    pub fn into_user(self) -> User {
        match self {
            VerifyResponse::Wrapped { user } => user,
            VerifyResponse::Bare(user) => user,
        }
    }
}
