pub mod auth;
pub mod history;
pub mod teams;
pub mod user;
pub mod wheel;

// Re-export commonly used types
pub use auth::{AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, VerifyResponse};
pub use history::{Activity, HistoryEntry};
pub use teams::{parse_players, TeamAssignment, TeamRequest};
pub use user::User;
pub use wheel::SpinResult;

// Error bodies from the backend carry a `detail` message
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
