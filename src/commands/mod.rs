pub mod auth;
pub mod config;
pub mod history;
pub mod teams;
pub mod wheel;
pub mod whoami;

use colored::*;

use crate::client::SpinwheelClient;
use crate::error::SpinwheelError;
use crate::logging::{log_error, log_info};
use crate::models::Activity;

/// Keeps errors the user can act on; wraps the rest in the view's generic message.
pub fn friendly_error(error: SpinwheelError, message: &str) -> SpinwheelError {
    if error.is_user_facing() {
        return error;
    }
    log_error(&format!("{}: {}", message, error));
    SpinwheelError::Unknown(format!("{} ({})", message, error))
}

/// Saves an activity to the user's history. Failures are logged, never fatal.
pub async fn record_activity(client: &SpinwheelClient, activity: Activity) {
    match client.add_history(&activity).await {
        Ok(entry) => {
            log_info(&format!("Recorded {} as history entry {}", activity.action(), entry.id));
            println!("{}", "Saved to history.".dimmed());
        }
        Err(e) => {
            log_error(&format!("Failed to save to history: {}", e));
            eprintln!("{}", "Could not save this result to your history.".yellow());
        }
    }
}
