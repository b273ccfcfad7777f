#![allow(dead_code)]

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpinwheelError {
    #[error("Not logged in. Please run 'spinwheel login' first.")]
    NotAuthenticated,

    #[error("Session expired. Please run 'spinwheel login' again.")]
    SessionExpired,

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl SpinwheelError {
    /// Errors the user can act on directly; everything else gets a generic message.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            SpinwheelError::NotAuthenticated
                | SpinwheelError::SessionExpired
                | SpinwheelError::Validation(_)
        )
    }
}

pub type SpinwheelResult<T> = Result<T, SpinwheelError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> SpinwheelResult<T>;
    fn with_context<F>(self, f: F) -> SpinwheelResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> SpinwheelResult<T> {
        self.map_err(|e| SpinwheelError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> SpinwheelResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| SpinwheelError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> SpinwheelResult<T> {
        self.ok_or_else(|| SpinwheelError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> SpinwheelResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| SpinwheelError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! spinwheel_error {
    ($error_type:ident, $msg:expr) => {
        SpinwheelError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        SpinwheelError::$error_type(format!($fmt, $($arg)*))
    };
}
