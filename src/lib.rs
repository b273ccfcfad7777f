// Module declarations
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod session;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use cli_context::{CliContext, CliContextBuilder};
pub use client::{AuthenticatedClient, SpinwheelClient};
pub use config::{Config, load_config, save_config};
pub use error::{SpinwheelError, SpinwheelResult};
pub use models::*;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
