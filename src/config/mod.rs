#[allow(clippy::module_inception)]
pub mod config;

pub use config::{config_path, load_config, save_config, Config};
