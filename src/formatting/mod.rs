pub mod history;
pub mod teams;
pub mod utils;

pub use history::{format_history_entry, print_history, print_profile_header, EMPTY_HISTORY};
pub use teams::{format_teams, print_teams};
pub use utils::{format_relative_time, format_timestamp, mask_token, truncate};
