pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const API_URL_ENV: &str = "SPINWHEEL_API_URL";
pub const CONFIG_FILE: &str = ".spinwheel-cli-config.json";
pub const SESSION_FILE: &str = ".spinwheel-session.json";

// Session store keys
pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

// Endpoints, relative to the API base URL
pub const LOGIN_PATH: &str = "/auth/login/";
pub const REGISTER_PATH: &str = "/auth/register/";
pub const REFRESH_PATH: &str = "/auth/refresh/";
pub const VERIFY_PATH: &str = "/auth/verify/";
pub const WHEEL_PATH: &str = "/wheel/";
pub const TEAMS_PATH: &str = "/teams/";
pub const HISTORY_PATH: &str = "/history/";

/// Credential endpoints never trigger a token refresh on 401.
pub const CREDENTIAL_PATHS: [&str; 3] = [LOGIN_PATH, REGISTER_PATH, REFRESH_PATH];

pub const DEFAULT_REVEAL_DELAY_MS: u64 = 2000;
pub const DEFAULT_NUM_TEAMS: usize = 2;
