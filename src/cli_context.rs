use std::sync::Arc;

use crate::client::SpinwheelClient;
use crate::config::{load_config, Config};
use crate::error::{SpinwheelError, SpinwheelResult};
use crate::logging::{log_error, log_info};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::session::{FileSessionStore, Session, SessionStore};

/// Authentication state shared by all commands: the client, the session
/// store behind it, and who (if anyone) is logged in.
pub struct CliContext {
    config: Config,
    client: Arc<SpinwheelClient>,
    user: Option<User>,
    authenticated: bool,
}

impl CliContext {
    /// Load context from saved configuration and the on-disk session
    pub fn load() -> SpinwheelResult<Self> {
        let config = load_config();
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open_default()?);
        let api_url = config.api_url();
        Self::from_parts(config, api_url, store)
    }

    fn from_parts(config: Config, api_url: String, store: Arc<dyn SessionStore>) -> SpinwheelResult<Self> {
        let client = Arc::new(SpinwheelClient::new(api_url, store)?);
        Ok(Self {
            config,
            client,
            user: None,
            authenticated: false,
        })
    }

    pub fn builder() -> CliContextBuilder {
        CliContextBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> Arc<SpinwheelClient> {
        self.client.clone()
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        self.client.store()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The logged-in user, for commands that need one.
    pub fn require_user(&self) -> SpinwheelResult<&User> {
        match (&self.user, self.authenticated) {
            (Some(user), true) => Ok(user),
            _ => Err(SpinwheelError::NotAuthenticated),
        }
    }

    /// Verifies a stored token, if any. A token the backend rejects is
    /// discarded along with its refresh token.
    pub async fn check_auth(&mut self) -> bool {
        if self.store().access_token().is_none() {
            self.reset();
            return false;
        }

        match self.client.verify().await {
            Ok(user) => {
                log_info(&format!("Session verified for {}", user.username));
                self.user = Some(user);
                self.authenticated = true;
            }
            Err(e) => {
                log_error(&format!("Token verification failed: {}", e));
                if let Err(clear_err) = self.store().clear() {
                    log_error(&format!("Failed to clear session: {}", clear_err));
                }
                self.reset();
            }
        }

        self.authenticated
    }

    pub async fn login(&mut self, credentials: &LoginRequest) -> SpinwheelResult<&User> {
        let response = self.client.login(credentials).await?;
        self.start_session(response)
    }

    pub async fn register(&mut self, registration: &RegisterRequest) -> SpinwheelResult<&User> {
        let response = self.client.register(registration).await?;
        self.start_session(response)
    }

    fn start_session(&mut self, response: AuthResponse) -> SpinwheelResult<&User> {
        self.store().save_session(&Session {
            access_token: response.access,
            refresh_token: response.refresh,
        })?;
        log_info(&format!("Logged in as {}", response.user.username));

        self.authenticated = true;
        Ok(&*self.user.insert(response.user))
    }

    pub fn logout(&mut self) -> SpinwheelResult<()> {
        self.store().clear()?;
        self.reset();
        log_info("Logged out");
        Ok(())
    }

    fn reset(&mut self) {
        self.authenticated = false;
        self.user = None;
    }
}

/// Builder pattern for creating CLI contexts with specific configurations
pub struct CliContextBuilder {
    config: Option<Config>,
    api_url: Option<String>,
    store: Option<Arc<dyn SessionStore>>,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            api_url: None,
            store: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> SpinwheelResult<CliContext> {
        let config = self.config.unwrap_or_else(load_config);
        let api_url = self.api_url.unwrap_or_else(|| config.api_url());

        let store: Arc<dyn SessionStore> = match self.store {
            Some(store) => store,
            None => Arc::new(FileSessionStore::open_default()?),
        };

        CliContext::from_parts(config, api_url, store)
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
