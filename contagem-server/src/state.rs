use crate::config::Settings;
use crate::errors::StartupError;
use contagem_core::{AccessManager, Counter};
use log::warn;
use std::sync::Arc;

/// Framework description reported in every counter snapshot
pub const FRAMEWORK: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " ",
    env!("CARGO_PKG_VERSION"),
    " (axum/tokio)"
);

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub access_manager: Arc<AccessManager>,
    pub counter: Arc<Counter>,
}

impl AppState {
    /// Builds the user store, token configuration and counter from settings.
    /// Fails on any invalid access configuration.
    pub fn new(settings: Settings) -> Result<Self, StartupError> {
        let users = settings.user_store()?;
        if users.is_empty() {
            warn!("No users configured, every login attempt will be rejected");
        }
        let token_config = settings.token.to_token_configuration()?;

        Ok(Self {
            access_manager: Arc::new(AccessManager::new(Arc::new(users), token_config)),
            counter: Arc::new(Counter::new(FRAMEWORK)),
            settings: Arc::new(settings),
        })
    }

    /// Greeting injected into counter snapshots
    pub fn greeting(&self) -> Option<&str> {
        self.settings.greeting.as_deref()
    }
}
