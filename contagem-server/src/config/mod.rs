pub(crate) use crate::config::token::TokenSettings;
use confique::Config;
use contagem_core::{ConfigurationError, InMemoryUserStore};

pub mod token;

/// Optional configuration file, read after environment variables
pub const CONFIG_FILE: &str = "contagem.toml";

/// Main configuration structure for the counter service
#[derive(Debug, Config, Clone)]
pub struct Settings {
    /// The port the server will listen to (default: 8080)
    #[config(env = "CONTAGEM_PORT", default = 8080)]
    pub port: u16,

    /// Greeting included in every counter response
    #[config(env = "CONTAGEM_GREETING")]
    pub greeting: Option<String>,

    /// Users seeded into the in-memory user store at startup.
    /// Comma-separated `id:secret[:level]` entries, level is `normal` or `admin`
    #[config(env = "CONTAGEM_USERS", default = "")]
    pub users: String,

    /// Bearer token configuration
    #[config(nested)]
    pub token: TokenSettings,
}

impl Settings {
    /// Loads the configuration from environment variables, falling back to
    /// `contagem.toml` when present
    pub fn new() -> Result<Self, confique::Error> {
        Settings::builder().env().file(CONFIG_FILE).load()
    }

    /// Builds the user store from the `users` seed
    pub fn user_store(&self) -> Result<InMemoryUserStore, ConfigurationError> {
        InMemoryUserStore::from_seed(&self.users)
    }

    #[cfg(test)]
    pub fn for_test() -> Self {
        Self {
            port: 0, // Let the OS choose a port
            greeting: Some("Hello from the test suite".to_string()),
            users: "alice:correct,admin:Adm1n-pass:admin".to_string(),
            token: TokenSettings {
                secret: "test-signing-key-with-enough-entropy-0123".to_string(),
                issuer: "APIContagem".to_string(),
                audience: "Clients-APIContagem".to_string(),
                validity_minutes: 15,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contagem_core::{AccessLevel, UserStore};

    const VARS: [&str; 7] = [
        "CONTAGEM_PORT",
        "CONTAGEM_GREETING",
        "CONTAGEM_USERS",
        "CONTAGEM_TOKEN_SECRET",
        "CONTAGEM_TOKEN_ISSUER",
        "CONTAGEM_TOKEN_AUDIENCE",
        "CONTAGEM_TOKEN_VALIDITY_MINUTES",
    ];

    fn clear_env() {
        for name in VARS {
            std::env::remove_var(name);
        }
    }

    // Environment variables are process-wide, so every env-driven case lives
    // in this one test.
    #[test]
    fn test_settings_from_env() {
        clear_env();

        // The signing key has no default
        assert!(Settings::new().is_err());

        std::env::set_var("CONTAGEM_TOKEN_SECRET", "env-signing-key-0123456789abcdef0123");
        let settings = Settings::new().unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.greeting, None);
        assert_eq!(settings.users, "");
        assert_eq!(settings.token.issuer, "APIContagem");
        assert_eq!(settings.token.audience, "Clients-APIContagem");
        assert_eq!(settings.token.validity_minutes, 60);

        std::env::set_var("CONTAGEM_PORT", "9090");
        std::env::set_var("CONTAGEM_GREETING", "Olá");
        std::env::set_var("CONTAGEM_USERS", "alice:correct");
        std::env::set_var("CONTAGEM_TOKEN_ISSUER", "issuer");
        std::env::set_var("CONTAGEM_TOKEN_AUDIENCE", "audience");
        std::env::set_var("CONTAGEM_TOKEN_VALIDITY_MINUTES", "5");
        let settings = Settings::new().unwrap();
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.greeting.as_deref(), Some("Olá"));
        assert_eq!(settings.users, "alice:correct");
        assert_eq!(settings.token.issuer, "issuer");
        assert_eq!(settings.token.audience, "audience");
        assert_eq!(settings.token.validity_minutes, 5);

        clear_env();
    }

    #[test]
    fn test_user_store_from_settings() {
        let store = Settings::for_test().user_store().unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.lookup_user("admin").map(|u| u.access_level),
            Some(AccessLevel::Admin)
        );
    }

    #[test]
    fn test_invalid_user_seed() {
        let settings = Settings {
            users: "alice".to_string(),
            ..Settings::for_test()
        };
        assert_eq!(
            settings.user_store().unwrap_err(),
            ConfigurationError::InvalidUserEntry("alice".to_string())
        );
    }
}
