//! Bearer token configuration

use confique::Config;
use contagem_core::{ConfigurationError, TokenConfiguration};

/// Bearer token configuration
#[derive(Debug, Config, Clone, Default)]
pub struct TokenSettings {
    /// Symmetric HS256 signing key, at least 32 bytes (required)
    #[config(env = "CONTAGEM_TOKEN_SECRET")]
    pub secret: String,

    /// Token issuer (default: "APIContagem")
    #[config(env = "CONTAGEM_TOKEN_ISSUER", default = "APIContagem")]
    pub issuer: String,

    /// Token audience (default: "Clients-APIContagem")
    #[config(env = "CONTAGEM_TOKEN_AUDIENCE", default = "Clients-APIContagem")]
    pub audience: String,

    /// Token validity window in minutes (default: 60)
    #[config(env = "CONTAGEM_TOKEN_VALIDITY_MINUTES", default = 60)]
    pub validity_minutes: u32,
}

impl TokenSettings {
    /// Validate the settings and derive the signing configuration
    pub fn to_token_configuration(&self) -> Result<TokenConfiguration, ConfigurationError> {
        TokenConfiguration::new(
            self.issuer.clone(),
            self.audience.clone(),
            &self.secret,
            self.validity_minutes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TokenSettings {
        TokenSettings {
            secret: "token-settings-test-key-0123456789".to_string(),
            issuer: "APIContagem".to_string(),
            audience: "Clients-APIContagem".to_string(),
            validity_minutes: 5,
        }
    }

    #[test]
    fn test_to_token_configuration() {
        let config = settings().to_token_configuration().unwrap();
        assert_eq!(config.issuer(), "APIContagem");
        assert_eq!(config.audience(), "Clients-APIContagem");
        assert_eq!(config.validity_minutes(), 5);
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let settings = TokenSettings {
            secret: "".to_string(),
            ..settings()
        };
        assert_eq!(
            settings.to_token_configuration().unwrap_err(),
            ConfigurationError::MissingSigningKey
        );
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let settings = TokenSettings {
            secret: "too-short".to_string(),
            ..settings()
        };
        assert!(matches!(
            settings.to_token_configuration(),
            Err(ConfigurationError::WeakSigningKey { actual: 9, .. })
        ));
    }
}
