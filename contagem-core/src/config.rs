use crate::error::ConfigurationError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation};
use std::fmt;

/// Minimum signing key length in bytes for HMAC-SHA256
pub const MIN_SIGNING_KEY_LEN: usize = 32;

/// Token signing and validation settings, fixed for the lifetime of the process.
///
/// Key material and the validation rules are derived once here so that
/// issuing and verifying tokens never touch the raw secret again.
#[derive(Clone)]
pub struct TokenConfiguration {
    issuer: String,
    audience: String,
    validity_minutes: u32,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenConfiguration {
    pub const ALGORITHM: Algorithm = Algorithm::HS256;

    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        signing_key: &str,
        validity_minutes: u32,
    ) -> Result<Self, ConfigurationError> {
        let issuer = issuer.into();
        let audience = audience.into();

        if signing_key.is_empty() {
            return Err(ConfigurationError::MissingSigningKey);
        }
        if signing_key.len() < MIN_SIGNING_KEY_LEN {
            return Err(ConfigurationError::WeakSigningKey {
                actual: signing_key.len(),
                minimum: MIN_SIGNING_KEY_LEN,
            });
        }
        if issuer.trim().is_empty() {
            return Err(ConfigurationError::MissingIssuer);
        }
        if audience.trim().is_empty() {
            return Err(ConfigurationError::MissingAudience);
        }
        if validity_minutes == 0 {
            return Err(ConfigurationError::InvalidValidity);
        }

        // Time-based checks are done by the access manager against its own
        // clock, so the library only checks presence of exp/nbf here.
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_audience(&[audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_key.as_bytes()),
            issuer,
            audience,
            validity_minutes,
            validation,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn validity_minutes(&self) -> u32 {
        self.validity_minutes
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub(crate) fn validation(&self) -> &Validation {
        &self.validation
    }
}

// Keys stay out of debug output.
impl fmt::Debug for TokenConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfiguration")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("validity_minutes", &self.validity_minutes)
            .finish_non_exhaustive()
    }
}
