//! Credential validation, token issuance and token verification.

use crate::claims::{Claims, Token};
use crate::config::TokenConfiguration;
use crate::error::{AccessError, VerificationFailure};
use crate::user::{Credentials, UserStore};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Header, decode, encode};
use log::debug;
use std::sync::Arc;

/// Gates identity into the system and mints verifiable tokens.
///
/// Holds no mutable state; share it behind an `Arc` and call it from any
/// number of threads.
#[derive(Clone)]
pub struct AccessManager {
    users: Arc<dyn UserStore>,
    config: Arc<TokenConfiguration>,
}

impl AccessManager {
    pub fn new(users: Arc<dyn UserStore>, config: TokenConfiguration) -> Self {
        Self {
            users,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &TokenConfiguration {
        &self.config
    }

    /// Returns `true` only for a present, non-empty id whose secret matches
    /// the stored record. Never fails.
    pub fn validate_credentials(&self, credentials: Option<&Credentials>) -> bool {
        match credentials {
            Some(credentials) if !credentials.id.is_empty() => self
                .users
                .validate_credentials(&credentials.id, &credentials.secret),
            _ => false,
        }
    }

    /// Issues a token for credentials that pass [`Self::validate_credentials`]
    pub fn generate_token(&self, credentials: &Credentials) -> Result<Token, AccessError> {
        self.generate_token_at(credentials, Utc::now())
    }

    /// Issues a token as if the current time were `now`
    pub fn generate_token_at(
        &self,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Result<Token, AccessError> {
        if !self.validate_credentials(Some(credentials)) {
            return Err(AccessError::Unauthenticated(credentials.id.clone()));
        }
        let record = self
            .users
            .lookup_user(&credentials.id)
            .ok_or_else(|| AccessError::Unauthenticated(credentials.id.clone()))?;

        let validity = self.config.validity_minutes();
        let issued_at = now.timestamp();
        let expires_at = (now + Duration::minutes(i64::from(validity))).timestamp();

        let claims = Claims {
            iss: self.config.issuer().to_string(),
            aud: self.config.audience().to_string(),
            sub: record.id.clone(),
            user_id: record.id,
            access_level: record.access_level,
            iat: issued_at,
            nbf: issued_at,
            exp: expires_at,
        };

        let access_token = encode(
            &Header::new(TokenConfiguration::ALGORITHM),
            &claims,
            self.config.encoding_key(),
        )?;

        debug!(
            "Issued token for user '{}' with access level {}, expires at {}",
            claims.user_id, claims.access_level, claims.exp
        );

        Ok(Token::bearer(access_token, validity))
    }

    /// Verifies a raw bearer token against the current time
    pub fn verify_token(&self, raw_token: &str) -> Result<Claims, VerificationFailure> {
        self.verify_token_at(raw_token, Utc::now())
    }

    /// Verifies signature, issuer, audience and the `[nbf, exp)` window at `now`
    pub fn verify_token_at(
        &self,
        raw_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, VerificationFailure> {
        let data = decode::<Claims>(
            raw_token,
            self.config.decoding_key(),
            self.config.validation(),
        )?;
        let claims = data.claims;

        let now = now.timestamp();
        if now < claims.nbf {
            return Err(VerificationFailure::NotYetValid);
        }
        if now >= claims.exp {
            return Err(VerificationFailure::Expired);
        }

        Ok(claims)
    }
}
