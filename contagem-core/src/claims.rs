//! Token payload and the token value handed back to callers.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level carried in the `AccessLevel` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessLevel {
    #[default]
    Normal,
    Admin,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Normal => write!(f, "Normal"),
            AccessLevel::Admin => write!(f, "Admin"),
        }
    }
}

impl FromStr for AccessLevel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(AccessLevel::Normal),
            "admin" => Ok(AccessLevel::Admin),
            other => Err(ConfigurationError::UnknownAccessLevel(other.to_string())),
        }
    }
}

/// Claims set signed into every access token.
///
/// Registered claims use their standard short names; the two custom claims
/// keep the names clients already read (`UserID`, `AccessLevel`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "AccessLevel")]
    pub access_level: AccessLevel,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// Issued bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub access_token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub expires_in_minutes: u32,
}

impl Token {
    pub const BEARER: &'static str = "Bearer";

    pub(crate) fn bearer(access_token: String, expires_in_minutes: u32) -> Self {
        Self {
            access_token,
            token_type: Self::BEARER.to_string(),
            expires_in_minutes,
        }
    }
}
