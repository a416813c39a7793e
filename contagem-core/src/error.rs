use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Errors raised while issuing tokens
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Credentials for user '{0}' were not validated")]
    Unauthenticated(String),

    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Reasons a presented bearer token is rejected.
///
/// These are kept for internal logging only; callers see a uniform
/// authorization rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationFailure {
    #[error("signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is not valid yet")]
    NotYetValid,

    #[error("issuer does not match")]
    IssuerMismatch,

    #[error("audience does not match")]
    AudienceMismatch,

    #[error("malformed token: {0}")]
    Malformed(String),
}

impl From<jsonwebtoken::errors::Error> for VerificationFailure {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => Self::BadSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            ErrorKind::InvalidIssuer => Self::IssuerMismatch,
            ErrorKind::InvalidAudience => Self::AudienceMismatch,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

/// Startup configuration problems. Any of these is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Signing key is missing")]
    MissingSigningKey,

    #[error("Signing key is too weak: {actual} bytes, at least {minimum} required")]
    WeakSigningKey { actual: usize, minimum: usize },

    #[error("Token issuer must not be empty")]
    MissingIssuer,

    #[error("Token audience must not be empty")]
    MissingAudience,

    #[error("Token validity must be a positive number of minutes")]
    InvalidValidity,

    #[error("Invalid user entry '{0}': expected id:secret[:level]")]
    InvalidUserEntry(String),

    #[error("Unknown access level '{0}'")]
    UnknownAccessLevel(String),
}
