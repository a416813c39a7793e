//! # contagem-core
//!
//! Access-control core for the counter service.
//!
//! ## Components
//!
//! - **AccessManager:** validates credentials against a [`UserStore`], issues
//!   HS256-signed bearer tokens and verifies them for the request gate.
//! - **Counter:** process-wide counter with race-free increments.
//! - **TokenConfiguration:** issuer, audience, signing key and validity window,
//!   fixed at startup.

pub mod access;
pub mod claims;
pub mod config;
pub mod counter;
pub mod error;
pub mod user;

pub use access::AccessManager;
pub use claims::{AccessLevel, Claims, Token};
pub use config::{MIN_SIGNING_KEY_LEN, TokenConfiguration};
pub use counter::{Counter, ResultSnapshot};
pub use error::{AccessError, ConfigurationError, VerificationFailure};
pub use user::{Credentials, InMemoryUserStore, UserRecord, UserStore};
