use crate::claims::AccessLevel;
use crate::error::ConfigurationError;
use constant_time_eq::constant_time_eq;
use std::collections::HashMap;
use std::fmt;

/// Credentials supplied with a single login attempt
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub id: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("secret", &"***")
            .finish()
    }
}

/// A user known to the user store
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub secret: String,
    pub access_level: AccessLevel,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, secret: impl Into<String>, access_level: AccessLevel) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
            access_level,
        }
    }

    /// Parses a single `id:secret[:level]` entry. The level defaults to `Normal`.
    pub fn parse_entry(entry: &str) -> Result<Self, ConfigurationError> {
        let invalid = || ConfigurationError::InvalidUserEntry(entry.trim().to_string());

        let mut parts = entry.trim().splitn(3, ':');
        let id = parts.next().map(str::trim).filter(|s| !s.is_empty());
        let secret = parts.next().filter(|s| !s.is_empty());
        let (Some(id), Some(secret)) = (id, secret) else {
            return Err(invalid());
        };

        let access_level = match parts.next() {
            Some(level) => level.parse()?,
            None => AccessLevel::Normal,
        };

        Ok(Self::new(id, secret, access_level))
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("access_level", &self.access_level)
            .finish_non_exhaustive()
    }
}

/// Read access to user records
pub trait UserStore: Send + Sync {
    /// Look up a user by id
    fn lookup_user(&self, id: &str) -> Option<UserRecord>;

    /// Checks an id/secret pair, comparing secrets in constant time
    fn validate_credentials(&self, id: &str, secret: &str) -> bool {
        match self.lookup_user(id) {
            Some(record) => constant_time_eq(record.secret.as_bytes(), secret.as_bytes()),
            None => false,
        }
    }
}

/// User store backed by a map that is filled once at startup
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: HashMap<String, UserRecord>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user, replacing any previous record with the same id
    pub fn with_user(mut self, record: UserRecord) -> Self {
        self.users.insert(record.id.clone(), record);
        self
    }

    /// Builds a store from a comma-separated list of `id:secret[:level]` entries
    pub fn from_seed(seed: &str) -> Result<Self, ConfigurationError> {
        seed.split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(UserRecord::parse_entry)
            .try_fold(Self::new(), |store, record| Ok(store.with_user(record?)))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl FromIterator<UserRecord> for InMemoryUserStore {
    fn from_iter<I: IntoIterator<Item = UserRecord>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with_user)
    }
}

impl UserStore for InMemoryUserStore {
    fn lookup_user(&self, id: &str) -> Option<UserRecord> {
        self.users.get(id).cloned()
    }
}
