//! Session state: credentials, bearer token and expiry.
//!
//! All state transitions here are pure so they can be tested without I/O.
//! The client owns a [`Session`] behind a mutex and drives it.

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};

/// How long a token stays valid after the server issued it.
pub const TOKEN_LIFETIME: TimeDelta = TimeDelta::hours(24);

/// Returns the lowercase hex SHA-1 digest of `password`.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Account credentials. The clear-text password is hashed on construction
/// and never stored.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password_hash: SecretString,
}

impl Credentials {
    /// Hashes `password` and stores it alongside `username`.
    #[must_use]
    pub fn new(username: impl Into<String>, password: &str) -> Self {
        Self {
            username: username.into(),
            password_hash: SecretString::new(hash_password(password)),
        }
    }

    /// Returns the account name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the SHA-1 hex digest that is sent to the service.
    pub(crate) fn password_hash(&self) -> &str {
        self.password_hash.expose_secret()
    }
}

/// Whether the current token can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A token is held and has not reached its expiry.
    Valid,
    /// No token, or the token has expired.
    Stale,
}

/// Mutable per-client authentication state.
#[derive(Debug)]
pub struct Session {
    credentials: Credentials,
    token: Option<String>,
    token_expiry: Option<DateTime<Utc>>,
    /// 0 or 1; set while an auth-rejection retry is in flight.
    pub(crate) failed_request_count: u8,
}

impl Session {
    /// Creates an unauthenticated session.
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token: None,
            token_expiry: None,
            failed_request_count: 0,
        }
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the current token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns when the current token expires.
    #[must_use]
    pub const fn token_expiry(&self) -> Option<DateTime<Utc>> {
        self.token_expiry
    }

    /// Returns `true` when there is no expiry or `now` has reached it.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.token_expiry.is_none_or(|expiry| now >= expiry)
    }

    /// Classifies the session at `now`.
    #[must_use]
    pub fn state(&self, now: DateTime<Utc>) -> SessionState {
        if self.token.is_some() && !self.is_stale(now) {
            SessionState::Valid
        } else {
            SessionState::Stale
        }
    }

    /// Stores a freshly issued token.
    ///
    /// The expiry is counted from `issued_at`, the server's timestamp for
    /// the token reply, falling back to `now` when the server sent none.
    pub fn store_token(
        &mut self,
        token: String,
        issued_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) {
        self.token = Some(token);
        self.token_expiry = issued_at
            .unwrap_or(now)
            .checked_add_signed(TOKEN_LIFETIME);
    }
}
