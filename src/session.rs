// Session state
// Holds the access token and its expiry behind a single lock

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{ConnectError, Result};

/// Token and expiry kept as one unit so readers never observe a torn pair
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// OAuth 2.0 access token, `None` when no session exists
    pub access_token: Option<String>,

    /// Expiry in milliseconds since the Unix epoch; `0` means the token
    /// never expires
    pub expires_at: i64,
}

/// In-memory store for the current session.
///
/// Written by the authorization flow on login success and by the logout
/// coordinator on clear; read by the dispatcher on every request. State
/// lives only as long as the owning client, there is no persistence.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current access token, or `None` if no session exists. Treat with care.
    pub async fn access_token(&self) -> Option<String> {
        self.inner.read().await.access_token.clone()
    }

    /// Expiration time in milliseconds since epoch, or `0` if the session
    /// never expires (or none exists)
    pub async fn expires(&self) -> i64 {
        self.inner.read().await.expires_at
    }

    pub async fn set_access_token(&self, token: Option<String>) {
        self.inner.write().await.access_token = token;
    }

    pub async fn set_expires(&self, at_ms: i64) {
        self.inner.write().await.expires_at = at_ms;
    }

    /// Parse an `expires_in` duration in seconds and store the absolute
    /// expiry. A non-numeric value is an input defect and propagates, as
    /// does a duration too large to represent as an epoch millisecond.
    pub async fn set_expires_in(&self, expires_in: &str) -> Result<()> {
        let invalid = || ConnectError::InvalidExpiry {
            value: expires_in.to_string(),
        };
        let seconds: i64 = expires_in.trim().parse().map_err(|_| invalid())?;
        let expires_at = seconds
            .checked_mul(1000)
            .and_then(|ms| Utc::now().timestamp_millis().checked_add(ms))
            .ok_or_else(invalid)?;
        self.set_expires(expires_at).await;
        Ok(())
    }

    /// Pure read-time validity check. Stored values are never cleared here,
    /// an expired session stays in place until explicitly cleared.
    pub async fn is_valid(&self) -> bool {
        let session = self.inner.read().await;
        valid_at(
            session.access_token.is_some(),
            session.expires_at,
            Utc::now().timestamp_millis(),
        )
    }

    /// Drop the token and reset expiry to the never-expires sentinel
    pub async fn clear(&self) {
        let mut session = self.inner.write().await;
        session.access_token = None;
        session.expires_at = 0;
    }

    /// Consistent copy of the token/expiry pair
    pub async fn snapshot(&self) -> Session {
        self.inner.read().await.clone()
    }
}

/// A session is valid iff a token is present and it either never expires
/// or has not expired yet
pub(crate) fn valid_at(token_present: bool, expires_at: i64, now_ms: i64) -> bool {
    token_present && (expires_at == 0 || now_ms < expires_at)
}
