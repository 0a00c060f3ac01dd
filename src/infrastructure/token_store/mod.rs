use crate::infrastructure::storage::KeyValueStorage;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const TOKEN_EXPIRY_KEY: &str = "token_expiry";

// Keeps `now + expires_in` far away from chrono's representable range
const MAX_EXPIRES_IN_SECS: i64 = 10 * 365 * 24 * 3600;

/// Source of the current time for expiry bookkeeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Holds the current credentials: access token, refresh token and the
/// absolute access-token expiry (epoch milliseconds).
///
/// Shared as `Arc<TokenStore>` between the API client and whoever owns the
/// session. Writes are last-write-wins.
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Store a complete token set. Expiry is fixed now as `now + expires_in_secs`.
    pub fn set_tokens(&self, access_token: &str, refresh_token: &str, expires_in_secs: i64) {
        self.write(ACCESS_TOKEN_KEY, access_token);
        self.write(REFRESH_TOKEN_KEY, refresh_token);
        self.write_expiry(expires_in_secs);
        tracing::debug!(expires_in = expires_in_secs, "Stored token set");
    }

    /// Replace the access token and its expiry, leaving the refresh token alone.
    pub fn set_access_token(&self, access_token: &str, expires_in_secs: i64) {
        self.write(ACCESS_TOKEN_KEY, access_token);
        self.write_expiry(expires_in_secs);
        tracing::debug!(expires_in = expires_in_secs, "Stored renewed access token");
    }

    pub fn set_refresh_token(&self, refresh_token: &str) {
        self.write(REFRESH_TOKEN_KEY, refresh_token);
    }

    pub fn clear_tokens(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TOKEN_EXPIRY_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to remove token from storage");
            }
        }
        tracing::debug!("Cleared stored tokens");
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY)
    }

    /// Absolute expiry of the access token, if one is stored and readable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.storage
            .get(TOKEN_EXPIRY_KEY)?
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
    }

    /// True when no expiry is stored or the current time is past it.
    pub fn is_token_expired(&self) -> bool {
        match self.expires_at() {
            Some(expires_at) => self.clock.now() > expires_at,
            None => true,
        }
    }

    fn write_expiry(&self, expires_in_secs: i64) {
        let expires_in = expires_in_secs.clamp(-MAX_EXPIRES_IN_SECS, MAX_EXPIRES_IN_SECS);
        let expires_at = self.clock.now() + Duration::seconds(expires_in);
        self.write(TOKEN_EXPIRY_KEY, &expires_at.timestamp_millis().to_string());
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!(key, error = %e, "Failed to persist token");
        }
    }
}
