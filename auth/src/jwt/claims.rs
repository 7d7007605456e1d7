use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Custom claims carried next to the registered ones.
pub type ExtraClaims = HashMap<String, serde_json::Value>;

const RESERVED: [&str; 3] = ["userId", "iat", "exp"];

/// Signed token payload.
///
/// The subject travels as `userId`; `iat` and `exp` are Unix timestamps in seconds.
/// Anything else (email, role) lives in the flattened `extra` map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (account identifier)
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: ExtraClaims,
}

impl Claims {
    /// Create claims for a subject valid for `ttl` starting at `issued_at`.
    pub fn new(user_id: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
            extra: HashMap::new(),
        }
    }

    /// Add a custom field. Registered claim names are ignored.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        let key = key.to_string();
        if RESERVED.contains(&key.as_str()) {
            return self;
        }
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key, json_value);
        }
        self
    }

    /// Merge a map of custom fields. Registered claim names are ignored.
    pub fn with_extras(self, extra: ExtraClaims) -> Self {
        extra
            .into_iter()
            .fold(self, |claims, (key, value)| claims.with_extra(key, value))
    }

    /// Get a string custom field.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }

    /// Get email from extra fields (convenience method).
    pub fn email(&self) -> Option<&str> {
        self.extra_str("email")
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Check if token is expired. A token is still valid at exactly `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
