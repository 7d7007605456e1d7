use chrono::Duration;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::JwtError;

/// Default lifetime of access tokens.
pub const ACCESS_TOKEN_TTL_DAYS: i64 = 10;

/// Default lifetime of refresh tokens.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

/// Token class. Each class has its own secret and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

#[derive(Clone)]
struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    fn new(kind: TokenKind, secret: &[u8], ttl: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret(kind.as_str()));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        })
    }
}

/// Immutable signing configuration shared by issuer and verifier.
///
/// Built once at startup. Replacing a secret invalidates every token signed with the old one.
#[derive(Clone)]
pub struct TokenConfig {
    access: TokenKeys,
    refresh: TokenKeys,
}

impl TokenConfig {
    /// Create a configuration with the default lifetimes (10 days access, 30 days refresh).
    ///
    /// # Errors
    /// * `EmptySecret` - One of the secrets is empty
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Result<Self, JwtError> {
        Ok(Self {
            access: TokenKeys::new(
                TokenKind::Access,
                access_secret,
                Duration::days(ACCESS_TOKEN_TTL_DAYS),
            )?,
            refresh: TokenKeys::new(
                TokenKind::Refresh,
                refresh_secret,
                Duration::days(REFRESH_TOKEN_TTL_DAYS),
            )?,
        })
    }

    /// Override the lifetime of one token class.
    pub fn with_ttl(mut self, kind: TokenKind, ttl: Duration) -> Self {
        match kind {
            TokenKind::Access => self.access.ttl = ttl,
            TokenKind::Refresh => self.refresh.ttl = ttl,
        }
        self
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        self.keys(kind).ttl
    }

    pub(crate) fn encoding_key(&self, kind: TokenKind) -> &EncodingKey {
        &self.keys(kind).encoding_key
    }

    pub(crate) fn decoding_key(&self, kind: TokenKind) -> &DecodingKey {
        &self.keys(kind).decoding_key
    }

    fn keys(&self, kind: TokenKind) -> &TokenKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}
