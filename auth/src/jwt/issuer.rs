use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::claims::ExtraClaims;
use super::config::TokenConfig;
use super::config::TokenKind;
use super::errors::JwtError;
use crate::clock::Clock;

/// A freshly signed token together with its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    token: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn into_string(self) -> String {
        self.token
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Lifetime of the token from issuance to expiry.
    pub fn ttl(&self) -> Duration {
        self.expires_at - self.issued_at
    }
}

/// Creates HS256-signed tokens for a subject.
pub struct TokenIssuer {
    config: TokenConfig,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(config: TokenConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Sign a token of the given class with its configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(
        &self,
        kind: TokenKind,
        subject: &str,
        extra: ExtraClaims,
    ) -> Result<SignedToken, JwtError> {
        self.issue_with_ttl(kind, subject, extra, self.config.ttl(kind))
    }

    /// Sign a token of the given class with an explicit lifetime.
    pub fn issue_with_ttl(
        &self,
        kind: TokenKind,
        subject: &str,
        extra: ExtraClaims,
        ttl: Duration,
    ) -> Result<SignedToken, JwtError> {
        let claims = Claims::new(subject, self.clock.now(), ttl).with_extras(extra);

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            self.config.encoding_key(kind),
        )
        .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(SignedToken {
            token,
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
        })
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        self.config.ttl(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn issuer(clock: Arc<ManualClock>) -> TokenIssuer {
        let config = TokenConfig::new(
            b"my_secret_key_at_least_32_bytes_long!",
            b"my_refresh_key_at_least_32_bytes_long",
        )
        .unwrap();
        TokenIssuer::new(config, clock)
    }

    #[test]
    fn test_issue_is_compact_jws() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let token = issuer(clock)
            .issue(TokenKind::Access, "user123", ExtraClaims::new())
            .expect("Failed to issue token");

        assert_eq!(token.as_str().split('.').count(), 3);
        assert_eq!(token.ttl(), Duration::days(10));
    }

    #[test]
    fn test_refresh_token_lifetime() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let token = issuer(clock)
            .issue(TokenKind::Refresh, "user123", ExtraClaims::new())
            .expect("Failed to issue token");

        assert_eq!(token.ttl(), Duration::days(30));
    }

    #[test]
    fn test_tokens_differ_across_instants() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let issuer = issuer(clock.clone());

        let first = issuer
            .issue(TokenKind::Access, "user123", ExtraClaims::new())
            .unwrap();
        clock.advance(Duration::seconds(1));
        let second = issuer
            .issue(TokenKind::Access, "user123", ExtraClaims::new())
            .unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert_eq!(second.issued_at() - first.issued_at(), Duration::seconds(1));
    }
}
