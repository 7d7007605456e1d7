use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::jwt::DecodedIdentity;
use crate::jwt::ExtraClaims;
use crate::jwt::JwtError;
use crate::jwt::SignedToken;
use crate::jwt::TokenConfig;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenKind;
use crate::jwt::TokenVerifier;

/// Session token coordinator.
///
/// Pairs an issuer and a verifier built from the same configuration and clock,
/// so a token minted here always verifies here until it expires.
pub struct Authenticator {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Signing secrets and lifetimes
    /// * `clock` - Time source for `iat`, `exp` and expiry checks
    pub fn new(config: TokenConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            issuer: TokenIssuer::new(config.clone(), Arc::clone(&clock)),
            verifier: TokenVerifier::new(config, clock),
        }
    }

    /// Mint an access token for a subject.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_access_token(
        &self,
        subject: &str,
        extra: ExtraClaims,
    ) -> Result<SignedToken, JwtError> {
        self.issuer.issue(TokenKind::Access, subject, extra)
    }

    /// Mint a refresh token carrying only the subject.
    pub fn issue_refresh_token(&self, subject: &str) -> Result<SignedToken, JwtError> {
        self.issuer
            .issue(TokenKind::Refresh, subject, ExtraClaims::new())
    }

    /// Validate an access token and recover its identity.
    ///
    /// # Errors
    /// * `Missing` - Empty token
    /// * `Expired` - Valid signature, past `exp`
    /// * `Invalid` - Anything else wrong with the token
    pub fn verify_access_token(&self, token: &str) -> Result<DecodedIdentity, TokenError> {
        self.verifier.verify(TokenKind::Access, token)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<DecodedIdentity, TokenError> {
        self.verifier.verify(TokenKind::Refresh, token)
    }

    pub fn access_ttl(&self) -> Duration {
        self.issuer.ttl(TokenKind::Access)
    }
}
