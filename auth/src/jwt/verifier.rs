use std::sync::Arc;

use jsonwebtoken::decode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::config::TokenConfig;
use super::config::TokenKind;
use super::errors::TokenError;
use crate::clock::Clock;

/// Identity recovered from a verified token. Lives for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedIdentity {
    pub subject_id: String,
    pub claims: Claims,
}

impl DecodedIdentity {
    pub fn email(&self) -> Option<&str> {
        self.claims.email()
    }
}

/// Validates tokens produced by [`TokenIssuer`](super::TokenIssuer).
///
/// The signature is checked first, then `exp` against the injected clock, so a
/// tampered token is always reported as `Invalid` and never as `Expired`.
pub struct TokenVerifier {
    config: TokenConfig,
    clock: Arc<dyn Clock>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: TokenConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is judged against our clock below, not the system time.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            config,
            clock,
            validation,
        }
    }

    /// Verify a token of the given class.
    ///
    /// # Errors
    /// * `Missing` - Token string is empty
    /// * `Invalid` - Bad signature, malformed structure, missing claim or foreign algorithm
    /// * `Expired` - Signature is valid but `exp` lies in the past
    pub fn verify(&self, kind: TokenKind, token: &str) -> Result<DecodedIdentity, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        let claims = decode::<Claims>(token, self.config.decoding_key(kind), &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?
            .claims;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(DecodedIdentity {
            subject_id: claims.user_id.clone(),
            claims,
        })
    }
}
