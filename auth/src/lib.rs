//! Credential and session-token utilities
//!
//! Provides the authentication core used by the account service:
//! - Password hashing (bcrypt by default, Argon2id supported)
//! - Signed, time-bounded tokens (HS256) with expiry checked against an injectable clock
//! - An authenticator pairing issuance and verification over one configuration
//!
//! Everything here is framework agnostic; cookies and middleware live in the service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::bcrypt(4);
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, ExtraClaims, SystemClock, TokenConfig, TokenError};
//!
//! let config = TokenConfig::new(b"access_secret_at_least_32_bytes_long", b"refresh_secret_at_least_32_bytes_long").unwrap();
//! let auth = Authenticator::new(config, Arc::new(SystemClock));
//!
//! let token = auth.issue_access_token("user123", ExtraClaims::new()).unwrap();
//! let identity = auth.verify_access_token(token.as_str()).unwrap();
//! assert_eq!(identity.subject_id, "user123");
//! assert_eq!(auth.verify_access_token(""), Err(TokenError::Missing));
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::DecodedIdentity;
pub use jwt::ExtraClaims;
pub use jwt::JwtError;
pub use jwt::SignedToken;
pub use jwt::TokenConfig;
pub use jwt::TokenError;
pub use jwt::TokenKind;
pub use password::HashAlgorithm;
pub use password::PasswordError;
pub use password::PasswordHasher;
