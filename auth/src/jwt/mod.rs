pub mod claims;
pub mod config;
pub mod errors;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use claims::ExtraClaims;
pub use config::TokenConfig;
pub use config::TokenKind;
pub use errors::JwtError;
pub use errors::TokenError;
pub use issuer::SignedToken;
pub use issuer::TokenIssuer;
pub use verifier::DecodedIdentity;
pub use verifier::TokenVerifier;
