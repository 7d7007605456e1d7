use thiserror::Error;

/// Error type for token signing and key setup.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Signing secret for {0} tokens is empty")]
    EmptySecret(&'static str),
}

/// Reason a presented token was rejected.
///
/// The variants are kept apart so the HTTP layer can answer each one with its own message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("No token presented")]
    Missing,

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
