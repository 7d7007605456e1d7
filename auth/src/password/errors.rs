use thiserror::Error;

/// Error type for password operations.
///
/// Verification never errors; a mismatch and an unreadable hash both come back as `false`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
