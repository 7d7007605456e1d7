use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for FullName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("First Name length must be at least {min} characters long")]
    FirstNameTooShort { min: usize },

    #[error("Last Name length must be at least {min} characters long")]
    LastNameTooShort { min: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email must be a valid email: {0}")]
    InvalidFormat(String),
}

/// Error for plaintext password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password length must be at least {min} characters long")]
    TooShort { min: usize },
}

/// Error for Vehicle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VehicleError {
    #[error("Vehicle Color length must be at least {min} characters long")]
    ColorTooShort { min: usize },

    #[error("Vehicle Plate length must be at least {min} characters long")]
    PlateTooShort { min: usize },

    #[error("Vehicle Capacity must be greater than or equal to {min}")]
    CapacityTooSmall { min: i32 },

    #[error("Vehicle Type must be one of [car, motorcycle, auto]")]
    UnknownType(String),
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid account ID: {0}")]
    InvalidAccountId(#[from] AccountIdError),

    #[error("Invalid full name: {0}")]
    InvalidFullName(#[from] FullNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid vehicle: {0}")]
    InvalidVehicle(#[from] VehicleError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    // Domain-level errors
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Account already exists for email: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
