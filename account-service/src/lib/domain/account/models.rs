use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::EmailError;
use crate::account::errors::FullNameError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::VehicleError;

/// Account aggregate entity.
///
/// One shape for riders and captains; the role-specific part lives in `profile`.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub fullname: FullName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub profile: AccountProfile,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        match &self.profile {
            AccountProfile::User => None,
            AccountProfile::Captain(vehicle) => Some(vehicle),
        }
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which resource an account belongs to: riders (`user`) or drivers (`captain`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Captain,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Captain => "captain",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "captain" => Ok(Role::Captain),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Role-specific profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountProfile {
    User,
    Captain(Vehicle),
}

impl AccountProfile {
    pub fn role(&self) -> Role {
        match self {
            AccountProfile::User => Role::User,
            AccountProfile::Captain(_) => Role::Captain,
        }
    }
}

/// Full name value type
///
/// First name is required, last name optional; both at least 3 characters when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName {
    firstname: String,
    lastname: Option<String>,
}

impl FullName {
    const MIN_LENGTH: usize = 3;

    /// Create a new valid full name.
    ///
    /// # Errors
    /// * `FirstNameTooShort` - First name shorter than 3 characters
    /// * `LastNameTooShort` - Last name given but shorter than 3 characters
    pub fn new(firstname: String, lastname: Option<String>) -> Result<Self, FullNameError> {
        if firstname.chars().count() < Self::MIN_LENGTH {
            return Err(FullNameError::FirstNameTooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if let Some(lastname) = &lastname {
            if lastname.chars().count() < Self::MIN_LENGTH {
                return Err(FullNameError::LastNameTooShort {
                    min: Self::MIN_LENGTH,
                });
            }
        }
        Ok(Self {
            firstname,
            lastname,
        })
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> Option<&str> {
        self.lastname.as_deref()
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322, or its domain has no top-level part
    pub fn new(email: String) -> Result<Self, EmailError> {
        let parsed = email_address::EmailAddress::from_str(&email)
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))?;

        let domain = parsed.domain();
        if domain.starts_with('[') || !domain.contains('.') || domain.ends_with('.') {
            return Err(EmailError::InvalidFormat(format!(
                "domain '{}' has no top-level domain",
                domain
            )));
        }

        Ok(EmailAddress(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that passed the length policy.
///
/// Registration demands more than login, which only has to reach the hash check.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const REGISTRATION_MIN_LENGTH: usize = 6;
    pub const LOGIN_MIN_LENGTH: usize = 3;

    pub fn for_registration(password: String) -> Result<Self, PasswordPolicyError> {
        Self::with_min_length(password, Self::REGISTRATION_MIN_LENGTH)
    }

    pub fn for_login(password: String) -> Result<Self, PasswordPolicyError> {
        Self::with_min_length(password, Self::LOGIN_MIN_LENGTH)
    }

    fn with_min_length(password: String, min: usize) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < min {
            Err(PasswordPolicyError::TooShort { min })
        } else {
            Ok(Self(password))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Car,
    Motorcycle,
    Auto,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Motorcycle => "motorcycle",
            VehicleType::Auto => "auto",
        }
    }
}

impl FromStr for VehicleType {
    type Err = VehicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(VehicleType::Car),
            "motorcycle" => Ok(VehicleType::Motorcycle),
            "auto" => Ok(VehicleType::Auto),
            other => Err(VehicleError::UnknownType(other.to_string())),
        }
    }
}

/// Captain's vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    color: String,
    plate: String,
    capacity: i32,
    vehicle_type: VehicleType,
}

impl Vehicle {
    const MIN_TEXT_LENGTH: usize = 3;
    const MIN_CAPACITY: i32 = 1;

    /// Create a new valid vehicle.
    ///
    /// # Errors
    /// * `ColorTooShort` / `PlateTooShort` - Fewer than 3 characters
    /// * `CapacityTooSmall` - Capacity below 1
    pub fn new(
        color: String,
        plate: String,
        capacity: i32,
        vehicle_type: VehicleType,
    ) -> Result<Self, VehicleError> {
        if color.chars().count() < Self::MIN_TEXT_LENGTH {
            return Err(VehicleError::ColorTooShort {
                min: Self::MIN_TEXT_LENGTH,
            });
        }
        if plate.chars().count() < Self::MIN_TEXT_LENGTH {
            return Err(VehicleError::PlateTooShort {
                min: Self::MIN_TEXT_LENGTH,
            });
        }
        if capacity < Self::MIN_CAPACITY {
            return Err(VehicleError::CapacityTooSmall {
                min: Self::MIN_CAPACITY,
            });
        }
        Ok(Self {
            color,
            plate,
            capacity,
            vehicle_type,
        })
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterAccountCommand {
    pub fullname: FullName,
    pub email: EmailAddress,
    pub password: Password,
    pub profile: AccountProfile,
}

impl RegisterAccountCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `password` - Plain text password (will be hashed by service)
    /// * `profile` - Role-specific fields; decides which resource the account joins
    pub fn new(
        fullname: FullName,
        email: EmailAddress,
        password: Password,
        profile: AccountProfile,
    ) -> Self {
        Self {
            fullname,
            email,
            password,
            profile,
        }
    }

    pub fn role(&self) -> Role {
        self.profile.role()
    }
}

/// Command to check credentials for one role.
#[derive(Debug)]
pub struct LoginCommand {
    pub role: Role,
    pub email: EmailAddress,
    pub password: Password,
}
