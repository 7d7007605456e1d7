use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Scheme used when producing new hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Bcrypt { cost: u32 },
    Argon2id,
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        HashAlgorithm::Bcrypt {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

/// Password hashing implementation.
///
/// New hashes use the configured scheme. Verification reads the scheme from the
/// stored hash itself, so bcrypt and Argon2 hashes both keep working after the
/// configured scheme changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher {
    algorithm: HashAlgorithm,
}

impl PasswordHasher {
    /// Create a password hasher with the default scheme (bcrypt, cost 10).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Create a bcrypt hasher with the given work factor.
    pub fn bcrypt(cost: u32) -> Self {
        Self::with_algorithm(HashAlgorithm::Bcrypt { cost })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Returns
    /// Self-describing hash string (scheme, parameters and salt embedded)
    ///
    /// # Errors
    /// * `HashingFailed` - Bad work factor or no entropy available
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        match self.algorithm {
            HashAlgorithm::Bcrypt { cost } => bcrypt::hash(password, cost)
                .map_err(|e| PasswordError::HashingFailed(e.to_string())),
            HashAlgorithm::Argon2id => {
                let salt = SaltString::generate(&mut OsRng);

                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
        }
    }

    /// Verify a password against a stored hash.
    ///
    /// # Returns
    /// True if password matches; false on mismatch or when the hash cannot be parsed
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if hash.starts_with("$argon2") {
            return PasswordHash::new(hash)
                .map(|parsed| {
                    Argon2::default()
                        .verify_password(password.as_bytes(), &parsed)
                        .is_ok()
                })
                .unwrap_or(false);
        }

        bcrypt::verify(password, hash).unwrap_or(false)
    }
}
