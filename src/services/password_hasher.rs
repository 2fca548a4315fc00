use argon2::password_hash::{self, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version};
use rand::Rng;
use std::fmt;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;

/// Argon2id password hashing keyed with the process-wide pepper
pub struct PasswordHasher {
    pepper: String,
}

impl PasswordHasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a plaintext password into a PHC string (`$argon2id$...`)
    ///
    /// A fresh random salt is drawn for every call, so hashing the same
    /// password twice yields two different strings.
    pub fn hash(&self, plaintext: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let hash = self
            .argon2()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
            .to_string();

        Ok(hash)
    }

    /// Check a plaintext password against a stored PHC string
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Wrong password (or a different pepper)
    /// * `Err(CredentialError::MalformedHash)` - The stored string is not a usable hash
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, InternalError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| CredentialError::malformed_hash(e.to_string()))?;

        match self.argon2()?.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CredentialError::malformed_hash(e.to_string()).into()),
        }
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("pepper", &"<redacted>")
            .finish()
    }
}

/// Generate a cryptographically secure random password
///
/// 20 characters drawn from upper and lower case letters, digits and symbols.
/// Used when bootstrapping the first administrator.
pub fn generate_secure_password() -> String {
    const PASSWORD_LENGTH: usize = 20;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789\
                             !@#$%^&*()_+-=[]{}|;:,.<>?";

    let mut rng = rand::rng();
    (0..PASSWORD_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
