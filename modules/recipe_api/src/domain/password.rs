//! Password hashing with scrypt in PHC string format.

use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};

use crate::domain::error::DomainError;

/// Minimum accepted password length, enforced on registration and on
/// profile updates that carry a password.
pub const MIN_PASSWORD_LEN: usize = 5;

// log2(N) for debug builds. The recommended cost makes a debug-profile
// test run take minutes; verification still works across cost settings
// because the parameters travel inside the PHC string.
const DEBUG_LOG_N: u8 = 12;

/// Hash a plaintext password into a self-describing PHC string.
pub fn hash_password(plain: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = if cfg!(debug_assertions) {
        let params = Params::new(DEBUG_LOG_N, 8, 1, 32)
            .map_err(|e| DomainError::internal(format!("scrypt params: {e}")))?;
        Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, params, &salt)
            .map_err(|e| DomainError::internal(format!("password hash failed: {e}")))?
    } else {
        Scrypt
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("password hash failed: {e}")))?
    };
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string. Unparseable
/// hashes count as a mismatch rather than an error.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Scrypt.verify_password(plain.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("testpass123").unwrap();
        assert!(hash.starts_with("$scrypt$"));
        assert!(verify_password("testpass123", &hash));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("testpass123").unwrap();
        assert!(!verify_password("different_password", &hash));
    }

    #[test]
    fn malformed_hash_does_not_verify() {
        assert!(!verify_password("testpass123", "not-a-phc-string"));
        assert!(!verify_password("testpass123", ""));
    }

    #[test]
    fn same_password_hashes_differently() {
        let first = hash_password("testpass123").unwrap();
        let second = hash_password("testpass123").unwrap();
        assert_ne!(first, second);
    }
}
