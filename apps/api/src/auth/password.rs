use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::errors::AppError;

/// Hashes a password with Argon2id (default parameters) into PHC string form.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verifies a password against a stored PHC hash. An unparseable hash counts
/// as a mismatch rather than an error, so login still answers 401.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("pw123").unwrap();
        assert!(verify_password("pw123", &hash));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("pw123").unwrap();
        assert!(!verify_password("pw124", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hash = hash_password("hunter2secret").unwrap();
        assert!(!hash.contains("hunter2secret"));
    }

    #[test]
    fn test_garbage_hash_is_a_mismatch() {
        assert!(!verify_password("pw123", "not-a-phc-string"));
    }
}
