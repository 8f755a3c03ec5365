/// Password hashing and verification using Argon2id
use crate::{AuthError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a password using Argon2id with a random per-password salt.
///
/// Returns a PHC-formatted hash string safe for database storage.
pub fn hash_password(password: &str) -> Result<String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its PHC-formatted hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::Hashing(format!("invalid password hash format: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hashing(format!(
            "password verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_valid_password() {
        let password = "correct horse battery staple";
        let hash = hash_password(password).expect("should hash password");
        assert!(verify_password(password, &hash).expect("should verify"));
    }

    #[test]
    fn verify_wrong_password() {
        let hash = hash_password("correct horse battery staple").expect("should hash password");
        assert!(!verify_password("wrong password", &hash).expect("verification should succeed"));
    }

    #[test]
    fn rejects_short_password() {
        let result = hash_password("short");
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn different_hashes_for_same_password() {
        let password = "correct horse battery staple";
        let hash1 = hash_password(password).expect("should hash");
        let hash2 = hash_password(password).expect("should hash");
        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
    }
}
