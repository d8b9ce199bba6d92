//! Password hashing and verification (Argon2id).

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Hash a raw password with a fresh random salt.
pub fn hash_password(raw: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(raw.as_bytes(), &salt)?
        .to_string())
}

/// Verify a raw password against a stored hash. A malformed stored hash
/// verifies as false; callers cannot distinguish it from a wrong password.
pub fn verify_password(raw: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|hash| {
            Argon2::default()
                .verify_password(raw.as_bytes(), &hash)
                .is_ok()
        })
        .unwrap_or(false)
}
