//! Argon2id hashing of login codes.
//!
//! Codes are stored as PHC strings with a random salt from [`OsRng`], so a
//! database leak does not reveal pending codes directly.

use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext code using Argon2id with a random salt.
pub fn hash_code(code: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(code.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a submitted code against a stored PHC hash.
///
/// Returns `Ok(true)` on a match, `Ok(false)` on a mismatch.
pub fn verify_code(code: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(code.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Hash checked when there is no stored code, so that requests for unknown
/// emails cost the same Argon2 work as real ones.
static DECOY_HASH: LazyLock<Option<String>> = LazyLock::new(|| hash_code("000000").ok());

/// Run a verification that can never succeed.
///
/// Always returns `false`; only the time spent matters.
pub fn verify_decoy(code: &str) -> bool {
    if let Some(hash) = DECOY_HASH.as_deref() {
        let _ = verify_code(code, hash);
    }
    false
}
