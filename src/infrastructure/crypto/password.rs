//! Password hashing utilities

use std::sync::OnceLock;

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

/// Run a bcrypt verification against a throwaway hash.
///
/// Login calls this when the username is unknown so that case costs the
/// same time as a wrong password.
pub fn burn_password_check(password: &str) {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
    if let Some(dummy) = DUMMY_HASH.get_or_init(|| hash_password("!unusable").ok()) {
        let _ = verify(password, dummy);
    }
}
