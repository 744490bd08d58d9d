//! Token and session key generation

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate an API token key: 20 random bytes as 40 lowercase hex chars
pub fn generate_token_key() -> String {
    let bytes: [u8; 20] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Generate a session cookie value: 32 random bytes as 64 hex chars
pub fn generate_session_key() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Hash a session key for storage using SHA-256
pub fn hash_session_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}
