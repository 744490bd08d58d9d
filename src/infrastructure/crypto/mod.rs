//! Cryptographic helpers: password hashing and credential generation

pub mod password;
pub mod token;
