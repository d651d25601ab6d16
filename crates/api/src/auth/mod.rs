//! Credential primitives.
//!
//! - [`otp`] -- Argon2id hashing and verification of login codes.
//! - [`token`] -- Session token generation, hashing, and header parsing.

pub mod otp;
pub mod token;
