//! Password hashing utilities.
//!
//! Derives salted PBKDF2-HMAC-SHA512 keys for storage in the
//! `salt_hex:derived_hex` form and verifies candidates against them.

use crate::errors::{Error, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;

// 256-bit salt, 64-byte derived key. The iteration count follows the current
// OWASP guidance for PBKDF2-HMAC-SHA512 and dominates the cost of a login.
const SALT_BYTES: usize = 32;
const DERIVED_KEY_BYTES: usize = 64;
const PBKDF2_ROUNDS: u32 = 210_000;

/// Hash a plaintext password into its stored `salt:derived` form.
///
/// Fails on an empty password; every call draws a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<String> {
    if plaintext.is_empty() {
        return Err(Error::validation("Password cannot be empty"));
    }

    let mut salt = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut salt);
    let derived = derive_key(plaintext, &salt);

    Ok(format!("{}:{}", hex::encode(salt), hex::encode(derived)))
}

/// Verify a candidate password against a stored `salt:derived` hash.
///
/// Re-derives with the stored salt and compares in constant time. Returns an
/// error only when the stored form itself is malformed.
pub fn verify_password(plaintext: &str, stored: &str) -> Result<bool> {
    let (salt_hex, key_hex) = stored
        .split_once(':')
        .ok_or_else(|| Error::internal("Stored password hash is malformed"))?;

    let salt = hex::decode(salt_hex)
        .map_err(|_| Error::internal("Stored password salt is not valid hex"))?;
    let expected =
        hex::decode(key_hex).map_err(|_| Error::internal("Stored password key is not valid hex"))?;

    let derived = derive_key(plaintext, &salt);

    Ok(ring::constant_time::verify_slices_are_equal(&derived, &expected).is_ok())
}

fn derive_key(plaintext: &str, salt: &[u8]) -> [u8; DERIVED_KEY_BYTES] {
    let mut out = [0u8; DERIVED_KEY_BYTES];
    pbkdf2::pbkdf2_hmac::<Sha512>(plaintext.as_bytes(), salt, PBKDF2_ROUNDS, &mut out);
    out
}
