//! Key-management collaborator for registration. Derives the master key from
//! the password and the server-issued salt, wraps the vaultspace key with it,
//! and hands the envelope back for upload. Derived material must never be
//! logged or persisted locally; routes surface any failure here as a single
//! generic error.

use argon2::Argon2;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
    aead::{Aead, KeyInit},
};
use rand::{RngCore, rngs::OsRng};
use std::fmt;

pub const MASTER_KEY_LEN: usize = 32;
pub const VAULTSPACE_KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Generic message shown for any key-management failure.
pub const KEY_ENROLLMENT_ERROR: &str = "Unable to secure your vault keys. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    InvalidSalt,
    Derivation,
    Wrap,
    Unwrap,
}

impl fmt::Display for KeyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::InvalidSalt => write!(formatter, "server salt is not valid base64"),
            KeyError::Derivation => write!(formatter, "master key derivation failed"),
            KeyError::Wrap => write!(formatter, "vaultspace key wrap failed"),
            KeyError::Unwrap => write!(formatter, "vaultspace key unwrap failed"),
        }
    }
}

impl std::error::Error for KeyError {}

/// Master key stretched from the password; only ever held in memory.
pub struct MasterKey([u8; MASTER_KEY_LEN]);

impl fmt::Debug for MasterKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("MasterKey(<redacted>)")
    }
}

/// Derives the master key from the password and the server-issued base64 salt.
pub fn derive_master_key(password: &str, salt_b64: &str) -> Result<MasterKey, KeyError> {
    let salt = STANDARD
        .decode(salt_b64.trim())
        .map_err(|_| KeyError::InvalidSalt)?;
    if salt.is_empty() {
        return Err(KeyError::InvalidSalt);
    }

    let mut key = [0u8; MASTER_KEY_LEN];
    Argon2::default()
        .hash_password_into(password.as_bytes(), &salt, &mut key)
        .map_err(|_| KeyError::Derivation)?;
    Ok(MasterKey(key))
}

/// Fresh random key for a newly provisioned vaultspace.
pub fn generate_vaultspace_key() -> [u8; VAULTSPACE_KEY_LEN] {
    let mut key = [0u8; VAULTSPACE_KEY_LEN];
    OsRng.fill_bytes(&mut key);
    key
}

/// Wraps the vaultspace key under the master key.
/// Returns base64 of `nonce (12 bytes) || ciphertext`.
pub fn wrap_vaultspace_key(master: &MasterKey, vault_key: &[u8]) -> Result<String, KeyError> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&master.0));

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher.encrypt(nonce, vault_key).map_err(|_| KeyError::Wrap)?;

    let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    envelope.extend_from_slice(&nonce_bytes);
    envelope.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(envelope))
}

/// Unwraps an envelope produced by `wrap_vaultspace_key`.
/// Expects base64 of `nonce (12 bytes) || ciphertext`.
pub fn unwrap_vaultspace_key(master: &MasterKey, wrapped_b64: &str) -> Result<Vec<u8>, KeyError> {
    let envelope = STANDARD
        .decode(wrapped_b64.trim())
        .map_err(|_| KeyError::Unwrap)?;
    if envelope.len() < NONCE_LEN {
        return Err(KeyError::Unwrap);
    }

    let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_LEN);
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&master.0));
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| KeyError::Unwrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT_B64: &str = "c2FsdHNhbHRzYWx0c2FsdA==";

    #[test]
    fn derivation_is_deterministic_per_password_and_salt() {
        let first = derive_master_key("Abcdefgh1234", SALT_B64).unwrap();
        let second = derive_master_key("Abcdefgh1234", SALT_B64).unwrap();
        let different = derive_master_key("Abcdefgh1235", SALT_B64).unwrap();
        assert_eq!(first.0, second.0);
        assert_ne!(first.0, different.0);
    }

    #[test]
    fn derivation_rejects_bad_salt() {
        assert_eq!(
            derive_master_key("Abcdefgh1234", "not-base64!!!").unwrap_err(),
            KeyError::InvalidSalt
        );
        assert_eq!(
            derive_master_key("Abcdefgh1234", "").unwrap_err(),
            KeyError::InvalidSalt
        );
    }

    #[test]
    fn wrap_then_unwrap_round_trips() {
        let master = derive_master_key("Abcdefgh1234", SALT_B64).unwrap();
        let vault_key = generate_vaultspace_key();

        let wrapped = wrap_vaultspace_key(&master, &vault_key).unwrap();
        let unwrapped = unwrap_vaultspace_key(&master, &wrapped).unwrap();
        assert_eq!(unwrapped, vault_key);
    }

    #[test]
    fn unwrap_fails_under_wrong_master_key() {
        let master = derive_master_key("Abcdefgh1234", SALT_B64).unwrap();
        let other = derive_master_key("Wrongpass123", SALT_B64).unwrap();
        let wrapped = wrap_vaultspace_key(&master, &generate_vaultspace_key()).unwrap();

        assert_eq!(
            unwrap_vaultspace_key(&other, &wrapped).unwrap_err(),
            KeyError::Unwrap
        );
    }

    #[test]
    fn unwrap_rejects_truncated_envelopes() {
        let master = derive_master_key("Abcdefgh1234", SALT_B64).unwrap();
        assert_eq!(
            unwrap_vaultspace_key(&master, "AAAA").unwrap_err(),
            KeyError::Unwrap
        );
    }
}
