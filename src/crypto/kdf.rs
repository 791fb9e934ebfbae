//! RAR 3.x key derivation.
//!
//! The KDF hashes `UTF16LE(password) || salt` 2^18 times with SHA-1,
//! appending a 3-byte little-endian round counter on every round. IV bytes
//! are tapped from intermediate digests along the way; the final digest
//! yields the AES key through a fixed byte permutation.
//!
//! This is a format contract, not a tunable PBKDF: round count, message
//! layout, and the permutation must match the archiver bit for bit.

use sha1::{Digest, Sha1};

const HASH_ROUNDS: u32 = 0x40000;
const IV_STRIDE: u32 = HASH_ROUNDS / 16;

/// Passwords are truncated to this many UTF-16 code units before hashing,
/// as the archiver does.
const MAX_PASSWORD_UNITS: usize = 127;

/// AES key digest byte order: each 4-byte word of the SHA-1 digest is
/// reversed.
const KEY_PERMUTATION: [usize; 16] = [3, 2, 1, 0, 7, 6, 5, 4, 11, 10, 9, 8, 15, 14, 13, 12];

/// Derived AES-128 key material for one (password, salt) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rar3Key {
    pub key: [u8; 16],
    pub iv: [u8; 16],
}

impl Rar3Key {
    /// Derive the key and IV for a candidate password.
    pub fn derive(password: &str, salt: &[u8; 8]) -> Self {
        let mut message: Vec<u8> = password
            .encode_utf16()
            .take(MAX_PASSWORD_UNITS)
            .flat_map(u16::to_le_bytes)
            .collect();
        message.extend_from_slice(salt);

        let mut hasher = Sha1::new();
        let mut iv = [0u8; 16];

        for round in 0..HASH_ROUNDS {
            hasher.update(&message);
            hasher.update([round as u8, (round >> 8) as u8, (round >> 16) as u8]);

            if round % IV_STRIDE == 0 {
                // Peek at the running state without disturbing it.
                let digest = hasher.clone().finalize();
                iv[(round / IV_STRIDE) as usize] = digest[19];
            }
        }

        let digest = hasher.finalize();
        let mut key = [0u8; 16];
        for (byte, &source) in key.iter_mut().zip(KEY_PERMUTATION.iter()) {
            *byte = digest[source];
        }

        Self { key, iv }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; 8] = [0xE1, 0x3C, 0x57, 0x04, 0x16, 0x86, 0x51, 0x2F];

    #[test]
    fn test_known_vector() {
        let derived = Rar3Key::derive("yuyu", &SALT);
        assert_eq!(
            derived.key,
            [
                0x71, 0xED, 0x12, 0xC1, 0xCD, 0xB8, 0xE9, 0x22, 0x28, 0x15, 0xE7, 0xC5, 0xBB,
                0x8A, 0x60, 0x8D
            ]
        );
        assert_eq!(
            derived.iv,
            [
                0x1A, 0x90, 0x62, 0x99, 0x63, 0x6C, 0x36, 0x7B, 0x07, 0x7B, 0x94, 0x5C, 0x26,
                0x0F, 0x99, 0x38
            ]
        );
    }

    #[test]
    fn test_salt_changes_key() {
        let other_salt = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        assert_ne!(
            Rar3Key::derive("yuyu", &SALT),
            Rar3Key::derive("yuyu", &other_salt)
        );
    }

    #[test]
    fn test_non_ascii_password_is_utf16() {
        // Surrogate pairs count as two code units; just exercise the path.
        let derived = Rar3Key::derive("p\u{00E4}ss\u{1F512}", &SALT);
        assert_eq!(derived, Rar3Key::derive("p\u{00E4}ss\u{1F512}", &SALT));
    }
}
