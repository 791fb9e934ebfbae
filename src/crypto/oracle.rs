//! The decryption oracle: does this password decrypt the archive's headers?
//!
//! Header blocks inside the encrypted region carry their own 16-bit CRC, so
//! a candidate password is verified by decrypting the sample block by block
//! and checking the first complete header against its CRC. Wrong passwords
//! are almost always rejected after a single AES block because the decrypted
//! type byte is not a valid header type.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, KeyIvInit};

use crate::crc32;
use crate::crypto::Rar3Key;
use crate::parsing::{
    BlockHeader, EncryptedHeaders, FILE_HEAD, LHD_COMMENT, LHD_PASSWORD, LHD_SALT, LONG_BLOCK,
    NEWSUB_HEAD, SALT_SIZE, SAMPLE_SIZE,
};

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Whole AES blocks available in the ciphertext sample.
const SAMPLE_BLOCKS: usize = SAMPLE_SIZE / 16;

/// Password oracle for one archive. Holds the salt and ciphertext sample;
/// each test derives a fresh key and cipher state, so tests are independent.
#[derive(Clone)]
pub struct HeaderOracle {
    salt: [u8; SALT_SIZE],
    sample: [u8; SAMPLE_SIZE],
}

impl HeaderOracle {
    pub fn new(headers: EncryptedHeaders) -> Self {
        Self {
            salt: headers.salt,
            sample: headers.sample,
        }
    }

    /// Test one candidate password. `true` means the password decrypts the
    /// headers; `false` is the normal negative result.
    pub fn test_password(&self, password: &str) -> bool {
        let derived = Rar3Key::derive(password, &self.salt);
        let mut cipher = Aes128CbcDec::new(&derived.key.into(), &derived.iv.into());

        let mut plain = [0u8; SAMPLE_BLOCKS * 16];
        for block in 0..SAMPLE_BLOCKS {
            let range = block * 16..(block + 1) * 16;
            plain[range.clone()].copy_from_slice(&self.sample[range.clone()]);
            cipher.decrypt_block_mut(GenericArray::from_mut_slice(&mut plain[range]));

            let decrypted = &plain[..(block + 1) * 16];
            if block == 0 && !plausible_first_block(decrypted) {
                return false;
            }

            let head_size = BlockHeader::head_size(decrypted) as usize;
            if head_size >= BlockHeader::BASE_SIZE && head_size <= decrypted.len() {
                return crc32::header_crc(&decrypted[2..head_size])
                    == BlockHeader::stored_crc(decrypted);
            }
        }

        // Declared header size never fit inside the sample.
        false
    }
}

/// Fast reject on the first decrypted block. Only bits that a file header
/// inside an encrypted-header archive must carry are tested; doubtful bits
/// are left alone so the true password can never be rejected here.
fn plausible_first_block(block: &[u8]) -> bool {
    match block[2] {
        NEWSUB_HEAD => true,
        FILE_HEAD => {
            const REQUIRED: u16 = LONG_BLOCK | LHD_SALT | LHD_PASSWORD;
            let flags = BlockHeader::head_flags(block);
            flags & REQUIRED == REQUIRED && flags & LHD_COMMENT == 0
        }
        _ => false,
    }
}
