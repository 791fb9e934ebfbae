//! Block header parser.
//!
//! Every RAR 3.x block starts with the same 7-byte header:
//! `crc:u16, type:u8, flags:u16, size:u16`, all little-endian, optionally
//! followed by a 4-byte additional size when the long-block flag is set.
//!
//! The same layout appears twice in this crate: once in cleartext for the
//! archive's main header, and once inside the decrypted sample where the
//! oracle re-reads the fields from plaintext bytes.

use std::io::Read;

use crate::error::Result;

/// Main archive header.
pub const MAIN_HEAD: u8 = 0x73;
/// File header.
pub const FILE_HEAD: u8 = 0x74;
/// Service (new-style subblock) header.
pub const NEWSUB_HEAD: u8 = 0x7A;

/// Main header flag: block headers are encrypted.
pub const MHD_PASSWORD: u16 = 0x0080;
/// File header flag: file data is encrypted.
pub const LHD_PASSWORD: u16 = 0x0004;
/// File header flag: old-style comment, never set by RAR 3.x.
pub const LHD_COMMENT: u16 = 0x0008;
/// File header flag: salt field present.
pub const LHD_SALT: u16 = 0x0400;
/// Any header: 4-byte additional size field follows. Always set on file
/// headers.
pub const LONG_BLOCK: u16 = 0x8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub crc: u16,
    pub block_type: u8,
    pub flags: u16,
    pub size: u16,
    pub add_size: u32,
}

impl BlockHeader {
    /// Fixed part of every block header.
    pub const BASE_SIZE: usize = 7;

    /// Read one block header from the stream, consuming the additional size
    /// field if the flags announce it.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buffer = [0u8; Self::BASE_SIZE];
        reader.read_exact(&mut buffer)?;

        let crc = u16::from_le_bytes([buffer[0], buffer[1]]);
        let block_type = buffer[2];
        let flags = u16::from_le_bytes([buffer[3], buffer[4]]);
        let size = u16::from_le_bytes([buffer[5], buffer[6]]);

        let add_size = if flags & LONG_BLOCK != 0 {
            let mut extra = [0u8; 4];
            reader.read_exact(&mut extra)?;
            u32::from_le_bytes(extra)
        } else {
            0
        };

        Ok(Self {
            crc,
            block_type,
            flags,
            size,
            add_size,
        })
    }

    /// Whether the archive's block headers are encrypted (main header only).
    pub fn headers_encrypted(&self) -> bool {
        self.flags & MHD_PASSWORD != 0
    }

    /// Stored header CRC from a raw header block.
    pub fn stored_crc(block: &[u8]) -> u16 {
        u16::from_le_bytes([block[0], block[1]])
    }

    /// Header flags from a raw header block.
    pub fn head_flags(block: &[u8]) -> u16 {
        u16::from_le_bytes([block[3], block[4]])
    }

    /// Header size from a raw header block.
    pub fn head_size(block: &[u8]) -> u16 {
        u16::from_le_bytes([block[5], block[6]])
    }
}
