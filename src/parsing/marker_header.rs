//! Marker block - RAR signature.
//!
//! The marker block is the first 7 bytes of a RAR 3.x file:
//! 0x52 0x61 0x72 0x21 0x1A 0x07 0x00

use crate::error::{CrackError, Result};

/// RAR 3.x magic signature.
pub const RAR3_SIGNATURE: [u8; 7] = [0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x00];

pub struct MarkerHeader;

impl MarkerHeader {
    pub const SIZE: usize = 7;

    /// Verify the marker block. Anything else is fatal for the run.
    pub fn check(buffer: &[u8; Self::SIZE]) -> Result<()> {
        if *buffer == RAR3_SIGNATURE {
            Ok(())
        } else {
            Err(CrackError::NotRarFormat)
        }
    }
}
