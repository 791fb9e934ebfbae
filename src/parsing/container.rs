//! Salt and ciphertext-sample extraction.
//!
//! For an archive created with `rar -hp`, the region after the main header
//! starts with an 8-byte salt followed by the AES-encrypted block headers.
//! The oracle only ever needs the salt plus the first [`SAMPLE_SIZE`] bytes
//! of that ciphertext, so this is all the parser reads.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{CrackError, Result};
use crate::parsing::block_header::BlockHeader;
use crate::parsing::marker_header::{MarkerHeader, RAR3_SIGNATURE};

/// Key-derivation salt length.
pub const SALT_SIZE: usize = 8;
/// Ciphertext sample handed to the oracle.
pub const SAMPLE_SIZE: usize = 1023;

/// Reserved bytes between the main header's fixed fields and the encrypted
/// region.
const MAIN_HEAD_RESERVED: usize = 6;

/// The crackable material lifted from one archive.
#[derive(Clone)]
pub struct EncryptedHeaders {
    pub salt: [u8; SALT_SIZE],
    pub sample: [u8; SAMPLE_SIZE],
}

impl EncryptedHeaders {
    /// Scan the container from the top: marker block, main header, reserved
    /// bytes, then salt and ciphertext sample. Single pass, no seeking.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut marker = [0u8; MarkerHeader::SIZE];
        reader.read_exact(&mut marker)?;
        MarkerHeader::check(&marker)?;

        let header = BlockHeader::read_from(reader)?;
        let mut reserved = [0u8; MAIN_HEAD_RESERVED];
        reader.read_exact(&mut reserved)?;

        if !header.headers_encrypted() {
            return Err(CrackError::HeadersNotEncrypted);
        }

        let mut salt = [0u8; SALT_SIZE];
        reader.read_exact(&mut salt)?;
        let mut sample = [0u8; SAMPLE_SIZE];
        reader.read_exact(&mut sample)?;

        Ok(Self { salt, sample })
    }
}

/// Cheap format sniff before the real parse: classify the leading magic and
/// rewind the stream. A `PK` prefix gets its own error so the operator knows
/// the file is a ZIP archive rather than garbage.
pub fn sniff_format<R: Read + Seek>(reader: &mut R) -> Result<()> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic)?;

    if magic == [b'P', b'K'] {
        return Err(CrackError::ZipNotSupported);
    }
    if magic != RAR3_SIGNATURE[..2] {
        return Err(CrackError::NotRarFormat);
    }

    let mut rest = [0u8; MarkerHeader::SIZE - 2];
    reader.read_exact(&mut rest)?;
    if rest != RAR3_SIGNATURE[2..] {
        return Err(CrackError::NotRarFormat);
    }

    reader.seek(SeekFrom::Start(0))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn archive_prefix(flags: u16) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&RAR3_SIGNATURE);
        data.extend_from_slice(&[0x00, 0x00]); // header crc (not validated)
        data.push(0x73); // MAIN_HEAD
        data.extend_from_slice(&flags.to_le_bytes());
        data.extend_from_slice(&13u16.to_le_bytes());
        data.extend_from_slice(&[0u8; MAIN_HEAD_RESERVED]);
        data
    }

    #[test]
    fn test_extracts_salt_and_sample() {
        let mut data = archive_prefix(0x0080);
        data.extend_from_slice(&[0xE1, 0x3C, 0x57, 0x04, 0x16, 0x86, 0x51, 0x2F]);
        data.extend_from_slice(&[0xAB; SAMPLE_SIZE]);

        let headers = EncryptedHeaders::read_from(&mut Cursor::new(data)).unwrap();
        assert_eq!(headers.salt, [0xE1, 0x3C, 0x57, 0x04, 0x16, 0x86, 0x51, 0x2F]);
        assert!(headers.sample.iter().all(|&b| b == 0xAB));
    }

    #[test]
    fn test_long_block_main_header() {
        // Long-block flag adds a 4-byte size field before the reserved bytes.
        let mut data = Vec::new();
        data.extend_from_slice(&RAR3_SIGNATURE);
        data.extend_from_slice(&[0x00, 0x00, 0x73]);
        data.extend_from_slice(&0x8080u16.to_le_bytes());
        data.extend_from_slice(&13u16.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]); // add_size
        data.extend_from_slice(&[0u8; MAIN_HEAD_RESERVED]);
        data.extend_from_slice(&[0x01; SALT_SIZE]);
        data.extend_from_slice(&[0x02; SAMPLE_SIZE]);

        let headers = EncryptedHeaders::read_from(&mut Cursor::new(data)).unwrap();
        assert_eq!(headers.salt, [0x01; SALT_SIZE]);
    }

    #[test]
    fn test_unencrypted_headers_rejected() {
        let mut data = archive_prefix(0x0000);
        data.extend_from_slice(&[0u8; SALT_SIZE + SAMPLE_SIZE]);
        assert!(matches!(
            EncryptedHeaders::read_from(&mut Cursor::new(data)),
            Err(CrackError::HeadersNotEncrypted)
        ));
    }

    #[test]
    fn test_wrong_marker_rejected() {
        let data = vec![0x00; 64];
        assert!(matches!(
            EncryptedHeaders::read_from(&mut Cursor::new(data)),
            Err(CrackError::NotRarFormat)
        ));
    }

    #[test]
    fn test_sniff_rewinds() {
        let data = archive_prefix(0x0080);
        let mut cursor = Cursor::new(data);
        sniff_format(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_sniff_zip_hint() {
        let mut cursor = Cursor::new(b"PK\x03\x04junkjunk".to_vec());
        assert!(matches!(
            sniff_format(&mut cursor),
            Err(CrackError::ZipNotSupported)
        ));
    }

    #[test]
    fn test_truncated_archive() {
        let mut data = archive_prefix(0x0080);
        data.extend_from_slice(&[0u8; 100]); // far short of salt + sample
        assert!(matches!(
            EncryptedHeaders::read_from(&mut Cursor::new(data)),
            Err(CrackError::Read(_))
        ));
    }
}
