//! RAR 3.x container parsing.
//!
//! The parser does one sequential pass over the start of the archive:
//! marker block, first block header, then the encrypted region from which it
//! lifts the key-derivation salt and a ciphertext sample for the oracle.
//!
//! All multi-byte header fields are little-endian on disk regardless of the
//! host, and are decoded with explicit `from_le_bytes` calls.

mod block_header;
mod container;
mod marker_header;

pub use block_header::{
    BlockHeader, FILE_HEAD, LHD_COMMENT, LHD_PASSWORD, LHD_SALT, LONG_BLOCK, MAIN_HEAD,
    MHD_PASSWORD, NEWSUB_HEAD,
};
pub use container::{sniff_format, EncryptedHeaders, SALT_SIZE, SAMPLE_SIZE};
pub use marker_header::{MarkerHeader, RAR3_SIGNATURE};
