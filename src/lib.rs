//! Password recovery for RAR 3.x archives with encrypted headers (`rar -hp`).
//!
//! An archive created with header encryption stores an 8-byte salt right
//! after its main header, followed by AES-128-CBC encrypted block headers.
//! Decrypting the first kilobyte under a candidate password and checking the
//! embedded header CRC tells whether that password is correct, without
//! touching the compressed payload.
//!
//! The crate provides:
//! - [`parsing`] - extracts the salt and a ciphertext sample from the archive
//! - [`crypto`] - the RAR 3.x key derivation and the password oracle
//! - [`enumerate`] - bijective index-to-password mapping for exhaustive search
//! - [`wordlist`] - dictionary-mode candidate source
//! - [`attack`] - the search loop, benchmarking, and checkpointing
//! - [`checkpoint`] - resumable `.crk` progress files
//!
//! Candidate indices are plain `u64` positions in a deterministic
//! enumeration, so a search can be split across machines by handing each one
//! a disjoint index range.

mod crc32;

pub mod attack;
pub mod checkpoint;
pub mod crypto;
pub mod enumerate;
pub mod error;
pub mod parsing;
pub mod wordlist;

pub use attack::{AttackConfig, AttackDriver, AttackOutcome, BenchmarkReport};
pub use checkpoint::{crk_path, Checkpoint, CheckpointState, Method};
pub use crypto::{HeaderOracle, Rar3Key};
pub use enumerate::Alphabet;
pub use error::{CrackError, Result};
pub use parsing::EncryptedHeaders;
