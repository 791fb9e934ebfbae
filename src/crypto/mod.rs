//! Cryptographic core: RAR 3.x key derivation and the password oracle.
//!
//! RAR 3.x encrypts headers with AES-128-CBC under a key and IV derived
//! from the password and salt by an iterated SHA-1 construction.

mod kdf;
mod oracle;

pub use kdf::Rar3Key;
pub use oracle::HeaderOracle;
