//! Error types for archive parsing and the attack driver.
//!
//! Every variant here is fatal to the run: a candidate password that fails
//! the oracle is a normal negative result and is reported as `false`, never
//! as an error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for all password-recovery operations.
#[derive(Debug)]
pub enum CrackError {
    /// The file does not start with the RAR 3.x marker block
    /// (`Rar!\x1a\x07\x00`).
    NotRarFormat,

    /// The file looks like a ZIP archive (`PK` magic), which this tool does
    /// not attack.
    ZipNotSupported,

    /// The archive's main header does not carry the "headers encrypted"
    /// flag, so there is no salt at the expected position.
    HeadersNotEncrypted,

    /// The alphabet listing contained no usable symbols.
    EmptyAlphabet,

    /// The configured start index lies beyond the candidate space.
    IndexOutOfRange {
        /// The requested start index.
        low: u64,
        /// Total number of candidates for this alphabet and length limit.
        total: u64,
    },

    /// The configured range has `high < low`.
    InvalidRange { low: u64, high: u64 },

    /// A token-mode candidate would exceed the password length cap and is
    /// rejected outright instead of being silently truncated.
    CandidateTooLong {
        /// The byte cap on concatenated candidates.
        limit: usize,
    },

    /// The candidate count does not fit in 64 bits.
    CombinationOverflow,

    /// A checkpoint file could not be interpreted.
    CorruptCheckpoint(String),

    /// An I/O error on a named file (archive, alphabet, wordlist, or
    /// checkpoint).
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// An I/O error while scanning the archive stream.
    Read(io::Error),
}

impl fmt::Display for CrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRarFormat => write!(f, "not a RAR file"),
            Self::ZipNotSupported => write!(f, "ZIP archives are not supported"),
            Self::HeadersNotEncrypted => write!(
                f,
                "this archive's header blocks are not encrypted; nothing to attack here"
            ),
            Self::EmptyAlphabet => write!(f, "alphabet listing contains no symbols"),
            Self::IndexOutOfRange { low, total } => write!(
                f,
                "start index {} exceeds the total number of candidates ({})",
                low, total
            ),
            Self::InvalidRange { low, high } => {
                write!(f, "invalid index range: {}..={}", low, high)
            }
            Self::CandidateTooLong { limit } => {
                write!(f, "candidate longer than {} bytes rejected", limit)
            }
            Self::CombinationOverflow => {
                write!(f, "candidate count does not fit in 64 bits")
            }
            Self::CorruptCheckpoint(reason) => {
                write!(f, "corrupt checkpoint file: {}", reason)
            }
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Read(e) => write!(f, "read error: {}", e),
        }
    }
}

impl std::error::Error for CrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Read(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CrackError {
    fn from(e: io::Error) -> Self {
        Self::Read(e)
    }
}

impl CrackError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CrackError>;
