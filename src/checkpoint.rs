//! Resumable progress files.
//!
//! Each archive under attack owns one checkpoint file next to it, named by
//! swapping the archive's extension for `.crk`. The format is line-oriented
//! text, one tagged field per line:
//!
//! ```text
//! mb              method: b = bruteforce, d = dictionary
//! dcharset.txt    alphabet or wordlist path
//! i5000           next index to test
//! j250000         last index of the range
//! b1000           benchmark trial cap (only when benchmarking)
//! p4              maximum password length (bruteforce only)
//! t1500           candidates between checkpoint writes
//! ```
//!
//! The file is truncated and rewritten on every save, so any snapshot is
//! complete on its own. When the password is found the file is overwritten
//! with a single `x<password>` line, which later runs must treat as "already
//! solved".

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{CrackError, Result};

/// Default number of candidates between checkpoint writes.
pub const DEFAULT_SAVE_INTERVAL: u64 = 1500;

/// Attack method, persisted as a single tag character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Bruteforce,
    Dictionary,
}

impl Method {
    pub fn tag(self) -> char {
        match self {
            Self::Bruteforce => 'b',
            Self::Dictionary => 'd',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'b' => Some(Self::Bruteforce),
            'd' => Some(Self::Dictionary),
            _ => None,
        }
    }
}

/// One complete progress snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub method: Method,
    /// Alphabet listing (bruteforce) or wordlist (dictionary).
    pub source: PathBuf,
    /// Next index to test on resume.
    pub low: u64,
    pub high: u64,
    /// Maximum password length; 0 in dictionary mode.
    pub max_length: u32,
    /// Benchmark trial cap; 0 when not benchmarking.
    pub benchmark: u64,
    pub save_interval: u64,
}

/// What a checkpoint file holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckpointState {
    /// An interrupted attack to resume.
    InProgress(Checkpoint),
    /// The archive was already solved; the password is stored.
    Solved(String),
}

/// Checkpoint path for an archive: same name, `.crk` extension.
pub fn crk_path(archive: &Path) -> PathBuf {
    archive.with_extension("crk")
}

impl Checkpoint {
    /// Truncate and rewrite the checkpoint file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|e| CrackError::io(path, e))?;
        let mut write = |line: String| -> Result<()> {
            writeln!(file, "{}", line).map_err(|e| CrackError::io(path, e))
        };

        write(format!("m{}", self.method.tag()))?;
        write(format!("d{}", self.source.display()))?;
        write(format!("i{}", self.low))?;
        write(format!("j{}", self.high))?;
        if self.benchmark != 0 {
            write(format!("b{}", self.benchmark))?;
        }
        if self.max_length != 0 {
            write(format!("p{}", self.max_length))?;
        }
        write(format!("t{}", self.save_interval))?;
        Ok(())
    }
}

/// Overwrite the checkpoint with a terminal success record.
pub fn save_result(path: &Path, password: &str) -> Result<()> {
    let mut file = File::create(path).map_err(|e| CrackError::io(path, e))?;
    writeln!(file, "x{}", password).map_err(|e| CrackError::io(path, e))
}

/// Load and parse a checkpoint file.
pub fn load(path: &Path) -> Result<CheckpointState> {
    let content = fs::read_to_string(path).map_err(|e| CrackError::io(path, e))?;

    let mut method = None;
    let mut source = None;
    let mut low = None;
    let mut high = None;
    let mut max_length = 0u32;
    let mut benchmark = 0u64;
    let mut save_interval = DEFAULT_SAVE_INTERVAL;

    let parse_number = |line: &str| -> Result<u64> {
        line[1..]
            .parse()
            .map_err(|_| CrackError::CorruptCheckpoint(format!("bad number in line {:?}", line)))
    };

    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        let Some(tag) = line.chars().next() else {
            continue;
        };
        match tag {
            'x' => return Ok(CheckpointState::Solved(line[1..].to_string())),
            'm' => {
                let value = line[1..].chars().next().and_then(Method::from_tag);
                method = Some(value.ok_or_else(|| {
                    CrackError::CorruptCheckpoint(format!("unknown method {:?}", &line[1..]))
                })?);
            }
            'd' => source = Some(PathBuf::from(&line[1..])),
            'i' => low = Some(parse_number(line)?),
            'j' => high = Some(parse_number(line)?),
            'p' => max_length = parse_number(line)? as u32,
            'b' => benchmark = parse_number(line)?,
            't' => save_interval = parse_number(line)?,
            _ => {
                return Err(CrackError::CorruptCheckpoint(format!(
                    "unknown tag {:?}",
                    tag
                )))
            }
        }
    }

    let missing = |field: &str| CrackError::CorruptCheckpoint(format!("missing {} field", field));
    Ok(CheckpointState::InProgress(Checkpoint {
        method: method.ok_or_else(|| missing("method"))?,
        source: source.ok_or_else(|| missing("source"))?,
        low: low.ok_or_else(|| missing("low index"))?,
        high: high.ok_or_else(|| missing("high index"))?,
        max_length,
        benchmark,
        save_interval,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Checkpoint {
        Checkpoint {
            method: Method::Bruteforce,
            source: PathBuf::from("charset.txt"),
            low: 4500,
            high: 250_000,
            max_length: 4,
            benchmark: 0,
            save_interval: 1500,
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.crk");
        let checkpoint = sample();
        checkpoint.save(&path).unwrap();
        assert_eq!(load(&path).unwrap(), CheckpointState::InProgress(checkpoint));
    }

    #[test]
    fn test_round_trip_with_benchmark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.crk");
        let mut checkpoint = sample();
        checkpoint.method = Method::Dictionary;
        checkpoint.max_length = 0;
        checkpoint.benchmark = 1000;
        checkpoint.save(&path).unwrap();
        assert_eq!(load(&path).unwrap(), CheckpointState::InProgress(checkpoint));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.crk");
        sample().save(&path).unwrap();
        let mut later = sample();
        later.low = 6000;
        later.save(&path).unwrap();
        match load(&path).unwrap() {
            CheckpointState::InProgress(cp) => assert_eq!(cp.low, 6000),
            CheckpointState::Solved(_) => panic!("unexpected solved state"),
        }
    }

    #[test]
    fn test_solved_record_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.crk");
        save_result(&path, "hunter2").unwrap();
        assert_eq!(
            load(&path).unwrap(),
            CheckpointState::Solved("hunter2".to_string())
        );
    }

    #[test]
    fn test_corrupt_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.crk");
        std::fs::write(&path, "mb\nixyz\n").unwrap();
        assert!(matches!(
            load(&path),
            Err(CrackError::CorruptCheckpoint(_))
        ));
    }

    #[test]
    fn test_crk_path_replaces_last_extension() {
        assert_eq!(
            crk_path(Path::new("backup.part01.rar")),
            PathBuf::from("backup.part01.crk")
        );
        assert_eq!(crk_path(Path::new("archive.rar")), PathBuf::from("archive.crk"));
    }
}
