//! Dictionary-mode candidate source.
//!
//! A wordlist is one candidate per non-blank line. Lines are consumed
//! strictly in file order; there is no random access, so positioning at a
//! start index means counting candidates from the top.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::error::{CrackError, Result};

#[derive(Debug)]
pub struct Wordlist {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
}

impl Wordlist {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| CrackError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
        })
    }

    /// Count candidates with one full pass. Blank and CR-only lines do not
    /// count.
    pub fn count_candidates(path: &Path) -> Result<u64> {
        let mut wordlist = Self::open(path)?;
        let mut count = 0;
        while wordlist.next_candidate()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// The next candidate, with line terminators stripped; `None` at end of
    /// file.
    pub fn next_candidate(&mut self) -> Result<Option<String>> {
        for line in self.lines.by_ref() {
            let line = line.map_err(|e| CrackError::io(&self.path, e))?;
            let candidate = line.trim_end_matches('\r');
            if !candidate.is_empty() {
                return Ok(Some(candidate.to_string()));
            }
        }
        Ok(None)
    }

    /// Skip the next `count` candidates.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        for _ in 0..count {
            if self.next_candidate()?.is_none() {
                break;
            }
        }
        Ok(())
    }
}
