//! Bijective index-to-password enumeration.
//!
//! Candidates are numbered from 1: all length-1 passwords first, then
//! length-2, and so on up to the configured maximum. Within one length the
//! local index is decoded with bijective base-N numbering - digits run from
//! 1 to N instead of 0 to N-1, which makes every index map to exactly one
//! password and vice versa. Interrupted and sharded jobs rely on this order
//! being stable, so it is part of the on-disk checkpoint contract.
//!
//! The alphabet comes from a listing file: a single non-blank line is a set
//! of single characters, several lines form a set of multi-character tokens
//! that are concatenated without separators.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{CrackError, Result};

/// Byte cap on a concatenated token candidate. Exceeding it rejects the
/// candidate outright; the password of a real archive is far shorter anyway
/// (the KDF only reads 127 UTF-16 units).
pub const MAX_PASSWORD_BYTES: usize = 256;

/// An ordered set of password-building symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alphabet {
    /// Single characters, first-seen order, duplicates collapsed.
    Chars(Vec<char>),
    /// Multi-character tokens, listing order, duplicates collapsed.
    Tokens(Vec<String>),
}

impl Alphabet {
    /// Load an alphabet from a listing file.
    pub fn from_listing_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| CrackError::io(path, e))?;
        Self::from_listing(BufReader::new(file))
    }

    /// Parse a listing: blank lines are skipped, CR stripped; one remaining
    /// line means a character set, several mean a token set.
    pub fn from_listing<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }

        let alphabet = if lines.len() == 1 {
            let mut chars: Vec<char> = Vec::new();
            for c in lines[0].chars() {
                if !chars.contains(&c) {
                    chars.push(c);
                }
            }
            Self::Chars(chars)
        } else {
            let mut tokens: Vec<String> = Vec::new();
            for line in lines {
                if !tokens.contains(&line) {
                    tokens.push(line);
                }
            }
            Self::Tokens(tokens)
        };

        if alphabet.len() == 0 {
            return Err(CrackError::EmptyAlphabet);
        }
        Ok(alphabet)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        match self {
            Self::Chars(chars) => chars.len(),
            Self::Tokens(tokens) => tokens.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total candidate count over all lengths 1..=`max_length`:
    /// sum of N^l. Exact 64-bit arithmetic; overflow is an error, not a
    /// wraparound.
    pub fn total_combinations(&self, max_length: u32) -> Result<u64> {
        let n = self.len() as u64;
        let mut total: u64 = 0;
        let mut power: u64 = 1;
        for _ in 0..max_length {
            power = power
                .checked_mul(n)
                .ok_or(CrackError::CombinationOverflow)?;
            total = total
                .checked_add(power)
                .ok_or(CrackError::CombinationOverflow)?;
        }
        Ok(total)
    }

    /// The candidate at a 1-based global index.
    pub fn password_at(&self, index: u64, max_length: u32) -> Result<String> {
        let n = self.len() as u64;
        let mut cumulative: u64 = 0;
        let mut power: u64 = 1;

        if index > 0 {
            for length in 1..=max_length {
                power = power
                    .checked_mul(n)
                    .ok_or(CrackError::CombinationOverflow)?;
                let shorter = cumulative;
                cumulative = cumulative
                    .checked_add(power)
                    .ok_or(CrackError::CombinationOverflow)?;
                if index <= cumulative {
                    return self.combination(index - shorter, length);
                }
            }
        }

        Err(CrackError::IndexOutOfRange {
            low: index,
            total: cumulative,
        })
    }

    /// Decode a 1-based local index into a fixed-length symbol sequence
    /// using bijective base-N digits.
    fn combination(&self, mut index: u64, length: u32) -> Result<String> {
        let n = self.len() as u64;
        let mut password = String::new();

        for position in (0..length).rev() {
            let weight = n
                .checked_pow(position)
                .ok_or(CrackError::CombinationOverflow)?;
            let mut quotient = index / weight;
            let digit = if index % weight != 0 {
                quotient + 1
            } else {
                // Exact division: the digit is N and one carry is given back.
                let digit = quotient;
                quotient -= 1;
                digit
            };
            self.push_symbol(&mut password, (digit - 1) as usize)?;
            index -= quotient * weight;
        }

        Ok(password)
    }

    fn push_symbol(&self, password: &mut String, symbol: usize) -> Result<()> {
        match self {
            Self::Chars(chars) => password.push(chars[symbol]),
            Self::Tokens(tokens) => {
                let token = &tokens[symbol];
                if password.len() + token.len() > MAX_PASSWORD_BYTES {
                    return Err(CrackError::CandidateTooLong {
                        limit: MAX_PASSWORD_BYTES,
                    });
                }
                password.push_str(token);
            }
        }
        Ok(())
    }
}
