//! The attack driver: walks an index range, tests candidates, checkpoints.
//!
//! Both attack modes share the same skeleton: plan the effective range,
//! then for each index save a checkpoint every `save_interval` candidates,
//! fetch the candidate (from the enumerator or the wordlist), and ask the
//! oracle. The first accepted candidate ends the run; a benchmark cap turns
//! the run into a throughput measurement instead.
//!
//! The loop is purely sequential and CPU-bound; horizontal scaling means
//! launching several processes over disjoint index ranges of the same
//! candidate space.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::checkpoint::{self, Checkpoint, Method, DEFAULT_SAVE_INTERVAL};
use crate::crypto::HeaderOracle;
use crate::enumerate::Alphabet;
use crate::error::{CrackError, Result};
use crate::parsing::{sniff_format, EncryptedHeaders};
use crate::wordlist::Wordlist;

/// Everything one attack needs. No ambient globals: the driver and the
/// checkpoint writer see only this value.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// The encrypted archive.
    pub archive: PathBuf,
    /// Alphabet listing (bruteforce) or wordlist (dictionary).
    pub source: PathBuf,
    pub method: Method,
    /// First index to test; 0 is normalized to 1.
    pub low: u64,
    /// Last index to test; 0 means the whole candidate space.
    pub high: u64,
    /// Maximum password length (bruteforce only).
    pub max_length: u32,
    /// When non-zero, cap the number of candidates actually tested and
    /// report throughput.
    pub benchmark: u64,
    /// Candidates between checkpoint writes; 0 falls back to the default.
    pub save_interval: u64,
}

impl AttackConfig {
    /// Rebuild a configuration from a loaded checkpoint.
    pub fn resume(archive: PathBuf, checkpoint: Checkpoint) -> Self {
        Self {
            archive,
            source: checkpoint.source,
            method: checkpoint.method,
            low: checkpoint.low,
            high: checkpoint.high,
            max_length: checkpoint.max_length,
            benchmark: checkpoint.benchmark,
            save_interval: checkpoint.save_interval,
        }
    }
}

/// Throughput numbers from a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// Candidates actually tested.
    pub tested: u64,
    pub elapsed: Duration,
    /// Size of the full candidate space the run was sampling.
    pub total_combinations: u64,
}

impl BenchmarkReport {
    pub fn passwords_per_sec(&self) -> f64 {
        self.tested as f64 / self.elapsed.as_secs_f64().max(f64::MIN_POSITIVE)
    }

    /// Extrapolated wall-clock days to sweep the whole candidate space.
    pub fn projected_days(&self) -> f64 {
        self.total_combinations as f64 / self.passwords_per_sec() / 86_400.0
    }
}

/// Terminal outcome of one run.
#[derive(Debug, Clone)]
pub enum AttackOutcome {
    /// The password. The checkpoint file now carries the success record.
    Found(String),
    /// Range exhausted without a hit; benchmark numbers when benchmarking.
    Exhausted(Option<BenchmarkReport>),
}

/// Per-candidate progress callback: `(current_index, effective_high)`.
pub type ProgressFn<'a> = &'a dyn Fn(u64, u64);

struct PlannedRange {
    low: u64,
    /// Upper bound the checkpoint reports, never clamped by a benchmark cap.
    high: u64,
    /// Upper bound the loop actually runs to.
    effective_high: u64,
}

pub struct AttackDriver {
    config: AttackConfig,
    oracle: HeaderOracle,
    crk_path: PathBuf,
}

impl AttackDriver {
    /// Open and parse the archive. Fails fast on format or I/O problems
    /// before any cryptographic work starts.
    pub fn new(config: AttackConfig) -> Result<Self> {
        let file =
            File::open(&config.archive).map_err(|e| CrackError::io(&config.archive, e))?;
        let mut reader = BufReader::new(file);
        sniff_format(&mut reader)?;
        let headers = EncryptedHeaders::read_from(&mut reader)?;

        Ok(Self {
            crk_path: checkpoint::crk_path(&config.archive),
            oracle: HeaderOracle::new(headers),
            config,
        })
    }

    /// Run the attack to a terminal state.
    pub fn run(&mut self, progress: Option<ProgressFn<'_>>) -> Result<AttackOutcome> {
        match self.config.method {
            Method::Bruteforce => self.run_bruteforce(progress),
            Method::Dictionary => self.run_dictionary(progress),
        }
    }

    fn run_bruteforce(&mut self, progress: Option<ProgressFn<'_>>) -> Result<AttackOutcome> {
        let alphabet = Alphabet::from_listing_file(&self.config.source)?;
        let total = alphabet.total_combinations(self.config.max_length)?;
        let range = self.plan_range(total)?;

        let start = Instant::now();
        let mut tested = 0u64;
        for index in range.low..=range.effective_high {
            self.checkpoint_if_due(index, range.high)?;
            if let Some(report) = progress {
                report(index, range.effective_high);
            }

            let candidate = match alphabet.password_at(index, self.config.max_length) {
                Ok(candidate) => candidate,
                // An over-long token concatenation cannot be the password;
                // count it as a definite miss and move on.
                Err(CrackError::CandidateTooLong { .. }) => {
                    tested += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            tested += 1;

            if self.oracle.test_password(&candidate) {
                return self.found(candidate);
            }
        }

        Ok(AttackOutcome::Exhausted(self.benchmark_report(
            tested,
            start.elapsed(),
            total,
        )))
    }

    fn run_dictionary(&mut self, progress: Option<ProgressFn<'_>>) -> Result<AttackOutcome> {
        let total = Wordlist::count_candidates(&self.config.source)?;
        let range = self.plan_range(total)?;

        // No random access to line N: scan forward to the start index.
        let mut wordlist = Wordlist::open(&self.config.source)?;
        wordlist.skip(range.low - 1)?;

        let start = Instant::now();
        let mut tested = 0u64;
        for index in range.low..=range.effective_high {
            self.checkpoint_if_due(index, range.high)?;
            if let Some(report) = progress {
                report(index, range.effective_high);
            }

            let Some(candidate) = wordlist.next_candidate()? else {
                break;
            };
            tested += 1;

            if self.oracle.test_password(&candidate) {
                return self.found(candidate);
            }
        }

        Ok(AttackOutcome::Exhausted(self.benchmark_report(
            tested,
            start.elapsed(),
            total,
        )))
    }

    /// Validate the configured bounds against the candidate space and apply
    /// the benchmark cap.
    fn plan_range(&self, total: u64) -> Result<PlannedRange> {
        let low = self.config.low.max(1);
        if low > total {
            return Err(CrackError::IndexOutOfRange { low, total });
        }

        let mut high = self.config.high;
        if high == 0 || high > total {
            high = total;
        }
        if high < low {
            return Err(CrackError::InvalidRange { low, high });
        }

        let mut effective_high = high;
        if self.config.benchmark > 0 && self.config.benchmark < high - low {
            effective_high = low + self.config.benchmark - 1;
        }

        Ok(PlannedRange {
            low,
            high,
            effective_high,
        })
    }

    fn checkpoint_if_due(&self, index: u64, high: u64) -> Result<()> {
        let interval = match self.config.save_interval {
            0 => DEFAULT_SAVE_INTERVAL,
            interval => interval,
        };
        if index % interval != 0 {
            return Ok(());
        }
        // `index` has not been tested yet, so it is the resume point.
        Checkpoint {
            method: self.config.method,
            source: self.config.source.clone(),
            low: index,
            high,
            max_length: self.config.max_length,
            benchmark: self.config.benchmark,
            save_interval: interval,
        }
        .save(&self.crk_path)
    }

    fn found(&self, password: String) -> Result<AttackOutcome> {
        checkpoint::save_result(&self.crk_path, &password)?;
        Ok(AttackOutcome::Found(password))
    }

    fn benchmark_report(
        &self,
        tested: u64,
        elapsed: Duration,
        total: u64,
    ) -> Option<BenchmarkReport> {
        (self.config.benchmark > 0).then(|| BenchmarkReport {
            tested,
            elapsed,
            total_combinations: total,
        })
    }
}
