//! Command-line interface for rar-crack

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rar-crack")]
#[command(
    about = "Password recovery for RAR 3.x archives with encrypted headers",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Exhaustive search over an alphabet listing
    Bruteforce {
        /// Encrypted archive to attack
        archive: PathBuf,

        /// Alphabet listing: one line of characters, or one token per line
        #[arg(short, long)]
        alphabet: PathBuf,

        /// Maximum password length to try
        #[arg(short = 'p', long, default_value_t = 1,
              value_parser = clap::value_parser!(u32).range(1..))]
        max_length: u32,

        /// First candidate index (1-based); useful to split a job between
        /// several machines
        #[arg(long, default_value_t = 1)]
        start: u64,

        /// Last candidate index; 0 means the whole candidate space
        #[arg(long, default_value_t = 0)]
        end: u64,

        /// Benchmark: test only this many candidates and report throughput
        #[arg(short, long, default_value_t = 0)]
        benchmark: u64,

        /// Candidates between progress saves
        #[arg(short = 't', long, default_value_t = 1500)]
        save_interval: u64,
    },

    /// Try every word of a wordlist
    Dictionary {
        /// Encrypted archive to attack
        archive: PathBuf,

        /// Wordlist with one candidate password per line
        #[arg(short, long)]
        wordlist: PathBuf,

        /// First candidate index (1-based)
        #[arg(long, default_value_t = 1)]
        start: u64,

        /// Last candidate index; 0 means the whole wordlist
        #[arg(long, default_value_t = 0)]
        end: u64,

        /// Benchmark: test only this many candidates and report throughput
        #[arg(short, long, default_value_t = 0)]
        benchmark: u64,

        /// Candidates between progress saves
        #[arg(short = 't', long, default_value_t = 1500)]
        save_interval: u64,
    },

    /// Resume an interrupted attack from the archive's .crk file
    Resume {
        /// Archive whose checkpoint to pick up
        archive: PathBuf,
    },
}
