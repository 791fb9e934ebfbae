//! rar-crack - password recovery for RAR 3.x archives with encrypted headers

use std::path::Path;

use anyhow::{bail, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rar_crack::{
    checkpoint, AttackConfig, AttackDriver, AttackOutcome, Checkpoint, CheckpointState, Method,
};

mod cli;
use cli::{Cli, Commands};

/// What a previous run left behind for the target archive.
enum PriorRun {
    /// No checkpoint file; start fresh.
    Fresh,
    /// An interrupted attack to pick up.
    Resume(Checkpoint),
    /// A terminal success record; the archive must not be re-attacked.
    Solved,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Bruteforce {
            archive,
            alphabet,
            max_length,
            start,
            end,
            benchmark,
            save_interval,
        } => match prior_run(&archive)? {
            PriorRun::Solved => return Ok(()),
            PriorRun::Resume(checkpoint) => AttackConfig::resume(archive, checkpoint),
            PriorRun::Fresh => AttackConfig {
                source: alphabet,
                method: Method::Bruteforce,
                low: start,
                high: end,
                max_length,
                benchmark,
                save_interval,
                archive,
            },
        },

        Commands::Dictionary {
            archive,
            wordlist,
            start,
            end,
            benchmark,
            save_interval,
        } => match prior_run(&archive)? {
            PriorRun::Solved => return Ok(()),
            PriorRun::Resume(checkpoint) => AttackConfig::resume(archive, checkpoint),
            PriorRun::Fresh => AttackConfig {
                source: wordlist,
                method: Method::Dictionary,
                low: start,
                high: end,
                max_length: 0,
                benchmark,
                save_interval,
                archive,
            },
        },

        Commands::Resume { archive } => match prior_run(&archive)? {
            PriorRun::Solved => return Ok(()),
            PriorRun::Resume(checkpoint) => AttackConfig::resume(archive, checkpoint),
            PriorRun::Fresh => bail!(
                "no checkpoint found at {}",
                checkpoint::crk_path(&archive).display()
            ),
        },
    };

    run_attack(config)
}

/// Classify what an existing checkpoint file means for this launch. A
/// terminal success record stops everything: the archive is already solved
/// and the stored password must survive untouched.
fn prior_run(archive: &Path) -> Result<PriorRun> {
    let crk = checkpoint::crk_path(archive);
    if !crk.exists() {
        return Ok(PriorRun::Fresh);
    }
    match checkpoint::load(&crk)? {
        CheckpointState::Solved(password) => {
            println!(
                "This archive was already solved; the password is \"{}\".",
                password
            );
            println!("Delete {} to attack it again.", crk.display());
            Ok(PriorRun::Solved)
        }
        CheckpointState::InProgress(checkpoint) => {
            println!("Resuming from {}", crk.display());
            Ok(PriorRun::Resume(checkpoint))
        }
    }
}

fn run_attack(config: AttackConfig) -> Result<()> {
    let mut driver = AttackDriver::new(config)?;

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {per_sec}")?
            .progress_chars("#>-"),
    );
    let progress = |index: u64, high: u64| {
        bar.set_length(high);
        bar.set_position(index);
    };

    let outcome = driver.run(Some(&progress))?;
    bar.finish_and_clear();

    match outcome {
        AttackOutcome::Found(password) => {
            println!("The archive password is \"{}\".", password);
        }
        AttackOutcome::Exhausted(report) => {
            if let Some(report) = report {
                println!(
                    "{} passwords tested in {:.1} seconds",
                    report.tested,
                    report.elapsed.as_secs_f64()
                );
                println!(
                    "Average performance: {:.2} passwords/sec",
                    report.passwords_per_sec()
                );
                println!(
                    "The full space of {} candidates would take about {:.2} days",
                    report.total_combinations,
                    report.projected_days()
                );
            } else {
                println!("The archive password was not found in this range.");
            }
        }
    }
    Ok(())
}
