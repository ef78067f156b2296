// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Wraps the lint, build, test and coverage commands used locally and in CI.
//!
//! ### Draw Stress Checks
//!
//! `cargo xtask draw-stress` runs the draw engine over many randomly
//! generated rosters. Every success is re-validated as a bijection with no
//! self or same-group assignment, and every infeasibility report is checked
//! against the group sizes: with more than one group a roster is drawable
//! exactly when no group holds more than half of the participants.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, eyre::eyre, Result};
use duct::cmd;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use secret_draw_domain::{
    draw_with_options, DomainError, DrawOptions, DrawOutcome, DrawStrategy, GroupId, Participant,
    ParticipantId,
};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    // Check unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint clippy, docs, and formatting
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Run the draw engine over random rosters and validate every result
    #[command(visible_alias = "ds")]
    DrawStress {
        /// Number of rosters to draw
        #[arg(long, default_value_t = 2_000)]
        rosters: u32,

        /// Seed for roster generation and draws
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Largest roster to generate
        #[arg(long, default_value_t = 40)]
        max_participants: usize,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Machete => machete(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::DrawStress {
                rosters,
                seed,
                max_participants,
            } => draw_stress(rosters, seed, max_participants),
        }
    }
}

/// Run CI checks (lint, build, test)
fn ci() -> Result<()> {
    lint()?;
    machete()?;
    build()?;
    test()?;
    draw_stress(500, 0, 30)?;
    Ok(())
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint clippy, docs, and formatting
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Run tests for libs, backends, and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Run the draw engine over random rosters and validate every result
///
/// Rosters have between one and six groups. Roughly a third of them are
/// skewed so that one group dominates, which exercises the infeasibility
/// proof as well as the search.
///
/// # Errors
///
/// Fails on the first roster whose outcome is wrong: an invalid
/// assignment, a feasible roster reported infeasible, or any other error.
fn draw_stress(rosters: u32, seed: u64, max_participants: usize) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let options = DrawOptions::default();
    let max_participants = max_participants.max(2);

    let mut drawn: u32 = 0;
    let mut infeasible: u32 = 0;
    let mut by_matching: u32 = 0;
    let mut total_attempts: u64 = 0;

    tracing::info!(rosters, seed, max_participants, "Starting draw stress run");

    for index in 0..rosters {
        let participants = random_roster(&mut rng, max_participants);
        let feasible = is_drawable(&participants);

        match draw_with_options(&participants, &options, &mut rng) {
            Ok(outcome) => {
                check_outcome(index, &participants, &outcome)?;
                if !feasible {
                    return Err(eyre!(
                        "roster {index}: drew a roster whose group sizes rule out any draw"
                    ));
                }
                drawn += 1;
                total_attempts += u64::from(outcome.attempts);
                if outcome.strategy == DrawStrategy::Matching {
                    by_matching += 1;
                }
            }
            Err(DomainError::InfeasibleConstraints(reason)) if !feasible => {
                tracing::debug!(index, %reason, "Infeasible roster rejected");
                infeasible += 1;
            }
            Err(err) => {
                return Err(eyre!(
                    "roster {index} ({} participants, {} groups): {err}",
                    participants.len(),
                    group_sizes(&participants).len()
                ));
            }
        }
    }

    tracing::info!(
        drawn,
        infeasible,
        by_matching,
        total_attempts,
        "Draw stress run passed"
    );
    Ok(())
}

fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: usize) -> usize {
    let bound = u64::try_from(bound).unwrap_or(u64::MAX);
    usize::try_from(rng.next_u64() % bound).unwrap_or(0)
}

fn random_roster<R: Rng + ?Sized>(rng: &mut R, max_participants: usize) -> Vec<Participant> {
    let count = 2 + random_below(rng, max_participants - 1);
    let groups = 1 + random_below(rng, 6);
    let skewed = random_below(rng, 3) == 0;

    (0..count)
        .map(|n| {
            let group = if skewed && random_below(rng, 4) != 0 {
                0
            } else {
                random_below(rng, groups)
            };
            Participant::new(
                ParticipantId::new(&format!("p{n}")),
                format!("Participant {n}"),
                GroupId::new(i64::try_from(group).unwrap_or(0)),
            )
        })
        .collect()
}

fn group_sizes(participants: &[Participant]) -> std::collections::BTreeMap<GroupId, usize> {
    let mut sizes = std::collections::BTreeMap::new();
    for participant in participants {
        *sizes.entry(participant.group_id).or_insert(0) += 1;
    }
    sizes
}

/// A roster can be drawn when it has one group, or when no group holds
/// more than half of the participants.
fn is_drawable(participants: &[Participant]) -> bool {
    let sizes = group_sizes(participants);
    let largest = sizes.values().copied().max().unwrap_or(0);
    sizes.len() == 1 || largest * 2 <= participants.len()
}

fn check_outcome(index: u32, participants: &[Participant], outcome: &DrawOutcome) -> Result<()> {
    outcome
        .assignment
        .validate(participants)
        .map_err(|err| eyre!("roster {index}: invalid assignment: {err}"))?;
    if outcome.assignment.len() != participants.len() {
        return Err(eyre!(
            "roster {index}: {} of {} participants assigned",
            outcome.assignment.len(),
            participants.len()
        ));
    }
    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
