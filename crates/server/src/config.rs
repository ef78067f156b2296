// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line configuration for the server.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use secret_draw_domain::{DEFAULT_MAX_ATTEMPTS, DEFAULT_STEP_LIMIT, DrawOptions};
use thiserror::Error;

/// Secret Draw Server - HTTP server for gift exchange draws
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Randomized search attempts per draw before falling back
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Candidate probes per search attempt; 0 removes the limit
    #[arg(long, default_value_t = DEFAULT_STEP_LIMIT)]
    pub step_limit: u64,

    /// Fail a draw when every search attempt gives up instead of using the matching fallback
    #[arg(long)]
    pub no_matching_fallback: bool,

    /// Seed for draw randomness, for reproducible draws while debugging
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Server configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The bind address is not an IP address.
    #[error("Invalid bind address '{address}': {reason}")]
    InvalidBindAddress { address: String, reason: String },

    /// No strategy is left that could ever produce an assignment.
    #[error("--max-attempts 0 together with --no-matching-fallback makes every draw fail")]
    NoDrawStrategy,
}

/// Validated server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Where to listen.
    pub addr: SocketAddr,
    /// Database file, or `None` for an in-memory database.
    pub database: Option<PathBuf>,
    /// Draw engine budgets applied to every draw.
    pub draw_options: DrawOptions,
    /// Fixed seed for draw randomness.
    pub seed: Option<u64>,
}

impl TryFrom<Args> for ServerConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let ip: IpAddr = args
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddress {
                address: args.bind.clone(),
                reason: e.to_string(),
            })?;

        if args.max_attempts == 0 && args.no_matching_fallback {
            return Err(ConfigError::NoDrawStrategy);
        }

        Ok(Self {
            addr: SocketAddr::new(ip, args.port),
            database: args.database,
            draw_options: DrawOptions {
                max_attempts: args.max_attempts,
                step_limit: (args.step_limit > 0).then_some(args.step_limit),
                matching_fallback: !args.no_matching_fallback,
            },
            seed: args.seed,
        })
    }
}
