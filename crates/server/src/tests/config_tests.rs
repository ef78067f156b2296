// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use secret_draw_domain::{DEFAULT_MAX_ATTEMPTS, DEFAULT_STEP_LIMIT};

use crate::config::{Args, ConfigError, ServerConfig};

fn parse(args: &[&str]) -> Result<ServerConfig, ConfigError> {
    let mut argv: Vec<&str> = vec!["secret-draw-server"];
    argv.extend_from_slice(args);
    ServerConfig::try_from(Args::try_parse_from(argv).unwrap())
}

#[test]
fn test_defaults() {
    let config: ServerConfig = parse(&[]).unwrap();

    assert_eq!(config.addr.to_string(), "127.0.0.1:3000");
    assert!(config.database.is_none());
    assert!(config.seed.is_none());
    assert_eq!(config.draw_options.max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert_eq!(config.draw_options.step_limit, Some(DEFAULT_STEP_LIMIT));
    assert!(config.draw_options.matching_fallback);
}

#[test]
fn test_explicit_options() {
    let config: ServerConfig = parse(&[
        "--database",
        "draws.db",
        "--port",
        "8080",
        "--bind",
        "0.0.0.0",
        "--max-attempts",
        "5",
        "--step-limit",
        "0",
        "--no-matching-fallback",
        "--seed",
        "42",
    ])
    .unwrap();

    assert_eq!(config.addr.to_string(), "0.0.0.0:8080");
    assert_eq!(config.database.unwrap().to_str(), Some("draws.db"));
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.draw_options.max_attempts, 5);
    assert_eq!(config.draw_options.step_limit, None);
    assert!(!config.draw_options.matching_fallback);
}

#[test]
fn test_invalid_bind_address() {
    let result = parse(&["--bind", "not-an-ip"]);

    assert!(matches!(
        result,
        Err(ConfigError::InvalidBindAddress { ref address, .. }) if address == "not-an-ip"
    ));
}

#[test]
fn test_zero_attempts_without_fallback_is_rejected() {
    assert_eq!(
        parse(&["--max-attempts", "0", "--no-matching-fallback"]),
        Err(ConfigError::NoDrawStrategy)
    );
    assert!(parse(&["--max-attempts", "0"]).is_ok());
}
