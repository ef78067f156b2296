// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod draw;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use draw::{
    Assignment, DEFAULT_MAX_ATTEMPTS, DEFAULT_STEP_LIMIT, DrawOptions, DrawOutcome, DrawStrategy,
    draw, draw_with_options,
};
pub use error::{DomainError, Infeasibility};
pub use types::{Group, GroupId, Participant, ParticipantId, Pool, PoolId, PoolLifecycle};
pub use validation::{MAX_NAME_LENGTH, validate_participant_name, validate_pool_name};
