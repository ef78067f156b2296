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

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use secret_draw_domain::{DomainError, GroupId, Participant, ParticipantId, Pool};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{PoolEvent, State, TransitionResult};

/// Validates that the pool's roster may still change.
///
/// # Errors
///
/// Returns `DomainError::PoolLocked` if the pool has been drawn.
pub fn validate_pool_open(pool: &Pool) -> Result<(), DomainError> {
    if pool.lifecycle.is_locked() {
        return Err(DomainError::PoolLocked(pool.pool_id.clone()));
    }
    Ok(())
}

/// Validates that a group belongs to the pool.
///
/// # Errors
///
/// Returns `DomainError::GroupNotInPool` if the pool has no such group.
pub fn validate_group_in_pool(pool: &Pool, group_id: GroupId) -> Result<(), DomainError> {
    if !pool.has_group(group_id) {
        return Err(DomainError::GroupNotInPool {
            group_id,
            pool_id: pool.pool_id.clone(),
        });
    }
    Ok(())
}

/// Looks up a participant of the pool.
///
/// # Errors
///
/// Returns `DomainError::ParticipantNotFound` if the pool has no such participant.
pub fn find_participant<'a>(
    pool: &'a Pool,
    participant_id: &ParticipantId,
) -> Result<&'a Participant, DomainError> {
    pool.find_participant(participant_id)
        .ok_or_else(|| DomainError::ParticipantNotFound(participant_id.clone()))
}
