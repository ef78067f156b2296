// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persisting core transitions.

use diesel::{Connection, SqliteConnection};
use secret_draw::{PoolEvent, TransitionResult};
use secret_draw_domain::{GroupId, PoolId};
use tracing::{debug, info};

use crate::data_models::PersistTransitionResult;
use crate::error::PersistenceError;
use crate::mutations::{groups, participants, pools};

/// Persists the event of a transition result in a single transaction.
///
/// For `Drawn` events the pool row is switched from `Open` to `Drawn`
/// first. If that update matches no row, another draw already committed
/// and the transaction rolls back with `PersistenceError::DrawConflict`,
/// leaving every recipient untouched.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `result` - The transition result to persist
///
/// # Errors
///
/// Returns an error if any statement fails; nothing is written in that case.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    let pool_id: &PoolId = &result.new_state.pool.pool_id;

    let persisted: PersistTransitionResult =
        conn.transaction::<_, PersistenceError, _>(|conn| match &result.event {
            PoolEvent::PoolRenamed { pool_id, name } => Ok(PersistTransitionResult {
                group_id: None,
                rows_affected: pools::rename_pool(conn, pool_id, name)?,
            }),
            PoolEvent::GroupCreated { pool_id } => {
                let group_id: GroupId = groups::insert_group(conn, pool_id)?;
                Ok(PersistTransitionResult {
                    group_id: Some(group_id),
                    rows_affected: 1,
                })
            }
            PoolEvent::ParticipantAdded { participant } => Ok(PersistTransitionResult {
                group_id: None,
                rows_affected: participants::insert_participant(conn, participant)?,
            }),
            PoolEvent::ParticipantMoved {
                participant_id, to, ..
            } => Ok(PersistTransitionResult {
                group_id: None,
                rows_affected: participants::update_participant_group(conn, participant_id, *to)?,
            }),
            PoolEvent::ParticipantRemoved { participant_id, .. } => Ok(PersistTransitionResult {
                group_id: None,
                rows_affected: participants::delete_participant(conn, participant_id)?,
            }),
            PoolEvent::GroupRemoved { group_id, .. } => Ok(PersistTransitionResult {
                group_id: None,
                rows_affected: groups::delete_group(conn, *group_id)?,
            }),
            PoolEvent::Drawn {
                pool_id,
                assignment,
                ..
            } => {
                if pools::mark_pool_drawn(conn, pool_id)? == 0 {
                    return Err(PersistenceError::DrawConflict(pool_id.to_string()));
                }
                let written: usize = participants::write_recipients(conn, assignment)?;
                debug!(pool_id = %pool_id, written, "Persisted draw");
                Ok(PersistTransitionResult {
                    group_id: None,
                    rows_affected: written + 1,
                })
            }
        })?;

    info!(
        pool_id = %pool_id,
        event = result.event.name(),
        rows = persisted.rows_affected,
        "Persisted transition"
    );

    Ok(persisted)
}
