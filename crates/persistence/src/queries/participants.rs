// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant and group ownership queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use secret_draw_domain::{GroupId, Participant, ParticipantId, PoolId};

use crate::data_models::ParticipantView;
use crate::diesel_schema::{groups, participants, pools};
use crate::error::PersistenceError;
use crate::queries::pools::ParticipantRow;

/// Finds the pool a group belongs to.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the group does not exist.
pub fn find_pool_for_group(
    conn: &mut SqliteConnection,
    group_id: GroupId,
) -> Result<Option<PoolId>, PersistenceError> {
    let pool_id: Option<String> = groups::table
        .filter(groups::group_id.eq(group_id.value()))
        .select(groups::pool_id)
        .first(conn)
        .optional()?;

    Ok(pool_id.as_deref().map(PoolId::new))
}

/// Finds the pool a participant belongs to.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the participant does not exist.
pub fn find_pool_for_participant(
    conn: &mut SqliteConnection,
    participant_id: &ParticipantId,
) -> Result<Option<PoolId>, PersistenceError> {
    let pool_id: Option<String> = participants::table
        .inner_join(groups::table)
        .filter(participants::participant_id.eq(participant_id.value()))
        .select(groups::pool_id)
        .first(conn)
        .optional()?;

    Ok(pool_id.as_deref().map(PoolId::new))
}

/// Loads a participant together with their pool and the name of their recipient.
///
/// # Errors
///
/// Returns `PersistenceError::ParticipantNotFound` if the participant does
/// not exist, or an error if the query fails.
pub fn get_participant_view(
    conn: &mut SqliteConnection,
    participant_id: &ParticipantId,
) -> Result<ParticipantView, PersistenceError> {
    let row: Option<(ParticipantRow, String, String)> = participants::table
        .inner_join(groups::table.inner_join(pools::table))
        .filter(participants::participant_id.eq(participant_id.value()))
        .select((ParticipantRow::as_select(), pools::pool_id, pools::name))
        .first(conn)
        .optional()?;

    let Some((row, pool_id, pool_name)) = row else {
        return Err(PersistenceError::ParticipantNotFound(
            participant_id.to_string(),
        ));
    };
    let participant: Participant = row.into_participant();

    let recipient_name: Option<String> = match &participant.recipient_id {
        Some(recipient_id) => participants::table
            .filter(participants::participant_id.eq(recipient_id.value()))
            .select(participants::name)
            .first(conn)
            .optional()?,
        None => None,
    };

    Ok(ParticipantView {
        participant,
        pool_id: PoolId::new(&pool_id),
        pool_name,
        recipient_name,
    })
}
