// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use secret_draw_domain::{Assignment, GroupId, Participant, ParticipantId};
use tracing::debug;

use crate::diesel_schema::participants;
use crate::error::PersistenceError;

/// Inserts a participant without a recipient.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., the group does not exist).
pub fn insert_participant(
    conn: &mut SqliteConnection,
    participant: &Participant,
) -> Result<usize, PersistenceError> {
    let rows: usize = diesel::insert_into(participants::table)
        .values((
            participants::participant_id.eq(participant.participant_id.value()),
            participants::group_id.eq(participant.group_id.value()),
            participants::name.eq(&participant.name),
        ))
        .execute(conn)?;
    Ok(rows)
}

/// Moves a participant to another group.
///
/// # Errors
///
/// Returns `PersistenceError::ParticipantNotFound` if no row was updated.
pub fn update_participant_group(
    conn: &mut SqliteConnection,
    participant_id: &ParticipantId,
    group_id: GroupId,
) -> Result<usize, PersistenceError> {
    let rows: usize = diesel::update(
        participants::table.filter(participants::participant_id.eq(participant_id.value())),
    )
    .set(participants::group_id.eq(group_id.value()))
    .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::ParticipantNotFound(
            participant_id.to_string(),
        ));
    }
    Ok(rows)
}

/// Deletes a participant. Anyone assigned to give to them loses their recipient.
///
/// # Errors
///
/// Returns `PersistenceError::ParticipantNotFound` if the participant does not exist.
pub fn delete_participant(
    conn: &mut SqliteConnection,
    participant_id: &ParticipantId,
) -> Result<usize, PersistenceError> {
    let rows: usize = diesel::delete(
        participants::table.filter(participants::participant_id.eq(participant_id.value())),
    )
    .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::ParticipantNotFound(
            participant_id.to_string(),
        ));
    }
    Ok(rows)
}

/// Writes every giver's recipient.
///
/// Must run inside the draw transaction.
///
/// # Errors
///
/// Returns `PersistenceError::ParticipantNotFound` if a giver has no row,
/// or an error if an update fails.
pub fn write_recipients(
    conn: &mut SqliteConnection,
    assignment: &Assignment,
) -> Result<usize, PersistenceError> {
    let mut written: usize = 0;
    for (giver, recipient) in assignment.iter() {
        let rows: usize = diesel::update(
            participants::table.filter(participants::participant_id.eq(giver.value())),
        )
        .set(participants::recipient_id.eq(Some(recipient.value())))
        .execute(conn)?;

        if rows == 0 {
            return Err(PersistenceError::ParticipantNotFound(giver.to_string()));
        }
        written += rows;
    }

    debug!(written, "Wrote recipients");
    Ok(written)
}
