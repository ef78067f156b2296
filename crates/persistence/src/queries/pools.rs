// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pool queries.
//!
//! Pools are always returned fully assembled: groups ordered by identifier,
//! and each group's participants ordered by name.

use std::collections::BTreeMap;
use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use secret_draw_domain::{Group, GroupId, Participant, ParticipantId, Pool, PoolId, PoolLifecycle};
use tracing::debug;

use crate::diesel_schema::{groups, participants, pools};
use crate::error::PersistenceError;

/// Diesel Queryable struct for pool rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = pools)]
pub(crate) struct PoolRow {
    pub(crate) pool_id: String,
    pub(crate) name: String,
    pub(crate) lifecycle_state: String,
    pub(crate) created_at: String,
}

/// Diesel Queryable struct for participant rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = participants)]
pub(crate) struct ParticipantRow {
    pub(crate) participant_id: String,
    pub(crate) group_id: i64,
    pub(crate) name: String,
    pub(crate) recipient_id: Option<String>,
}

impl ParticipantRow {
    pub(crate) fn into_participant(self) -> Participant {
        let mut participant: Participant = Participant::new(
            ParticipantId::new(&self.participant_id),
            self.name,
            GroupId::new(self.group_id),
        );
        participant.recipient_id = self.recipient_id.as_deref().map(ParticipantId::new);
        participant
    }
}

/// Retrieves a fully assembled pool.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `pool_id` - The pool to load
///
/// # Errors
///
/// Returns `PersistenceError::PoolNotFound` if the pool does not exist, or
/// an error if the query fails or a stored lifecycle state is invalid.
pub fn get_pool(conn: &mut SqliteConnection, pool_id: &PoolId) -> Result<Pool, PersistenceError> {
    let row: Option<PoolRow> = pools::table
        .filter(pools::pool_id.eq(pool_id.value()))
        .select(PoolRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Err(PersistenceError::PoolNotFound(pool_id.to_string()));
    };

    assemble_pools(conn, vec![row])?
        .pop()
        .ok_or_else(|| PersistenceError::PoolNotFound(pool_id.to_string()))
}

/// Retrieves several pools, newest first.
///
/// Pools sharing a creation timestamp are ordered by insertion, latest
/// first. Identifiers that match no pool are skipped.
///
/// # Errors
///
/// Returns an error if the query fails or a stored lifecycle state is invalid.
pub fn list_pools(
    conn: &mut SqliteConnection,
    pool_ids: &[PoolId],
) -> Result<Vec<Pool>, PersistenceError> {
    let ids: Vec<&str> = pool_ids.iter().map(PoolId::value).collect();

    let rows: Vec<PoolRow> = pools::table
        .filter(pools::pool_id.eq_any(ids))
        .order((pools::created_at.desc(), sql::<BigInt>("pools.rowid").desc()))
        .select(PoolRow::as_select())
        .load(conn)?;

    debug!(
        requested = pool_ids.len(),
        found = rows.len(),
        "Loaded pools by id"
    );

    assemble_pools(conn, rows)
}

fn parse_lifecycle(state: &str) -> Result<PoolLifecycle, PersistenceError> {
    PoolLifecycle::from_str(state).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

/// Loads the groups and participants of the given pool rows, preserving row order.
fn assemble_pools(
    conn: &mut SqliteConnection,
    rows: Vec<PoolRow>,
) -> Result<Vec<Pool>, PersistenceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let pool_ids: Vec<&str> = rows.iter().map(|row| row.pool_id.as_str()).collect();

    let group_rows: Vec<(i64, String)> = groups::table
        .filter(groups::pool_id.eq_any(pool_ids.clone()))
        .order(groups::group_id.asc())
        .select((groups::group_id, groups::pool_id))
        .load(conn)?;

    let participant_rows: Vec<ParticipantRow> = participants::table
        .inner_join(groups::table)
        .filter(groups::pool_id.eq_any(pool_ids))
        .order((participants::name.asc(), participants::participant_id.asc()))
        .select(ParticipantRow::as_select())
        .load(conn)?;

    let mut members: BTreeMap<i64, Vec<Participant>> = BTreeMap::new();
    for row in participant_rows {
        members
            .entry(row.group_id)
            .or_default()
            .push(row.into_participant());
    }

    let mut groups_by_pool: BTreeMap<String, Vec<Group>> = BTreeMap::new();
    for (group_id, pool_id) in group_rows {
        let mut group: Group = Group::new(GroupId::new(group_id));
        group.participants = members.remove(&group_id).unwrap_or_default();
        groups_by_pool.entry(pool_id).or_default().push(group);
    }

    rows.into_iter()
        .map(|row| {
            let mut pool: Pool = Pool::new(PoolId::new(&row.pool_id), row.name, row.created_at);
            pool.lifecycle = parse_lifecycle(&row.lifecycle_state)?;
            pool.groups = groups_by_pool.remove(&row.pool_id).unwrap_or_default();
            Ok(pool)
        })
        .collect()
}
