// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Group mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use secret_draw_domain::{GroupId, PoolId};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::groups;
use crate::error::PersistenceError;

/// Creates an empty group in a pool.
///
/// # Returns
///
/// The identifier assigned to the new group.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., the pool does not exist).
pub fn insert_group(
    conn: &mut SqliteConnection,
    pool_id: &PoolId,
) -> Result<GroupId, PersistenceError> {
    diesel::insert_into(groups::table)
        .values(groups::pool_id.eq(pool_id.value()))
        .execute(conn)?;

    let group_id: i64 = conn.get_last_insert_rowid()?;

    info!(group_id, pool_id = %pool_id, "Created group");
    Ok(GroupId::new(group_id))
}

/// Deletes a group. Its participants are removed by cascade.
///
/// # Errors
///
/// Returns `PersistenceError::GroupNotFound` if the group does not exist.
pub fn delete_group(conn: &mut SqliteConnection, group_id: GroupId) -> Result<usize, PersistenceError> {
    let rows: usize =
        diesel::delete(groups::table.filter(groups::group_id.eq(group_id.value()))).execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::GroupNotFound(group_id.value()));
    }
    Ok(rows)
}
