// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pool mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use secret_draw_domain::{PoolId, PoolLifecycle};
use tracing::{debug, info};

use crate::diesel_schema::pools;
use crate::error::PersistenceError;

/// Inserts a new, open pool. The creation timestamp is assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., duplicate identifier).
pub fn insert_pool(
    conn: &mut SqliteConnection,
    pool_id: &PoolId,
    name: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(pools::table)
        .values((
            pools::pool_id.eq(pool_id.value()),
            pools::name.eq(name),
            pools::lifecycle_state.eq(PoolLifecycle::Open.as_str()),
        ))
        .execute(conn)?;

    info!(pool_id = %pool_id, "Created pool");
    Ok(())
}

/// Renames a pool.
///
/// # Errors
///
/// Returns `PersistenceError::PoolNotFound` if no row was updated.
pub fn rename_pool(
    conn: &mut SqliteConnection,
    pool_id: &PoolId,
    name: &str,
) -> Result<usize, PersistenceError> {
    let rows: usize = diesel::update(pools::table.filter(pools::pool_id.eq(pool_id.value())))
        .set(pools::name.eq(name))
        .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::PoolNotFound(pool_id.to_string()));
    }
    Ok(rows)
}

/// Deletes a pool. Groups and participants are removed by cascade.
///
/// # Errors
///
/// Returns `PersistenceError::PoolNotFound` if the pool does not exist.
pub fn delete_pool(conn: &mut SqliteConnection, pool_id: &PoolId) -> Result<(), PersistenceError> {
    let rows: usize =
        diesel::delete(pools::table.filter(pools::pool_id.eq(pool_id.value()))).execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::PoolNotFound(pool_id.to_string()));
    }

    info!(pool_id = %pool_id, "Deleted pool");
    Ok(())
}

/// Moves a pool from `Open` to `Drawn`.
///
/// The update only matches an open pool, so of two concurrent draws at
/// most one sees a row change.
///
/// # Returns
///
/// The number of rows updated: `1` if this call drew the pool, `0` otherwise.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_pool_drawn(
    conn: &mut SqliteConnection,
    pool_id: &PoolId,
) -> Result<usize, PersistenceError> {
    let rows: usize = diesel::update(
        pools::table
            .filter(pools::pool_id.eq(pool_id.value()))
            .filter(pools::lifecycle_state.eq(PoolLifecycle::Open.as_str())),
    )
    .set(pools::lifecycle_state.eq(PoolLifecycle::Drawn.as_str()))
    .execute(conn)?;

    debug!(pool_id = %pool_id, rows, "Conditional lifecycle update");
    Ok(rows)
}
