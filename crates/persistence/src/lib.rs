// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Secret Draw.
//!
//! This crate stores pools, groups, participants and drawn assignments in
//! `SQLite` through Diesel. The schema is embedded and migrated on start-up.
//!
//! ## Storage Model
//!
//! - `pools`: one row per pool, with its lifecycle state
//! - `groups`: owned by a pool, deleted with it
//! - `participants`: owned by a group, deleted with it; `recipient_id`
//!   points at another participant and is cleared if that participant
//!   is deleted
//!
//! ## Testing
//!
//! Every call to [`Persistence::new_in_memory`] opens its own shared
//! in-memory database, so tests never observe each other's data.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use secret_draw::TransitionResult;
use secret_draw_domain::{GroupId, ParticipantId, Pool, PoolId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{ParticipantView, PersistTransitionResult};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter for pools and their draws.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:secret_draw_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Pools
    // ========================================================================

    /// Creates an open pool and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_pool(&mut self, pool_id: &PoolId, name: &str) -> Result<Pool, PersistenceError> {
        mutations::insert_pool(&mut self.conn, pool_id, name)?;
        queries::get_pool(&mut self.conn, pool_id)
    }

    /// Retrieves a fully assembled pool.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PoolNotFound` if the pool does not exist.
    pub fn get_pool(&mut self, pool_id: &PoolId) -> Result<Pool, PersistenceError> {
        queries::get_pool(&mut self.conn, pool_id)
    }

    /// Retrieves the pools with the given identifiers, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pools(&mut self, pool_ids: &[PoolId]) -> Result<Vec<Pool>, PersistenceError> {
        queries::list_pools(&mut self.conn, pool_ids)
    }

    /// Deletes a pool with all of its groups and participants.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PoolNotFound` if the pool does not exist.
    pub fn delete_pool(&mut self, pool_id: &PoolId) -> Result<(), PersistenceError> {
        mutations::delete_pool(&mut self.conn, pool_id)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Persists the change described by a transition result.
    ///
    /// # Returns
    ///
    /// A `PersistTransitionResult` carrying the identifier of a newly
    /// created group, if any.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DrawConflict` if the pool was drawn
    /// concurrently, or an error if persistence fails. Nothing is written
    /// on error.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Finds the pool that owns a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_pool_for_group(
        &mut self,
        group_id: GroupId,
    ) -> Result<Option<PoolId>, PersistenceError> {
        queries::find_pool_for_group(&mut self.conn, group_id)
    }

    /// Finds the pool that owns a participant.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_pool_for_participant(
        &mut self,
        participant_id: &ParticipantId,
    ) -> Result<Option<PoolId>, PersistenceError> {
        queries::find_pool_for_participant(&mut self.conn, participant_id)
    }

    /// Loads a participant's own view: their pool and their recipient.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ParticipantNotFound` if the participant does not exist.
    pub fn get_participant_view(
        &mut self,
        participant_id: &ParticipantId,
    ) -> Result<ParticipantView, PersistenceError> {
        queries::get_participant_view(&mut self.conn, participant_id)
    }
}
