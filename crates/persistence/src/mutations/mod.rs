// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Mutations use Diesel DSL; the only backend-specific helper is reading the
//! row ID of a new group.
//!
//! ## Module Organization
//!
//! - `pools`: Pool creation, renaming, deletion and the draw lifecycle guard
//! - `groups`: Group creation and deletion
//! - `participants`: Participant rows and recipient assignment
//! - `transition`: Applying a core `TransitionResult` atomically

pub mod groups;
pub mod participants;
pub mod pools;
pub mod transition;

pub use pools::{delete_pool, insert_pool};
pub use transition::persist_transition;
