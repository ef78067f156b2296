// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `pools`: Fully assembled pools
//! - `participants`: Participant views and ownership lookups

pub mod participants;
pub mod pools;

pub use participants::{find_pool_for_group, find_pool_for_participant, get_participant_view};
pub use pools::{get_pool, list_pools};
