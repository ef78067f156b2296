// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for Secret Draw.
//!
//! Handlers take plain request DTOs, drive the core state machine against
//! stored pools, and return response DTOs. Domain, core and persistence
//! errors never cross this boundary untranslated.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    add_participant, create_group, create_pool, delete_group, delete_participant, delete_pool,
    draw_pool, get_participant, get_pool, list_pools, move_participant, pool_to_info, rename_pool,
};
pub use request_response::{
    AddParticipantRequest, AddParticipantResponse, CreateGroupResponse, CreatePoolRequest,
    DeleteGroupResponse, DeleteParticipantResponse, DeletePoolResponse, DrawPoolResponse,
    GetParticipantResponse, GroupInfo, ListPoolsRequest, ListPoolsResponse,
    MoveParticipantRequest, MoveParticipantResponse, ParticipantInfo, PoolInfo, RecipientInfo,
    RenamePoolRequest,
};
