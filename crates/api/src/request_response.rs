// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// API request to create a new pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePoolRequest {
    /// The pool's display name.
    pub name: String,
}

/// API request to rename a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePoolRequest {
    /// The new display name.
    pub name: String,
}

/// API request to list several pools at once.
///
/// Clients keep the identifiers of pools they have visited and ask for
/// them in bulk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListPoolsRequest {
    /// The pool identifiers to load. Unknown identifiers are ignored.
    pub pool_ids: Vec<String>,
}

/// API request to add a participant to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddParticipantRequest {
    /// The participant's display name.
    pub name: String,
}

/// API request to move a participant to another group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveParticipantRequest {
    /// The destination group, which must belong to the participant's pool.
    pub group_id: i64,
}

/// A participant as listed inside a pool.
///
/// Recipients are deliberately absent; they are only revealed through the
/// participant's own view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    /// The participant's opaque identifier.
    pub participant_id: String,
    /// The participant's display name.
    pub name: String,
    /// The group the participant belongs to.
    pub group_id: i64,
}

/// A group and its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// The group's identifier.
    pub group_id: i64,
    /// The group's participants, ordered by name.
    pub participants: Vec<ParticipantInfo>,
}

/// A fully assembled pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    /// The pool's opaque identifier.
    pub pool_id: String,
    /// The pool's display name.
    pub name: String,
    /// When the pool was created.
    pub created_at: String,
    /// `Open` or `Drawn`.
    pub lifecycle_state: String,
    /// Total number of participants across all groups.
    pub participant_count: usize,
    /// The pool's groups, ordered by identifier.
    pub groups: Vec<GroupInfo>,
}

/// API response for listing pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPoolsResponse {
    /// The pools found, newest first.
    pub pools: Vec<PoolInfo>,
}

/// API response for a successful pool deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePoolResponse {
    /// The deleted pool.
    pub pool_id: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful group creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGroupResponse {
    /// The pool the group was created in.
    pub pool_id: String,
    /// The new group's identifier.
    pub group_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a successful group deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteGroupResponse {
    /// The pool the group belonged to.
    pub pool_id: String,
    /// The deleted group.
    pub group_id: i64,
    /// Identifiers of the participants deleted with the group.
    pub removed_participants: Vec<String>,
    /// A success message.
    pub message: String,
}

/// API response for a successfully added participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddParticipantResponse {
    /// The pool the participant joined.
    pub pool_id: String,
    /// The new participant.
    pub participant: ParticipantInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successfully moved participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveParticipantResponse {
    /// The participant that moved.
    pub participant_id: String,
    /// The group the participant left.
    pub from_group_id: i64,
    /// The group the participant joined.
    pub to_group_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a successfully deleted participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteParticipantResponse {
    /// The deleted participant.
    pub participant_id: String,
    /// The group the participant belonged to.
    pub group_id: i64,
    /// A success message.
    pub message: String,
}

/// The person a participant gives to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientInfo {
    /// The recipient's identifier.
    pub participant_id: String,
    /// The recipient's display name.
    pub name: String,
}

/// API response for a participant's own view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetParticipantResponse {
    /// The participant's identifier.
    pub participant_id: String,
    /// The participant's display name.
    pub name: String,
    /// The participant's group.
    pub group_id: i64,
    /// The pool the participant belongs to.
    pub pool_id: String,
    /// The pool's display name.
    pub pool_name: String,
    /// The assigned recipient, once the pool has been drawn.
    pub recipient: Option<RecipientInfo>,
}

/// API response for a successful draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawPoolResponse {
    /// The drawn pool.
    pub pool_id: String,
    /// Giver identifier to recipient identifier, for every participant.
    pub assignments: BTreeMap<String, String>,
    /// Backtracking attempts used.
    pub attempts: u32,
    /// `backtracking` or `matching`.
    pub strategy: String,
    /// A success message.
    pub message: String,
}
