// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the lifecycle state of a pool.
///
/// A pool is editable until its draw has been performed. Once drawn,
/// the assignment is final and the roster is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PoolLifecycle {
    /// Initial state after creation. Groups and participants may be edited.
    #[default]
    Open,
    /// The draw has been performed and persisted.
    Drawn,
}

impl FromStr for PoolLifecycle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "Drawn" => Ok(Self::Drawn),
            _ => Err(DomainError::InvalidLifecycleState(s.to_string())),
        }
    }
}

impl std::fmt::Display for PoolLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PoolLifecycle {
    /// Converts this lifecycle state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Drawn => "Drawn",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// The only valid transition is `Open` → `Drawn`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Open, Self::Drawn))
    }

    /// Returns whether the roster is frozen in this lifecycle state.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Drawn)
    }
}

/// Generates a 128-bit random identifier rendered as 32 lowercase hex characters.
fn generate_opaque_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let high: u64 = rng.next_u64();
    let low: u64 = rng.next_u64();
    format!("{high:016x}{low:016x}")
}

/// Opaque identifier of a pool.
///
/// Pool identifiers double as the pool's admin link, so they are random
/// rather than sequential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(String);

impl PoolId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(generate_opaque_id(rng))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a participant.
///
/// A participant's identifier is also the link that reveals their recipient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(generate_opaque_id(rng))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric identifier of a group, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(i64);

impl GroupId {
    /// Wraps a storage-assigned group identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member of a pool who gives one gift and receives one gift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The participant's opaque identifier.
    pub participant_id: ParticipantId,
    /// The display name.
    pub name: String,
    /// The group the participant belongs to.
    pub group_id: GroupId,
    /// The participant this one gives to. `None` until a draw is performed.
    pub recipient_id: Option<ParticipantId>,
}

impl Participant {
    /// Creates a participant with no assigned recipient.
    ///
    /// # Arguments
    ///
    /// * `participant_id` - The participant's identifier
    /// * `name` - The display name
    /// * `group_id` - The owning group
    #[must_use]
    pub const fn new(participant_id: ParticipantId, name: String, group_id: GroupId) -> Self {
        Self {
            participant_id,
            name,
            group_id,
            recipient_id: None,
        }
    }
}

/// A partition of a pool's participants.
///
/// Members of the same group never give to each other while the pool
/// has more than one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// The group identifier.
    pub group_id: GroupId,
    /// The members of the group, ordered by name.
    pub participants: Vec<Participant>,
}

impl Group {
    /// Creates an empty group.
    #[must_use]
    pub const fn new(group_id: GroupId) -> Self {
        Self {
            group_id,
            participants: Vec::new(),
        }
    }
}

/// A gift exchange: a named set of groups of participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// The pool identifier.
    pub pool_id: PoolId,
    /// The display name.
    pub name: String,
    /// Creation timestamp as recorded by storage.
    pub created_at: String,
    /// Whether the draw has happened.
    pub lifecycle: PoolLifecycle,
    /// The pool's groups, ordered by group identifier.
    pub groups: Vec<Group>,
}

impl Pool {
    /// Creates an empty, open pool.
    #[must_use]
    pub const fn new(pool_id: PoolId, name: String, created_at: String) -> Self {
        Self {
            pool_id,
            name,
            created_at,
            lifecycle: PoolLifecycle::Open,
            groups: Vec::new(),
        }
    }

    /// Returns every participant of every group, in group order.
    #[must_use]
    pub fn participants(&self) -> Vec<Participant> {
        self.groups
            .iter()
            .flat_map(|group| group.participants.iter().cloned())
            .collect()
    }

    /// Returns the total number of participants.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.groups.iter().map(|group| group.participants.len()).sum()
    }

    /// Checks if a group belongs to this pool.
    #[must_use]
    pub fn has_group(&self, group_id: GroupId) -> bool {
        self.groups.iter().any(|group| group.group_id == group_id)
    }

    /// Finds a participant of this pool by identifier.
    #[must_use]
    pub fn find_participant(&self, participant_id: &ParticipantId) -> Option<&Participant> {
        self.groups
            .iter()
            .flat_map(|group| group.participants.iter())
            .find(|participant| &participant.participant_id == participant_id)
    }
}
