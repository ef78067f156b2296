// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use secret_draw_domain::{
    Assignment, DrawStrategy, GroupId, Participant, ParticipantId, Pool, PoolId,
};

/// The complete state of a single pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// The pool with its groups and participants.
    pub pool: Pool,
}

impl State {
    /// Creates a state wrapping a pool loaded from storage.
    #[must_use]
    pub const fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Returns a one-line summary of the state, for logs.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "pool_id={},lifecycle={},groups={},participants={}",
            self.pool.pool_id,
            self.pool.lifecycle,
            self.pool.groups.len(),
            self.pool.participant_count()
        )
    }
}

/// What a transition changed, in terms storage can apply directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    /// The pool was renamed.
    PoolRenamed {
        /// The pool.
        pool_id: PoolId,
        /// The new, trimmed name.
        name: String,
    },
    /// A group should be created. Its identifier is assigned by storage.
    GroupCreated {
        /// The owning pool.
        pool_id: PoolId,
    },
    /// A participant was added.
    ParticipantAdded {
        /// The new participant.
        participant: Participant,
    },
    /// A participant changed groups.
    ParticipantMoved {
        /// The participant.
        participant_id: ParticipantId,
        /// The group the participant left.
        from: GroupId,
        /// The group the participant joined.
        to: GroupId,
    },
    /// A participant was removed.
    ParticipantRemoved {
        /// The participant.
        participant_id: ParticipantId,
        /// The group the participant belonged to.
        group_id: GroupId,
    },
    /// A group was removed together with its members.
    GroupRemoved {
        /// The group.
        group_id: GroupId,
        /// How many participants were removed with it.
        removed_participants: usize,
    },
    /// The draw was performed.
    Drawn {
        /// The pool.
        pool_id: PoolId,
        /// Who gives to whom.
        assignment: Assignment,
        /// Backtracking attempts used by the engine.
        attempts: u32,
        /// The engine strategy that produced the assignment.
        strategy: DrawStrategy,
    },
}

impl PoolEvent {
    /// Returns the event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PoolRenamed { .. } => "PoolRenamed",
            Self::GroupCreated { .. } => "GroupCreated",
            Self::ParticipantAdded { .. } => "ParticipantAdded",
            Self::ParticipantMoved { .. } => "ParticipantMoved",
            Self::ParticipantRemoved { .. } => "ParticipantRemoved",
            Self::GroupRemoved { .. } => "GroupRemoved",
            Self::Drawn { .. } => "Drawn",
        }
    }

    /// Returns a human-readable description of the event.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::PoolRenamed { pool_id, name } => {
                format!("Renamed pool '{pool_id}' to '{name}'")
            }
            Self::GroupCreated { pool_id } => format!("Created a group in pool '{pool_id}'"),
            Self::ParticipantAdded { participant } => format!(
                "Added participant '{}' to group {}",
                participant.name, participant.group_id
            ),
            Self::ParticipantMoved {
                participant_id,
                from,
                to,
            } => format!("Moved participant '{participant_id}' from group {from} to group {to}"),
            Self::ParticipantRemoved {
                participant_id,
                group_id,
            } => format!("Removed participant '{participant_id}' from group {group_id}"),
            Self::GroupRemoved {
                group_id,
                removed_participants,
            } => format!("Removed group {group_id} and {removed_participants} participant(s)"),
            Self::Drawn {
                pool_id,
                assignment,
                attempts,
                strategy,
            } => format!(
                "Drew pool '{pool_id}': {} participant(s) assigned by {strategy} after {attempts} attempt(s)",
                assignment.len()
            ),
        }
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The change to persist.
    pub event: PoolEvent,
}
