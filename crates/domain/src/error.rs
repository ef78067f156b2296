// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{GroupId, ParticipantId, PoolId};

/// Why a draw could not produce an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Infeasibility {
    /// A participant has nobody they are allowed to give to.
    NoValidTarget {
        /// The participant without any valid target.
        participant_id: ParticipantId,
    },
    /// The group layout admits no complete assignment.
    NoPerfectAssignment {
        /// The largest number of participants that can be assigned at once.
        matched: usize,
        /// The number of participants in the roster.
        total: usize,
    },
    /// The randomized search gave up after its retry budget.
    RetryBudgetExhausted {
        /// The number of attempts made.
        attempts: u32,
    },
}

impl std::fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoValidTarget { participant_id } => {
                write!(f, "participant '{participant_id}' has no valid recipient")
            }
            Self::NoPerfectAssignment { matched, total } => {
                write!(
                    f,
                    "at most {matched} of {total} participants can be given a recipient"
                )
            }
            Self::RetryBudgetExhausted { attempts } => {
                write!(f, "no assignment found after {attempts} attempts")
            }
        }
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Pool name is empty or invalid.
    InvalidPoolName(String),
    /// Participant name is empty or invalid.
    InvalidParticipantName(String),
    /// Lifecycle state string is not recognized.
    InvalidLifecycleState(String),
    /// Pool does not exist.
    PoolNotFound(PoolId),
    /// Group does not exist.
    GroupNotFound(GroupId),
    /// Participant does not exist.
    ParticipantNotFound(ParticipantId),
    /// Group exists but belongs to another pool.
    GroupNotInPool {
        /// The group that was referenced.
        group_id: GroupId,
        /// The pool the operation was scoped to.
        pool_id: PoolId,
    },
    /// The same participant identifier appears more than once.
    DuplicateParticipant(ParticipantId),
    /// The pool has been drawn and its roster can no longer change.
    PoolLocked(PoolId),
    /// The pool has already been drawn.
    AlreadyDrawn(PoolId),
    /// A draw needs at least two participants.
    TooFewParticipants {
        /// The number of participants provided.
        count: usize,
    },
    /// No valid assignment exists for the current group composition.
    InfeasibleConstraints(Infeasibility),
    /// An assignment does not satisfy the draw guarantees.
    InvalidAssignment(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPoolName(msg) => write!(f, "Invalid pool name: {msg}"),
            Self::InvalidParticipantName(msg) => write!(f, "Invalid participant name: {msg}"),
            Self::InvalidLifecycleState(state) => {
                write!(f, "Invalid pool lifecycle state: '{state}'")
            }
            Self::PoolNotFound(pool_id) => write!(f, "Pool '{pool_id}' not found"),
            Self::GroupNotFound(group_id) => write!(f, "Group {group_id} not found"),
            Self::ParticipantNotFound(participant_id) => {
                write!(f, "Participant '{participant_id}' not found")
            }
            Self::GroupNotInPool { group_id, pool_id } => {
                write!(f, "Group {group_id} does not belong to pool '{pool_id}'")
            }
            Self::DuplicateParticipant(participant_id) => {
                write!(f, "Participant '{participant_id}' appears more than once")
            }
            Self::PoolLocked(pool_id) => {
                write!(
                    f,
                    "Pool '{pool_id}' has already been drawn and can no longer be changed"
                )
            }
            Self::AlreadyDrawn(pool_id) => {
                write!(f, "Pool '{pool_id}' has already been drawn")
            }
            Self::TooFewParticipants { count } => {
                write!(
                    f,
                    "At least two participants are needed for a draw, got {count}"
                )
            }
            Self::InfeasibleConstraints(reason) => {
                write!(
                    f,
                    "No valid assignment could be found ({reason}); try changing the groups"
                )
            }
            Self::InvalidAssignment(msg) => write!(f, "Invalid assignment: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
