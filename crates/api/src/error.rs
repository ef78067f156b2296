// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use secret_draw::CoreError;
use secret_draw_domain::DomainError;
use secret_draw_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with the current state of a pool.
    Conflict {
        /// The type of resource in conflict.
        resource_type: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} conflict: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidPoolName(msg) | DomainError::InvalidParticipantName(msg) => {
            ApiError::InvalidInput {
                field: String::from("name"),
                message: msg,
            }
        }
        DomainError::InvalidLifecycleState(msg) => ApiError::Internal {
            message: format!("Stored lifecycle state is invalid: {msg}"),
        },
        DomainError::PoolNotFound(pool_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Pool"),
            message: format!("Pool '{pool_id}' does not exist"),
        },
        DomainError::GroupNotFound(group_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Group"),
            message: format!("Group {group_id} does not exist"),
        },
        DomainError::ParticipantNotFound(participant_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Participant"),
            message: format!("Participant '{participant_id}' does not exist"),
        },
        DomainError::GroupNotInPool { group_id, pool_id } => ApiError::DomainRuleViolation {
            rule: String::from("group_in_pool"),
            message: format!(
                "Group {group_id} does not belong to pool '{pool_id}'; participants can only move within their pool"
            ),
        },
        DomainError::DuplicateParticipant(participant_id) => ApiError::Conflict {
            resource_type: String::from("Participant"),
            message: format!("Participant '{participant_id}' already exists"),
        },
        DomainError::PoolLocked(pool_id) => ApiError::Conflict {
            resource_type: String::from("Pool"),
            message: format!(
                "Pool '{pool_id}' has been drawn; groups and participants can no longer change"
            ),
        },
        DomainError::AlreadyDrawn(pool_id) => ApiError::Conflict {
            resource_type: String::from("Pool"),
            message: format!("Pool '{pool_id}' has already been drawn"),
        },
        DomainError::TooFewParticipants { count } => ApiError::DomainRuleViolation {
            rule: String::from("minimum_participants"),
            message: format!(
                "A draw needs at least two participants but the pool has {count}; add more participants"
            ),
        },
        DomainError::InfeasibleConstraints(reason) => ApiError::DomainRuleViolation {
            rule: String::from("feasible_groups"),
            message: format!(
                "No valid assignment exists ({reason}); make the groups more even or move participants between them"
            ),
        },
        DomainError::InvalidAssignment(msg) => ApiError::Internal {
            message: format!("Draw produced an invalid assignment: {msg}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing rows become not-found errors and a lost draw race becomes a
/// conflict. Everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::PoolNotFound(pool_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Pool"),
            message: format!("Pool '{pool_id}' does not exist"),
        },
        PersistenceError::GroupNotFound(group_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Group"),
            message: format!("Group {group_id} does not exist"),
        },
        PersistenceError::ParticipantNotFound(participant_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Participant"),
            message: format!("Participant '{participant_id}' does not exist"),
        },
        PersistenceError::DrawConflict(pool_id) => ApiError::Conflict {
            resource_type: String::from("Pool"),
            message: format!("Pool '{pool_id}' was drawn by another request"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}
