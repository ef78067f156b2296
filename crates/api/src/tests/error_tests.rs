// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for error translation across layers.

use secret_draw::CoreError;
use secret_draw_domain::{DomainError, GroupId, Infeasibility, ParticipantId, PoolId};
use secret_draw_persistence::PersistenceError;

use crate::{
    ApiError, DrawPoolResponse, translate_core_error, translate_domain_error,
    translate_persistence_error,
};

#[test]
fn test_name_errors_become_invalid_input() {
    let err: ApiError =
        translate_domain_error(DomainError::InvalidPoolName(String::from("too long")));

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("too long"),
        }
    );
}

#[test]
fn test_lookup_errors_become_not_found() {
    let cases: Vec<(DomainError, &str)> = vec![
        (DomainError::PoolNotFound(PoolId::new("p")), "Pool"),
        (DomainError::GroupNotFound(GroupId::new(3)), "Group"),
        (
            DomainError::ParticipantNotFound(ParticipantId::new("x")),
            "Participant",
        ),
    ];

    for (domain_err, expected) in cases {
        match translate_domain_error(domain_err) {
            ApiError::ResourceNotFound { resource_type, .. } => {
                assert_eq!(resource_type, expected);
            }
            other => panic!("Expected ResourceNotFound, got: {other:?}"),
        }
    }
}

#[test]
fn test_lifecycle_errors_become_conflicts() {
    let locked: ApiError = translate_domain_error(DomainError::PoolLocked(PoolId::new("p")));
    let drawn: ApiError = translate_domain_error(DomainError::AlreadyDrawn(PoolId::new("p")));

    assert!(matches!(locked, ApiError::Conflict { .. }));
    assert!(matches!(drawn, ApiError::Conflict { .. }));
}

#[test]
fn test_infeasible_draw_message_suggests_regrouping() {
    let err: ApiError = translate_domain_error(DomainError::InfeasibleConstraints(
        Infeasibility::NoPerfectAssignment {
            matched: 2,
            total: 4,
        },
    ));

    match err {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "feasible_groups");
            assert!(message.contains("at most 2 of 4"));
            assert!(message.contains("move participants"));
        }
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
}

#[test]
fn test_core_internal_error_stays_internal() {
    let err: ApiError = translate_core_error(CoreError::Internal(String::from("boom")));

    assert!(matches!(err, ApiError::Internal { .. }));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn test_core_domain_violation_is_unwrapped() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(
        DomainError::TooFewParticipants { count: 1 },
    ));

    match err {
        ApiError::DomainRuleViolation { rule, .. } => assert_eq!(rule, "minimum_participants"),
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
}

#[test]
fn test_persistence_errors() {
    assert!(matches!(
        translate_persistence_error(PersistenceError::DrawConflict(String::from("p"))),
        ApiError::Conflict { .. }
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::GroupNotFound(9)),
        ApiError::ResourceNotFound { .. }
    ));
    assert!(matches!(
        ApiError::from(PersistenceError::DatabaseError(String::from("disk full"))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_draw_response_serializes_assignment_map() {
    let response: DrawPoolResponse = DrawPoolResponse {
        pool_id: String::from("p"),
        assignments: [
            (String::from("a"), String::from("b")),
            (String::from("b"), String::from("a")),
        ]
        .into_iter()
        .collect(),
        attempts: 1,
        strategy: String::from("backtracking"),
        message: String::from("ok"),
    };

    let json: serde_json::Value = serde_json::to_value(&response).unwrap();

    assert_eq!(json["assignments"]["a"], "b");
    assert_eq!(json["assignments"]["b"], "a");
    assert_eq!(json["strategy"], "backtracking");
}
