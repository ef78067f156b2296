// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Group, GroupId, Participant, ParticipantId, Pool, PoolId, PoolLifecycle,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::str::FromStr;

#[test]
fn test_pool_lifecycle_round_trips_through_strings() {
    for lifecycle in [PoolLifecycle::Open, PoolLifecycle::Drawn] {
        let parsed: PoolLifecycle = PoolLifecycle::from_str(lifecycle.as_str()).unwrap();
        assert_eq!(parsed, lifecycle);
        assert_eq!(lifecycle.to_string(), lifecycle.as_str());
    }
}

#[test]
fn test_pool_lifecycle_rejects_unknown_state() {
    let result: Result<PoolLifecycle, DomainError> = PoolLifecycle::from_str("Closed");
    assert_eq!(
        result,
        Err(DomainError::InvalidLifecycleState(String::from("Closed")))
    );
}

#[test]
fn test_pool_lifecycle_defaults_to_open() {
    assert_eq!(PoolLifecycle::default(), PoolLifecycle::Open);
}

#[test]
fn test_pool_lifecycle_only_open_to_drawn_is_valid() {
    assert!(PoolLifecycle::Open.can_transition_to(PoolLifecycle::Drawn));
    assert!(!PoolLifecycle::Drawn.can_transition_to(PoolLifecycle::Open));
    assert!(!PoolLifecycle::Open.can_transition_to(PoolLifecycle::Open));
    assert!(!PoolLifecycle::Drawn.can_transition_to(PoolLifecycle::Drawn));
}

#[test]
fn test_pool_lifecycle_locks_after_draw() {
    assert!(!PoolLifecycle::Open.is_locked());
    assert!(PoolLifecycle::Drawn.is_locked());
}

#[test]
fn test_generated_ids_are_32_lowercase_hex_characters() {
    let mut rng: StdRng = StdRng::seed_from_u64(7);
    let pool_id: PoolId = PoolId::generate(&mut rng);
    let participant_id: ParticipantId = ParticipantId::generate(&mut rng);

    for value in [pool_id.value(), participant_id.value()] {
        assert_eq!(value.len(), 32);
        assert!(
            value
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }
}

#[test]
fn test_generated_ids_differ() {
    let mut rng: StdRng = StdRng::seed_from_u64(7);
    let first: ParticipantId = ParticipantId::generate(&mut rng);
    let second: ParticipantId = ParticipantId::generate(&mut rng);
    assert_ne!(first, second);
}

#[test]
fn test_ids_serialize_transparently() {
    let participant_id: ParticipantId = ParticipantId::new("abc");
    let group_id: GroupId = GroupId::new(12);

    assert_eq!(serde_json::to_string(&participant_id).unwrap(), "\"abc\"");
    assert_eq!(serde_json::to_string(&group_id).unwrap(), "12");
}

#[test]
fn test_new_participant_has_no_recipient() {
    let participant: Participant = Participant::new(
        ParticipantId::new("p1"),
        String::from("Alice"),
        GroupId::new(1),
    );
    assert!(participant.recipient_id.is_none());
}

#[test]
fn test_pool_participant_lookup_spans_groups() {
    let mut pool: Pool = Pool::new(
        PoolId::new("pool"),
        String::from("Family"),
        String::from("2026-12-01 10:00:00"),
    );
    let mut first: Group = Group::new(GroupId::new(1));
    first.participants.push(Participant::new(
        ParticipantId::new("a"),
        String::from("Alice"),
        GroupId::new(1),
    ));
    let mut second: Group = Group::new(GroupId::new(2));
    second.participants.push(Participant::new(
        ParticipantId::new("b"),
        String::from("Bob"),
        GroupId::new(2),
    ));
    second.participants.push(Participant::new(
        ParticipantId::new("c"),
        String::from("Carol"),
        GroupId::new(2),
    ));
    pool.groups.push(first);
    pool.groups.push(second);

    assert_eq!(pool.lifecycle, PoolLifecycle::Open);
    assert_eq!(pool.participant_count(), 3);
    assert_eq!(pool.participants().len(), 3);
    assert!(pool.has_group(GroupId::new(2)));
    assert!(!pool.has_group(GroupId::new(3)));
    assert_eq!(
        pool.find_participant(&ParticipantId::new("c"))
            .map(|participant| participant.name.as_str()),
        Some("Carol")
    );
    assert!(pool.find_participant(&ParticipantId::new("z")).is_none());
}
