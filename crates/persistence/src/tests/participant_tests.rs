// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{apply_and_persist, create_test_pool, create_test_rng};
use crate::{ParticipantView, Persistence, PersistenceError};
use secret_draw::Command;
use secret_draw_domain::{GroupId, Participant, ParticipantId, Pool};

#[test]
fn test_move_participant_between_groups() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let pool: Pool = create_test_pool(&mut persistence, &[&["Alice", "Bob"], &["Carol"]]);
    let alice: ParticipantId = pool.groups[0].participants[0].participant_id.clone();
    let target: GroupId = pool.groups[1].group_id;

    apply_and_persist(
        &mut persistence,
        &pool.pool_id,
        Command::MoveParticipant {
            participant_id: alice.clone(),
            group_id: target,
        },
        &mut create_test_rng(),
    );

    let reloaded: Pool = persistence.get_pool(&pool.pool_id).unwrap();
    let moved: &Participant = reloaded.find_participant(&alice).unwrap();
    assert_eq!(moved.group_id, target);
    assert_eq!(reloaded.groups[0].participants.len(), 1);
    assert_eq!(reloaded.groups[1].participants.len(), 2);
}

#[test]
fn test_remove_participant() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let pool: Pool = create_test_pool(&mut persistence, &[&["Alice", "Bob"]]);
    let bob: ParticipantId = pool.groups[0].participants[1].participant_id.clone();

    apply_and_persist(
        &mut persistence,
        &pool.pool_id,
        Command::RemoveParticipant {
            participant_id: bob.clone(),
        },
        &mut create_test_rng(),
    );

    assert!(persistence.find_pool_for_participant(&bob).unwrap().is_none());
    assert_eq!(persistence.get_pool(&pool.pool_id).unwrap().participant_count(), 1);
}

#[test]
fn test_remove_group_deletes_members() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let pool: Pool = create_test_pool(&mut persistence, &[&["Alice", "Bob"], &["Carol"]]);
    let group_id: GroupId = pool.groups[0].group_id;
    let alice: ParticipantId = pool.groups[0].participants[0].participant_id.clone();

    apply_and_persist(
        &mut persistence,
        &pool.pool_id,
        Command::RemoveGroup { group_id },
        &mut create_test_rng(),
    );

    let reloaded: Pool = persistence.get_pool(&pool.pool_id).unwrap();
    assert_eq!(reloaded.groups.len(), 1);
    assert!(persistence.find_pool_for_group(group_id).unwrap().is_none());
    assert!(persistence.find_pool_for_participant(&alice).unwrap().is_none());
}

#[test]
fn test_ownership_lookups() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let pool: Pool = create_test_pool(&mut persistence, &[&["Alice"]]);
    let group_id: GroupId = pool.groups[0].group_id;
    let alice: ParticipantId = pool.groups[0].participants[0].participant_id.clone();

    assert_eq!(
        persistence.find_pool_for_group(group_id).unwrap(),
        Some(pool.pool_id.clone())
    );
    assert_eq!(
        persistence.find_pool_for_participant(&alice).unwrap(),
        Some(pool.pool_id.clone())
    );
    assert_eq!(
        persistence.find_pool_for_group(GroupId::new(9_999)).unwrap(),
        None
    );
}

#[test]
fn test_participant_view_before_draw_has_no_recipient() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let pool: Pool = create_test_pool(&mut persistence, &[&["Alice"], &["Bob"]]);
    let alice: ParticipantId = pool.groups[0].participants[0].participant_id.clone();

    let view: ParticipantView = persistence.get_participant_view(&alice).unwrap();

    assert_eq!(view.participant.name, "Alice");
    assert_eq!(view.pool_id, pool.pool_id);
    assert_eq!(view.pool_name, "Test Pool");
    assert!(view.participant.recipient_id.is_none());
    assert!(view.recipient_name.is_none());
}

#[test]
fn test_participant_view_for_unknown_participant_fails() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<ParticipantView, PersistenceError> =
        persistence.get_participant_view(&ParticipantId::new("nobody"));

    assert_eq!(
        result,
        Err(PersistenceError::ParticipantNotFound(String::from("nobody")))
    );
}
