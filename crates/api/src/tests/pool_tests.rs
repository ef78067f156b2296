// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for pool and group handlers.

use rand::rngs::StdRng;
use secret_draw_domain::DrawOptions;
use secret_draw_persistence::Persistence;

use crate::{
    ApiError, CreateGroupResponse, CreatePoolRequest, DeleteGroupResponse, ListPoolsRequest,
    ListPoolsResponse, PoolInfo, RenamePoolRequest, create_group, create_pool, delete_group,
    delete_pool, draw_pool, get_pool, list_pools, rename_pool,
};

use super::helpers::{create_test_persistence, create_test_pool, create_test_rng};

#[test]
fn test_create_pool_trims_name_and_starts_open() {
    let mut persistence: Persistence = create_test_persistence();
    let mut rng: StdRng = create_test_rng();

    let pool: PoolInfo = create_pool(
        &mut persistence,
        &CreatePoolRequest {
            name: String::from("  Office Party  "),
        },
        &mut rng,
    )
    .unwrap();

    assert_eq!(pool.name, "Office Party");
    assert_eq!(pool.lifecycle_state, "Open");
    assert_eq!(pool.pool_id.len(), 32);
    assert_eq!(pool.participant_count, 0);
    assert!(pool.groups.is_empty());
}

#[test]
fn test_create_pool_rejects_blank_name() {
    let mut persistence: Persistence = create_test_persistence();

    let result = create_pool(
        &mut persistence,
        &CreatePoolRequest {
            name: String::from("   "),
        },
        &mut create_test_rng(),
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "name"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_get_unknown_pool_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result = get_pool(&mut persistence, "does-not-exist");

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Pool"
    ));
}

#[test]
fn test_get_pool_with_blank_id_is_invalid() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(matches!(
        get_pool(&mut persistence, " "),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_pool_view_lists_groups_and_members() {
    let mut persistence: Persistence = create_test_persistence();
    let mut rng: StdRng = create_test_rng();

    let pool: PoolInfo =
        create_test_pool(&mut persistence, &mut rng, &[&["Bea", "Al"], &["Cy"]]);

    assert_eq!(pool.participant_count, 3);
    assert_eq!(pool.groups.len(), 2);
    let names: Vec<&str> = pool.groups[0]
        .participants
        .iter()
        .map(|participant| participant.name.as_str())
        .collect();
    assert_eq!(names, vec!["Al", "Bea"]);
    assert_eq!(pool.groups[1].participants[0].group_id, pool.groups[1].group_id);
}

#[test]
fn test_list_pools_skips_blank_and_unknown_ids() {
    let mut persistence: Persistence = create_test_persistence();
    let mut rng: StdRng = create_test_rng();
    let first: PoolInfo = create_test_pool(&mut persistence, &mut rng, &[]);
    let second: PoolInfo = create_test_pool(&mut persistence, &mut rng, &[]);

    let response: ListPoolsResponse = list_pools(
        &mut persistence,
        &ListPoolsRequest {
            pool_ids: vec![
                first.pool_id.clone(),
                String::new(),
                String::from("unknown"),
                second.pool_id.clone(),
            ],
        },
    )
    .unwrap();

    assert_eq!(response.pools.len(), 2);
    assert!(response.pools.iter().any(|pool| pool.pool_id == first.pool_id));
    assert!(response.pools.iter().any(|pool| pool.pool_id == second.pool_id));
}

#[test]
fn test_rename_pool_before_and_after_draw() {
    let mut persistence: Persistence = create_test_persistence();
    let mut rng: StdRng = create_test_rng();
    let pool: PoolInfo = create_test_pool(&mut persistence, &mut rng, &[&["A"], &["B"]]);

    let renamed: PoolInfo = rename_pool(
        &mut persistence,
        &pool.pool_id,
        &RenamePoolRequest {
            name: String::from("Renamed"),
        },
        &mut rng,
    )
    .unwrap();
    assert_eq!(renamed.name, "Renamed");

    draw_pool(
        &mut persistence,
        &pool.pool_id,
        &DrawOptions::default(),
        &mut rng,
    )
    .unwrap();

    let renamed_again: PoolInfo = rename_pool(
        &mut persistence,
        &pool.pool_id,
        &RenamePoolRequest {
            name: String::from("After the draw"),
        },
        &mut rng,
    )
    .unwrap();
    assert_eq!(renamed_again.name, "After the draw");
    assert_eq!(renamed_again.lifecycle_state, "Drawn");
}

#[test]
fn test_delete_pool_removes_everything() {
    let mut persistence: Persistence = create_test_persistence();
    let mut rng: StdRng = create_test_rng();
    let pool: PoolInfo = create_test_pool(&mut persistence, &mut rng, &[&["A", "B"]]);

    delete_pool(&mut persistence, &pool.pool_id).unwrap();

    assert!(matches!(
        get_pool(&mut persistence, &pool.pool_id),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        delete_pool(&mut persistence, &pool.pool_id),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_create_group_returns_new_id() {
    let mut persistence: Persistence = create_test_persistence();
    let mut rng: StdRng = create_test_rng();
    let pool: PoolInfo = create_test_pool(&mut persistence, &mut rng, &[]);

    let first: CreateGroupResponse = create_group(&mut persistence, &pool.pool_id, &mut rng).unwrap();
    let second: CreateGroupResponse =
        create_group(&mut persistence, &pool.pool_id, &mut rng).unwrap();

    assert!(second.group_id > first.group_id);
    assert_eq!(first.pool_id, pool.pool_id);
    assert_eq!(get_pool(&mut persistence, &pool.pool_id).unwrap().groups.len(), 2);
}

#[test]
fn test_create_group_in_unknown_pool_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(matches!(
        create_group(&mut persistence, "nope", &mut create_test_rng()),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_delete_group_reports_removed_participants() {
    let mut persistence: Persistence = create_test_persistence();
    let mut rng: StdRng = create_test_rng();
    let pool: PoolInfo = create_test_pool(&mut persistence, &mut rng, &[&["A", "B"], &["C"]]);
    let group_id: i64 = pool.groups[0].group_id;

    let response: DeleteGroupResponse = delete_group(&mut persistence, group_id, &mut rng).unwrap();

    assert_eq!(response.removed_participants.len(), 2);
    let reloaded: PoolInfo = get_pool(&mut persistence, &pool.pool_id).unwrap();
    assert_eq!(reloaded.groups.len(), 1);
    assert_eq!(reloaded.participant_count, 1);
}

#[test]
fn test_delete_unknown_group_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    match delete_group(&mut persistence, 42, &mut create_test_rng()) {
        Err(ApiError::ResourceNotFound { resource_type, .. }) => assert_eq!(resource_type, "Group"),
        other => panic!("Expected ResourceNotFound, got: {other:?}"),
    }
}

#[test]
fn test_structural_changes_blocked_after_draw() {
    let mut persistence: Persistence = create_test_persistence();
    let mut rng: StdRng = create_test_rng();
    let pool: PoolInfo = create_test_pool(&mut persistence, &mut rng, &[&["A"], &["B"]]);
    draw_pool(
        &mut persistence,
        &pool.pool_id,
        &DrawOptions::default(),
        &mut rng,
    )
    .unwrap();

    let create_result = create_group(&mut persistence, &pool.pool_id, &mut rng);
    let delete_result = delete_group(&mut persistence, pool.groups[0].group_id, &mut rng);

    for result in [create_result.map(|_| ()), delete_result.map(|_| ())] {
        match result {
            Err(ApiError::Conflict { message, .. }) => {
                assert!(message.contains("can no longer change"));
            }
            other => panic!("Expected Conflict, got: {other:?}"),
        }
    }
}
