// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rand::SeedableRng;
use rand::rngs::StdRng;
use secret_draw_persistence::Persistence;

use crate::{
    AddParticipantRequest, CreateGroupResponse, CreatePoolRequest, PoolInfo, add_participant,
    create_group, create_pool, get_pool,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

/// Creates a pool through the API with one group per entry of `groups`.
pub fn create_test_pool(
    persistence: &mut Persistence,
    rng: &mut StdRng,
    groups: &[&[&str]],
) -> PoolInfo {
    let pool: PoolInfo = create_pool(
        persistence,
        &CreatePoolRequest {
            name: String::from("Family Exchange"),
        },
        rng,
    )
    .expect("Failed to create pool");

    for names in groups {
        let group: CreateGroupResponse =
            create_group(persistence, &pool.pool_id, rng).expect("Failed to create group");
        for name in *names {
            add_participant(
                persistence,
                group.group_id,
                &AddParticipantRequest {
                    name: (*name).to_string(),
                },
                rng,
            )
            .expect("Failed to add participant");
        }
    }

    get_pool(persistence, &pool.pool_id).expect("Failed to reload pool")
}

/// Finds a participant's identifier by display name.
pub fn participant_id_by_name(pool: &PoolInfo, name: &str) -> String {
    pool.groups
        .iter()
        .flat_map(|group| group.participants.iter())
        .find(|participant| participant.name == name)
        .map(|participant| participant.participant_id.clone())
        .expect("Participant not found")
}
