// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod participant_tests;

use crate::Persistence;
use rand::SeedableRng;
use rand::rngs::StdRng;
use secret_draw::{Command, State, TransitionResult, apply};
use secret_draw_domain::{GroupId, ParticipantId, Pool, PoolId};

pub fn create_test_rng() -> StdRng {
    StdRng::seed_from_u64(99)
}

/// Applies a command to the stored pool and persists the result.
pub fn apply_and_persist(
    persistence: &mut Persistence,
    pool_id: &PoolId,
    command: Command,
    rng: &mut StdRng,
) -> TransitionResult {
    let state: State = State::new(persistence.get_pool(pool_id).unwrap());
    let transition: TransitionResult = apply(&state, command, rng).unwrap();
    persistence.persist_transition(&transition).unwrap();
    transition
}

/// Creates a pool with one group per entry of `groups`, each listing member names.
pub fn create_test_pool(persistence: &mut Persistence, groups: &[&[&str]]) -> Pool {
    let mut rng: StdRng = create_test_rng();
    let pool_id: PoolId = PoolId::generate(&mut rng);
    persistence.create_pool(&pool_id, "Test Pool").unwrap();

    for names in groups {
        let state: State = State::new(persistence.get_pool(&pool_id).unwrap());
        let transition: TransitionResult = apply(&state, Command::CreateGroup, &mut rng).unwrap();
        let group_id: GroupId = persistence
            .persist_transition(&transition)
            .unwrap()
            .group_id
            .unwrap();

        for name in *names {
            apply_and_persist(
                persistence,
                &pool_id,
                Command::AddParticipant {
                    participant_id: ParticipantId::generate(&mut rng),
                    group_id,
                    name: (*name).to_string(),
                },
                &mut rng,
            );
        }
    }

    persistence.get_pool(&pool_id).unwrap()
}
