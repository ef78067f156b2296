// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::State;
use rand::SeedableRng;
use rand::rngs::StdRng;
use secret_draw_domain::{Group, GroupId, Participant, ParticipantId, Pool, PoolId};

pub fn create_test_rng() -> StdRng {
    StdRng::seed_from_u64(2026)
}

pub fn create_test_pool() -> Pool {
    Pool::new(
        PoolId::new("pool-1"),
        String::from("Family"),
        String::from("2026-12-01 10:00:00"),
    )
}

/// Builds a state with one group per entry of `groups`, each listing member names.
///
/// Group identifiers start at 1; participant identifiers are the lowercased names.
pub fn create_test_state(groups: &[&[&str]]) -> State {
    let mut pool: Pool = create_test_pool();
    for (index, names) in groups.iter().enumerate() {
        let group_id: GroupId = GroupId::new(i64::try_from(index).unwrap() + 1);
        let mut group: Group = Group::new(group_id);
        for name in *names {
            group.participants.push(Participant::new(
                ParticipantId::new(&name.to_lowercase()),
                (*name).to_string(),
                group_id,
            ));
        }
        pool.groups.push(group);
    }
    State::new(pool)
}
