// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod types;

use crate::{GroupId, Participant, ParticipantId};

/// Builds a roster from `(id, group)` pairs. Names mirror the ids.
pub fn roster(entries: &[(&str, i64)]) -> Vec<Participant> {
    entries
        .iter()
        .map(|(id, group)| {
            Participant::new(
                ParticipantId::new(id),
                format!("Participant {id}"),
                GroupId::new(*group),
            )
        })
        .collect()
}

/// Builds a roster with `sizes[g]` members in group `g + 1`.
pub fn roster_with_group_sizes(sizes: &[usize]) -> Vec<Participant> {
    let mut participants: Vec<Participant> = Vec::new();
    for (group_index, size) in sizes.iter().enumerate() {
        let group_id: i64 = i64::try_from(group_index).unwrap() + 1;
        for member in 0..*size {
            let id: String = format!("g{group_id}-p{member}");
            participants.push(Participant::new(
                ParticipantId::new(&id),
                id.clone(),
                GroupId::new(group_id),
            ));
        }
    }
    participants
}
