// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DomainError, Infeasibility};
use crate::types::{GroupId, Participant, ParticipantId};
use std::collections::BTreeSet;

/// Who may give to whom, over participant indices.
///
/// `targets[i]` lists the indices of every participant that participant
/// `i` is allowed to give to. Indices follow the order of the roster the
/// graph was built from.
#[derive(Debug, Clone)]
pub(crate) struct CompatibilityGraph {
    pub(crate) participant_ids: Vec<ParticipantId>,
    pub(crate) targets: Vec<Vec<usize>>,
}

impl CompatibilityGraph {
    /// Builds the compatibility graph for a roster.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are fewer than two distinct participants
    /// - A participant identifier appears more than once
    /// - Some participant has no valid target
    pub(crate) fn build(participants: &[Participant]) -> Result<Self, DomainError> {
        let distinct: usize = participants
            .iter()
            .map(|participant| &participant.participant_id)
            .collect::<BTreeSet<&ParticipantId>>()
            .len();
        if distinct < 2 {
            return Err(DomainError::TooFewParticipants { count: distinct });
        }

        ensure_unique_ids(participants)?;

        let single_group: bool = is_single_group(participants);

        let mut targets: Vec<Vec<usize>> = Vec::with_capacity(participants.len());
        for (giver_index, giver) in participants.iter().enumerate() {
            let valid: Vec<usize> = participants
                .iter()
                .enumerate()
                .filter(|(index, candidate)| {
                    *index != giver_index && (single_group || candidate.group_id != giver.group_id)
                })
                .map(|(index, _)| index)
                .collect();

            if valid.is_empty() {
                return Err(DomainError::InfeasibleConstraints(
                    Infeasibility::NoValidTarget {
                        participant_id: giver.participant_id.clone(),
                    },
                ));
            }

            targets.push(valid);
        }

        Ok(Self {
            participant_ids: participants
                .iter()
                .map(|participant| participant.participant_id.clone())
                .collect(),
            targets,
        })
    }

    pub(crate) const fn len(&self) -> usize {
        self.targets.len()
    }
}

/// Returns `true` when every participant shares one group identifier.
///
/// An empty roster is not a single group.
pub(crate) fn is_single_group(participants: &[Participant]) -> bool {
    let groups: BTreeSet<GroupId> = participants
        .iter()
        .map(|participant| participant.group_id)
        .collect();
    groups.len() == 1
}

/// Rejects rosters that list the same participant twice.
pub(crate) fn ensure_unique_ids(participants: &[Participant]) -> Result<(), DomainError> {
    let mut seen: BTreeSet<&ParticipantId> = BTreeSet::new();
    for participant in participants {
        if !seen.insert(&participant.participant_id) {
            return Err(DomainError::DuplicateParticipant(
                participant.participant_id.clone(),
            ));
        }
    }
    Ok(())
}
