// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The draw engine.
//!
//! Given a roster of participants partitioned into groups, the engine
//! produces a random assignment in which every participant gives to
//! exactly one other participant and receives from exactly one. While more
//! than one group exists, nobody gives to a member of their own group.
//!
//! The engine decides feasibility exactly before it searches: a maximum
//! bipartite matching over the "may give to" graph must be perfect, or no
//! assignment exists. The search itself is randomized backtracking with a
//! bounded number of attempts, each with a bounded number of steps. If
//! every attempt runs out of steps, a randomized matching is used instead.
//!
//! The engine performs no I/O. Randomness is supplied by the caller.

mod candidates;
mod matching;
mod search;

use crate::error::{DomainError, Infeasibility};
use crate::types::{Participant, ParticipantId};
use candidates::CompatibilityGraph;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default number of randomized backtracking attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Default number of candidate probes a single attempt may make.
pub const DEFAULT_STEP_LIMIT: u64 = 250_000;

/// Tuning knobs for [`draw_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOptions {
    /// How many randomized backtracking attempts to make.
    pub max_attempts: u32,
    /// Candidate probes allowed per attempt. `None` means unbounded.
    pub step_limit: Option<u64>,
    /// Whether to fall back to a randomized matching when every attempt fails.
    pub matching_fallback: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            step_limit: Some(DEFAULT_STEP_LIMIT),
            matching_fallback: true,
        }
    }
}

/// Which part of the engine produced an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawStrategy {
    /// Randomized backtracking search.
    Backtracking,
    /// Randomized maximum matching, used after the search budget ran out.
    Matching,
}

impl DrawStrategy {
    /// Converts this strategy to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Backtracking => "backtracking",
            Self::Matching => "matching",
        }
    }
}

impl std::fmt::Display for DrawStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed draw: who gives to whom.
///
/// Keys are givers, values are their recipients.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(BTreeMap<ParticipantId, ParticipantId>);

impl Assignment {
    fn from_indices(participant_ids: &[ParticipantId], recipients: &[usize]) -> Self {
        Self(
            participant_ids
                .iter()
                .zip(recipients)
                .map(|(giver, &recipient)| (giver.clone(), participant_ids[recipient].clone()))
                .collect(),
        )
    }

    /// Returns the recipient assigned to `giver`, if any.
    #[must_use]
    pub fn recipient_of(&self, giver: &ParticipantId) -> Option<&ParticipantId> {
        self.0.get(giver)
    }

    /// Returns the number of givers in the assignment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the assignment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(giver, recipient)` pairs ordered by giver.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantId)> {
        self.0.iter()
    }

    /// Checks that this assignment is a valid draw for `participants`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The roster lists a participant twice
    /// - A participant has no recipient, or a giver is not in the roster
    /// - A recipient is not in the roster, or receives more than once
    /// - A participant gives to themselves
    /// - A participant gives to a member of their own group while the
    ///   roster spans several groups
    pub fn validate(&self, participants: &[Participant]) -> Result<(), DomainError> {
        candidates::ensure_unique_ids(participants)?;

        let by_id: BTreeMap<&ParticipantId, &Participant> = participants
            .iter()
            .map(|participant| (&participant.participant_id, participant))
            .collect();

        if self.0.len() != participants.len() {
            return Err(DomainError::InvalidAssignment(format!(
                "{} givers for {} participants",
                self.0.len(),
                participants.len()
            )));
        }

        let single_group: bool = candidates::is_single_group(participants);
        let mut received: BTreeSet<&ParticipantId> = BTreeSet::new();

        for (giver_id, recipient_id) in &self.0 {
            let giver: &Participant = by_id.get(giver_id).copied().ok_or_else(|| {
                DomainError::InvalidAssignment(format!("giver '{giver_id}' is not in the roster"))
            })?;
            let recipient: &Participant =
                by_id.get(recipient_id).copied().ok_or_else(|| {
                    DomainError::InvalidAssignment(format!(
                        "recipient '{recipient_id}' is not in the roster"
                    ))
                })?;

            if giver_id == recipient_id {
                return Err(DomainError::InvalidAssignment(format!(
                    "'{giver_id}' gives to themselves"
                )));
            }
            if !single_group && giver.group_id == recipient.group_id {
                return Err(DomainError::InvalidAssignment(format!(
                    "'{giver_id}' gives to '{recipient_id}' in the same group {}",
                    giver.group_id
                )));
            }
            if !received.insert(recipient_id) {
                return Err(DomainError::InvalidAssignment(format!(
                    "'{recipient_id}' receives more than once"
                )));
            }
        }

        Ok(())
    }
}

impl FromIterator<(ParticipantId, ParticipantId)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, ParticipantId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Assignment {
    type Item = (ParticipantId, ParticipantId);
    type IntoIter = std::collections::btree_map::IntoIter<ParticipantId, ParticipantId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The result of a successful draw with its search statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// The assignment.
    pub assignment: Assignment,
    /// Backtracking attempts made. Equals the attempt budget when the
    /// matching fallback produced the assignment.
    pub attempts: u32,
    /// The strategy that produced the assignment.
    pub strategy: DrawStrategy,
}

/// Draws a random assignment with the default options.
///
/// # Errors
///
/// See [`draw_with_options`].
pub fn draw<R: Rng + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<Assignment, DomainError> {
    draw_with_options(participants, &DrawOptions::default(), rng).map(|outcome| outcome.assignment)
}

/// Draws a random assignment.
///
/// The `recipient_id` of the input participants is ignored.
///
/// # Arguments
///
/// * `participants` - The roster, in any order
/// * `options` - Search budget and fallback behavior
/// * `rng` - The source of randomness
///
/// # Errors
///
/// Returns an error if:
/// - A participant identifier appears more than once
/// - There are fewer than two participants
/// - Some participant has nobody they may give to
/// - The group layout admits no complete assignment
/// - Every attempt ran out of steps and the fallback is disabled
pub fn draw_with_options<R: Rng + ?Sized>(
    participants: &[Participant],
    options: &DrawOptions,
    rng: &mut R,
) -> Result<DrawOutcome, DomainError> {
    let graph: CompatibilityGraph = CompatibilityGraph::build(participants)?;

    let identity_order: Vec<usize> = (0..graph.len()).collect();
    let proof: matching::Matching = matching::maximum_matching(&graph.targets, &identity_order);
    if !proof.is_perfect() {
        return Err(DomainError::InfeasibleConstraints(
            Infeasibility::NoPerfectAssignment {
                matched: proof.size,
                total: graph.len(),
            },
        ));
    }

    for attempt in 1..=options.max_attempts {
        if let Some(recipients) = search::attempt(&graph.targets, options.step_limit, rng) {
            return Ok(DrawOutcome {
                assignment: Assignment::from_indices(&graph.participant_ids, &recipients),
                attempts: attempt,
                strategy: DrawStrategy::Backtracking,
            });
        }
    }

    if !options.matching_fallback {
        return Err(DomainError::InfeasibleConstraints(
            Infeasibility::RetryBudgetExhausted {
                attempts: options.max_attempts,
            },
        ));
    }

    let recipients: Vec<usize> = matching::randomized_perfect_matching(&graph.targets, rng)
        .ok_or(DomainError::InfeasibleConstraints(
            Infeasibility::NoPerfectAssignment {
                matched: proof.size,
                total: graph.len(),
            },
        ))?;

    Ok(DrawOutcome {
        assignment: Assignment::from_indices(&graph.participant_ids, &recipients),
        attempts: options.max_attempts,
        strategy: DrawStrategy::Matching,
    })
}
