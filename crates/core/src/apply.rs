// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{PoolEvent, State, TransitionResult};
use crate::{find_participant, validate_group_in_pool, validate_pool_open};
use rand::Rng;
use secret_draw_domain::{
    DomainError, DrawOutcome, Group, GroupId, Participant, ParticipantId, Pool, PoolLifecycle,
    draw_with_options, validate_participant_name, validate_pool_name,
};

/// Applies a command to the current state, producing a new state and the event to persist.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `rng` - Randomness for the draw engine; only `Command::Draw` uses it
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A structural command targets a drawn pool
/// - The pool has already been drawn and a draw is requested
/// - A referenced group or participant does not exist in the pool
/// - A name fails validation
/// - The draw engine cannot produce an assignment
pub fn apply<R: Rng + ?Sized>(
    state: &State,
    command: Command,
    rng: &mut R,
) -> Result<TransitionResult, CoreError> {
    let pool: &Pool = &state.pool;

    if command.is_structural() {
        validate_pool_open(pool)?;
    }

    match command {
        Command::RenamePool { name } => {
            validate_pool_name(&name)?;
            let name: String = name.trim().to_string();

            let mut new_pool: Pool = pool.clone();
            new_pool.name.clone_from(&name);

            Ok(TransitionResult {
                new_state: State::new(new_pool),
                event: PoolEvent::PoolRenamed {
                    pool_id: pool.pool_id.clone(),
                    name,
                },
            })
        }
        Command::CreateGroup => Ok(TransitionResult {
            // The group appears once storage has assigned its identifier.
            new_state: state.clone(),
            event: PoolEvent::GroupCreated {
                pool_id: pool.pool_id.clone(),
            },
        }),
        Command::AddParticipant {
            participant_id,
            group_id,
            name,
        } => {
            validate_participant_name(&name)?;
            validate_group_in_pool(pool, group_id)?;
            if pool.find_participant(&participant_id).is_some() {
                return Err(CoreError::DomainViolation(
                    DomainError::DuplicateParticipant(participant_id),
                ));
            }

            let participant: Participant =
                Participant::new(participant_id, name.trim().to_string(), group_id);

            let mut new_pool: Pool = pool.clone();
            insert_into_group(&mut new_pool, participant.clone())?;

            Ok(TransitionResult {
                new_state: State::new(new_pool),
                event: PoolEvent::ParticipantAdded { participant },
            })
        }
        Command::MoveParticipant {
            participant_id,
            group_id,
        } => {
            let from: GroupId = find_participant(pool, &participant_id)?.group_id;
            validate_group_in_pool(pool, group_id)?;

            let mut new_pool: Pool = pool.clone();
            let mut participant: Participant = take_participant(&mut new_pool, &participant_id)?;
            participant.group_id = group_id;
            insert_into_group(&mut new_pool, participant)?;

            Ok(TransitionResult {
                new_state: State::new(new_pool),
                event: PoolEvent::ParticipantMoved {
                    participant_id,
                    from,
                    to: group_id,
                },
            })
        }
        Command::RemoveParticipant { participant_id } => {
            let mut new_pool: Pool = pool.clone();
            let removed: Participant = take_participant(&mut new_pool, &participant_id)?;

            Ok(TransitionResult {
                new_state: State::new(new_pool),
                event: PoolEvent::ParticipantRemoved {
                    participant_id,
                    group_id: removed.group_id,
                },
            })
        }
        Command::RemoveGroup { group_id } => {
            let Some(position) = pool
                .groups
                .iter()
                .position(|group| group.group_id == group_id)
            else {
                return Err(CoreError::DomainViolation(DomainError::GroupNotFound(
                    group_id,
                )));
            };

            let mut new_pool: Pool = pool.clone();
            let removed: Group = new_pool.groups.remove(position);

            Ok(TransitionResult {
                new_state: State::new(new_pool),
                event: PoolEvent::GroupRemoved {
                    group_id,
                    removed_participants: removed.participants.len(),
                },
            })
        }
        Command::Draw { options } => {
            if !pool.lifecycle.can_transition_to(PoolLifecycle::Drawn) {
                return Err(CoreError::DomainViolation(DomainError::AlreadyDrawn(
                    pool.pool_id.clone(),
                )));
            }

            let participants: Vec<Participant> = pool.participants();
            let outcome: DrawOutcome = draw_with_options(&participants, &options, rng)?;
            outcome.assignment.validate(&participants)?;

            let mut new_pool: Pool = pool.clone();
            for participant in new_pool
                .groups
                .iter_mut()
                .flat_map(|group| group.participants.iter_mut())
            {
                let recipient: &ParticipantId = outcome
                    .assignment
                    .recipient_of(&participant.participant_id)
                    .ok_or_else(|| {
                        CoreError::Internal(format!(
                            "draw left participant '{}' without a recipient",
                            participant.participant_id
                        ))
                    })?;
                participant.recipient_id = Some(recipient.clone());
            }
            new_pool.lifecycle = PoolLifecycle::Drawn;

            Ok(TransitionResult {
                new_state: State::new(new_pool),
                event: PoolEvent::Drawn {
                    pool_id: pool.pool_id.clone(),
                    assignment: outcome.assignment,
                    attempts: outcome.attempts,
                    strategy: outcome.strategy,
                },
            })
        }
    }
}

/// Inserts a participant into its group, keeping members ordered by name
/// and then by identifier.
fn insert_into_group(pool: &mut Pool, participant: Participant) -> Result<(), CoreError> {
    let group_id: GroupId = participant.group_id;
    let group: &mut Group = pool
        .groups
        .iter_mut()
        .find(|group| group.group_id == group_id)
        .ok_or(CoreError::DomainViolation(DomainError::GroupNotFound(
            group_id,
        )))?;

    let position: usize = group
        .participants
        .partition_point(|existing| {
            (&existing.name, &existing.participant_id)
                <= (&participant.name, &participant.participant_id)
        });
    group.participants.insert(position, participant);
    Ok(())
}

/// Removes a participant from whichever group holds it.
fn take_participant(
    pool: &mut Pool,
    participant_id: &ParticipantId,
) -> Result<Participant, CoreError> {
    for group in &mut pool.groups {
        if let Some(position) = group
            .participants
            .iter()
            .position(|participant| &participant.participant_id == participant_id)
        {
            return Ok(group.participants.remove(position));
        }
    }
    Err(CoreError::DomainViolation(
        DomainError::ParticipantNotFound(participant_id.clone()),
    ))
}
