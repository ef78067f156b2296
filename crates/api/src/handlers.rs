// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler follows the same shape:
//! - resolve the pool that owns the addressed resource
//! - load the pool and apply a core command to it
//! - persist the resulting transition
//! - translate the outcome into a response DTO

use rand::Rng;
use secret_draw::{Command, PoolEvent, State, TransitionResult, apply};
use secret_draw_domain::{
    DomainError, DrawOptions, Group, GroupId, Participant, ParticipantId, Pool, PoolId,
    validate_pool_name,
};
use secret_draw_persistence::{ParticipantView, PersistTransitionResult, Persistence};
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AddParticipantRequest, AddParticipantResponse, CreateGroupResponse, CreatePoolRequest,
    DeleteGroupResponse, DeleteParticipantResponse, DeletePoolResponse, DrawPoolResponse,
    GetParticipantResponse, GroupInfo, ListPoolsRequest, ListPoolsResponse,
    MoveParticipantRequest, MoveParticipantResponse, ParticipantInfo, PoolInfo, RecipientInfo,
    RenamePoolRequest,
};

// ============================================================================
// Conversions
// ============================================================================

fn participant_to_info(participant: &Participant) -> ParticipantInfo {
    ParticipantInfo {
        participant_id: participant.participant_id.to_string(),
        name: participant.name.clone(),
        group_id: participant.group_id.value(),
    }
}

fn group_to_info(group: &Group) -> GroupInfo {
    GroupInfo {
        group_id: group.group_id.value(),
        participants: group.participants.iter().map(participant_to_info).collect(),
    }
}

/// Converts a stored pool into its API representation.
#[must_use]
pub fn pool_to_info(pool: &Pool) -> PoolInfo {
    PoolInfo {
        pool_id: pool.pool_id.to_string(),
        name: pool.name.clone(),
        created_at: pool.created_at.clone(),
        lifecycle_state: pool.lifecycle.as_str().to_string(),
        participant_count: pool.participant_count(),
        groups: pool.groups.iter().map(group_to_info).collect(),
    }
}

// ============================================================================
// Resolution helpers
// ============================================================================

fn load_state(persistence: &mut Persistence, pool_id: &PoolId) -> Result<State, ApiError> {
    let pool: Pool = persistence.get_pool(pool_id)?;
    Ok(State::new(pool))
}

/// Resolves the pool owning a group.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the group does not exist.
fn resolve_pool_for_group(
    persistence: &mut Persistence,
    group_id: GroupId,
) -> Result<PoolId, ApiError> {
    persistence
        .find_pool_for_group(group_id)?
        .ok_or_else(|| translate_domain_error(DomainError::GroupNotFound(group_id)))
}

/// Resolves the pool owning a participant.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the participant does not exist.
fn resolve_pool_for_participant(
    persistence: &mut Persistence,
    participant_id: &ParticipantId,
) -> Result<PoolId, ApiError> {
    persistence
        .find_pool_for_participant(participant_id)?
        .ok_or_else(|| {
            translate_domain_error(DomainError::ParticipantNotFound(participant_id.clone()))
        })
}

/// Applies a command to a loaded pool and persists the transition.
fn apply_and_persist<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    state: &State,
    command: Command,
    rng: &mut R,
) -> Result<(TransitionResult, PersistTransitionResult), ApiError> {
    let transition: TransitionResult = apply(state, command, rng).map_err(translate_core_error)?;
    let persisted: PersistTransitionResult = persistence.persist_transition(&transition)?;

    debug!(event = %transition.event.describe(), "Applied command");

    Ok((transition, persisted))
}

fn parse_pool_id(raw: &str) -> Result<PoolId, ApiError> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("pool_id"),
            message: String::from("Pool identifier cannot be empty"),
        });
    }
    Ok(PoolId::new(trimmed))
}

fn parse_participant_id(raw: &str) -> Result<ParticipantId, ApiError> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("participant_id"),
            message: String::from("Participant identifier cannot be empty"),
        });
    }
    Ok(ParticipantId::new(trimmed))
}

// ============================================================================
// Pools
// ============================================================================

/// Creates a new, empty pool.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The pool to create
/// * `rng` - Source for the new pool's identifier
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or too long
/// - The pool cannot be stored
pub fn create_pool<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    request: &CreatePoolRequest,
    rng: &mut R,
) -> Result<PoolInfo, ApiError> {
    validate_pool_name(&request.name).map_err(translate_domain_error)?;

    let pool_id: PoolId = PoolId::generate(rng);
    let pool: Pool = persistence.create_pool(&pool_id, request.name.trim())?;

    info!(pool_id = %pool.pool_id, name = %pool.name, "Created pool");

    Ok(pool_to_info(&pool))
}

/// Retrieves a fully assembled pool.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the pool does not exist.
pub fn get_pool(persistence: &mut Persistence, pool_id: &str) -> Result<PoolInfo, ApiError> {
    let pool_id: PoolId = parse_pool_id(pool_id)?;
    let pool: Pool = persistence.get_pool(&pool_id)?;
    Ok(pool_to_info(&pool))
}

/// Lists the requested pools, newest first.
///
/// Blank and unknown identifiers are skipped.
///
/// # Errors
///
/// Returns an error if the pools cannot be loaded.
pub fn list_pools(
    persistence: &mut Persistence,
    request: &ListPoolsRequest,
) -> Result<ListPoolsResponse, ApiError> {
    let pool_ids: Vec<PoolId> = request
        .pool_ids
        .iter()
        .map(|raw| raw.trim())
        .filter(|raw| !raw.is_empty())
        .map(PoolId::new)
        .collect();

    let pools: Vec<Pool> = persistence.list_pools(&pool_ids)?;

    Ok(ListPoolsResponse {
        pools: pools.iter().map(pool_to_info).collect(),
    })
}

/// Renames a pool. Allowed in every lifecycle state.
///
/// # Errors
///
/// Returns an error if:
/// - The pool does not exist
/// - The name is empty or too long
pub fn rename_pool<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    pool_id: &str,
    request: &RenamePoolRequest,
    rng: &mut R,
) -> Result<PoolInfo, ApiError> {
    let pool_id: PoolId = parse_pool_id(pool_id)?;
    let state: State = load_state(persistence, &pool_id)?;

    let command: Command = Command::RenamePool {
        name: request.name.clone(),
    };
    let (transition, _) = apply_and_persist(persistence, &state, command, rng)?;

    info!(pool_id = %pool_id, name = %transition.new_state.pool.name, "Renamed pool");

    Ok(pool_to_info(&transition.new_state.pool))
}

/// Deletes a pool with all of its groups and participants.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the pool does not exist.
pub fn delete_pool(
    persistence: &mut Persistence,
    pool_id: &str,
) -> Result<DeletePoolResponse, ApiError> {
    let pool_id: PoolId = parse_pool_id(pool_id)?;
    persistence.delete_pool(&pool_id)?;

    info!(pool_id = %pool_id, "Deleted pool");

    Ok(DeletePoolResponse {
        pool_id: pool_id.to_string(),
        message: format!("Deleted pool '{pool_id}'"),
    })
}

// ============================================================================
// Groups
// ============================================================================

/// Creates an empty group in a pool.
///
/// # Errors
///
/// Returns an error if:
/// - The pool does not exist
/// - The pool has been drawn
pub fn create_group<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    pool_id: &str,
    rng: &mut R,
) -> Result<CreateGroupResponse, ApiError> {
    let pool_id: PoolId = parse_pool_id(pool_id)?;
    let state: State = load_state(persistence, &pool_id)?;

    let (_, persisted) = apply_and_persist(persistence, &state, Command::CreateGroup, rng)?;
    let group_id: GroupId = persisted.group_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Storage did not assign a group identifier"),
    })?;

    info!(pool_id = %pool_id, group_id = %group_id, "Created group");

    Ok(CreateGroupResponse {
        pool_id: pool_id.to_string(),
        group_id: group_id.value(),
        message: format!("Created group {group_id}"),
    })
}

/// Deletes a group and every participant in it.
///
/// # Errors
///
/// Returns an error if:
/// - The group does not exist
/// - The pool has been drawn
pub fn delete_group<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    group_id: i64,
    rng: &mut R,
) -> Result<DeleteGroupResponse, ApiError> {
    let group_id: GroupId = GroupId::new(group_id);
    let pool_id: PoolId = resolve_pool_for_group(persistence, group_id)?;
    let state: State = load_state(persistence, &pool_id)?;

    let removed_participants: Vec<String> = state
        .pool
        .groups
        .iter()
        .filter(|group| group.group_id == group_id)
        .flat_map(|group| group.participants.iter())
        .map(|participant| participant.participant_id.to_string())
        .collect();

    apply_and_persist(persistence, &state, Command::RemoveGroup { group_id }, rng)?;

    info!(
        pool_id = %pool_id,
        group_id = %group_id,
        removed = removed_participants.len(),
        "Deleted group"
    );

    Ok(DeleteGroupResponse {
        pool_id: pool_id.to_string(),
        group_id: group_id.value(),
        message: format!(
            "Deleted group {group_id} and {} participant(s)",
            removed_participants.len()
        ),
        removed_participants,
    })
}

// ============================================================================
// Participants
// ============================================================================

/// Adds a participant to a group.
///
/// # Errors
///
/// Returns an error if:
/// - The group does not exist
/// - The name is empty or too long
/// - The pool has been drawn
pub fn add_participant<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    group_id: i64,
    request: &AddParticipantRequest,
    rng: &mut R,
) -> Result<AddParticipantResponse, ApiError> {
    let group_id: GroupId = GroupId::new(group_id);
    let pool_id: PoolId = resolve_pool_for_group(persistence, group_id)?;
    let state: State = load_state(persistence, &pool_id)?;

    let participant_id: ParticipantId = ParticipantId::generate(rng);
    let command: Command = Command::AddParticipant {
        participant_id: participant_id.clone(),
        group_id,
        name: request.name.clone(),
    };
    let (transition, _) = apply_and_persist(persistence, &state, command, rng)?;

    let PoolEvent::ParticipantAdded { participant } = &transition.event else {
        return Err(ApiError::Internal {
            message: format!(
                "Expected ParticipantAdded, got {}",
                transition.event.name()
            ),
        });
    };

    info!(
        pool_id = %pool_id,
        group_id = %group_id,
        participant_id = %participant_id,
        "Added participant"
    );

    Ok(AddParticipantResponse {
        pool_id: pool_id.to_string(),
        participant: participant_to_info(participant),
        message: format!("Added '{}' to group {group_id}", participant.name),
    })
}

/// Moves a participant to another group of the same pool.
///
/// # Errors
///
/// Returns an error if:
/// - The participant or the group does not exist
/// - The group belongs to another pool
/// - The pool has been drawn
pub fn move_participant<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    participant_id: &str,
    request: &MoveParticipantRequest,
    rng: &mut R,
) -> Result<MoveParticipantResponse, ApiError> {
    let participant_id: ParticipantId = parse_participant_id(participant_id)?;
    let target: GroupId = GroupId::new(request.group_id);

    let pool_id: PoolId = resolve_pool_for_participant(persistence, &participant_id)?;
    // An unknown group is reported as missing, not as belonging elsewhere.
    resolve_pool_for_group(persistence, target)?;
    let state: State = load_state(persistence, &pool_id)?;

    let command: Command = Command::MoveParticipant {
        participant_id: participant_id.clone(),
        group_id: target,
    };
    let (transition, _) = apply_and_persist(persistence, &state, command, rng)?;

    let PoolEvent::ParticipantMoved { from, to, .. } = transition.event else {
        return Err(ApiError::Internal {
            message: format!(
                "Expected ParticipantMoved, got {}",
                transition.event.name()
            ),
        });
    };

    info!(
        participant_id = %participant_id,
        from = %from,
        to = %to,
        "Moved participant"
    );

    Ok(MoveParticipantResponse {
        participant_id: participant_id.to_string(),
        from_group_id: from.value(),
        to_group_id: to.value(),
        message: format!("Moved participant from group {from} to group {to}"),
    })
}

/// Deletes a participant.
///
/// # Errors
///
/// Returns an error if:
/// - The participant does not exist
/// - The pool has been drawn
pub fn delete_participant<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    participant_id: &str,
    rng: &mut R,
) -> Result<DeleteParticipantResponse, ApiError> {
    let participant_id: ParticipantId = parse_participant_id(participant_id)?;
    let pool_id: PoolId = resolve_pool_for_participant(persistence, &participant_id)?;
    let state: State = load_state(persistence, &pool_id)?;

    let command: Command = Command::RemoveParticipant {
        participant_id: participant_id.clone(),
    };
    let (transition, _) = apply_and_persist(persistence, &state, command, rng)?;

    let PoolEvent::ParticipantRemoved { group_id, .. } = transition.event else {
        return Err(ApiError::Internal {
            message: format!(
                "Expected ParticipantRemoved, got {}",
                transition.event.name()
            ),
        });
    };

    info!(pool_id = %pool_id, participant_id = %participant_id, "Deleted participant");

    Ok(DeleteParticipantResponse {
        participant_id: participant_id.to_string(),
        group_id: group_id.value(),
        message: format!("Deleted participant '{participant_id}'"),
    })
}

/// Retrieves a participant's own view, including whom they give to.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the participant does not exist.
pub fn get_participant(
    persistence: &mut Persistence,
    participant_id: &str,
) -> Result<GetParticipantResponse, ApiError> {
    let participant_id: ParticipantId = parse_participant_id(participant_id)?;
    let view: ParticipantView = persistence.get_participant_view(&participant_id)?;

    let recipient: Option<RecipientInfo> = match (&view.participant.recipient_id, view.recipient_name)
    {
        (Some(recipient_id), Some(name)) => Some(RecipientInfo {
            participant_id: recipient_id.to_string(),
            name,
        }),
        _ => None,
    };

    Ok(GetParticipantResponse {
        participant_id: view.participant.participant_id.to_string(),
        name: view.participant.name.clone(),
        group_id: view.participant.group_id.value(),
        pool_id: view.pool_id.to_string(),
        pool_name: view.pool_name,
        recipient,
    })
}

// ============================================================================
// Draw
// ============================================================================

/// Draws a pool: assigns every participant a recipient outside their group.
///
/// The assignment and the pool's `Drawn` state are persisted in one
/// transaction.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `pool_id` - The pool to draw
/// * `options` - Draw engine budgets
/// * `rng` - Randomness for the draw engine
///
/// # Errors
///
/// Returns an error if:
/// - The pool does not exist
/// - The pool has already been drawn, here or by a concurrent request
/// - The pool has fewer than two participants
/// - The groups admit no valid assignment
pub fn draw_pool<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    pool_id: &str,
    options: &DrawOptions,
    rng: &mut R,
) -> Result<DrawPoolResponse, ApiError> {
    let pool_id: PoolId = parse_pool_id(pool_id)?;
    let state: State = load_state(persistence, &pool_id)?;
    let participant_count: usize = state.pool.participant_count();

    let command: Command = Command::Draw { options: *options };
    let (transition, _) = match apply_and_persist(persistence, &state, command, rng) {
        Ok(applied) => applied,
        Err(err) => {
            warn!(
                pool_id = %pool_id,
                participants = participant_count,
                groups = state.pool.groups.len(),
                error = %err,
                "Draw failed"
            );
            return Err(err);
        }
    };

    let PoolEvent::Drawn {
        assignment,
        attempts,
        strategy,
        ..
    } = transition.event
    else {
        return Err(ApiError::Internal {
            message: format!("Expected Drawn, got {}", transition.event.name()),
        });
    };

    info!(
        pool_id = %pool_id,
        participants = participant_count,
        attempts,
        strategy = %strategy,
        "Drew pool"
    );

    Ok(DrawPoolResponse {
        pool_id: pool_id.to_string(),
        assignments: assignment
            .iter()
            .map(|(giver, recipient)| (giver.to_string(), recipient.to_string()))
            .collect(),
        attempts,
        strategy: strategy.as_str().to_string(),
        message: format!("Drew pool '{pool_id}' for {participant_count} participant(s)"),
    })
}
