// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod config;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use secret_draw_api::{
    AddParticipantRequest, AddParticipantResponse, ApiError, CreateGroupResponse,
    CreatePoolRequest, DeleteGroupResponse, DeleteParticipantResponse, DeletePoolResponse,
    DrawPoolResponse, GetParticipantResponse, ListPoolsRequest, ListPoolsResponse,
    MoveParticipantRequest, MoveParticipantResponse, PoolInfo, RenamePoolRequest,
    add_participant, create_group, create_pool, delete_group, delete_participant, delete_pool,
    draw_pool, get_participant, get_pool, list_pools, move_participant, rename_pool,
};
use secret_draw_domain::DrawOptions;
use secret_draw_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::config::{Args, ServerConfig};

/// Application state shared across handlers.
///
/// Persistence and the draw RNG sit behind their own mutexes. Handlers that
/// need both lock persistence first.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for pools and draws.
    persistence: Arc<Mutex<Persistence>>,
    /// Randomness for identifiers and draws.
    rng: Arc<Mutex<StdRng>>,
    /// Draw engine budgets applied to every draw.
    draw_options: DrawOptions,
}

/// Query parameters for `GET /pools`.
#[derive(Debug, Deserialize)]
struct ListPoolsQuery {
    /// Comma-separated pool identifiers.
    ids: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/pools` endpoint.
async fn handle_create_pool(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreatePoolRequest>,
) -> Result<Json<PoolInfo>, HttpError> {
    info!(name = %req.name, "Handling create_pool request");

    let mut persistence = app_state.persistence.lock().await;
    let mut rng = app_state.rng.lock().await;
    let pool: PoolInfo = create_pool(&mut persistence, &req, &mut *rng)?;

    Ok(Json(pool))
}

/// Handler for GET `/pools` endpoint.
///
/// Loads the pools named in the `ids` query parameter.
async fn handle_list_pools(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListPoolsQuery>,
) -> Result<Json<ListPoolsResponse>, HttpError> {
    let request: ListPoolsRequest = ListPoolsRequest {
        pool_ids: query
            .ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::to_string)
            .collect(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListPoolsResponse = list_pools(&mut persistence, &request)?;

    Ok(Json(response))
}

/// Handler for GET `/pools/{pool_id}` endpoint.
async fn handle_get_pool(
    AxumState(app_state): AxumState<AppState>,
    Path(pool_id): Path<String>,
) -> Result<Json<PoolInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let pool: PoolInfo = get_pool(&mut persistence, &pool_id)?;

    Ok(Json(pool))
}

/// Handler for POST `/pools/{pool_id}/name` endpoint.
async fn handle_rename_pool(
    AxumState(app_state): AxumState<AppState>,
    Path(pool_id): Path<String>,
    Json(req): Json<RenamePoolRequest>,
) -> Result<Json<PoolInfo>, HttpError> {
    info!(pool_id = %pool_id, name = %req.name, "Handling rename_pool request");

    let mut persistence = app_state.persistence.lock().await;
    let mut rng = app_state.rng.lock().await;
    let pool: PoolInfo = rename_pool(&mut persistence, &pool_id, &req, &mut *rng)?;

    Ok(Json(pool))
}

/// Handler for DELETE `/pools/{pool_id}` endpoint.
async fn handle_delete_pool(
    AxumState(app_state): AxumState<AppState>,
    Path(pool_id): Path<String>,
) -> Result<Json<DeletePoolResponse>, HttpError> {
    info!(pool_id = %pool_id, "Handling delete_pool request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeletePoolResponse = delete_pool(&mut persistence, &pool_id)?;

    Ok(Json(response))
}

/// Handler for POST `/pools/{pool_id}/groups` endpoint.
async fn handle_create_group(
    AxumState(app_state): AxumState<AppState>,
    Path(pool_id): Path<String>,
) -> Result<Json<CreateGroupResponse>, HttpError> {
    info!(pool_id = %pool_id, "Handling create_group request");

    let mut persistence = app_state.persistence.lock().await;
    let mut rng = app_state.rng.lock().await;
    let response: CreateGroupResponse = create_group(&mut persistence, &pool_id, &mut *rng)?;

    Ok(Json(response))
}

/// Handler for POST `/pools/{pool_id}/draw` endpoint.
///
/// Runs the draw engine and persists every assignment atomically.
async fn handle_draw_pool(
    AxumState(app_state): AxumState<AppState>,
    Path(pool_id): Path<String>,
) -> Result<Json<DrawPoolResponse>, HttpError> {
    info!(pool_id = %pool_id, "Handling draw_pool request");

    let mut persistence = app_state.persistence.lock().await;
    let mut rng = app_state.rng.lock().await;
    let response: DrawPoolResponse =
        draw_pool(&mut persistence, &pool_id, &app_state.draw_options, &mut *rng)?;

    Ok(Json(response))
}

/// Handler for DELETE `/groups/{group_id}` endpoint.
async fn handle_delete_group(
    AxumState(app_state): AxumState<AppState>,
    Path(group_id): Path<i64>,
) -> Result<Json<DeleteGroupResponse>, HttpError> {
    info!(group_id, "Handling delete_group request");

    let mut persistence = app_state.persistence.lock().await;
    let mut rng = app_state.rng.lock().await;
    let response: DeleteGroupResponse = delete_group(&mut persistence, group_id, &mut *rng)?;

    Ok(Json(response))
}

/// Handler for POST `/groups/{group_id}/participants` endpoint.
async fn handle_add_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(group_id): Path<i64>,
    Json(req): Json<AddParticipantRequest>,
) -> Result<Json<AddParticipantResponse>, HttpError> {
    info!(group_id, name = %req.name, "Handling add_participant request");

    let mut persistence = app_state.persistence.lock().await;
    let mut rng = app_state.rng.lock().await;
    let response: AddParticipantResponse =
        add_participant(&mut persistence, group_id, &req, &mut *rng)?;

    Ok(Json(response))
}

/// Handler for GET `/participants/{participant_id}` endpoint.
///
/// This is the participant's own page: it reveals their recipient.
async fn handle_get_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(participant_id): Path<String>,
) -> Result<Json<GetParticipantResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GetParticipantResponse = get_participant(&mut persistence, &participant_id)?;

    Ok(Json(response))
}

/// Handler for POST `/participants/{participant_id}/group` endpoint.
async fn handle_move_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(participant_id): Path<String>,
    Json(req): Json<MoveParticipantRequest>,
) -> Result<Json<MoveParticipantResponse>, HttpError> {
    info!(
        participant_id = %participant_id,
        group_id = req.group_id,
        "Handling move_participant request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let mut rng = app_state.rng.lock().await;
    let response: MoveParticipantResponse =
        move_participant(&mut persistence, &participant_id, &req, &mut *rng)?;

    Ok(Json(response))
}

/// Handler for DELETE `/participants/{participant_id}` endpoint.
async fn handle_delete_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(participant_id): Path<String>,
) -> Result<Json<DeleteParticipantResponse>, HttpError> {
    info!(participant_id = %participant_id, "Handling delete_participant request");

    let mut persistence = app_state.persistence.lock().await;
    let mut rng = app_state.rng.lock().await;
    let response: DeleteParticipantResponse =
        delete_participant(&mut persistence, &participant_id, &mut *rng)?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/pools", post(handle_create_pool).get(handle_list_pools))
        .route(
            "/pools/{pool_id}",
            get(handle_get_pool).delete(handle_delete_pool),
        )
        .route("/pools/{pool_id}/name", post(handle_rename_pool))
        .route("/pools/{pool_id}/groups", post(handle_create_group))
        .route("/pools/{pool_id}/draw", post(handle_draw_pool))
        .route("/groups/{group_id}", delete(handle_delete_group))
        .route(
            "/groups/{group_id}/participants",
            post(handle_add_participant),
        )
        .route(
            "/participants/{participant_id}",
            get(handle_get_participant).delete(handle_delete_participant),
        )
        .route(
            "/participants/{participant_id}/group",
            post(handle_move_participant),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config: ServerConfig = ServerConfig::try_from(args)?;

    info!("Initializing Secret Draw Server");

    let persistence: Persistence = if let Some(db_path) = &config.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let rng: StdRng = if let Some(seed) = config.seed {
        warn!(seed, "Draws are seeded and therefore predictable");
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::seed_from_u64(rand::random::<u64>())
    };

    info!(
        max_attempts = config.draw_options.max_attempts,
        step_limit = ?config.draw_options.step_limit,
        matching_fallback = config.draw_options.matching_fallback,
        "Draw engine configured"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        rng: Arc::new(Mutex::new(rng)),
        draw_options: config.draw_options,
    };

    let app: Router = build_router(app_state);

    info!("Server listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
