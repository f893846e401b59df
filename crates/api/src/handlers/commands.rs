//! Handlers for the command catalog.
//!
//! A command is a single how-to snippet (name, description, platform).
//! Mutations go through a store changeset: stage, then save. Partial update
//! applies a patch document to an update-shape projection and re-validates
//! before anything is written back, so a rejected patch cannot leak partial
//! state.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use commander_core::error::CoreError;
use commander_core::patch::PatchDocument;
use commander_core::types::DbId;
use commander_db::models::command::{Command, CommandRead, CreateCommand, UpdateCommand};
use commander_db::store::{CommandChangeSet, CommandStore};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a command, or bail with the not-found outcome.
async fn ensure_command_exists(state: &AppState, id: DbId) -> AppResult<Command> {
    state.store.get_by_id(id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Command",
            id,
        })
    })
}

// ---------------------------------------------------------------------------
// GET /commands
// ---------------------------------------------------------------------------

/// List every command in the catalog.
pub async fn list_commands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = state.store.list().await?;
    tracing::debug!(count = items.len(), "Listed commands");
    let items: Vec<CommandRead> = items.into_iter().map(CommandRead::from).collect();
    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// GET /commands/{id}
// ---------------------------------------------------------------------------

/// Get a single command by id.
pub async fn get_command_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let command = ensure_command_exists(&state, id).await?;
    Ok(Json(CommandRead::from(command)))
}

// ---------------------------------------------------------------------------
// POST /commands
// ---------------------------------------------------------------------------

/// Create a new command.
///
/// Responds 201 with the stored representation and a `Location` header
/// pointing at the get-by-id route for the assigned id.
pub async fn create_command(
    State(state): State<AppState>,
    Json(input): Json<CreateCommand>,
) -> AppResult<impl IntoResponse> {
    let violations = input.validate();
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations).into());
    }

    let mut changes = state.store.begin();
    changes.create(input);
    let mut outcome = changes.save_changes().await?;

    let created = outcome
        .created
        .pop()
        .ok_or_else(|| CoreError::Internal("insert committed but returned no row".into()))?;
    tracing::info!(id = created.id, name = %created.name, "Command created");

    let location = format!("/commands/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CommandRead::from(created)),
    ))
}

// ---------------------------------------------------------------------------
// PUT /commands/{id}
// ---------------------------------------------------------------------------

/// Replace every field of an existing command.
pub async fn update_command(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCommand>,
) -> AppResult<StatusCode> {
    let mut command = ensure_command_exists(&state, id).await?;

    let violations = input.validate();
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations).into());
    }

    command.apply_update(input);

    let mut changes = state.store.begin();
    changes.update(command);
    let outcome = changes.save_changes().await?;
    if !outcome.applied() {
        // The record vanished between fetch and save.
        return Err(CoreError::NotFound {
            entity: "Command",
            id,
        }
        .into());
    }
    tracing::info!(id, "Command updated");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// PATCH /commands/{id}
// ---------------------------------------------------------------------------

/// Partially update an existing command.
///
/// The patch document is applied to an update-shape projection of the
/// current record, the projection is re-validated, and only then is the
/// result mapped back and saved. Any violation rejects the whole document
/// with a 422 enumerating the offending fields and operations.
pub async fn patch_command(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(doc): Json<PatchDocument>,
) -> AppResult<StatusCode> {
    let mut command = ensure_command_exists(&state, id).await?;

    let ops = doc.into_ops();
    let mut projection = UpdateCommand::from(&command);

    let mut violations = projection.apply_all(&ops);
    if violations.is_empty() {
        violations = projection.validate();
    }
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations).into());
    }

    command.apply_update(projection);

    let mut changes = state.store.begin();
    changes.update(command);
    let outcome = changes.save_changes().await?;
    if !outcome.applied() {
        return Err(CoreError::NotFound {
            entity: "Command",
            id,
        }
        .into());
    }
    tracing::info!(id, ops = ops.len(), "Command patched");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// DELETE /commands/{id}
// ---------------------------------------------------------------------------

/// Delete a command by id.
pub async fn delete_command(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let command = ensure_command_exists(&state, id).await?;

    let mut changes = state.store.begin();
    changes.delete(command);
    let outcome = changes.save_changes().await?;
    if !outcome.applied() {
        return Err(CoreError::NotFound {
            entity: "Command",
            id,
        }
        .into());
    }
    tracing::info!(id, "Command deleted");

    Ok(StatusCode::NO_CONTENT)
}
