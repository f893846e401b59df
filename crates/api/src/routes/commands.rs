//! Route definitions for the command catalog.
//!
//! ```text
//! GET    /            list_commands
//! POST   /            create_command
//! GET    /{id}        get_command_by_id
//! PUT    /{id}        update_command
//! PATCH  /{id}        patch_command
//! DELETE /{id}        delete_command
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::commands;
use crate::state::AppState;

/// Command routes -- mounted at `/commands`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(commands::list_commands).post(commands::create_command),
        )
        .route(
            "/{id}",
            get(commands::get_command_by_id)
                .put(commands::update_command)
                .patch(commands::patch_command)
                .delete(commands::delete_command),
        )
}
