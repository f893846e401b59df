//! Route tree for the commander API.
//!
//! ```text
//! /health                liveness
//!
//! /commands              list (GET), create (POST)
//! /commands/{id}         get (GET), replace (PUT), patch (PATCH), delete (DELETE)
//! ```

pub mod commands;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree (health + command catalog).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/commands", commands::router())
}
