//! Request handlers.
//!
//! Handlers delegate to the command store in `commander_db` and map errors
//! via [`AppError`](crate::error::AppError).

pub mod commands;
