//! Domain logic for the commander service.
//!
//! Pure types and rules with no I/O: id aliases, the domain error taxonomy,
//! field validation for the command resource, and the patch grammar used by
//! partial updates.

pub mod command;
pub mod error;
pub mod patch;
pub mod types;
