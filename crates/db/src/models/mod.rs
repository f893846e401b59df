//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row, the `Deserialize` write DTOs for inserts and updates, and a
//! `Serialize` read DTO for responses, with explicit field mapping between
//! them.

pub mod command;
