use serde::Serialize;

use crate::types::DbId;

/// A single field-level validation failure.
///
/// Collected into lists so a rejected request can report every offending
/// field or patch operation at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed")]
    Validation(Vec<Violation>),

    #[error("Internal error: {0}")]
    Internal(String),
}
