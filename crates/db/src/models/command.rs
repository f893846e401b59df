//! Command model and its boundary DTOs.
//!
//! The wire contract is camelCase while storage stays snake_case. All field
//! copying between shapes is explicit, so a renamed column cannot silently
//! drop out of the mapping.

use commander_core::command::{validate_description, validate_name, validate_platform};
use commander_core::error::Violation;
use commander_core::patch::PatchOp;
use commander_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A row from the `commands` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Command {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub platform: Option<String>,
}

/// DTO for creating a new command. The id is storage-assigned.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommand {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// DTO for replacing a command's fields, and the projection a patch
/// document is applied to before re-validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommand {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Outbound representation of a command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRead {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub platform: Option<String>,
}

impl Command {
    /// Materialize a draft into a full record once storage has assigned an
    /// id.
    pub fn from_draft(id: DbId, draft: CreateCommand) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            platform: draft.platform,
        }
    }

    /// Apply every update-shape field onto this record. The id is untouched.
    pub fn apply_update(&mut self, update: UpdateCommand) {
        self.name = update.name;
        self.description = update.description;
        self.platform = update.platform;
    }
}

impl From<Command> for CommandRead {
    fn from(command: Command) -> Self {
        Self {
            id: command.id,
            name: command.name,
            description: command.description,
            platform: command.platform,
        }
    }
}

impl From<&Command> for UpdateCommand {
    fn from(command: &Command) -> Self {
        Self {
            name: command.name.clone(),
            description: command.description.clone(),
            platform: command.platform.clone(),
        }
    }
}

impl CreateCommand {
    /// Collect every field violation instead of stopping at the first.
    pub fn validate(&self) -> Vec<Violation> {
        validate_fields(&self.name, self.description.as_deref(), self.platform.as_deref())
    }
}

impl UpdateCommand {
    /// Collect every field violation instead of stopping at the first.
    pub fn validate(&self) -> Vec<Violation> {
        validate_fields(&self.name, self.description.as_deref(), self.platform.as_deref())
    }

    /// Apply a whole operation sequence, collecting every violation.
    pub fn apply_all(&mut self, ops: &[PatchOp]) -> Vec<Violation> {
        ops.iter().filter_map(|op| self.apply(op).err()).collect()
    }

    /// Apply a single patch operation to this projection.
    pub fn apply(&mut self, op: &PatchOp) -> Result<(), Violation> {
        match op {
            PatchOp::Add { value, .. } | PatchOp::Replace { value, .. } => {
                self.set_field(op.field(), value)
            }
            PatchOp::Remove { .. } => self.clear_field(op.field()),
            PatchOp::Move { .. } => Err(unsupported(op.field(), "move")),
            PatchOp::Copy { .. } => Err(unsupported(op.field(), "copy")),
            PatchOp::Test { .. } => Err(unsupported(op.field(), "test")),
        }
    }

    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), Violation> {
        match field {
            "name" => match value {
                Value::String(s) => {
                    self.name = s.clone();
                    Ok(())
                }
                _ => Err(Violation::new("name", "name must be a string")),
            },
            "description" => {
                self.description = coerce_optional("description", value)?;
                Ok(())
            }
            "platform" => {
                self.platform = coerce_optional("platform", value)?;
                Ok(())
            }
            other => Err(Violation::new(other, "unknown field")),
        }
    }

    fn clear_field(&mut self, field: &str) -> Result<(), Violation> {
        match field {
            // An emptied name is caught by validation after application.
            "name" => {
                self.name = String::new();
                Ok(())
            }
            "description" => {
                self.description = None;
                Ok(())
            }
            "platform" => {
                self.platform = None;
                Ok(())
            }
            other => Err(Violation::new(other, "unknown field")),
        }
    }
}

fn validate_fields(
    name: &str,
    description: Option<&str>,
    platform: Option<&str>,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    if let Err(v) = validate_name(name) {
        violations.push(v);
    }
    if let Err(v) = validate_description(description) {
        violations.push(v);
    }
    if let Err(v) = validate_platform(platform) {
        violations.push(v);
    }
    violations
}

fn coerce_optional(field: &str, value: &Value) -> Result<Option<String>, Violation> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Null => Ok(None),
        _ => Err(Violation::new(
            field,
            format!("{field} must be a string or null"),
        )),
    }
}

fn unsupported(field: &str, op: &str) -> Violation {
    Violation::new(field, format!("\"{op}\" operations are not supported"))
}
