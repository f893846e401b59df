//! Patch grammar for partial updates.
//!
//! A PATCH body is either a JSON-Patch-style array of operation objects or a
//! flat JSON object treated as a merge patch. Both forms normalize to a
//! sequence of [`PatchOp`]s before application.
//!
//! Policy for a flat record: `add` and `replace` both set a field, `remove`
//! clears one. `move`, `copy` and `test` parse but are rejected during
//! application, so clients get a field-level error instead of a parse
//! failure.

use serde::Deserialize;
use serde_json::Value;

/// A single patch operation, tagged by `op`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    Add { path: String, value: Value },
    Replace { path: String, value: Value },
    Remove { path: String },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

impl PatchOp {
    /// The target path of the operation, as sent by the client.
    pub fn path(&self) -> &str {
        match self {
            PatchOp::Add { path, .. }
            | PatchOp::Replace { path, .. }
            | PatchOp::Remove { path }
            | PatchOp::Move { path, .. }
            | PatchOp::Copy { path, .. }
            | PatchOp::Test { path, .. } => path,
        }
    }

    /// The target field name: the path with its leading JSON Pointer `/`
    /// stripped. Nested pointers are left intact and fail field lookup.
    pub fn field(&self) -> &str {
        self.path().strip_prefix('/').unwrap_or(self.path())
    }
}

/// A PATCH request body: an operation sequence or a merge object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatchDocument {
    Ops(Vec<PatchOp>),
    Merge(serde_json::Map<String, Value>),
}

impl PatchDocument {
    /// Normalize to an operation sequence.
    ///
    /// Merge-object members become `replace` operations; a null member
    /// becomes `remove`.
    pub fn into_ops(self) -> Vec<PatchOp> {
        match self {
            PatchDocument::Ops(ops) => ops,
            PatchDocument::Merge(map) => map
                .into_iter()
                .map(|(key, value)| {
                    let path = format!("/{key}");
                    if value.is_null() {
                        PatchOp::Remove { path }
                    } else {
                        PatchOp::Replace { path, value }
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_an_operation_array() {
        let doc: PatchDocument = serde_json::from_value(serde_json::json!([
            {"op": "replace", "path": "/name", "value": "Git"},
            {"op": "remove", "path": "/description"}
        ]))
        .unwrap();

        let ops = doc.into_ops();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], PatchOp::Replace { path, .. } if path == "/name"));
        assert!(matches!(&ops[1], PatchOp::Remove { path } if path == "/description"));
    }

    #[test]
    fn parses_a_merge_object_into_ops() {
        let doc: PatchDocument = serde_json::from_value(serde_json::json!({
            "name": "Git",
            "platform": null
        }))
        .unwrap();

        let ops = doc.into_ops();
        assert_eq!(ops.len(), 2);
        assert!(ops
            .iter()
            .any(|op| matches!(op, PatchOp::Replace { path, value } if path == "/name" && value == "Git")));
        assert!(ops
            .iter()
            .any(|op| matches!(op, PatchOp::Remove { path } if path == "/platform")));
    }

    #[test]
    fn parses_unsupported_ops_for_later_rejection() {
        let doc: PatchDocument = serde_json::from_value(serde_json::json!([
            {"op": "move", "from": "/name", "path": "/platform"},
            {"op": "test", "path": "/name", "value": "git"}
        ]))
        .unwrap();

        let ops = doc.into_ops();
        assert!(matches!(ops[0], PatchOp::Move { .. }));
        assert!(matches!(ops[1], PatchOp::Test { .. }));
    }

    #[test]
    fn field_strips_the_pointer_prefix() {
        let op = PatchOp::Remove {
            path: "/platform".to_string(),
        };
        assert_eq!(op.field(), "platform");

        let bare = PatchOp::Remove {
            path: "platform".to_string(),
        };
        assert_eq!(bare.field(), "platform");
    }
}
