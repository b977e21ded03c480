//! Column entries as they appear in circuit JSON.

use serde_json::Value;

use crate::error::{QuirkError, QuirkResult};

/// One slot of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum CellToken {
    /// The number `1`: an explicitly empty slot.
    Blank,
    /// A bare identifier such as `"H"`.
    Id(String),
    /// An object `{"id": ..., "arg": ...}`.
    WithArg { id: String, arg: Option<Value> },
}

impl CellToken {
    /// Classify a JSON slot.
    pub fn from_json(value: &Value) -> QuirkResult<Self> {
        match value {
            Value::Number(n) if n.as_f64() == Some(1.0) => Ok(CellToken::Blank),
            Value::String(id) => Ok(CellToken::Id(id.clone())),
            Value::Object(map) => match map.get("id") {
                Some(Value::String(id)) => Ok(CellToken::WithArg {
                    id: id.clone(),
                    arg: map.get("arg").cloned(),
                }),
                _ => Err(QuirkError::UnrecognizedToken(value.to_string())),
            },
            _ => Err(QuirkError::UnrecognizedToken(value.to_string())),
        }
    }

    /// The cell identifier, if the slot is not blank.
    pub fn id(&self) -> Option<&str> {
        match self {
            CellToken::Blank => None,
            CellToken::Id(id) | CellToken::WithArg { id, .. } => Some(id),
        }
    }

    /// The argument, if the token carries one.
    pub fn arg(&self) -> Option<&Value> {
        match self {
            CellToken::WithArg { arg, .. } => arg.as_ref(),
            _ => None,
        }
    }

    /// Check if this is an empty slot.
    pub fn is_blank(&self) -> bool {
        matches!(self, CellToken::Blank)
    }
}
