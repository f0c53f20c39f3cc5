//! Structural check of untrusted board data.
//!
//! Only the outer shape is verified: `tasks` must be an object and `order`
//! must be an object holding exactly the three column arrays. Individual
//! tasks are not inspected here; a malformed task is dropped later when the
//! snapshot is built, leaving a gap in the rendered column.

use serde_json::Value;
use thiserror::Error;

use crate::column::ColumnId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("board state must be an object")]
    NotAnObject,

    #[error("`tasks` must be an object")]
    TasksNotAnObject,

    #[error("`order` must be an object")]
    OrderNotAnObject,

    #[error("`order` is missing column `{0}`")]
    MissingColumn(&'static str),

    #[error("`order.{0}` must be an array")]
    ColumnNotAnArray(&'static str),

    #[error("`order` has unexpected key `{0}`")]
    UnexpectedColumn(String),
}

/// Check that `value` has the persisted board shape.
pub fn validate_board_value(value: &Value) -> Result<(), SchemaError> {
    let root = value.as_object().ok_or(SchemaError::NotAnObject)?;

    if !root.get("tasks").is_some_and(Value::is_object) {
        return Err(SchemaError::TasksNotAnObject);
    }

    let order = root
        .get("order")
        .and_then(Value::as_object)
        .ok_or(SchemaError::OrderNotAnObject)?;

    for column in ColumnId::ALL {
        match order.get(column.key()) {
            None => return Err(SchemaError::MissingColumn(column.key())),
            Some(entry) if !entry.is_array() => {
                return Err(SchemaError::ColumnNotAnArray(column.key()))
            }
            Some(_) => {}
        }
    }

    if let Some(extra) = order
        .keys()
        .find(|key| !ColumnId::ALL.iter().any(|column| column.key() == key.as_str()))
    {
        return Err(SchemaError::UnexpectedColumn(extra.clone()));
    }

    Ok(())
}

pub fn is_valid_board_value(value: &Value) -> bool {
    validate_board_value(value).is_ok()
}
