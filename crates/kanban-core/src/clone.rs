//! Deep copies of untyped data.
//!
//! Typed values are copied structurally through [`Clone`], which cannot fail.
//! Untyped data (a JSON payload handed over by a caller, or a value whose
//! shape is only known at runtime) is copied by serializing and deserializing,
//! which can fail and reports [`KanbanError::Clone`].

use crate::{KanbanError, KanbanResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Copy `value` into a (possibly different) type by round-tripping it through
/// JSON.
///
/// Fails when `value` cannot be serialized or the JSON does not fit `U`. A
/// failure must be treated as fatal for the operation at hand; there is no
/// shared-reference fallback.
pub fn clone_through_json<T, U>(value: &T) -> KanbanResult<U>
where
    T: Serialize + ?Sized,
    U: DeserializeOwned,
{
    let json = serde_json::to_value(value).map_err(|e| KanbanError::Clone(e.to_string()))?;
    serde_json::from_value(json).map_err(|e| KanbanError::Clone(e.to_string()))
}
