//! Typed lookups on tile-entity compounds.

use blueprint_nbt::{Compound, Value};

use crate::BlockError;

/// Reads `key` with `get`, failing when it is absent or has another type.
pub(crate) fn required<'a, T>(
    compound: &'a Compound,
    key: &'static str,
    expected: &'static str,
    get: impl FnOnce(&'a Value) -> Option<T>,
) -> Result<T, BlockError> {
    match optional(compound, key, expected, get)? {
        Some(value) => Ok(value),
        None => Err(BlockError::MissingField { key }),
    }
}

/// Like [`required`], but an absent key is `Ok(None)`.
pub(crate) fn optional<'a, T>(
    compound: &'a Compound,
    key: &'static str,
    expected: &'static str,
    get: impl FnOnce(&'a Value) -> Option<T>,
) -> Result<Option<T>, BlockError> {
    match compound.get(key) {
        None => Ok(None),
        Some(value) => match get(value) {
            Some(value) => Ok(Some(value)),
            None => Err(BlockError::InvalidType { key, expected }),
        },
    }
}
