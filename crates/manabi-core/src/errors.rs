//! Cross-cutting error types for Manabi.
//!
//! Transport and API failures live in `manabi-client`; credential storage
//! failures in `manabi-auth`. This module only covers errors raised while
//! working with entity data locally.

use thiserror::Error;

/// Errors raised by entity helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A unit names a prerequisite that is not part of the same set.
    #[error("Unit {unit_id} requires unknown unit {prerequisite_id}")]
    UnknownPrerequisite { unit_id: i64, prerequisite_id: i64 },

    /// Prerequisites form a cycle, so no valid order exists.
    #[error("Prerequisite cycle detected involving unit {unit_id}")]
    PrerequisiteCycle { unit_id: i64 },

    /// A reorder index does not address an existing entry.
    #[error("Position {index} is out of range for {len} entries")]
    PositionOutOfRange { index: usize, len: usize },

    /// Data failed validation (duplicates, empty fields).
    #[error("Validation error: {0}")]
    Validation(String),
}
