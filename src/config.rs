// In: src/config.rs

//! The single source of truth for caller-facing behavior knobs of the
//! flatten/unflatten transform.
//!
//! These enums are designed to be created once at the application boundary
//! (e.g., from a user's YAML file or a query-engine session config) and passed
//! down by value. They are plain data: serializable, copyable, and defaulted.

use serde::{Deserialize, Serialize};

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Controls the nullability of the leaf columns emitted by
/// [`flatten_nested_columns`](crate::flatten::flatten_nested_columns).
///
/// Downstream consumers such as row comparators often want every column to
/// carry a validity mask so that null handling is uniform. Others want the
/// flat table to mirror the input exactly.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NullabilityPolicy {
    /// Every emitted leaf column carries a validity mask. Leaves that reach
    /// the output without one are rewrapped with a freshly allocated all-valid
    /// mask, guaranteeing uniform downstream null handling.
    Force,

    /// **Default:** each leaf keeps its original nullability. A leaf is
    /// emitted without a mask only if neither it nor any struct ancestor
    /// ever carries a null.
    #[default]
    Equivalent,
}

/// Sort direction associated with a column, threaded through the flatten
/// transform so that every emitted leaf inherits its root column's direction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Where nulls sort relative to non-null values, threaded through the flatten
/// transform alongside [`SortOrder`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NullOrder {
    #[default]
    Before,
    After,
}
