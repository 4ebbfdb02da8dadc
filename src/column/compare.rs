// In: src/column/compare.rs

//! Row-wise logical equivalence over column views.
//!
//! Two views are equivalent when they agree on type shape, row count, per-row
//! validity, and the values of valid rows, at every nesting level. The
//! payload of a null row is ignored, and so is everything physical: offsets,
//! buffer identity, and whether an all-valid mask is present or absent. This
//! is the contract the flatten/unflatten round trip guarantees, and the
//! predicate the test-suite asserts with.

use super::view::{ColumnView, TableView, ViewData};
use crate::types::LaminaDataType;

/// Structural type compatibility: same type tag, and for nested kinds the
/// same child shape, recursively.
fn types_compatible(a: &ColumnView, b: &ColumnView) -> bool {
    if a.dtype() != b.dtype() {
        return false;
    }
    match a.dtype() {
        LaminaDataType::Struct => {
            a.num_children() == b.num_children()
                && a.children()
                    .iter()
                    .zip(b.children())
                    .all(|(ca, cb)| types_compatible(ca, cb))
        }
        LaminaDataType::List => types_compatible(a.list_child(), b.list_child()),
        _ => true,
    }
}

/// Logical equivalence of one row of `a` against one row of `b`.
///
/// The rows may sit at different positions; LIST elements are compared
/// through exactly this asymmetry.
pub fn rows_equivalent(a: &ColumnView, a_row: usize, b: &ColumnView, b_row: usize) -> bool {
    let a_valid = a.is_valid(a_row);
    if a_valid != b.is_valid(b_row) {
        return false;
    }
    if !a_valid {
        // Both null: payload is irrelevant.
        return true;
    }
    match (&a.data, &b.data) {
        (ViewData::Fixed { .. }, ViewData::Fixed { .. }) => {
            a.fixed_value_bytes(a_row) == b.fixed_value_bytes(b_row)
        }
        (ViewData::Utf8 { .. }, ViewData::Utf8 { .. }) => {
            a.utf8_value_bytes(a_row) == b.utf8_value_bytes(b_row)
        }
        (ViewData::Struct { .. }, ViewData::Struct { .. }) => a
            .children()
            .iter()
            .zip(b.children())
            .all(|(ca, cb)| rows_equivalent(ca, a_row, cb, b_row)),
        (ViewData::List { .. }, ViewData::List { .. }) => {
            let (a_start, a_end) = a.list_bounds(a_row);
            let (b_start, b_end) = b.list_bounds(b_row);
            if a_end - a_start != b_end - b_start {
                return false;
            }
            (0..a_end - a_start).all(|k| {
                rows_equivalent(a.list_child(), a_start + k, b.list_child(), b_start + k)
            })
        }
        _ => false,
    }
}

/// Logical equivalence of two whole columns.
pub fn columns_equivalent(a: &ColumnView, b: &ColumnView) -> bool {
    types_compatible(a, b)
        && a.size() == b.size()
        && (0..a.size()).all(|row| rows_equivalent(a, row, b, row))
}

/// Logical equivalence of two whole tables: same arity, equivalent columns.
pub fn tables_equivalent(a: &TableView, b: &TableView) -> bool {
    a.num_columns() == b.num_columns()
        && a.columns()
            .iter()
            .zip(b.columns())
            .all(|(ca, cb)| columns_equivalent(ca, cb))
}
