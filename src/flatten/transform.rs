// In: src/flatten/transform.rs

//! The flatten/unflatten algorithms.
//!
//! Flattening walks the input columns in order. Leaves are emitted as-is (or
//! rewrapped with an all-valid mask under the `Force` policy); STRUCT columns
//! are first run through the superimposer so every ancestor null is baked
//! into the member masks, then each member is flattened recursively in
//! declared order: a struct {a, {c, d}} flattens to the sequence {a, c, d}.
//! Unflattening inverts this deterministically by walking the original table
//! as a structural template and consuming flat columns left to right.

use std::sync::Arc;

use crate::column::view::{ColumnView, TableView};
use crate::config::{NullOrder, NullabilityPolicy, SortOrder};
use crate::error::LaminaError;
use crate::null_handling::bitmask::Bitmask;
use crate::null_handling::superimpose::superimpose_parent_nulls;
use crate::types::LaminaDataType;

use super::{FlattenedLayout, FlattenedTable, LeafDescriptor};

//==================================================================================
// 1. Flatten
//==================================================================================

/// Decomposes a table with STRUCT columns into an equivalent leaf-only table.
///
/// `column_order` and `null_precedence` must be empty or match the input
/// arity; each emitted leaf inherits the entry of its root column, so the
/// returned vectors line up 1:1 with the flat columns.
///
/// # Errors
/// * `StructuralUnsupported`: a LIST column anywhere in the hierarchy. The
///   whole call aborts; no partial flat table is returned.
/// * `InvalidArgument`: order/precedence arity mismatch, or misaligned
///   nested row counts.
pub fn flatten_nested_columns<'a>(
    input: &TableView<'a>,
    column_order: &[SortOrder],
    null_precedence: &[NullOrder],
    nullability: NullabilityPolicy,
) -> Result<FlattenedTable<'a>, LaminaError> {
    for (name, len) in [
        ("column_order", column_order.len()),
        ("null_precedence", null_precedence.len()),
    ] {
        if len != 0 && len != input.num_columns() {
            return Err(LaminaError::InvalidArgument(format!(
                "{} has {} entries for a table of {} columns",
                name,
                len,
                input.num_columns()
            )));
        }
    }

    let mut flattener = TableFlattener::new(nullability);
    for (index, column) in input.columns().iter().enumerate() {
        let mut path = vec![index];
        flattener.flatten_column(
            column.clone(),
            column_order.get(index).copied(),
            null_precedence.get(index).copied(),
            &mut path,
        )?;
    }

    log::debug!(
        "flattened {} columns into {} leaves ({} synthesized masks)",
        input.num_columns(),
        flattener.columns.len(),
        flattener.backing.len()
    );
    Ok(flattener.finish())
}

/// Accumulates emitted leaves and everything that must outlive them.
struct TableFlattener<'a> {
    nullability: NullabilityPolicy,
    columns: Vec<ColumnView<'a>>,
    column_order: Vec<SortOrder>,
    null_precedence: Vec<NullOrder>,
    backing: Vec<Arc<Bitmask>>,
    leaves: Vec<LeafDescriptor>,
}

impl<'a> TableFlattener<'a> {
    fn new(nullability: NullabilityPolicy) -> Self {
        Self {
            nullability,
            columns: Vec::new(),
            column_order: Vec::new(),
            null_precedence: Vec::new(),
            backing: Vec::new(),
            leaves: Vec::new(),
        }
    }

    fn flatten_column(
        &mut self,
        column: ColumnView<'a>,
        order: Option<SortOrder>,
        null_order: Option<NullOrder>,
        path: &mut Vec<usize>,
    ) -> Result<(), LaminaError> {
        match column.dtype() {
            LaminaDataType::List => Err(LaminaError::StructuralUnsupported(
                "LIST columns cannot be decomposed into independent leaf columns; \
                 their row counts are incompatible with flat-table row alignment"
                    .to_string(),
            )),
            LaminaDataType::Struct => {
                let (superimposed, buffers) = superimpose_parent_nulls(&column)?;
                self.backing.extend(buffers);
                for (member_index, child) in superimposed.children().iter().enumerate() {
                    path.push(member_index);
                    self.flatten_column(child.clone(), order, null_order, path)?;
                    path.pop();
                }
                Ok(())
            }
            _ => {
                let leaf = if self.nullability == NullabilityPolicy::Force && !column.nullable() {
                    let mask = Arc::new(Bitmask::new_set(column.size(), true));
                    self.backing.push(Arc::clone(&mask));
                    column.rebased_with_validity(mask)
                } else {
                    column
                };
                self.leaves.push(LeafDescriptor {
                    path: path.clone(),
                    dtype: leaf.dtype(),
                    nullable: leaf.nullable(),
                });
                if let Some(order) = order {
                    self.column_order.push(order);
                }
                if let Some(null_order) = null_order {
                    self.null_precedence.push(null_order);
                }
                self.columns.push(leaf);
                Ok(())
            }
        }
    }

    fn finish(self) -> FlattenedTable<'a> {
        FlattenedTable {
            // Every emitted leaf shares the input's row count; STRUCT member
            // alignment was validated by the superimposer.
            table: TableView::new_unchecked(self.columns),
            column_order: self.column_order,
            null_precedence: self.null_precedence,
            backing_validity_buffers: self.backing,
            layout: FlattenedLayout {
                leaves: self.leaves,
            },
        }
    }
}

//==================================================================================
// 2. Unflatten
//==================================================================================

/// Rebuilds the nested shape of `template` from the columns of `flat`,
/// consuming them left to right. The template is read-only and supplies the
/// original (pre-superimposition) struct-level validity; the round trip is
/// judged by logical equivalence, not byte identity.
///
/// # Errors
/// * `TypeMismatch`: `flat` has too few or too many columns for the
///   template, or a consumed leaf's type disagrees with it.
/// * `InvalidArgument`: a consumed leaf's row count disagrees with the
///   template.
/// * `StructuralUnsupported`: the template itself contains a LIST column
///   nested in a STRUCT (such a template cannot describe a flattened table).
pub fn unflatten_nested_columns<'a>(
    flat: &TableView<'a>,
    template: &TableView<'a>,
) -> Result<TableView<'a>, LaminaError> {
    let mut remaining = flat.columns().iter();
    let mut rebuilt = Vec::with_capacity(template.num_columns());
    for column in template.columns() {
        rebuilt.push(rebuild_column(column, &mut remaining)?);
    }
    if remaining.next().is_some() {
        return Err(LaminaError::TypeMismatch(
            "flat table carries more columns than the structural template requires".to_string(),
        ));
    }
    TableView::new(rebuilt)
}

fn rebuild_column<'a>(
    template: &ColumnView<'a>,
    flat: &mut std::slice::Iter<'_, ColumnView<'a>>,
) -> Result<ColumnView<'a>, LaminaError> {
    match template.dtype() {
        LaminaDataType::Struct => {
            let children = template
                .children()
                .iter()
                .map(|child| rebuild_column(child, flat))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(template.with_children(children))
        }
        LaminaDataType::List => Err(LaminaError::StructuralUnsupported(
            "a structural template containing LIST columns cannot describe a flattened table"
                .to_string(),
        )),
        dtype => {
            let leaf = flat.next().ok_or_else(|| {
                LaminaError::TypeMismatch(
                    "flat table exhausted before satisfying the structural template".to_string(),
                )
            })?;
            if leaf.dtype() != dtype {
                return Err(LaminaError::TypeMismatch(format!(
                    "flat column of type {} where the template requires {}",
                    leaf.dtype(),
                    dtype
                )));
            }
            if leaf.size() != template.size() {
                return Err(LaminaError::InvalidArgument(format!(
                    "flat column of {} rows where the template requires {}",
                    leaf.size(),
                    template.size()
                )));
            }
            Ok(leaf.clone())
        }
    }
}
