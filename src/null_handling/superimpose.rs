// In: src/null_handling/superimpose.rs

//! The recursive null-mask superimposer.
//!
//! A STRUCT row that is null makes every member value at that row logically
//! null, but storage keeps each member's own mask independent of its
//! ancestors. `superimpose_parent_nulls` materializes the combined view: it
//! pushes each STRUCT's validity down into its children, so a child row is
//! invalid iff the child itself or any enclosing struct ancestor is invalid
//! at that row.
//!
//! The operation is pure: inputs are read-only, every synthesized mask is a
//! fresh allocation, and the derived view plus the owned buffer set are
//! returned together. The caller keeps the buffer set alive for as long as
//! the derived view is in use (the views hold `Arc` clones of the masks, so
//! this is enforced structurally; the explicit set lets a consumer such as
//! the flatten transform take ownership of everything it must retain).

use std::sync::Arc;

use crate::column::view::ColumnView;
use crate::error::LaminaError;
use crate::null_handling::bitmask::{and_masks, Bitmask};
use crate::types::LaminaDataType;

/// Pushes ancestor STRUCT nulls down into descendant columns.
///
/// Non-struct input (leaves and LIST columns alike; a LIST is an opaque
/// leaf here, its elements are not descended into) is returned unchanged
/// with an empty buffer set. For a STRUCT:
///
/// 1. If the struct has no mask, or no invalid row inside its logical range,
///    children pass through unmodified, but member structs still get their
///    *own* nulls pushed to grandchildren.
/// 2. Otherwise every child receives a freshly ANDed `parent ∧ child` mask,
///    aligned at the same logical row via the two views' offsets, before the
///    recursion descends so grandchildren combine against the merged mask.
///
/// Applying the operation to its own output is a no-op (idempotent): a fully
/// superimposed struct has no invalid parent row with a still-valid child.
///
/// # Errors
/// `InvalidArgument` if a member's row count disagrees with its parent, or a
/// mask fails to cover its logical range.
pub fn superimpose_parent_nulls<'a>(
    input: &ColumnView<'a>,
) -> Result<(ColumnView<'a>, Vec<Arc<Bitmask>>), LaminaError> {
    if input.dtype() != LaminaDataType::Struct {
        return Ok((input.clone(), Vec::new()));
    }

    let parent_has_nulls = input.has_nulls();
    let mut backing: Vec<Arc<Bitmask>> = Vec::new();
    let mut new_children = Vec::with_capacity(input.num_children());

    for child in input.children() {
        if child.size() != input.size() {
            return Err(LaminaError::InvalidArgument(format!(
                "STRUCT member of {} rows is misaligned with its parent of {} rows",
                child.size(),
                input.size()
            )));
        }

        let candidate = if parent_has_nulls {
            let combined = and_masks(
                input.validity().map(|m| &**m),
                input.offset(),
                child.validity().map(|m| &**m),
                child.offset(),
                input.size(),
            )?;
            let mask = Arc::new(combined);
            backing.push(Arc::clone(&mask));
            child.rebased_with_validity(mask)
        } else {
            child.clone()
        };

        // Descend regardless of whether this level contributed nulls; a
        // member struct's own nulls still need pushing to grandchildren.
        let (descended, nested) = superimpose_parent_nulls(&candidate)?;
        backing.extend(nested);
        new_children.push(descended);
    }

    log::debug!(
        "superimposed struct of {} rows: {} synthesized mask(s)",
        input.size(),
        backing.len()
    );

    Ok((input.with_children(new_children), backing))
}
