// In: src/column/view.rs

//! Non-owning column and table views.
//!
//! A `ColumnView` is a lightweight descriptor over storage owned elsewhere:
//! logical type, row count, a row offset into the base buffers (zero-copy
//! slicing), an optional shared validity mask, and child views for nested
//! types. Views never own value memory; validity is shared via `Arc` so a
//! view derived by the superimposer can reference freshly synthesized masks
//! while its caller holds the owning buffer set.
//!
//! All row arguments below are *logical* rows of the view, i.e. the view's
//! `offset` has not been applied yet. The covering invariant (a present
//! mask addresses at least `[offset, offset + size)`) is established by the
//! storage constructors and preserved by `slice`.

use std::sync::Arc;

use crate::error::LaminaError;
use crate::null_handling::bitmask::Bitmask;
use crate::types::LaminaDataType;

//==================================================================================
// 1. Column Views
//==================================================================================

/// Kind-specific borrowed buffers of a view.
#[derive(Debug, Clone)]
pub(crate) enum ViewData<'a> {
    Fixed { values: &'a [u8] },
    Utf8 { offsets: &'a [i32], bytes: &'a [u8] },
    Struct { children: Vec<ColumnView<'a>> },
    List { offsets: &'a [i32], child: Box<ColumnView<'a>> },
}

/// A non-owning descriptor of a column (or a sliced sub-range of one).
#[derive(Debug, Clone)]
pub struct ColumnView<'a> {
    dtype: LaminaDataType,
    size: usize,
    offset: usize,
    validity: Option<Arc<Bitmask>>,
    pub(crate) data: ViewData<'a>,
}

impl<'a> ColumnView<'a> {
    pub(crate) fn new(
        dtype: LaminaDataType,
        size: usize,
        offset: usize,
        validity: Option<Arc<Bitmask>>,
        data: ViewData<'a>,
    ) -> Self {
        Self {
            dtype,
            size,
            offset,
            validity,
            data,
        }
    }

    pub fn dtype(&self) -> LaminaDataType {
        self.dtype
    }

    /// Logical row count of this view.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Rows skipped from the start of the underlying storage.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn validity(&self) -> Option<&Arc<Bitmask>> {
        self.validity.as_ref()
    }

    /// Whether this view carries a validity mask at all.
    pub fn nullable(&self) -> bool {
        self.validity.is_some()
    }

    /// Whether the logical range of this view contains at least one null.
    pub fn has_nulls(&self) -> bool {
        self.validity
            .as_ref()
            .map_or(false, |mask| {
                mask.has_invalid_in_range(self.offset, self.offset + self.size)
            })
    }

    pub fn null_count(&self) -> usize {
        self.validity
            .as_ref()
            .map_or(0, |mask| {
                mask.count_invalid_in_range(self.offset, self.offset + self.size)
            })
    }

    /// Validity of a logical row; absence of a mask means "valid".
    pub fn is_valid(&self, row: usize) -> bool {
        debug_assert!(row < self.size);
        self.validity
            .as_ref()
            .map_or(true, |mask| mask.bit_is_valid(self.offset + row))
    }

    /// STRUCT member views, in declared order; empty for every other kind.
    pub fn children(&self) -> &[ColumnView<'a>] {
        match &self.data {
            ViewData::Struct { children } => children,
            _ => &[],
        }
    }

    pub fn child(&self, index: usize) -> Option<&ColumnView<'a>> {
        self.children().get(index)
    }

    pub fn num_children(&self) -> usize {
        self.children().len()
    }

    /// Takes a zero-copy view of rows `[begin, begin + len)`.
    ///
    /// STRUCT members are sliced in lockstep, preserving per-row alignment
    /// with the parent. A LIST's element child is untouched; its rows are
    /// addressed through offsets.
    ///
    /// # Errors
    /// `InvalidArgument` if the requested range exceeds this view's size.
    pub fn slice(&self, begin: usize, len: usize) -> Result<Self, LaminaError> {
        if begin + len > self.size {
            return Err(LaminaError::InvalidArgument(format!(
                "slice [{}, {}) exceeds view of {} rows",
                begin,
                begin + len,
                self.size
            )));
        }
        let data = match &self.data {
            ViewData::Struct { children } => ViewData::Struct {
                children: children
                    .iter()
                    .map(|child| child.slice(begin, len))
                    .collect::<Result<Vec<_>, _>>()?,
            },
            other => other.clone(),
        };
        Ok(Self {
            dtype: self.dtype,
            size: len,
            offset: self.offset + begin,
            validity: self.validity.clone(),
            data,
        })
    }

    /// Rebuilds this STRUCT view with its member views replaced, keeping
    /// type, size, offset, and validity unchanged.
    pub(crate) fn with_children(&self, children: Vec<ColumnView<'a>>) -> Self {
        debug_assert_eq!(self.dtype, LaminaDataType::Struct);
        Self {
            dtype: self.dtype,
            size: self.size,
            offset: self.offset,
            validity: self.validity.clone(),
            data: ViewData::Struct { children },
        }
    }

    /// Attaches a freshly synthesized validity mask covering exactly
    /// `[0, size)`, rebasing the view's buffers so that its offset becomes 0
    /// and the mask-covering invariant holds without padding bits.
    ///
    /// Rebasing is zero-copy: fixed values and offset windows are advanced by
    /// sub-slicing; STRUCT members keep their own offsets and stay aligned
    /// row-for-row with the parent.
    pub(crate) fn rebased_with_validity(&self, mask: Arc<Bitmask>) -> Self {
        debug_assert!(mask.len() >= self.size);
        let data = match &self.data {
            ViewData::Fixed { values } => {
                let values: &'a [u8] = *values;
                let width = self
                    .dtype
                    .fixed_width_bytes()
                    .expect("Fixed view data always carries a fixed-width dtype");
                ViewData::Fixed {
                    values: &values[self.offset * width..(self.offset + self.size) * width],
                }
            }
            ViewData::Utf8 { offsets, bytes } => {
                let offsets: &'a [i32] = *offsets;
                ViewData::Utf8 {
                    offsets: &offsets[self.offset..self.offset + self.size + 1],
                    bytes: *bytes,
                }
            }
            ViewData::List { offsets, child } => {
                let offsets: &'a [i32] = *offsets;
                ViewData::List {
                    offsets: &offsets[self.offset..self.offset + self.size + 1],
                    child: child.clone(),
                }
            }
            ViewData::Struct { children } => ViewData::Struct {
                children: children.clone(),
            },
        };
        Self {
            dtype: self.dtype,
            size: self.size,
            offset: 0,
            validity: Some(mask),
            data,
        }
    }

    //------------------------------------------------------------------------------
    // Row-level accessors used by `compare` and the bridge. Callers dispatch
    // on `dtype` first; these assume the matching `ViewData` kind.
    //------------------------------------------------------------------------------

    /// The packed bytes of one fixed-width value.
    pub(crate) fn fixed_value_bytes(&self, row: usize) -> &'a [u8] {
        debug_assert!(row < self.size);
        match &self.data {
            ViewData::Fixed { values } => {
                let values: &'a [u8] = *values;
                let width = self
                    .dtype
                    .fixed_width_bytes()
                    .expect("Fixed view data always carries a fixed-width dtype");
                let start = (self.offset + row) * width;
                &values[start..start + width]
            }
            _ => unreachable!("fixed_value_bytes on a non-fixed column view"),
        }
    }

    /// The packed bytes of this view's whole logical range of fixed-width
    /// values, one `fixed_width_bytes()` chunk per row.
    pub(crate) fn fixed_window(&self) -> &'a [u8] {
        match &self.data {
            ViewData::Fixed { values } => {
                let values: &'a [u8] = *values;
                let width = self
                    .dtype
                    .fixed_width_bytes()
                    .expect("Fixed view data always carries a fixed-width dtype");
                &values[self.offset * width..(self.offset + self.size) * width]
            }
            _ => unreachable!("fixed_window on a non-fixed column view"),
        }
    }

    /// The utf8 payload of one row.
    pub(crate) fn utf8_value_bytes(&self, row: usize) -> &'a [u8] {
        debug_assert!(row < self.size);
        match &self.data {
            ViewData::Utf8 { offsets, bytes } => {
                let bytes: &'a [u8] = *bytes;
                let index = self.offset + row;
                let start = offsets[index] as usize;
                let end = offsets[index + 1] as usize;
                &bytes[start..end]
            }
            _ => unreachable!("utf8_value_bytes on a non-utf8 column view"),
        }
    }

    /// The element-row bounds of one LIST row, in the child's row space.
    pub(crate) fn list_bounds(&self, row: usize) -> (usize, usize) {
        debug_assert!(row < self.size);
        match &self.data {
            ViewData::List { offsets, .. } => {
                let index = self.offset + row;
                (offsets[index] as usize, offsets[index + 1] as usize)
            }
            _ => unreachable!("list_bounds on a non-list column view"),
        }
    }

    /// The element child of a LIST view.
    pub(crate) fn list_child(&self) -> &ColumnView<'a> {
        match &self.data {
            ViewData::List { child, .. } => child,
            _ => unreachable!("list_child on a non-list column view"),
        }
    }
}

//==================================================================================
// 2. Table Views
//==================================================================================

/// An ordered, fixed-arity sequence of equal-row-count column views; the unit
/// passed to the flatten/unflatten transform.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    columns: Vec<ColumnView<'a>>,
}

impl<'a> TableView<'a> {
    /// # Errors
    /// `InvalidArgument` if the views disagree on row count.
    pub fn new(columns: Vec<ColumnView<'a>>) -> Result<Self, LaminaError> {
        if let Some(first) = columns.first() {
            if columns.iter().any(|c| c.size() != first.size()) {
                return Err(LaminaError::InvalidArgument(
                    "all columns of a table must share one row count".to_string(),
                ));
            }
        }
        Ok(Self { columns })
    }

    pub(crate) fn new_unchecked(columns: Vec<ColumnView<'a>>) -> Self {
        Self { columns }
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, ColumnView::size)
    }

    pub fn column(&self, index: usize) -> Option<&ColumnView<'a>> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[ColumnView<'a>] {
        &self.columns
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::storage::Column;

    #[test]
    fn test_slice_adjusts_offset_and_validity_window() {
        let mask = Bitmask::nulls_at(7, &[0, 6]);
        let col =
            Column::new_fixed::<i32>(LaminaDataType::Int32, &[0, 1, 2, 3, 4, 5, 6], Some(mask))
                .unwrap();

        let full = col.view();
        assert_eq!(full.null_count(), 2);

        let sliced = full.slice(1, 5).unwrap();
        assert_eq!(sliced.size(), 5);
        assert_eq!(sliced.offset(), 1);
        assert_eq!(sliced.null_count(), 0);
        assert_eq!(sliced.fixed_value_bytes(0), 1i32.to_ne_bytes());

        let tail = full.slice(5, 2).unwrap();
        assert!(!tail.is_valid(1));
        assert!(tail.is_valid(0));
    }

    #[test]
    fn test_slice_out_of_range() {
        let col = Column::new_fixed::<i32>(LaminaDataType::Int32, &[1, 2, 3], None).unwrap();
        assert!(matches!(
            col.view().slice(2, 2),
            Err(LaminaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_struct_slice_propagates_to_members() {
        let member =
            Column::new_fixed::<i32>(LaminaDataType::Int32, &[10, 11, 12, 13], None).unwrap();
        let parent = Column::new_struct(vec![member], Some(Bitmask::nulls_at(4, &[2]))).unwrap();

        let sliced = parent.view().slice(1, 3).unwrap();
        assert_eq!(sliced.offset(), 1);
        let child = sliced.child(0).unwrap();
        assert_eq!(child.offset(), 1);
        assert_eq!(child.size(), 3);
        assert_eq!(child.fixed_value_bytes(0), 11i32.to_ne_bytes());
        assert!(!sliced.is_valid(1));
    }

    #[test]
    fn test_rebase_preserves_logical_rows() {
        let mask = Bitmask::nulls_at(5, &[3]);
        let col = Column::new_utf8(&["a", "bb", "ccc", "dddd", "e"], Some(mask)).unwrap();
        let sliced = col.view().slice(2, 3).unwrap();

        let fresh = Arc::new(Bitmask::nulls_at(3, &[1]));
        let rebased = sliced.rebased_with_validity(fresh);
        assert_eq!(rebased.offset(), 0);
        assert_eq!(rebased.size(), 3);
        assert_eq!(rebased.utf8_value_bytes(0), b"ccc");
        assert_eq!(rebased.utf8_value_bytes(2), b"e");
        assert!(!rebased.is_valid(1));
    }
}
