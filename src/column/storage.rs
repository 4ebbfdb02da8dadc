// In: src/column/storage.rs

//! Owned, materialized column storage.
//!
//! A `Column` owns its buffers outright: packed fixed-width values, utf8
//! offsets + bytes, child columns for STRUCTs, or offsets + a single element
//! child for LISTs. Validity lives behind an `Arc` so that derived views
//! (and masks synthesized from them) can share it without copying.
//!
//! Constructors validate the structural invariants once, at the boundary;
//! everything downstream (views, kernels, transforms) relies on them.

use std::sync::Arc;

use crate::error::LaminaError;
use crate::null_handling::bitmask::Bitmask;
use crate::types::LaminaDataType;
use crate::utils::typed_slice_to_bytes;

use super::view::{ColumnView, TableView, ViewData};

//==================================================================================
// 1. Column Storage
//==================================================================================

/// Kind-specific owned buffers of a column.
///
/// This is the closed tagged variant the recursive algorithms dispatch on:
/// everything except `Struct` and `List` is a leaf.
#[derive(Debug, Clone)]
pub enum ColumnData {
    /// Packed native values, `fixed_width_bytes()` bytes per row.
    /// `Boolean` stores one `0`/`1` byte per row.
    Fixed { values: Vec<u8> },
    /// `offsets` has `len + 1` entries indexing into `bytes`.
    Utf8 { offsets: Vec<i32>, bytes: Vec<u8> },
    /// Children share the parent's row count and per-row alignment.
    Struct { children: Vec<Column> },
    /// `offsets` has `len + 1` entries addressing rows of `child`, which has
    /// its own, independent row count.
    List { offsets: Vec<i32>, child: Box<Column> },
}

/// An owned, materialized column: logical type, row count, optional shared
/// validity, and kind-specific buffers.
#[derive(Debug, Clone)]
pub struct Column {
    dtype: LaminaDataType,
    len: usize,
    validity: Option<Arc<Bitmask>>,
    data: ColumnData,
}

impl Column {
    /// Builds a fixed-width leaf column from a typed slice.
    ///
    /// # Errors
    /// `TypeMismatch` if `dtype` is not fixed-width or its width differs from
    /// `size_of::<T>()`; `InvalidArgument` if a provided mask is shorter than
    /// the row count.
    pub fn new_fixed<T: bytemuck::Pod>(
        dtype: LaminaDataType,
        values: &[T],
        validity: Option<Bitmask>,
    ) -> Result<Self, LaminaError> {
        match dtype.fixed_width_bytes() {
            Some(width) if width == std::mem::size_of::<T>() => {}
            _ => {
                return Err(LaminaError::TypeMismatch(format!(
                    "{} is not a fixed-width type of {} bytes",
                    dtype,
                    std::mem::size_of::<T>()
                )))
            }
        }
        let len = values.len();
        Self::check_validity_covers(validity.as_ref(), len)?;
        Ok(Self {
            dtype,
            len,
            validity: validity.map(Arc::new),
            data: ColumnData::Fixed {
                values: typed_slice_to_bytes(values),
            },
        })
    }

    /// Builds a `Boolean` leaf column, stored one byte per row.
    pub fn new_bools(values: &[bool], validity: Option<Bitmask>) -> Result<Self, LaminaError> {
        let bytes: Vec<u8> = values.iter().map(|&b| b as u8).collect();
        Self::new_fixed(LaminaDataType::Boolean, &bytes, validity)
    }

    /// Builds a `Utf8` leaf column. Null rows should pass an empty string.
    pub fn new_utf8<S: AsRef<str>>(
        values: &[S],
        validity: Option<Bitmask>,
    ) -> Result<Self, LaminaError> {
        let len = values.len();
        Self::check_validity_covers(validity.as_ref(), len)?;
        let mut offsets = Vec::with_capacity(len + 1);
        let mut bytes = Vec::new();
        offsets.push(0i32);
        for value in values {
            bytes.extend_from_slice(value.as_ref().as_bytes());
            let end = i32::try_from(bytes.len()).map_err(|_| {
                LaminaError::InvalidArgument("utf8 column exceeds i32 offset range".to_string())
            })?;
            offsets.push(end);
        }
        Ok(Self {
            dtype: LaminaDataType::Utf8,
            len,
            validity: validity.map(Arc::new),
            data: ColumnData::Utf8 { offsets, bytes },
        })
    }

    /// Builds a STRUCT column over the given member columns.
    ///
    /// # Errors
    /// `InvalidArgument` if there are no members or their row counts differ.
    pub fn new_struct(
        children: Vec<Column>,
        validity: Option<Bitmask>,
    ) -> Result<Self, LaminaError> {
        let len = match children.first() {
            Some(first) => first.len(),
            None => {
                return Err(LaminaError::InvalidArgument(
                    "a STRUCT column requires at least one member".to_string(),
                ))
            }
        };
        if children.iter().any(|c| c.len() != len) {
            return Err(LaminaError::InvalidArgument(
                "all members of a STRUCT column must share the parent row count".to_string(),
            ));
        }
        Self::check_validity_covers(validity.as_ref(), len)?;
        Ok(Self {
            dtype: LaminaDataType::Struct,
            len,
            validity: validity.map(Arc::new),
            data: ColumnData::Struct { children },
        })
    }

    /// Builds a LIST column over `child`, addressed by `offsets`
    /// (`offsets.len()` is the row count plus one).
    ///
    /// # Errors
    /// `InvalidArgument` for empty, decreasing, or out-of-range offsets.
    pub fn new_list(
        offsets: Vec<i32>,
        child: Column,
        validity: Option<Bitmask>,
    ) -> Result<Self, LaminaError> {
        if offsets.is_empty() {
            return Err(LaminaError::InvalidArgument(
                "LIST offsets must contain at least one entry".to_string(),
            ));
        }
        let len = offsets.len() - 1;
        let in_range = offsets[0] >= 0 && offsets[len] as usize <= child.len();
        let monotonic = offsets.windows(2).all(|w| w[0] <= w[1]);
        if !in_range || !monotonic {
            return Err(LaminaError::InvalidArgument(
                "LIST offsets must be non-decreasing and within the child row count".to_string(),
            ));
        }
        Self::check_validity_covers(validity.as_ref(), len)?;
        Ok(Self {
            dtype: LaminaDataType::List,
            len,
            validity: validity.map(Arc::new),
            data: ColumnData::List {
                offsets,
                child: Box::new(child),
            },
        })
    }

    fn check_validity_covers(
        validity: Option<&Bitmask>,
        len: usize,
    ) -> Result<(), LaminaError> {
        match validity {
            Some(mask) if mask.len() < len => Err(LaminaError::InvalidArgument(format!(
                "validity mask of {} bits does not cover {} rows",
                mask.len(),
                len
            ))),
            _ => Ok(()),
        }
    }

    pub fn dtype(&self) -> LaminaDataType {
        self.dtype
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn validity(&self) -> Option<&Arc<Bitmask>> {
        self.validity.as_ref()
    }

    pub fn null_count(&self) -> usize {
        self.validity
            .as_ref()
            .map_or(0, |mask| mask.count_invalid_in_range(0, self.len))
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Mutable access to this column's own validity mask, for callers that
    /// need to mark rows null after construction. Copy-on-write: if views
    /// already share the mask, they keep the pre-mutation bits.
    pub fn validity_mut(&mut self) -> Option<&mut Bitmask> {
        self.validity.as_mut().map(Arc::make_mut)
    }

    /// Takes a full-range, zero-copy view of this column.
    pub fn view(&self) -> ColumnView<'_> {
        let data = match &self.data {
            ColumnData::Fixed { values } => ViewData::Fixed { values },
            ColumnData::Utf8 { offsets, bytes } => ViewData::Utf8 { offsets, bytes },
            ColumnData::Struct { children } => ViewData::Struct {
                children: children.iter().map(Column::view).collect(),
            },
            ColumnData::List { offsets, child } => ViewData::List {
                offsets,
                child: Box::new(child.view()),
            },
        };
        ColumnView::new(self.dtype, self.len, 0, self.validity.clone(), data)
    }
}

//==================================================================================
// 2. Table Storage
//==================================================================================

/// An owned, ordered sequence of equal-row-count columns.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// # Errors
    /// `InvalidArgument` if the columns disagree on row count.
    pub fn new(columns: Vec<Column>) -> Result<Self, LaminaError> {
        if let Some(first) = columns.first() {
            if columns.iter().any(|c| c.len() != first.len()) {
                return Err(LaminaError::InvalidArgument(
                    "all columns of a table must share one row count".to_string(),
                ));
            }
        }
        Ok(Self { columns })
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Takes a full-range view over every column.
    pub fn view(&self) -> TableView<'_> {
        // Arity and row counts were validated at construction.
        TableView::new_unchecked(self.columns.iter().map(Column::view).collect())
    }
}
