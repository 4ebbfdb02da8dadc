// In: src/flatten/mod.rs

//! This module defines the table-level decomposition transform: converting a
//! table containing STRUCT columns into an equivalent table of only leaf
//! columns (with every ancestor null superimposed into the leaves), and the
//! inverse transform that rebuilds the nested shape from a flat table plus
//! the original table as a read-only structural template.
//!
//! The flat form is what leaf-only algorithms (sorting, comparison, hashing)
//! and the disk-writer collaborator consume. LIST columns cannot be
//! decomposed this way (their independent row counts are incompatible with
//! flat-table row alignment) and are rejected outright.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::column::TableView;
use crate::config::{NullOrder, SortOrder};
use crate::error::LaminaError;
use crate::null_handling::bitmask::Bitmask;
use crate::types::LaminaDataType;

//==================================================================================
// 1. Module Declarations
//==================================================================================

mod transform;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use self::transform::{flatten_nested_columns, unflatten_nested_columns};

/// **CONTRACT:** The unified result of flattening a table.
///
/// Owns everything the flat form depends on: the leaf-only column views, the
/// order/precedence vectors extended 1:1 per emitted leaf, the validity
/// buffers synthesized by superimposition (the views hold `Arc` clones, so
/// dropping this struct is what ends their lifetime), and a serializable
/// description of how flat columns map back to nested fields.
pub struct FlattenedTable<'a> {
    pub(crate) table: TableView<'a>,
    pub(crate) column_order: Vec<SortOrder>,
    pub(crate) null_precedence: Vec<NullOrder>,
    pub(crate) backing_validity_buffers: Vec<Arc<Bitmask>>,
    pub(crate) layout: FlattenedLayout,
}

impl<'a> FlattenedTable<'a> {
    /// The leaf-only table.
    pub fn flattened_columns(&self) -> &TableView<'a> {
        &self.table
    }

    /// Sort directions, one per emitted leaf (empty if none were supplied).
    pub fn column_order(&self) -> &[SortOrder] {
        &self.column_order
    }

    /// Null precedences, one per emitted leaf (empty if none were supplied).
    pub fn null_precedence(&self) -> &[NullOrder] {
        &self.null_precedence
    }

    /// The validity buffers synthesized while flattening.
    pub fn backing_validity_buffers(&self) -> &[Arc<Bitmask>] {
        &self.backing_validity_buffers
    }

    pub fn layout(&self) -> &FlattenedLayout {
        &self.layout
    }
}

//==================================================================================
// 3. Flattened Layout Metadata
//==================================================================================

/// Where one emitted leaf column came from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LeafDescriptor {
    /// Member indices from the root column down to the leaf; the first entry
    /// is the root column's index in the input table.
    pub path: Vec<usize>,
    pub dtype: LaminaDataType,
    pub nullable: bool,
}

/// The per-leaf provenance of a flattened table, in emission order. This is
/// the metadata handed to the disk-writer collaborator alongside the flat
/// column buffers.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedLayout {
    pub leaves: Vec<LeafDescriptor>,
}

impl FlattenedLayout {
    pub fn to_json(&self) -> Result<String, LaminaError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LaminaError> {
        Ok(serde_json::from_str(json)?)
    }
}

//==================================================================================
// 4. Unit Tests (Module-level integration tests)
//==================================================================================
