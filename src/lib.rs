//! This file is the root of the `lamina_columnar` Rust crate.
//!
//! lamina's nested-column engine: validity bitmasks, non-owning column views
//! over nested STRUCT/LIST hierarchies, recursive null-mask superimposition,
//! and the lossless flatten/unflatten transform that turns struct-bearing
//! tables into leaf-only tables for algorithms (and writers) that only
//! understand non-nested columns.
//!
//! The crate is layered: `null_handling`, `column`, and `flatten` are pure
//! Rust with no Arrow dependency; the `bridge` module is the sole boundary
//! where Arrow arrays are marshalled in and out.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================

pub mod bridge;
pub mod column;
pub mod config;
pub mod error;
pub mod flatten;
pub mod null_handling;
pub mod types;
pub mod utils;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use column::{
    columns_equivalent, rows_equivalent, tables_equivalent, Column, ColumnView, Table, TableView,
};
pub use config::{NullOrder, NullabilityPolicy, SortOrder};
pub use error::LaminaError;
pub use flatten::{
    flatten_nested_columns, unflatten_nested_columns, FlattenedLayout, FlattenedTable,
    LeafDescriptor,
};
pub use null_handling::{and_masks, superimpose_parent_nulls, Bitmask};
pub use types::LaminaDataType;
