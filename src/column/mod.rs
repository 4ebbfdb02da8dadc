// In: src/column/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Column Layer
// ====================================================================================
//
// The `column` module is the in-memory data model the rest of the crate operates
// on. It is split along an ownership boundary:
//
//   1. [Owned Storage (`storage::Column`, `storage::Table`)]
//         Materialized buffers: values, offsets, children, and a shared
//         validity mask (`Arc<Bitmask>`). Lifetime strictly exceeds every
//         view taken from it.
//
//   2. [Non-owning Views (`view::ColumnView`, `view::TableView`)]
//         Lightweight descriptors {dtype, size, offset, validity, data refs,
//         children}. Views are created transiently per call, sliced without
//         copying, and never own memory. Operations that synthesize new
//         validity buffers return them alongside the derived view; views
//         hold `Arc` clones of those buffers, so nothing dangles.
//
//   3. [Logical comparison (`compare`)]
//         Row-wise logical equivalence over views: null rows compare equal
//         regardless of payload, values compare at every nesting level.
//         Equivalence, not byte-identity, is the round-trip contract.
//
// STRUCT children share their parent's row count and per-row alignment;
// LIST children have an independent row count addressed via offsets.
// ====================================================================================

pub mod compare;
pub mod storage;
pub mod view;

// --- Public API Re-exports ---
pub use compare::{columns_equivalent, rows_equivalent, tables_equivalent};
pub use storage::{Column, ColumnData, Table};
pub use view::{ColumnView, TableView};
