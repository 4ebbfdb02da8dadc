// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the sole Arrow-facing boundary of the lamina library. The
// core (columns, bitmasks, superimposer, flatten/unflatten) is pure and
// Arrow-agnostic; everything that touches `arrow` types lives here.
//
// Data Flow (inbound):
//
//   1. [Caller]                 -> holds Arrow arrays / RecordBatches
//         |
//         `-> `from_arrow` / `record_batch_to_table`
//         |
//   2. [Pure core]              -> owned `Column`s / `Table`s, transformed by
//                                  the superimposer and flatten/unflatten
//
// Data Flow (outbound, to the disk-writer collaborator):
//
//   1. [Pure core]              -> a `FlattenedTable` of leaf-only views with
//                                  ancestor nulls already applied
//         |
//         `-> `to_arrow` per leaf / `flattened_to_record_batch`
//         |
//   2. [Writer]                 -> Arrow leaf arrays + layout metadata
//
// Nested views deliberately do NOT cross the bridge outward: the writer
// receives flattened, null-superimposed leaf columns, per the collaborator
// contract.
// ====================================================================================

pub mod arrow_impl;

// --- Public API Re-exports ---
pub use arrow_impl::{
    flattened_to_record_batch, from_arrow, record_batch_to_table, to_arrow,
};

#[cfg(test)]
mod tests;
