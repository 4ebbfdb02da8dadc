// In: src/error.rs

//! This module defines the single, unified error type for the entire lamina library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaminaError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// A LIST column was found where the flatten transform requires leaf-only
    /// decomposition. The whole call aborts; no partial flat table is produced.
    #[error("Structure cannot be flattened: {0}")]
    StructuralUnsupported(String),

    /// A nested-type contract was violated: wrong column kind for an operation,
    /// or a template/flat-table arity mismatch during unflatten.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Mismatched row-count or offset expectations between collaborating columns.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library, raised by the bridge layer.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error from the Serde JSON library, typically during layout serialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for LaminaError {
    fn from(err: bytemuck::PodCastError) -> Self {
        LaminaError::PodCast(err.to_string())
    }
}
