//! This module provides a set of shared, low-level utility functions used
//! throughout the lamina Rust core.
//!
//! Its primary responsibilities include:
//! 1.  Providing safe, validated conversions between raw byte slices and typed slices.
//! 2.  Offering the process-wide verbose-logging switch used by tests and
//!     embedding applications.

use std::sync::Once;

use crate::error::LaminaError;

//==================================================================================
// 1. Core Utility Functions
//==================================================================================

/// Safely reinterprets a byte slice as a slice of a primitive type.
///
/// This function is the primary gateway for converting raw column buffers into
/// workable, typed slices. It performs critical safety checks before creating
/// a zero-copy view of the data.
///
/// # Errors
/// Returns a `LaminaError::PodCast` if the byte slice length is not perfectly
/// divisible by the size of the target type `T`, or if the slice is misaligned.
pub fn safe_bytes_to_typed_slice<T>(bytes: &[u8]) -> Result<&[T], LaminaError>
where
    T: bytemuck::Pod,
{
    // Bytemuck's error type contains detailed info about the failure
    // (alignment, length, etc.), which is preserved in the PodCast variant.
    bytemuck::try_cast_slice(bytes).map_err(LaminaError::from)
}

/// Converts a slice of primitive values into a `Vec<u8>` in native byte order.
///
/// This function performs a memory copy to create a new, owned byte vector.
pub fn typed_slice_to_bytes<T: bytemuck::Pod>(data: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}

//==================================================================================
// 2. Logging Control
//==================================================================================

static LOGGER_INIT: Once = Once::new();

/// Enables verbose (`debug`-level) logging for the lamina core.
///
/// Safe to call more than once; only the first call installs the logger.
pub fn enable_verbose_logging() {
    LOGGER_INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .is_test(cfg!(test))
            .init();
    });
}
