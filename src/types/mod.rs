//! This module defines the core, strongly-typed data representations used
//! throughout the lamina columnar engine.
//!
//! It currently includes the canonical `LaminaDataType` enum which replaces
//! fragile string-based types with a safe, serializable, and Arrow-compatible enum.

pub mod data_type;

// Re-export the main type(s) for easier access.
pub use data_type::LaminaDataType;
