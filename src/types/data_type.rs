//! This module defines the canonical, type-safe representation of data types
//! used throughout the lamina columnar engine.

use crate::error::LaminaError;
use arrow::datatypes::DataType as ArrowDataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical, internal representation of a column's logical type.
///
/// This enum is the closed type tag the recursive algorithms dispatch on:
/// everything except `Struct` and `List` is a leaf. `Boolean` is stored one
/// byte per row, so it participates in the fixed-width paths.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LaminaDataType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Boolean,
    Utf8,
    Struct,
    List,
}

impl LaminaDataType {
    /// Converts an Arrow `DataType` into a `LaminaDataType`.
    ///
    /// Nested Arrow types map onto the bare `Struct`/`List` tags; their child
    /// shapes are carried by the column itself, not the type tag.
    pub fn from_arrow_type(arrow_type: &ArrowDataType) -> Result<Self, LaminaError> {
        match arrow_type {
            ArrowDataType::Int8 => Ok(Self::Int8),
            ArrowDataType::Int16 => Ok(Self::Int16),
            ArrowDataType::Int32 => Ok(Self::Int32),
            ArrowDataType::Int64 => Ok(Self::Int64),
            ArrowDataType::UInt8 => Ok(Self::UInt8),
            ArrowDataType::UInt16 => Ok(Self::UInt16),
            ArrowDataType::UInt32 => Ok(Self::UInt32),
            ArrowDataType::UInt64 => Ok(Self::UInt64),
            ArrowDataType::Float32 => Ok(Self::Float32),
            ArrowDataType::Float64 => Ok(Self::Float64),
            ArrowDataType::Boolean => Ok(Self::Boolean),
            ArrowDataType::Utf8 => Ok(Self::Utf8),
            ArrowDataType::Struct(_) => Ok(Self::Struct),
            ArrowDataType::List(_) => Ok(Self::List),
            dt => Err(LaminaError::UnsupportedType(format!(
                "Cannot convert Arrow type {:?} to LaminaDataType",
                dt
            ))),
        }
    }

    /// Converts a *leaf* `LaminaDataType` back into an Arrow `DataType`.
    ///
    /// Nested tags carry no child information, so the bridge reconstructs
    /// nested Arrow types from the column shape instead of calling this.
    pub fn to_arrow_type(&self) -> Result<ArrowDataType, LaminaError> {
        match self {
            Self::Int8 => Ok(ArrowDataType::Int8),
            Self::Int16 => Ok(ArrowDataType::Int16),
            Self::Int32 => Ok(ArrowDataType::Int32),
            Self::Int64 => Ok(ArrowDataType::Int64),
            Self::UInt8 => Ok(ArrowDataType::UInt8),
            Self::UInt16 => Ok(ArrowDataType::UInt16),
            Self::UInt32 => Ok(ArrowDataType::UInt32),
            Self::UInt64 => Ok(ArrowDataType::UInt64),
            Self::Float32 => Ok(ArrowDataType::Float32),
            Self::Float64 => Ok(ArrowDataType::Float64),
            Self::Boolean => Ok(ArrowDataType::Boolean),
            Self::Utf8 => Ok(ArrowDataType::Utf8),
            dt => Err(LaminaError::UnsupportedType(format!(
                "LaminaDataType::{:?} has no child-free Arrow equivalent",
                dt
            ))),
        }
    }

    /// Returns `true` for the two nested type tags, `Struct` and `List`.
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Struct | Self::List)
    }

    /// Returns the per-row storage width in bytes for fixed-width leaf types.
    ///
    /// `Utf8` and the nested tags return `None`; their storage is addressed
    /// through offsets rather than a constant stride.
    pub fn fixed_width_bytes(&self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 | Self::Boolean => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(4),
            Self::Int64 | Self::UInt64 | Self::Float64 => Some(8),
            Self::Utf8 | Self::Struct | Self::List => None,
        }
    }
}

/// Provides the canonical string representation for a `LaminaDataType`.
impl fmt::Display for LaminaDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These string representations are part of the public contract.
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_round_trip_for_leaves() {
        let leaves = [
            LaminaDataType::Int8,
            LaminaDataType::Int64,
            LaminaDataType::UInt32,
            LaminaDataType::Float64,
            LaminaDataType::Boolean,
            LaminaDataType::Utf8,
        ];
        for dt in leaves {
            let arrow_dt = dt.to_arrow_type().unwrap();
            assert_eq!(LaminaDataType::from_arrow_type(&arrow_dt).unwrap(), dt);
        }
    }

    #[test]
    fn test_nested_tags_have_no_bare_arrow_type() {
        assert!(LaminaDataType::Struct.to_arrow_type().is_err());
        assert!(LaminaDataType::List.to_arrow_type().is_err());
        assert!(LaminaDataType::Struct.is_nested());
        assert!(LaminaDataType::List.is_nested());
        assert!(!LaminaDataType::Utf8.is_nested());
    }

    #[test]
    fn test_fixed_widths() {
        assert_eq!(LaminaDataType::Boolean.fixed_width_bytes(), Some(1));
        assert_eq!(LaminaDataType::Int16.fixed_width_bytes(), Some(2));
        assert_eq!(LaminaDataType::Float32.fixed_width_bytes(), Some(4));
        assert_eq!(LaminaDataType::UInt64.fixed_width_bytes(), Some(8));
        assert_eq!(LaminaDataType::Utf8.fixed_width_bytes(), None);
        assert_eq!(LaminaDataType::Struct.fixed_width_bytes(), None);
    }
}
