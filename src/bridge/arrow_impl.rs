// In: src/bridge/arrow_impl.rs

//! DATA MARSHALLING between Arrow arrays and the pure column model.
//!
//! Inbound, `from_arrow` materializes any supported Arrow array (primitives,
//! booleans, utf8, structs, lists) into an owned [`Column`], unpacking the
//! Arrow null bitmap into a [`Bitmask`]. Outbound, `to_arrow` rebuilds Arrow
//! arrays from *leaf* views only; nested columns are flattened first, and the
//! writer-facing `flattened_to_record_batch` bundles the flat leaves with
//! layout-derived field names.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, ListArray, PrimitiveArray, StringArray, StringBuilder,
    StructArray,
};
use arrow::buffer::{BooleanBuffer, NullBuffer, ScalarBuffer};
use arrow::datatypes::{
    ArrowPrimitiveType, DataType as ArrowDataType, Field, Float32Type, Float64Type, Int16Type,
    Int32Type, Int64Type, Int8Type, Schema, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::record_batch::RecordBatch;

use crate::column::{Column, ColumnView, Table};
use crate::error::LaminaError;
use crate::flatten::FlattenedTable;
use crate::null_handling::bitmask::Bitmask;
use crate::types::LaminaDataType;

//==================================================================================
// 1. Arrow -> Column
//==================================================================================

/// Materializes an Arrow array into an owned `Column`.
///
/// If the array contains nulls, its null bitmap is unpacked into a `Bitmask`
/// (1 = valid), offset-adjusted the way Arrow slices adjust their buffers.
/// Struct and list children are converted recursively; list children are
/// rebased so the column's offsets start at zero.
pub fn from_arrow(array: &dyn Array) -> Result<Column, LaminaError> {
    let validity = array.nulls().map(|nulls| {
        let booleans = BooleanBuffer::new(nulls.buffer().clone(), nulls.offset(), nulls.len());
        booleans.iter().collect::<Bitmask>()
    });

    macro_rules! convert_primitive {
        ($T:ty, $DT:expr) => {{
            let primitive = array.as_any().downcast_ref::<PrimitiveArray<$T>>().unwrap();
            Column::new_fixed($DT, &primitive.values()[..], validity)
        }};
    }

    match array.data_type() {
        ArrowDataType::Int8 => convert_primitive!(Int8Type, LaminaDataType::Int8),
        ArrowDataType::Int16 => convert_primitive!(Int16Type, LaminaDataType::Int16),
        ArrowDataType::Int32 => convert_primitive!(Int32Type, LaminaDataType::Int32),
        ArrowDataType::Int64 => convert_primitive!(Int64Type, LaminaDataType::Int64),
        ArrowDataType::UInt8 => convert_primitive!(UInt8Type, LaminaDataType::UInt8),
        ArrowDataType::UInt16 => convert_primitive!(UInt16Type, LaminaDataType::UInt16),
        ArrowDataType::UInt32 => convert_primitive!(UInt32Type, LaminaDataType::UInt32),
        ArrowDataType::UInt64 => convert_primitive!(UInt64Type, LaminaDataType::UInt64),
        ArrowDataType::Float32 => convert_primitive!(Float32Type, LaminaDataType::Float32),
        ArrowDataType::Float64 => convert_primitive!(Float64Type, LaminaDataType::Float64),
        ArrowDataType::Boolean => {
            let booleans = array.as_any().downcast_ref::<BooleanArray>().unwrap();
            let bytes: Vec<u8> = booleans.values().iter().map(|b| b as u8).collect();
            Column::new_fixed(LaminaDataType::Boolean, &bytes, validity)
        }
        ArrowDataType::Utf8 => {
            let strings = array.as_any().downcast_ref::<StringArray>().unwrap();
            let values: Vec<&str> = (0..strings.len())
                .map(|i| if strings.is_valid(i) { strings.value(i) } else { "" })
                .collect();
            Column::new_utf8(&values, validity)
        }
        ArrowDataType::Struct(_) => {
            let structs = array.as_any().downcast_ref::<StructArray>().unwrap();
            let children = structs
                .columns()
                .iter()
                .map(|child| from_arrow(child.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;
            Column::new_struct(children, validity)
        }
        ArrowDataType::List(_) => {
            let lists = array.as_any().downcast_ref::<ListArray>().unwrap();
            let raw_offsets = lists.value_offsets();
            let first = raw_offsets[0];
            let last = raw_offsets[raw_offsets.len() - 1];
            let offsets: Vec<i32> = raw_offsets.iter().map(|offset| offset - first).collect();
            let elements = lists.values().slice(first as usize, (last - first) as usize);
            let child = from_arrow(elements.as_ref())?;
            Column::new_list(offsets, child, validity)
        }
        dt => Err(LaminaError::UnsupportedType(format!(
            "Unsupported Arrow type for the lamina bridge: {}",
            dt
        ))),
    }
}

/// Materializes every column of a `RecordBatch` into an owned `Table`.
pub fn record_batch_to_table(batch: &RecordBatch) -> Result<Table, LaminaError> {
    let columns = batch
        .columns()
        .iter()
        .map(|column| from_arrow(column.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Table::new(columns)
}

//==================================================================================
// 2. Column -> Arrow
//==================================================================================

/// Rebuilds an Arrow array from a *leaf* column view.
///
/// Nested views are refused: the disk-writer collaborator receives
/// flattened, null-superimposed leaf columns, never raw nested shapes.
pub fn to_arrow(view: &ColumnView<'_>) -> Result<ArrayRef, LaminaError> {
    let nulls = view
        .validity()
        .map(|_| NullBuffer::from_iter((0..view.size()).map(|row| view.is_valid(row))));

    macro_rules! build_primitive {
        ($T:ty) => {{
            let values: Vec<<$T as ArrowPrimitiveType>::Native> = view
                .fixed_window()
                .chunks_exact(std::mem::size_of::<<$T as ArrowPrimitiveType>::Native>())
                .map(bytemuck::pod_read_unaligned)
                .collect();
            Ok(Arc::new(PrimitiveArray::<$T>::new(ScalarBuffer::from(values), nulls)) as ArrayRef)
        }};
    }

    match view.dtype() {
        LaminaDataType::Int8 => build_primitive!(Int8Type),
        LaminaDataType::Int16 => build_primitive!(Int16Type),
        LaminaDataType::Int32 => build_primitive!(Int32Type),
        LaminaDataType::Int64 => build_primitive!(Int64Type),
        LaminaDataType::UInt8 => build_primitive!(UInt8Type),
        LaminaDataType::UInt16 => build_primitive!(UInt16Type),
        LaminaDataType::UInt32 => build_primitive!(UInt32Type),
        LaminaDataType::UInt64 => build_primitive!(UInt64Type),
        LaminaDataType::Float32 => build_primitive!(Float32Type),
        LaminaDataType::Float64 => build_primitive!(Float64Type),
        LaminaDataType::Boolean => {
            let values =
                BooleanBuffer::from_iter(view.fixed_window().iter().map(|&byte| byte != 0));
            Ok(Arc::new(BooleanArray::new(values, nulls)) as ArrayRef)
        }
        LaminaDataType::Utf8 => {
            let mut builder = StringBuilder::new();
            for row in 0..view.size() {
                if view.is_valid(row) {
                    let value = std::str::from_utf8(view.utf8_value_bytes(row)).map_err(|e| {
                        LaminaError::InternalError(format!(
                            "utf8 column carries invalid bytes: {}",
                            e
                        ))
                    })?;
                    builder.append_value(value);
                } else {
                    builder.append_null();
                }
            }
            Ok(Arc::new(builder.finish()) as ArrayRef)
        }
        dt => Err(LaminaError::UnsupportedType(format!(
            "only leaf columns cross the bridge (got {}); flatten the table first",
            dt
        ))),
    }
}

/// Bundles a flattened table into a `RecordBatch` for the disk-writer
/// collaborator, naming each field after its layout path (`c1.0` is member 0
/// of the table's column 1).
pub fn flattened_to_record_batch(
    flattened: &FlattenedTable<'_>,
) -> Result<RecordBatch, LaminaError> {
    let num_leaves = flattened.flattened_columns().num_columns();
    let mut fields = Vec::with_capacity(num_leaves);
    let mut arrays = Vec::with_capacity(num_leaves);
    for (view, leaf) in flattened
        .flattened_columns()
        .columns()
        .iter()
        .zip(&flattened.layout().leaves)
    {
        let path = leaf
            .path
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(".");
        let array = to_arrow(view)?;
        fields.push(Field::new(
            format!("c{}", path),
            array.data_type().clone(),
            leaf.nullable,
        ));
        arrays.push(array);
    }
    let schema = Arc::new(Schema::new(fields));
    Ok(RecordBatch::try_new(schema, arrays)?)
}
