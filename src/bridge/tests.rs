// In: src/bridge/tests.rs

//! End-to-end bridge tests: Arrow in, pure-core transforms, Arrow out.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int32Array, StringArray, StructArray};
use arrow::buffer::NullBuffer;
use arrow::datatypes::{DataType, Field, Fields};
use arrow::record_batch::RecordBatch;

use crate::bridge::{flattened_to_record_batch, from_arrow, record_batch_to_table};
use crate::column::tables_equivalent;
use crate::config::NullabilityPolicy;
use crate::flatten::{flatten_nested_columns, unflatten_nested_columns};
use crate::types::LaminaDataType;

fn sample_struct_array() -> StructArray {
    let nums: ArrayRef = Arc::new(Int32Array::from(vec![Some(1), None, Some(3)]));
    let strs: ArrayRef = Arc::new(StringArray::from(vec![Some("a"), Some("b"), None]));
    let fields: Fields = vec![
        Arc::new(Field::new("n", DataType::Int32, true)),
        Arc::new(Field::new("s", DataType::Utf8, true)),
    ]
    .into();
    StructArray::new(
        fields,
        vec![nums, strs],
        Some(NullBuffer::from(vec![true, true, false])),
    )
}

#[test]
fn test_struct_array_marshalls_with_children() {
    let column = from_arrow(&sample_struct_array()).unwrap();
    assert_eq!(column.dtype(), LaminaDataType::Struct);
    assert_eq!(column.len(), 3);
    assert_eq!(column.null_count(), 1);

    let view = column.view();
    assert_eq!(view.num_children(), 2);
    assert_eq!(view.child(0).unwrap().dtype(), LaminaDataType::Int32);
    assert_eq!(view.child(1).unwrap().dtype(), LaminaDataType::Utf8);
    // Arrow keeps struct nulls and member nulls independent; so do we.
    assert_eq!(view.child(0).unwrap().null_count(), 1);
    assert_eq!(view.child(1).unwrap().null_count(), 1);
}

#[test]
fn test_record_batch_flatten_round_trip() {
    let plain: ArrayRef = Arc::new(Int32Array::from(vec![Some(10), Some(20), None]));
    let structs: ArrayRef = Arc::new(sample_struct_array());
    let batch = RecordBatch::try_from_iter(vec![("plain", plain), ("nested", structs)]).unwrap();

    let table = record_batch_to_table(&batch).unwrap();
    let view = table.view();

    let flattened = flatten_nested_columns(&view, &[], &[], NullabilityPolicy::Force).unwrap();
    let unflattened = unflatten_nested_columns(flattened.flattened_columns(), &view).unwrap();
    assert!(tables_equivalent(&view, &unflattened));
}

#[test]
fn test_flattened_record_batch_for_the_writer() {
    let plain: ArrayRef = Arc::new(Int32Array::from(vec![Some(10), Some(20), None]));
    let structs: ArrayRef = Arc::new(sample_struct_array());
    let batch = RecordBatch::try_from_iter(vec![("plain", plain), ("nested", structs)]).unwrap();

    let table = record_batch_to_table(&batch).unwrap();
    let view = table.view();
    let flattened = flatten_nested_columns(&view, &[], &[], NullabilityPolicy::Force).unwrap();

    let out = flattened_to_record_batch(&flattened).unwrap();
    assert_eq!(out.num_columns(), 3);
    let schema = out.schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, vec!["c0", "c1.0", "c1.1"]);

    // The struct's own null (row 2) is baked into both emitted members.
    let nums = out.column(1).as_any().downcast_ref::<Int32Array>().unwrap();
    assert!(nums.is_null(1)); // the member's own null
    assert!(nums.is_null(2)); // superimposed from the struct
    let strs = out.column(2).as_any().downcast_ref::<StringArray>().unwrap();
    assert!(strs.is_null(2));
    assert!(!strs.is_null(0));
}
