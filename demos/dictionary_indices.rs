//! Unifies two dictionary-encoded string columns and stores the remapped
//! indices in the narrowest integer type.
use std::collections::HashMap;

use colints::bitmap::Bitmap;
use colints::prelude::*;
use colints::transpose::transpose_ints_to_vec;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let left_dict = ["apple", "pear", "plum"];
    let right_dict = ["plum", "fig", "apple", "kiwi"];
    let right_indices = [0i8, 3, 1, 0, 2, 3];
    let validity = Bitmap::from_bits([true, true, false, true, true, true]);

    // Unified dictionary: left entries first, then new right entries.
    let mut unified: Vec<&str> = left_dict.to_vec();
    let mut position: HashMap<&str, i32> = unified
        .iter()
        .enumerate()
        .map(|(i, s)| (*s, i as i32))
        .collect();
    let transpose_map: Vec<i32> = right_dict
        .iter()
        .map(|s| {
            *position.entry(*s).or_insert_with(|| {
                unified.push(*s);
                unified.len() as i32 - 1
            })
        })
        .collect();

    let remapped: Vec<i64> = transpose_ints_to_vec(&right_indices, &transpose_map);
    let array = IntArray::with_validity(&remapped, validity.view())?;
    check_index_bounds(&array, unified.len() as u64)?;

    let width = detect_width(&array, Width::One);
    println!("unified dictionary: {unified:?}");
    println!("remapped indices: {remapped:?}");
    println!("narrowest index type: {}", width.signed_kind());

    integers_can_fit(&array, IntKind::Int8)?;
    let mut narrow = vec![0i8; remapped.len()];
    downcast_ints(&remapped, &mut narrow);
    println!("stored as int8: {narrow:?}");
    Ok(())
}
