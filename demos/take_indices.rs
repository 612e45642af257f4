//! Validates nullable take indices before gathering values through them.
use anyhow::Context;
use colints::bitmap::Bitmap;
use colints::prelude::*;
use tracing_subscriber::EnvFilter;

fn take(values: &[f64], indices: &IntArray<'_, i32>) -> anyhow::Result<Vec<Option<f64>>> {
    check_index_bounds(indices, values.len() as u64)
        .with_context(|| format!("taking from {} values", values.len()))?;
    Ok(indices
        .iter()
        .map(|idx| idx.map(|i| values[i as usize]))
        .collect())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let values = [1.5, 2.5, 3.5, 4.5];

    // The null slot holds a sentinel that would be out of bounds.
    let indices = [3, -1, 0, 2];
    let validity = Bitmap::from_bits([true, false, true, true]);
    let array = IntArray::with_validity(&indices, validity.view())?;
    println!("taken: {:?}", take(&values, &array)?);

    let bad = [0, 1, 4];
    match take(&values, &IntArray::new(&bad)) {
        Ok(taken) => println!("unexpectedly taken: {taken:?}"),
        Err(e) => println!("rejected: {e:#}"),
    }
    Ok(())
}
