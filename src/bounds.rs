//! Null-aware bounds and range checks over integer arrays.
//!
//! [`check_index_bounds`] validates an index array before a take/gather:
//! every valid index must lie in `[0, upper_limit)`. [`check_integers_in_range`]
//! and [`integers_can_fit`] validate values against inclusive bounds, e.g.,
//! before narrowing a column to a smaller type.
//!
//! All checks scan in two phases over [`BLOCK_LEN`]-element validity blocks.
//! The first phase folds a branch-free "any violation" flag over the whole
//! block. Fully valid blocks skip the validity mask and fully null blocks are
//! skipped. Only a block that reports a violation is rescanned element by
//! element to find the first offending position. Null slots are never
//! compared, whatever they hold.
//!
//! [`BLOCK_LEN`]: crate::bitmap::BLOCK_LEN
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use colints::bitmap::Bitmap;
//! use colints::{check_index_bounds, IntArray};
//!
//! let indices = [0i32, 4, -7, 2];
//! let e = check_index_bounds(&IntArray::new(&indices), 5).unwrap_err();
//! assert_eq!(e.position(), Some(2));
//!
//! // A null index may hold anything.
//! let validity = Bitmap::from_bits([true, true, false, true]);
//! let array = IntArray::with_validity(&indices, validity.view())?;
//! check_index_bounds(&array, 5)?;
//! # Ok(())
//! # }
//! ```
use crate::array::IntArray;
use crate::error::{Error, Result};
use crate::int_types::{IntKind, IntType};

/// Returns the position of the first valid element for which `is_violation` holds.
#[inline(always)]
fn find_first_violation<T, F>(values: &IntArray<'_, T>, is_violation: F) -> Option<usize>
where
    T: IntType,
    F: Fn(T) -> bool,
{
    let vals = values.values();
    for block in values.blocks() {
        let chunk = &vals[block.range()];
        let hit = if block.all_valid() {
            chunk.iter().fold(false, |acc, &v| acc | is_violation(v))
        } else if block.none_valid() {
            false
        } else {
            chunk
                .iter()
                .enumerate()
                .fold(false, |acc, (j, &v)| acc | (block.is_valid(j) & is_violation(v)))
        };
        if hit {
            if let Some(j) = chunk
                .iter()
                .enumerate()
                .position(|(j, &v)| block.is_valid(j) && is_violation(v))
            {
                return Some(block.start + j);
            }
        }
    }
    None
}

/// Checks that every valid index lies in `[0, upper_limit)`.
///
/// Indices are compared in their native signedness, so negative values of
/// signed types are always out of bounds. An `upper_limit` of zero rejects
/// every valid index.
///
/// # Errors
///
/// [`Error::IndexOutOfBounds`] for the first offending valid index.
///
/// # Examples
///
/// ```
/// use colints::{check_index_bounds, Error, IntArray};
///
/// assert!(check_index_bounds(&IntArray::new(&[0u8, 100, 200]), 201).is_ok());
///
/// let e = check_index_bounds(&IntArray::new(&[0u8, 100, 200]), 200);
/// assert_eq!(
///     e,
///     Err(Error::IndexOutOfBounds { position: 2, index: 200, upper_limit: 200 })
/// );
/// ```
pub fn check_index_bounds<T: IntType>(
    indices: &IntArray<'_, T>,
    upper_limit: u64,
) -> Result<()> {
    let position = if T::SIGNED {
        find_first_violation(indices, |v| {
            let x = v.as_i64();
            (x < 0) | (x as u64 >= upper_limit)
        })
    } else {
        if upper_limit > T::max_value().as_u64() {
            return Ok(());
        }
        find_first_violation(indices, |v| v.as_u64() >= upper_limit)
    };
    match position {
        None => Ok(()),
        Some(position) => {
            let index = indices.values()[position].widen();
            tracing::debug!(position, index = %index, upper_limit, "index out of bounds");
            Err(Error::IndexOutOfBounds {
                position,
                index,
                upper_limit,
            })
        }
    }
}

#[inline(always)]
fn find_out_of_range<T: IntType>(
    values: &IntArray<'_, T>,
    lower: T,
    upper: T,
) -> Option<usize> {
    find_first_violation(values, |v| (v < lower) | (v > upper))
}

fn out_of_range<T: IntType>(
    values: &IntArray<'_, T>,
    position: usize,
    lower: i128,
    upper: i128,
) -> Error {
    let value = values.values()[position].widen();
    tracing::debug!(
        position,
        value = %value,
        lower = %lower,
        upper = %upper,
        "integer out of range"
    );
    Error::IntegerOutOfRange {
        position,
        value,
        lower,
        upper,
    }
}

/// Checks that every valid value lies in `[lower, upper]`.
///
/// If `lower > upper`, every valid value is rejected.
///
/// # Errors
///
/// [`Error::IntegerOutOfRange`] for the first offending valid value.
///
/// # Examples
///
/// ```
/// use colints::{check_integers_in_range, IntArray};
///
/// let array = IntArray::new(&[-3i16, 0, 12]);
/// assert!(check_integers_in_range(&array, -3, 12).is_ok());
///
/// let e = check_integers_in_range(&array, -3, 11).unwrap_err();
/// assert_eq!(e.to_string(), "integer value 12 at position 2 not in range: -3 to 11.");
/// ```
pub fn check_integers_in_range<T: IntType>(
    values: &IntArray<'_, T>,
    lower: T,
    upper: T,
) -> Result<()> {
    match find_out_of_range(values, lower, upper) {
        None => Ok(()),
        Some(position) => Err(out_of_range(values, position, lower.widen(), upper.widen())),
    }
}

/// Like [`check_integers_in_range`], with bounds given as [`i128`] and
/// clamped to `T` first. Errors report the bounds as given.
pub(crate) fn check_integers_in_range_wide<T: IntType>(
    values: &IntArray<'_, T>,
    lower: i128,
    upper: i128,
) -> Result<()> {
    let lo = lower.max(T::KIND.min_value());
    let hi = upper.min(T::KIND.max_value());
    let bounds = (num_traits::cast::<i128, T>(lo), num_traits::cast::<i128, T>(hi));
    let position = match bounds {
        (Some(lo), Some(hi)) if lo <= hi => find_out_of_range(values, lo, hi),
        // The range misses `T` entirely.
        _ => find_first_violation(values, |_| true),
    };
    match position {
        None => Ok(()),
        Some(position) => Err(out_of_range(values, position, lower, upper)),
    }
}

/// Checks that every valid value is representable in `target`.
///
/// Returns immediately if `target` covers every value of `T`.
///
/// # Errors
///
/// [`Error::IntegerOutOfRange`] for the first valid value that does not fit,
/// reported against the bounds of `target`.
///
/// # Examples
///
/// ```
/// use colints::int_types::IntKind;
/// use colints::{integers_can_fit, IntArray};
///
/// let array = IntArray::new(&[0u32, 255, 256]);
/// assert!(integers_can_fit(&array, IntKind::Int16).is_ok());
///
/// let e = integers_can_fit(&array, IntKind::UInt8).unwrap_err();
/// assert_eq!(e.to_string(), "integer value 256 at position 2 not in range: 0 to 255.");
/// ```
pub fn integers_can_fit<T: IntType>(values: &IntArray<'_, T>, target: IntKind) -> Result<()> {
    if target.covers(T::KIND) {
        return Ok(());
    }
    check_integers_in_range_wide(values, target.min_value(), target.max_value())
}
