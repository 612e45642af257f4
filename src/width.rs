//! Minimal storage width detection.
//!
//! Given a column of integers, [`detect_width`] returns the smallest [`Width`]
//! (1, 2, 4 or 8 bytes) able to hold every valid value, never narrower than a
//! caller-supplied floor. Null slots are skipped whatever they hold.
//!
//! Unsigned values are ORed together; the OR needs exactly as many bytes as
//! the largest value. Signed values track their minimum and maximum, which
//! must both fit the two's complement range of the width. Invalid lanes
//! contribute zero, which fits any width.
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use colints::bitmap::Bitmap;
//! use colints::{detect_width, IntArray, Width};
//!
//! let values = [0i64, 127, -129];
//! assert_eq!(detect_width(&IntArray::new(&values), Width::One), Width::Two);
//!
//! // -129 is null.
//! let validity = Bitmap::from_bits([true, true, false]);
//! let array = IntArray::with_validity(&values, validity.view())?;
//! assert_eq!(detect_width(&array, Width::One), Width::One);
//! assert_eq!(detect_width(&array, Width::Four), Width::Four);
//! # Ok(())
//! # }
//! ```
use std::fmt;

use crate::array::IntArray;
use crate::error::{Error, Result};
use crate::int_types::{IntKind, IntType};

/// Storage width of an integer in bytes.
///
/// Widths are ordered by size, so the wider of two is their [`Ord::max`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Width {
    /// One byte.
    #[default]
    One = 1,
    /// Two bytes.
    Two = 2,
    /// Four bytes.
    Four = 4,
    /// Eight bytes.
    Eight = 8,
}

impl Width {
    /// All widths in increasing order.
    pub const ALL: [Width; 4] = [Width::One, Width::Two, Width::Four, Width::Eight];

    /// Number of bytes.
    #[inline(always)]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Number of bits.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self as u32 * 8
    }

    /// Smallest width holding the unsigned value `x`.
    #[inline(always)]
    pub const fn for_unsigned(x: u64) -> Self {
        if x <= u8::MAX as u64 {
            Width::One
        } else if x <= u16::MAX as u64 {
            Width::Two
        } else if x <= u32::MAX as u64 {
            Width::Four
        } else {
            Width::Eight
        }
    }

    /// Smallest width holding every value in `[min, max]`.
    #[inline(always)]
    pub const fn for_signed(min: i64, max: i64) -> Self {
        if min >= i8::MIN as i64 && max <= i8::MAX as i64 {
            Width::One
        } else if min >= i16::MIN as i64 && max <= i16::MAX as i64 {
            Width::Two
        } else if min >= i32::MIN as i64 && max <= i32::MAX as i64 {
            Width::Four
        } else {
            Width::Eight
        }
    }

    /// Unsigned type of this width.
    pub const fn unsigned_kind(self) -> IntKind {
        match self {
            Width::One => IntKind::UInt8,
            Width::Two => IntKind::UInt16,
            Width::Four => IntKind::UInt32,
            Width::Eight => IntKind::UInt64,
        }
    }

    /// Signed type of this width.
    pub const fn signed_kind(self) -> IntKind {
        match self {
            Width::One => IntKind::Int8,
            Width::Two => IntKind::Int16,
            Width::Four => IntKind::Int32,
            Width::Eight => IntKind::Int64,
        }
    }
}

impl TryFrom<u8> for Width {
    type Error = Error;

    fn try_from(bytes: u8) -> Result<Self> {
        match bytes {
            1 => Ok(Width::One),
            2 => Ok(Width::Two),
            4 => Ok(Width::Four),
            8 => Ok(Width::Eight),
            _ => Err(Error::invalid_argument(format!(
                "width must be one of 1, 2, 4 or 8, but got {bytes}."
            ))),
        }
    }
}

impl From<Width> for u8 {
    fn from(width: Width) -> Self {
        width as u8
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

/// All ones if the `j`-th bit of `bits` is set, zero otherwise.
#[inline(always)]
const fn lane_mask(bits: u64, j: usize) -> u64 {
    0u64.wrapping_sub((bits >> j) & 1)
}

/// Returns the smallest width able to hold every valid value of `values`,
/// but never narrower than `floor`.
///
/// If every value is null (or `values` is empty), `floor` is returned.
///
/// # Complexity
///
/// Linear; the scan stops early once eight bytes are known to be needed.
///
/// # Examples
///
/// ```
/// use colints::{detect_width, IntArray, Width};
///
/// let array = IntArray::new(&[0u32, 0xff, 0x100]);
/// assert_eq!(detect_width(&array, Width::One), Width::Two);
/// assert_eq!(detect_width(&IntArray::new(&[0xffu32]), Width::One), Width::One);
/// ```
pub fn detect_width<T: IntType>(values: &IntArray<'_, T>, floor: Width) -> Width {
    if floor == Width::Eight {
        return floor;
    }
    let detected = if T::SIGNED {
        detect_signed_width(values)
    } else {
        detect_unsigned_width(values)
    };
    floor.max(detected)
}

fn detect_unsigned_width<T: IntType>(values: &IntArray<'_, T>) -> Width {
    let vals = values.values();
    let mut acc = 0u64;
    for block in values.blocks() {
        let chunk = &vals[block.range()];
        if block.all_valid() {
            acc = chunk.iter().fold(acc, |acc, &v| acc | v.as_u64());
        } else if !block.none_valid() {
            acc = chunk
                .iter()
                .enumerate()
                .fold(acc, |acc, (j, &v)| acc | (v.as_u64() & lane_mask(block.bits, j)));
        }
        if acc > u32::MAX as u64 {
            tracing::trace!(position = block.start, "unsigned width saturated");
            return Width::Eight;
        }
    }
    Width::for_unsigned(acc)
}

fn detect_signed_width<T: IntType>(values: &IntArray<'_, T>) -> Width {
    let vals = values.values();
    let (mut min, mut max) = (0i64, 0i64);
    for block in values.blocks() {
        let chunk = &vals[block.range()];
        if block.all_valid() {
            for &v in chunk {
                let v = v.as_i64();
                min = min.min(v);
                max = max.max(v);
            }
        } else if !block.none_valid() {
            for (j, &v) in chunk.iter().enumerate() {
                let v = v.as_i64() & lane_mask(block.bits, j) as i64;
                min = min.min(v);
                max = max.max(v);
            }
        }
        if Width::for_signed(min, max) == Width::Eight {
            tracing::trace!(position = block.start, "signed width saturated");
            return Width::Eight;
        }
    }
    Width::for_signed(min, max)
}

/// Returns the smallest width able to hold every value of `values`,
/// but never narrower than `floor`.
///
/// Shorthand for [`detect_width`] over a fully valid `u64` column.
pub fn detect_uint_width(values: &[u64], floor: Width) -> Width {
    detect_width(&IntArray::new(values), floor)
}

/// Returns the smallest width able to hold every value of `values`,
/// but never narrower than `floor`.
///
/// Shorthand for [`detect_width`] over a fully valid `i64` column.
pub fn detect_int_width(values: &[i64], floor: Width) -> Width {
    detect_width(&IntArray::new(values), floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    const N: usize = 40;
    const HUGE: u64 = 0x0123_4567_89ab_cdef;

    fn check_uint_width(values: &[u64], expected: Width) {
        for floor in Width::ALL {
            assert_eq!(
                detect_uint_width(values, floor),
                floor.max(expected),
                "values={values:?} floor={floor}"
            );
        }
    }

    fn check_uint_width_with_validity(values: &[u64], valid: &[bool], expected: Width) {
        let bitmap = Bitmap::from_bits(valid.iter().copied());
        let array = IntArray::with_validity(values, bitmap.view()).unwrap();
        for floor in Width::ALL {
            assert_eq!(
                detect_width(&array, floor),
                floor.max(expected),
                "values={values:?} valid={valid:?} floor={floor}"
            );
        }
    }

    fn check_int_width(values: &[i64], expected: Width) {
        for floor in Width::ALL {
            assert_eq!(
                detect_int_width(values, floor),
                floor.max(expected),
                "values={values:?} floor={floor}"
            );
        }
    }

    fn check_int_width_with_validity(values: &[i64], valid: &[bool], expected: Width) {
        let bitmap = Bitmap::from_bits(valid.iter().copied());
        let array = IntArray::with_validity(values, bitmap.view()).unwrap();
        for floor in Width::ALL {
            assert_eq!(
                detect_width(&array, floor),
                floor.max(expected),
                "values={values:?} valid={valid:?} floor={floor}"
            );
        }
    }

    fn make_random_vector<T: Copy>(base: &[T], n: usize) -> Vec<T> {
        let mut rng = ChaChaRng::seed_from_u64(42);
        (0..n).map(|_| base[rng.gen_range(0..base.len())]).collect()
    }

    /// `n` vectors of zeros, the `i`-th holding `value` at position `i`.
    fn almost_all_zeros<T: Copy + Default>(n: usize, value: T) -> Vec<Vec<T>> {
        (0..n)
            .map(|i| {
                let mut values = vec![T::default(); n];
                values[i] = value;
                values
            })
            .collect()
    }

    /// `n` vectors of nulls holding `null_value`, the `i`-th holding a single
    /// valid `value` at position `i`.
    fn almost_all_nulls<T: Copy>(n: usize, null_value: T, value: T) -> Vec<(Vec<T>, Vec<bool>)> {
        (0..n)
            .map(|i| {
                let mut values = vec![null_value; n];
                let mut valid = vec![false; n];
                values[i] = value;
                valid[i] = true;
                (values, valid)
            })
            .collect()
    }

    #[test]
    fn test_width_try_from() {
        assert_eq!(Width::try_from(4).unwrap(), Width::Four);
        let e = Width::try_from(3);
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("width must be one of 1, 2, 4 or 8, but got 3.".to_string())
        );
        assert_eq!(u8::from(Width::Eight), 8);
        assert_eq!(Width::Two.bits(), 16);
    }

    #[test]
    fn test_width_kinds() {
        for w in Width::ALL {
            assert_eq!(w.unsigned_kind().width(), w);
            assert_eq!(w.signed_kind().width(), w);
            assert!(w.signed_kind().is_signed());
            assert!(!w.unsigned_kind().is_signed());
        }
    }

    #[test]
    fn test_uint_no_nulls() {
        check_uint_width(&[0, 0x7f, 0xff], Width::One);
        check_uint_width(&[0, 0x100], Width::Two);
        check_uint_width(&[0, 0xffff], Width::Two);
        check_uint_width(&[0, 0x10000], Width::Four);
        check_uint_width(&[0, 0xffff_ffff], Width::Four);
        check_uint_width(&[0, 0x1_0000_0000], Width::Eight);
        check_uint_width(&[0, u64::MAX], Width::Eight);
    }

    #[test]
    fn test_uint_nulls() {
        let valid10 = [true, false];
        let valid01 = [false, true];

        check_uint_width_with_validity(&[0, 0xff], &valid01, Width::One);
        check_uint_width_with_validity(&[0, 0xff], &valid10, Width::One);
        for (value, expected) in [
            (0x100, Width::Two),
            (0xffff, Width::Two),
            (0x10000, Width::Four),
            (0xffff_ffff, Width::Four),
            (0x1_0000_0000, Width::Eight),
            (u64::MAX, Width::Eight),
        ] {
            check_uint_width_with_validity(&[0, value], &valid01, expected);
            check_uint_width_with_validity(&[0, value], &valid10, Width::One);
        }
    }

    #[test]
    fn test_uint_no_nulls_many() {
        for (value, expected) in [
            (0xff, Width::One),
            (0xffff, Width::Two),
            (0xffff_ffff, Width::Four),
            (u64::MAX, Width::Eight),
        ] {
            for values in almost_all_zeros::<u64>(N, value) {
                check_uint_width(&values, expected);
            }
        }

        check_uint_width(&make_random_vector::<u64>(&[0, 0x7f, 0xff], N), Width::One);
        check_uint_width(
            &make_random_vector::<u64>(&[0, 0x7f, 0xff, 0x1000, 0xffff], N),
            Width::Two,
        );
        check_uint_width(
            &make_random_vector::<u64>(&[0, 0x7f, 0xff, 0x10000, 0xffff_ffff], N),
            Width::Four,
        );
        check_uint_width(
            &make_random_vector::<u64>(&[0, 0x1_0000_0000, u64::MAX], N),
            Width::Eight,
        );
    }

    #[test]
    fn test_uint_nulls_many() {
        for (value, expected) in [
            (0xff, Width::One),
            (0xffff, Width::Two),
            (0xffff_ffff, Width::Four),
            (u64::MAX, Width::Eight),
        ] {
            for null_value in [0, HUGE] {
                for (values, valid) in almost_all_nulls::<u64>(N, null_value, value) {
                    check_uint_width_with_validity(&values, &valid, expected);
                }
            }
        }
    }

    #[test]
    fn test_int_no_nulls() {
        check_int_width(&[0, 0x7f, -0x80], Width::One);
        check_int_width(&[0, 0x80], Width::Two);
        check_int_width(&[0, -0x81], Width::Two);
        check_int_width(&[0, 0x7fff, -0x8000], Width::Two);
        check_int_width(&[0, 0x8000], Width::Four);
        check_int_width(&[0, -0x8001], Width::Four);
        check_int_width(&[0, 0x7fff_ffff, -0x8000_0000], Width::Four);
        check_int_width(&[0, 0x8000_0000], Width::Eight);
        check_int_width(&[0, -0x8000_0001], Width::Eight);
        check_int_width(&[0, i64::MAX, i64::MIN], Width::Eight);
    }

    #[test]
    fn test_int_nulls() {
        let valid100 = [true, false, false];
        let valid010 = [false, true, false];
        let valid001 = [false, false, true];

        check_int_width_with_validity(&[0, 0x7f, -0x80], &valid100, Width::One);
        check_int_width_with_validity(&[0, 0x7f, -0x80], &valid010, Width::One);
        check_int_width_with_validity(&[0, 0x7f, -0x80], &valid001, Width::One);

        for (values, expected) in [
            ([0, 0x80, -0x81], Width::Two),
            ([0, 0x7fff, -0x8000], Width::Two),
            ([0, 0x8000, -0x8001], Width::Four),
            ([0, 0x7fff_ffff, -0x8000_0000], Width::Four),
            ([0, 0x8000_0000, -0x8000_0001], Width::Eight),
            ([0, i64::MAX, i64::MIN], Width::Eight),
        ] {
            check_int_width_with_validity(&values, &valid100, Width::One);
            check_int_width_with_validity(&values, &valid010, expected);
            check_int_width_with_validity(&values, &valid001, expected);
        }
    }

    #[test]
    fn test_int_no_nulls_many() {
        for (candidates, expected) in [
            (&[0x7f, -0x80][..], Width::One),
            (&[0x80, -0x81, 0x7fff, -0x8000][..], Width::Two),
            (
                &[0x8000, -0x8001, 0x7fff_ffff, -0x8000_0000][..],
                Width::Four,
            ),
            (&[0x8000_0000, -0x8000_0001, i64::MAX][..], Width::Eight),
        ] {
            for &value in candidates {
                for values in almost_all_zeros::<i64>(N, value) {
                    check_int_width(&values, expected);
                }
            }
        }
    }

    #[test]
    fn test_int_nulls_many() {
        for (candidates, expected) in [
            (&[0x7f, -0x80][..], Width::One),
            (&[0x80, -0x81, 0x7fff, -0x8000][..], Width::Two),
            (
                &[0x8000, -0x8001, 0x7fff_ffff, -0x8000_0000][..],
                Width::Four,
            ),
            (&[0x8000_0000, -0x8000_0001, i64::MAX][..], Width::Eight),
        ] {
            for &value in candidates {
                for null_value in [0, HUGE as i64] {
                    for (values, valid) in almost_all_nulls::<i64>(N, null_value, value) {
                        check_int_width_with_validity(&values, &valid, expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_all_null_returns_floor() {
        let values = [u64::MAX, HUGE, 0x1_0000];
        let bitmap = Bitmap::with_len(3, false);
        let array = IntArray::with_validity(&values, bitmap.view()).unwrap();
        for floor in Width::ALL {
            assert_eq!(detect_width(&array, floor), floor);
        }
        let values = [i64::MIN, -1, i64::MAX];
        let array = IntArray::with_validity(&values, bitmap.view()).unwrap();
        for floor in Width::ALL {
            assert_eq!(detect_width(&array, floor), floor);
        }
    }

    #[test]
    fn test_empty_returns_floor() {
        for floor in Width::ALL {
            assert_eq!(detect_uint_width(&[], floor), floor);
            assert_eq!(detect_int_width(&[], floor), floor);
        }
    }

    #[test]
    fn test_narrow_types() {
        let one = Width::One;
        assert_eq!(detect_width(&IntArray::new(&[0xffu8]), one), Width::One);
        assert_eq!(detect_width(&IntArray::new(&[-128i8, 127]), one), Width::One);
        assert_eq!(detect_width(&IntArray::new(&[0xffu16]), one), Width::One);
        assert_eq!(detect_width(&IntArray::new(&[0x100u16]), one), Width::Two);
        assert_eq!(detect_width(&IntArray::new(&[127i16]), one), Width::One);
        assert_eq!(detect_width(&IntArray::new(&[128i16]), one), Width::Two);
        assert_eq!(detect_width(&IntArray::new(&[-129i16]), one), Width::Two);
        assert_eq!(detect_width(&IntArray::new(&[i16::MIN]), one), Width::Two);
        assert_eq!(detect_width(&IntArray::new(&[0xffffu32]), one), Width::Two);
        assert_eq!(detect_width(&IntArray::new(&[0x10000u32]), one), Width::Four);
        assert_eq!(detect_width(&IntArray::new(&[u32::MAX]), one), Width::Four);
        assert_eq!(detect_width(&IntArray::new(&[i32::MIN]), one), Width::Four);
        assert_eq!(detect_width(&IntArray::new(&[-32769i32]), one), Width::Four);
        assert_eq!(detect_width(&IntArray::new(&[-1i32, 1]), one), Width::One);
    }

    #[test]
    fn test_floor_law_on_random_data() {
        let mut rng = ChaChaRng::seed_from_u64(7);
        for _ in 0..50 {
            let shift = rng.gen_range(0..64);
            let values: Vec<i64> = (0..150).map(|_| rng.gen::<i64>() >> shift).collect();
            let base = detect_int_width(&values, Width::One);
            for floor in Width::ALL {
                assert_eq!(detect_int_width(&values, floor), floor.max(base));
            }
        }
    }

    #[test]
    fn test_nulls_across_blocks_with_offset() {
        // 200 elements viewed at bit offset 3 of a longer bitmap; only the
        // valid slots hold small values.
        let len = 200;
        let mut bits = vec![false; len + 3];
        let mut values = vec![HUGE; len];
        for i in (0..len).step_by(7) {
            bits[i + 3] = true;
            values[i] = 0xabcd;
        }
        let bitmap = Bitmap::from_bits(bits);
        let view = bitmap.view().slice(3, len).unwrap();
        let array = IntArray::with_validity(&values, view).unwrap();
        assert_eq!(detect_width(&array, Width::One), Width::Two);

        // Garbage in null slots never matters.
        let zeroed: Vec<u64> = values.iter().map(|&v| if v == HUGE { 0 } else { v }).collect();
        let array = IntArray::with_validity(&zeroed, view).unwrap();
        assert_eq!(detect_width(&array, Width::One), Width::Two);
    }
}
