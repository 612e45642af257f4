//! Remapping and width casts of integer codes.
//!
//! [`transpose_ints`] substitutes every code of a source array through a dense
//! lookup table, e.g., to rewrite dictionary indices after two dictionaries were
//! unified. The output type is usually wider than the input one.
//!
//! [`downcast_ints`] and [`upcast_ints`] copy values between widths, typically
//! after [`detect_width`](crate::detect_width) picked the narrowest one.
//!
//! All three write only `dest[..src.len()]` and convert values with `as`
//! semantics ([`AsPrimitive`]).
use num_traits::AsPrimitive;

use crate::int_types::IntType;

/// Writes `dest[i] = map[src[i]]` for every `i` in `0..src.len()`.
///
/// Every source code must index into `map`. This is not checked beyond the
/// slice indexing itself, which panics on an out-of-range code.
///
/// # Panics
///
/// Panics if `dest` is shorter than `src` or a code is out of range for `map`.
///
/// # Examples
///
/// ```
/// use colints::transpose_ints;
///
/// let src = [1i8, 3, 5, 0, 3, 2];
/// let map = [1111i32, 2222, 3333, 4444, 5555, 6666, 7777];
/// let mut dest = [0i64; 6];
///
/// transpose_ints(&src, &mut dest, &map);
/// assert_eq!(dest, [2222, 4444, 6666, 1111, 4444, 3333]);
/// ```
#[inline]
pub fn transpose_ints<S, D, M>(src: &[S], dest: &mut [D], map: &[M])
where
    S: IntType,
    D: IntType,
    M: IntType + AsPrimitive<D>,
{
    let dest = &mut dest[..src.len()];
    for (d, &s) in dest.iter_mut().zip(src) {
        let code = <S as AsPrimitive<usize>>::as_(s);
        debug_assert!(
            code < map.len(),
            "code {s} out of range for a transpose map of length {}",
            map.len()
        );
        *d = <M as AsPrimitive<D>>::as_(map[code]);
    }
}

/// Transposes `src` through `map` into a newly allocated vector.
///
/// See [`transpose_ints`].
///
/// # Examples
///
/// ```
/// use colints::transpose::transpose_ints_to_vec;
///
/// let dest: Vec<u16> = transpose_ints_to_vec(&[2u8, 0, 1], &[300u32, 301, 302]);
/// assert_eq!(dest, vec![302, 300, 301]);
/// ```
pub fn transpose_ints_to_vec<S, D, M>(src: &[S], map: &[M]) -> Vec<D>
where
    S: IntType,
    D: IntType,
    M: IntType + AsPrimitive<D>,
{
    let mut dest = vec![D::zero(); src.len()];
    transpose_ints(src, &mut dest, map);
    dest
}

/// Narrows `src` into `dest`.
///
/// The caller guarantees that every value fits `D`; otherwise it wraps.
///
/// # Panics
///
/// Panics if `dest` is shorter than `src`.
///
/// # Examples
///
/// ```
/// use colints::{detect_uint_width, downcast_ints, Width};
///
/// let src = [7u64, 0x1234, 9];
/// assert_eq!(detect_uint_width(&src, Width::One), Width::Two);
///
/// let mut dest = [0u16; 3];
/// downcast_ints(&src, &mut dest);
/// assert_eq!(dest, [7, 0x1234, 9]);
/// ```
#[inline]
pub fn downcast_ints<S, D>(src: &[S], dest: &mut [D])
where
    S: IntType + AsPrimitive<D>,
    D: IntType,
{
    debug_assert!(D::KIND.width() <= S::KIND.width());
    cast_ints(src, dest);
}

/// Widens `src` into `dest`.
///
/// # Panics
///
/// Panics if `dest` is shorter than `src`.
///
/// # Examples
///
/// ```
/// use colints::upcast_ints;
///
/// let mut dest = [0i64; 3];
/// upcast_ints(&[-1i16, 2, i16::MAX], &mut dest);
/// assert_eq!(dest, [-1, 2, 32767]);
/// ```
#[inline]
pub fn upcast_ints<S, D>(src: &[S], dest: &mut [D])
where
    S: IntType + AsPrimitive<D>,
    D: IntType,
{
    debug_assert!(D::KIND.width() >= S::KIND.width());
    cast_ints(src, dest);
}

#[inline(always)]
fn cast_ints<S, D>(src: &[S], dest: &mut [D])
where
    S: IntType + AsPrimitive<D>,
    D: IntType,
{
    let dest = &mut dest[..src.len()];
    for (d, &s) in dest.iter_mut().zip(src) {
        *d = <S as AsPrimitive<D>>::as_(s);
    }
}
