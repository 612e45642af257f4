//! Borrowed integer arrays with optional validity.
//!
//! [`IntArray`] pairs a slice of values with an optional [`BitmapView`].
//! [`None`] means every element is valid. [`AnyIntArray`] is the same thing
//! with the element type chosen at runtime; each of its methods dispatches
//! to the generic routine monomorphized for that type.
use crate::bitmap::{BitmapView, ValidityBlocks};
use crate::bounds;
use crate::error::{Error, Result};
use crate::int_types::{IntKind, IntType};
use crate::width::{self, Width};

/// Integer values together with an optional validity bitmap.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use colints::bitmap::Bitmap;
/// use colints::IntArray;
///
/// let values = [3u16, 0xdead, 7];
/// let validity = Bitmap::from_bits([true, false, true]);
/// let array = IntArray::with_validity(&values, validity.view())?;
///
/// assert_eq!(array.len(), 3);
/// assert_eq!(array.null_count(), 1);
/// assert_eq!(array.get(1), None);
/// assert_eq!(array.get(2), Some(7));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntArray<'a, T> {
    values: &'a [T],
    validity: Option<BitmapView<'a>>,
}

impl<'a, T: IntType> IntArray<'a, T> {
    /// Creates an array in which every element is valid.
    pub const fn new(values: &'a [T]) -> Self {
        Self {
            values,
            validity: None,
        }
    }

    /// Creates an array whose nulls are given by `validity`.
    ///
    /// # Errors
    ///
    /// An error is returned if `validity` holds fewer bits than `values` has elements.
    pub fn with_validity(values: &'a [T], validity: BitmapView<'a>) -> Result<Self> {
        Self::from_parts(values, Some(validity))
    }

    /// Creates an array from values and an optional validity bitmap.
    ///
    /// # Errors
    ///
    /// An error is returned if `validity` holds fewer bits than `values` has elements.
    pub fn from_parts(values: &'a [T], validity: Option<BitmapView<'a>>) -> Result<Self> {
        if let Some(v) = &validity {
            if v.len() < values.len() {
                return Err(Error::invalid_argument(format!(
                    "validity must hold at least {} bits, but holds {}.",
                    values.len(),
                    v.len()
                )));
            }
        }
        Ok(Self { values, validity })
    }

    /// Gets the number of elements, valid or not.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks if the array is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw values, including whatever is stored in null slots.
    #[inline(always)]
    pub const fn values(&self) -> &'a [T] {
        self.values
    }

    /// The validity bitmap, if any.
    #[inline(always)]
    pub const fn validity(&self) -> Option<BitmapView<'a>> {
        self.validity
    }

    /// Checks if the `pos`-th element is valid.
    ///
    /// Positions out of bounds are reported as not valid.
    #[inline]
    pub fn is_valid(&self, pos: usize) -> bool {
        if pos >= self.len() {
            return false;
        }
        self.validity
            .map_or(true, |v| v.get_bit(pos).unwrap_or(false))
    }

    /// Returns the `pos`-th value, or [`None`] if it is null or out of bounds.
    pub fn get(&self, pos: usize) -> Option<T> {
        if self.is_valid(pos) {
            Some(self.values[pos])
        } else {
            None
        }
    }

    /// Number of null elements.
    pub fn null_count(&self) -> usize {
        self.len() - self.blocks().map(|b| b.num_valid()).sum::<usize>()
    }

    /// Iterates the array in validity blocks.
    pub fn blocks(&self) -> ValidityBlocks<'a> {
        ValidityBlocks::new(self.validity, self.len())
    }

    /// Creates an iterator yielding [`None`] for null elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use colints::bitmap::Bitmap;
    /// use colints::IntArray;
    ///
    /// let validity = Bitmap::from_bits([false, true]);
    /// let array = IntArray::with_validity(&[-1i8, 5], validity.view())?;
    /// let collected: Vec<_> = array.iter().collect();
    /// assert_eq!(collected, vec![None, Some(5)]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<T>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}

impl<'a, T: IntType> From<&'a [T]> for IntArray<'a, T> {
    fn from(values: &'a [T]) -> Self {
        Self::new(values)
    }
}

impl<'a, T: IntType, const N: usize> From<&'a [T; N]> for IntArray<'a, T> {
    fn from(values: &'a [T; N]) -> Self {
        Self::new(values)
    }
}

/// An [`IntArray`] whose element type is known only at runtime.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use colints::{AnyIntArray, IntArray, Width};
/// use colints::int_types::IntKind;
///
/// let values = [0i32, 300, -2];
/// let array = AnyIntArray::from(IntArray::new(&values));
///
/// assert_eq!(array.kind(), IntKind::Int32);
/// assert_eq!(array.detect_width(Width::One), Width::Two);
/// assert!(array.integers_can_fit(IntKind::Int16).is_ok());
/// assert!(array.integers_can_fit(IntKind::UInt16).is_err());
/// assert!(array.check_index_bounds(301).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyIntArray<'a> {
    /// `i8` elements.
    Int8(IntArray<'a, i8>),
    /// `i16` elements.
    Int16(IntArray<'a, i16>),
    /// `i32` elements.
    Int32(IntArray<'a, i32>),
    /// `i64` elements.
    Int64(IntArray<'a, i64>),
    /// `u8` elements.
    UInt8(IntArray<'a, u8>),
    /// `u16` elements.
    UInt16(IntArray<'a, u16>),
    /// `u32` elements.
    UInt32(IntArray<'a, u32>),
    /// `u64` elements.
    UInt64(IntArray<'a, u64>),
}

macro_rules! dispatch {
    ($self:expr, $arr:ident => $body:expr) => {
        match $self {
            AnyIntArray::Int8($arr) => $body,
            AnyIntArray::Int16($arr) => $body,
            AnyIntArray::Int32($arr) => $body,
            AnyIntArray::Int64($arr) => $body,
            AnyIntArray::UInt8($arr) => $body,
            AnyIntArray::UInt16($arr) => $body,
            AnyIntArray::UInt32($arr) => $body,
            AnyIntArray::UInt64($arr) => $body,
        }
    };
}

macro_rules! impl_from_int_array {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<IntArray<'a, $t>> for AnyIntArray<'a> {
                fn from(array: IntArray<'a, $t>) -> Self {
                    AnyIntArray::$variant(array)
                }
            }
        )*
    };
}

impl_from_int_array! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
}

impl AnyIntArray<'_> {
    /// Element type tag.
    pub const fn kind(&self) -> IntKind {
        match self {
            AnyIntArray::Int8(_) => IntKind::Int8,
            AnyIntArray::Int16(_) => IntKind::Int16,
            AnyIntArray::Int32(_) => IntKind::Int32,
            AnyIntArray::Int64(_) => IntKind::Int64,
            AnyIntArray::UInt8(_) => IntKind::UInt8,
            AnyIntArray::UInt16(_) => IntKind::UInt16,
            AnyIntArray::UInt32(_) => IntKind::UInt32,
            AnyIntArray::UInt64(_) => IntKind::UInt64,
        }
    }

    /// Gets the number of elements.
    pub fn len(&self) -> usize {
        dispatch!(self, a => a.len())
    }

    /// Checks if the array is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of null elements.
    pub fn null_count(&self) -> usize {
        dispatch!(self, a => a.null_count())
    }

    /// See [`width::detect_width`].
    pub fn detect_width(&self, floor: Width) -> Width {
        dispatch!(self, a => width::detect_width(a, floor))
    }

    /// See [`bounds::check_index_bounds`].
    pub fn check_index_bounds(&self, upper_limit: u64) -> Result<()> {
        dispatch!(self, a => bounds::check_index_bounds(a, upper_limit))
    }

    /// Checks that every valid value lies in `[lower, upper]`.
    ///
    /// The bounds are clamped to the element type first. If the clamped range
    /// is empty, every valid value is rejected.
    /// See [`bounds::check_integers_in_range`].
    pub fn check_integers_in_range(&self, lower: i128, upper: i128) -> Result<()> {
        dispatch!(self, a => bounds::check_integers_in_range_wide(a, lower, upper))
    }

    /// See [`bounds::integers_can_fit`].
    pub fn integers_can_fit(&self, target: IntKind) -> Result<()> {
        dispatch!(self, a => bounds::integers_can_fit(a, target))
    }
}
