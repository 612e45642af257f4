//! Validity bitmaps.
//!
//! A validity bitmap marks which elements of a column are non-null.
//! Bits are packed LSB-first into bytes, as in the Arrow columnar format,
//! and a set bit means *valid*. A bitmap may start at a bit offset into its
//! byte buffer so that sliced columns can share their parent's buffer.
//!
//! - [`BitmapView`] borrows caller-owned bytes.
//! - [`Bitmap`] owns its bytes and can be built bit by bit.
//! - [`ValidityBlocks`] walks an optional bitmap in blocks of [`BLOCK_LEN`]
//!   elements and yields each block's validity word. Scans use it to skip fully
//!   null blocks and to take a mask-free path over fully valid ones.
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use colints::bitmap::Bitmap;
//!
//! let mut bitmap = Bitmap::from_bits([true, false, true]);
//! bitmap.set_bit(1, true)?;
//! bitmap.push_bit(false);
//!
//! let view = bitmap.view();
//! assert_eq!(view.len(), 4);
//! assert_eq!(view.get_bit(1), Some(true));
//! assert_eq!(view.get_bit(3), Some(false));
//! assert_eq!(view.count_ones(), 3);
//! # Ok(())
//! # }
//! ```
use std::ops::Range;

use crate::error::{Error, Result};

/// Number of elements covered by one validity block.
pub const BLOCK_LEN: usize = 64;

/// Returns a word with the lowest `len` bits set.
#[inline(always)]
const fn low_mask(len: usize) -> u64 {
    if len >= 64 {
        u64::MAX
    } else {
        (1u64 << len) - 1
    }
}

/// Owned validity bitmap.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Bitmap {
    bytes: Vec<u8>,
    len: usize,
}

impl Bitmap {
    /// Creates an empty bitmap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bitmap of `len` bits, all set to `bit`.
    ///
    /// # Examples
    ///
    /// ```
    /// use colints::bitmap::Bitmap;
    ///
    /// let bitmap = Bitmap::with_len(10, true);
    /// assert_eq!(bitmap.count_ones(), 10);
    /// assert_eq!(bitmap.as_bytes(), &[0xff, 0x03]);
    /// ```
    pub fn with_len(len: usize, bit: bool) -> Self {
        let fill = if bit { u8::MAX } else { 0 };
        let mut bytes = vec![fill; len.div_ceil(8)];
        if let Some(last) = bytes.last_mut() {
            if len % 8 != 0 {
                *last &= (1u8 << (len % 8)) - 1;
            }
        }
        Self { bytes, len }
    }

    /// Creates a bitmap from a bit iterator.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut bitmap = Self::new();
        bitmap.extend_bits(bits);
        bitmap
    }

    /// Pushes a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        let pos_in_byte = self.len % 8;
        if pos_in_byte == 0 {
            self.bytes.push(bit as u8);
        } else if let Some(cur) = self.bytes.last_mut() {
            *cur |= (bit as u8) << pos_in_byte;
        }
        self.len += 1;
    }

    /// Extends the bitmap from an iterator of bits.
    pub fn extend_bits<I: IntoIterator<Item = bool>>(&mut self, bits: I) {
        bits.into_iter().for_each(|b| self.push_bit(b));
    }

    /// Sets the `pos`-th bit to `bit`.
    ///
    /// # Errors
    ///
    /// An error is returned if `pos` is out of bounds.
    pub fn set_bit(&mut self, pos: usize, bit: bool) -> Result<()> {
        if self.len <= pos {
            return Err(Error::invalid_argument(format!(
                "pos must be less than self.len()={}, but got {pos}.",
                self.len
            )));
        }
        let byte = &mut self.bytes[pos / 8];
        let pos_in_byte = pos % 8;
        *byte &= !(1 << pos_in_byte);
        *byte |= (bit as u8) << pos_in_byte;
        Ok(())
    }

    /// Sets every bit in `range` to `bit`.
    ///
    /// # Errors
    ///
    /// An error is returned if `range` reaches past the end of the bitmap.
    pub fn set_bits_to(&mut self, range: Range<usize>, bit: bool) -> Result<()> {
        if range.end > self.len {
            return Err(Error::invalid_argument(format!(
                "range end must be no greater than self.len()={}, but got {}.",
                self.len, range.end
            )));
        }
        for pos in range {
            self.set_bit(pos, bit)?;
        }
        Ok(())
    }

    /// Returns the `pos`-th bit, or [`None`] if out of bounds.
    pub fn get_bit(&self, pos: usize) -> Option<bool> {
        self.view().get_bit(pos)
    }

    /// Returns the number of bits set.
    pub fn count_ones(&self) -> usize {
        self.view().count_ones()
    }

    /// Gets the number of bits.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the bitmap is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Borrows the bitmap as a [`BitmapView`].
    pub fn view(&self) -> BitmapView<'_> {
        BitmapView {
            bytes: &self.bytes,
            offset: 0,
            len: self.len,
        }
    }
}

/// Borrowed validity bitmap over caller-owned bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapView<'a> {
    bytes: &'a [u8],
    offset: usize,
    len: usize,
}

impl<'a> BitmapView<'a> {
    /// Creates a view of `len` bits starting at bit `offset` of `bytes`.
    ///
    /// # Errors
    ///
    /// An error is returned if `bytes` holds fewer than `offset + len` bits.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use colints::bitmap::BitmapView;
    ///
    /// let view = BitmapView::new(&[0b1010_0000, 0b0000_0001], 5, 4)?;
    /// assert_eq!(view.get_bit(0), Some(true));
    /// assert_eq!(view.get_bit(1), Some(false));
    /// assert_eq!(view.get_bit(2), Some(true));
    /// assert_eq!(view.get_bit(3), Some(true));
    /// assert_eq!(view.get_bit(4), None);
    /// assert!(BitmapView::new(&[0], 1, 8).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(bytes: &'a [u8], offset: usize, len: usize) -> Result<Self> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| Error::invalid_argument("offset + len overflowed"))?;
        let avail = bytes.len().saturating_mul(8);
        if avail < end {
            return Err(Error::invalid_argument(format!(
                "bitmap must hold at least offset + len = {end} bits, but holds {avail}."
            )));
        }
        Ok(Self { bytes, offset, len })
    }

    /// Gets the number of bits.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the view is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit offset of the first bit within the underlying bytes.
    #[inline(always)]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the `pos`-th bit, or [`None`] if out of bounds.
    #[inline(always)]
    pub fn get_bit(&self, pos: usize) -> Option<bool> {
        if pos < self.len {
            let bit = self.offset + pos;
            Some((self.bytes[bit / 8] >> (bit % 8)) & 1 == 1)
        } else {
            None
        }
    }

    /// Returns a sub-view of `len` bits starting at `start`.
    ///
    /// # Errors
    ///
    /// An error is returned if the sub-view reaches past the end of `self`.
    pub fn slice(&self, start: usize, len: usize) -> Result<Self> {
        match start.checked_add(len) {
            Some(end) if end <= self.len => Ok(Self {
                bytes: self.bytes,
                offset: self.offset + start,
                len,
            }),
            _ => Err(Error::invalid_argument(format!(
                "slice {start}+{len} exceeds bitmap length {}.",
                self.len
            ))),
        }
    }

    /// Loads `len <= 64` bits starting at `start` into the low bits of a word.
    ///
    /// The caller guarantees `start + len <= self.len()`.
    #[inline]
    pub(crate) fn load_word(&self, start: usize, len: usize) -> u64 {
        debug_assert!(len <= 64 && start + len <= self.len);
        let bit = self.offset + start;
        let first = bit / 8;
        let shift = bit % 8;
        if shift == 0 && len == 64 {
            let mut word = [0u8; 8];
            word.copy_from_slice(&self.bytes[first..first + 8]);
            return u64::from_le_bytes(word);
        }
        let num_bytes = (shift + len).div_ceil(8);
        let mut acc = 0u128;
        for (k, &b) in self.bytes[first..first + num_bytes].iter().enumerate() {
            acc |= (b as u128) << (8 * k);
        }
        ((acc >> shift) as u64) & low_mask(len)
    }

    /// Returns the number of bits set.
    pub fn count_ones(&self) -> usize {
        ValidityBlocks::new(Some(*self), self.len)
            .map(|block| block.num_valid())
            .sum()
    }

    /// Returns the number of bits unset.
    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }
}

/// Validity of one block of at most [`BLOCK_LEN`] consecutive elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityBlock {
    /// Position of the first element of the block.
    pub start: usize,
    /// Number of elements in the block.
    pub len: usize,
    /// Validity bits; bit `j` refers to element `start + j`.
    pub bits: u64,
}

impl ValidityBlock {
    /// Element positions covered by the block.
    #[inline(always)]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Checks if every element of the block is valid.
    #[inline(always)]
    pub const fn all_valid(&self) -> bool {
        self.bits == low_mask(self.len)
    }

    /// Checks if every element of the block is null.
    #[inline(always)]
    pub const fn none_valid(&self) -> bool {
        self.bits == 0
    }

    /// Number of valid elements in the block.
    #[inline(always)]
    pub const fn num_valid(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Checks if the `j`-th element of the block is valid.
    #[inline(always)]
    pub const fn is_valid(&self, j: usize) -> bool {
        (self.bits >> j) & 1 == 1
    }
}

/// Iterator over the [`ValidityBlock`]s of `len` elements.
///
/// Without a bitmap, every block is fully valid.
///
/// # Examples
///
/// ```
/// use colints::bitmap::{Bitmap, ValidityBlocks};
///
/// let mut bits = vec![true; 70];
/// bits[65] = false;
/// let bitmap = Bitmap::from_bits(bits);
///
/// let blocks: Vec<_> = ValidityBlocks::new(Some(bitmap.view()), 70).collect();
/// assert_eq!(blocks.len(), 2);
/// assert!(blocks[0].all_valid());
/// assert_eq!(blocks[1].range(), 64..70);
/// assert_eq!(blocks[1].num_valid(), 5);
/// assert!(!blocks[1].is_valid(1));
/// ```
#[derive(Debug, Clone)]
pub struct ValidityBlocks<'a> {
    validity: Option<BitmapView<'a>>,
    pos: usize,
    len: usize,
}

impl<'a> ValidityBlocks<'a> {
    /// Creates an iterator over `len` elements.
    ///
    /// If `validity` is given, it must hold at least `len` bits.
    pub fn new(validity: Option<BitmapView<'a>>, len: usize) -> Self {
        debug_assert!(validity.map_or(true, |v| v.len() >= len));
        Self {
            validity,
            pos: 0,
            len,
        }
    }
}

impl Iterator for ValidityBlocks<'_> {
    type Item = ValidityBlock;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let start = self.pos;
        let len = BLOCK_LEN.min(self.len - start);
        let bits = match &self.validity {
            Some(view) => view.load_word(start, len),
            None => low_mask(len),
        };
        self.pos += len;
        Some(ValidityBlock { start, len, bits })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.len - self.pos).div_ceil(BLOCK_LEN);
        (n, Some(n))
    }
}

impl ExactSizeIterator for ValidityBlocks<'_> {}
