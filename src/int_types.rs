//! Primitive integer element types and their runtime tags.
//!
//! Every routine in this crate is generic over [`IntType`], which is sealed and
//! implemented exactly for `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32` and `u64`.
//! Each generic routine therefore monomorphizes into one code path per
//! width and signedness.
//!
//! [`IntKind`] names the same eight types at runtime, e.g., to pick the storage
//! type matching a detected [`Width`].
//!
//! ```
//! use colints::int_types::{IntKind, IntType};
//! use colints::Width;
//!
//! assert_eq!(<i16 as IntType>::KIND, IntKind::Int16);
//! assert!(i16::SIGNED);
//! assert_eq!(IntKind::UInt32.width(), Width::Four);
//! assert_eq!(IntKind::Int8.min_value(), -128);
//! ```
use std::fmt;

use num_traits::{AsPrimitive, PrimInt};

use crate::width::Width;

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width primitive integer usable as an array element.
pub trait IntType:
    PrimInt
    + AsPrimitive<usize>
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
    + sealed::Sealed
{
    /// Runtime tag of this type.
    const KIND: IntKind;

    /// Whether this type is signed.
    const SIGNED: bool = Self::KIND.is_signed();

    /// Widens `self` into an [`i128`], preserving its native signedness.
    fn widen(self) -> i128;

    /// Casts to `i64` with `as` semantics.
    fn as_i64(self) -> i64;

    /// Casts to `u64` with `as` semantics; signed values are sign-extended.
    fn as_u64(self) -> u64;
}

macro_rules! impl_int_type {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl IntType for $t {
                const KIND: IntKind = IntKind::$kind;

                #[inline(always)]
                fn widen(self) -> i128 {
                    self as i128
                }

                #[inline(always)]
                fn as_i64(self) -> i64 {
                    self as i64
                }

                #[inline(always)]
                fn as_u64(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_int_type! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
}

/// Runtime tag for the eight supported integer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    /// `i8`
    Int8,
    /// `i16`
    Int16,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `u8`
    UInt8,
    /// `u16`
    UInt16,
    /// `u32`
    UInt32,
    /// `u64`
    UInt64,
}

impl IntKind {
    /// All kinds, signed first, each group in increasing width.
    pub const ALL: [IntKind; 8] = [
        IntKind::Int8,
        IntKind::Int16,
        IntKind::Int32,
        IntKind::Int64,
        IntKind::UInt8,
        IntKind::UInt16,
        IntKind::UInt32,
        IntKind::UInt64,
    ];

    /// Returns `true` for the signed kinds.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            IntKind::Int8 | IntKind::Int16 | IntKind::Int32 | IntKind::Int64
        )
    }

    /// Storage width of one element.
    pub const fn width(self) -> Width {
        match self {
            IntKind::Int8 | IntKind::UInt8 => Width::One,
            IntKind::Int16 | IntKind::UInt16 => Width::Two,
            IntKind::Int32 | IntKind::UInt32 => Width::Four,
            IntKind::Int64 | IntKind::UInt64 => Width::Eight,
        }
    }

    /// Smallest representable value.
    pub const fn min_value(self) -> i128 {
        match self {
            IntKind::Int8 => i8::MIN as i128,
            IntKind::Int16 => i16::MIN as i128,
            IntKind::Int32 => i32::MIN as i128,
            IntKind::Int64 => i64::MIN as i128,
            IntKind::UInt8 | IntKind::UInt16 | IntKind::UInt32 | IntKind::UInt64 => 0,
        }
    }

    /// Largest representable value.
    pub const fn max_value(self) -> i128 {
        match self {
            IntKind::Int8 => i8::MAX as i128,
            IntKind::Int16 => i16::MAX as i128,
            IntKind::Int32 => i32::MAX as i128,
            IntKind::Int64 => i64::MAX as i128,
            IntKind::UInt8 => u8::MAX as i128,
            IntKind::UInt16 => u16::MAX as i128,
            IntKind::UInt32 => u32::MAX as i128,
            IntKind::UInt64 => u64::MAX as i128,
        }
    }

    /// Checks if every value of `other` is representable in `self`.
    pub const fn covers(self, other: IntKind) -> bool {
        self.min_value() <= other.min_value() && other.max_value() <= self.max_value()
    }

    /// Lowercase type name, e.g., `"uint16"`.
    pub const fn name(self) -> &'static str {
        match self {
            IntKind::Int8 => "int8",
            IntKind::Int16 => "int16",
            IntKind::Int32 => "int32",
            IntKind::Int64 => "int64",
            IntKind::UInt8 => "uint8",
            IntKind::UInt16 => "uint16",
            IntKind::UInt32 => "uint32",
            IntKind::UInt64 => "uint64",
        }
    }
}

impl fmt::Display for IntKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
