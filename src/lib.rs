//! # Integer utilities for columnar data
//!
//! Colints is a small set of low-level routines over integer columns, as used
//! by the encoding and decoding paths of a columnar in-memory engine:
//!
//! - [Width detection](crate::width): the smallest storage width (1, 2, 4 or
//!   8 bytes) holding every non-null value of a column, e.g., to pick the most
//!   compact type for dictionary indices.
//! - [Transposition](crate::transpose): remapping small integer codes through a
//!   dense lookup table, plus narrowing and widening copies.
//! - [Bounds checks](crate::bounds): validating index arrays against an
//!   exclusive upper limit before a take, and values against inclusive ranges.
//!
//! ## Design policy
//!
//! - **Null-aware:**
//!   Columns come with an optional [validity bitmap](crate::bitmap). Null slots
//!   may hold any bit pattern and never influence a result.
//!
//! - **Monomorphized:**
//!   Every routine is generic over the eight primitive integer types through
//!   the sealed [`IntType`] trait. [`AnyIntArray`] adds runtime dispatch for
//!   callers that only know the type as a tag.
//!
//! - **Stateless:**
//!   Routines are pure functions over borrowed buffers and may run
//!   concurrently on shared inputs.
//!
//! - **Batched:**
//!   Scans walk 64-element validity blocks, so fully valid blocks run without
//!   per-element masking and fully null blocks are skipped.
//!
//! ## Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use colints::bitmap::Bitmap;
//! use colints::prelude::*;
//!
//! let indices = [2u64, 0, 0xdead_beef, 1];
//! let validity = Bitmap::from_bits([true, true, false, true]);
//! let array = IntArray::with_validity(&indices, validity.view())?;
//!
//! // The null garbage does not widen the column.
//! assert_eq!(detect_width(&array, Width::One), Width::One);
//! check_index_bounds(&array, 3)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Rejections are reported through [`tracing`] at debug level. The crate never
//! installs a subscriber.
#![deny(missing_docs)]

pub mod array;
pub mod bitmap;
pub mod bounds;
pub mod error;
pub mod int_types;
pub mod prelude;
pub mod transpose;
pub mod width;

pub use array::{AnyIntArray, IntArray};
pub use bounds::{check_index_bounds, check_integers_in_range, integers_can_fit};
pub use error::{Error, Result};
pub use int_types::{IntKind, IntType};
pub use transpose::{downcast_ints, transpose_ints, upcast_ints};
pub use width::{detect_int_width, detect_uint_width, detect_width, Width};
