//! The prelude for integer columns.
//!
//! The purpose of this module is to alleviate imports of the common types and routines.
//!
//! ```
//! # #![allow(unused_imports)]
//! use colints::prelude::*;
//! ```
pub use crate::array::{AnyIntArray, IntArray};
pub use crate::bounds::{check_index_bounds, check_integers_in_range, integers_can_fit};
pub use crate::int_types::{IntKind, IntType};
pub use crate::transpose::{downcast_ints, transpose_ints, upcast_ints};
pub use crate::width::{detect_width, Width};
