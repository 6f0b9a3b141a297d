//! Small trait toolkit shared by the `bigdecimal-math` kernel.
//!
//! This crate mirrors the role `dashu-base` plays for the `dashu` numeric
//! stack: it carries the generic ring-style traits (integer div/rem and
//! root extraction) and the error taxonomy that the kernel crate builds
//! on, independent of any particular big-integer or big-decimal
//! representation.

pub mod error;
mod ring;

pub use error::{Error, ErrorKind, ParseError};
pub use ring::{DivRem, RootRem};
