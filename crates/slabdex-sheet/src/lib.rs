//! Tabular row-source library for slabdex.
//!
//! This library provides read and append access to sheet-shaped data:
//! ordered rows of string cells, addressed by A1-notation range
//! references such as `Data!A2:W`. It knows nothing about what the
//! cells mean; interpreting columns is the caller's concern.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod range;
pub mod row;
pub mod snapshot;
pub mod source;

pub use error::{Error, Result};
pub use memory::MemorySource;
pub use range::RangeRef;
pub use row::Row;
pub use snapshot::JsonlTabSource;
pub use source::{RowSink, RowSource, TabStore};
