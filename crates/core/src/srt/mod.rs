//! This module is responsible for the SRT text format.
//! It exposes a reader that builds an [`EntryCollection`] from SRT text and a
//! writer that renders one back, such that `parse(&format(c))` yields `c`.
//!
//! [`EntryCollection`]: crate::collection::EntryCollection

pub mod reader;
pub mod writer;

pub use reader::{parse, read, read_from};
pub use writer::{format, write, write_to};
