//! Reading, editing and writing SRT subtitle files.
//!
//! [`srt::read`] builds an [`EntryCollection`] from a file, the functions in
//! [`editor`] change it, and [`srt::write`] renders it back.

pub mod collection;
pub mod editor;
pub mod entry;
pub mod error;
pub mod srt;
pub mod time;

pub use collection::EntryCollection;
pub use entry::Entry;
pub use error::{Error, ErrorKind, Result};
pub use time::{SrtTime, TimeUnit};
