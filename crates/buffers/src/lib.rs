//! Binary buffer primitives for the map-patch wire codec.
//!
//! [`Reader`] walks a borrowed byte slice with a cursor and bounds-checked
//! `try_*` reads; [`Writer`] appends big-endian primitives to an owned
//! buffer. Both are stateless across calls apart from the cursor, so one
//! instance is scoped to a single encode or decode pass.

use thiserror::Error;

pub mod reader;
pub mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error produced by bounds-checked buffer reads.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A read or skip ran past the end of the buffer.
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    /// A string read did not contain valid UTF-8.
    #[error("invalid utf-8 in buffer")]
    InvalidUtf8,
}
