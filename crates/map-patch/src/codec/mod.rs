//! Wire codecs for map patch descriptors.
//!
//! The binary codec is a tagged, self-describing framing: old and new
//! schema revisions coexist because decoders skip any field they do not
//! recognize by its declared type.

pub mod binary;
pub mod constants;

pub use binary::{decode, encode, CodecError};
