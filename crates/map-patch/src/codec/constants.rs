//! Wire-level constants for the framed binary patch encoding.
//!
//! Every field record carries an explicit `(type tag, field id)` pair, so a
//! decoder can skip payloads it does not understand. Field ids are
//! persistent small integers; the gaps (4 and 8 in the map patch, and
//! everything a decoder has never heard of) are reserved for future
//! operations and must be skipped by type, never treated as an error.

/// On-wire type tags carried by field records and container headers.
pub mod ttype {
    /// Terminates a struct's field list.
    pub const STOP: u8 = 0;
    pub const BOOL: u8 = 2;
    pub const BYTE: u8 = 3;
    pub const DOUBLE: u8 = 4;
    pub const I16: u8 = 6;
    pub const I32: u8 = 8;
    pub const I64: u8 = 10;
    pub const STRING: u8 = 11;
    pub const STRUCT: u8 = 12;
    pub const MAP: u8 = 13;
    pub const SET: u8 = 14;
    pub const LIST: u8 = 15;
}

// Map patch field ids. 4 and 8 are reserved slots.
pub const FIELD_ASSIGN: i16 = 1;
pub const FIELD_CLEAR: i16 = 2;
pub const FIELD_PATCH_PRIOR: i16 = 3;
pub const FIELD_ADD: i16 = 5;
pub const FIELD_PATCH: i16 = 6;
pub const FIELD_REMOVE: i16 = 7;
pub const FIELD_PUT: i16 = 9;

// Nested i32 patch field ids.
pub const I32_FIELD_ASSIGN: i16 = 1;
pub const I32_FIELD_CLEAR: i16 = 2;
pub const I32_FIELD_ADD: i16 = 8;

/// Maximum container/struct nesting tolerated while skipping an unknown
/// field. Guards against malicious payloads that nest structs to overflow
/// the stack.
pub const MAX_SKIP_DEPTH: u32 = 64;
