//! Framed binary codec for map patch descriptors.
//!
//! Wire shape: a struct is a sequence of field records terminated by a
//! [`ttype::STOP`] byte. Each record is a `u8` type tag, an `i16` field id
//! (big-endian), then the typed payload. Strings are an `i32` byte length
//! plus UTF-8; maps carry `u8` key/value type tags and an `i32` count; sets
//! carry a `u8` element type tag and an `i32` count. Nested value patches
//! recursively use the same struct framing.
//!
//! Field order on the wire is not significant — records are dispatched by
//! id — so encoders omit absent fields entirely, and a decoder tolerates
//! reordering, unknown ids, and ids whose type tag does not match what it
//! expects, by skipping the payload per its declared type. Truncated or
//! structurally inconsistent input is a hard [`CodecError`].

use map_patch_buffers::{BufferError, Reader, Writer};
use thiserror::Error;

use super::constants::{
    ttype, FIELD_ADD, FIELD_ASSIGN, FIELD_CLEAR, FIELD_PATCH, FIELD_PATCH_PRIOR, FIELD_PUT,
    FIELD_REMOVE, I32_FIELD_ADD, I32_FIELD_ASSIGN, I32_FIELD_CLEAR, MAX_SKIP_DEPTH,
};
use crate::types::{Entries, I32Patch, Keys, MapPatch, ValuePatches};
use crate::validate::validate;

// ── Error ─────────────────────────────────────────────────────────────────

/// Decode error for the binary codec.
///
/// Unknown field ids and id/type mismatches are *not* errors — they are
/// skipped for forward compatibility. These variants cover input that is
/// malformed at the framing level.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid type tag {0:#04x}")]
    InvalidTypeTag(u8),
    #[error("negative element count {0}")]
    NegativeLength(i32),
    #[error("invalid utf-8 in string payload")]
    InvalidUtf8,
    #[error("nesting depth limit exceeded while skipping a field")]
    DepthLimitExceeded,
    #[error("{0} trailing bytes after descriptor")]
    TrailingBytes(usize),
}

impl From<BufferError> for CodecError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => CodecError::UnexpectedEof,
            BufferError::InvalidUtf8 => CodecError::InvalidUtf8,
        }
    }
}

// ── Encode ────────────────────────────────────────────────────────────────

/// Encodes a descriptor as a framed byte sequence.
///
/// Only present fields are emitted, in field-id order. `decode(encode(d))`
/// is value-equal to `d` for every descriptor.
pub fn encode(patch: &MapPatch) -> Vec<u8> {
    let mut w = Writer::new();
    write_map_patch(&mut w, patch);
    w.into_bytes()
}

fn write_field_header(w: &mut Writer, type_tag: u8, id: i16) {
    w.u8(type_tag);
    w.i16(id);
}

fn write_string(w: &mut Writer, s: &str) {
    // lengths are i32 on the wire
    debug_assert!(s.len() <= i32::MAX as usize);
    w.i32(s.len() as i32);
    w.utf8(s);
}

fn write_entries(w: &mut Writer, entries: &Entries) {
    debug_assert!(entries.len() <= i32::MAX as usize);
    w.u8(ttype::STRING);
    w.u8(ttype::I32);
    w.i32(entries.len() as i32);
    for (key, value) in entries {
        write_string(w, key);
        w.i32(*value);
    }
}

fn write_value_patches(w: &mut Writer, patches: &ValuePatches) {
    debug_assert!(patches.len() <= i32::MAX as usize);
    w.u8(ttype::STRING);
    w.u8(ttype::STRUCT);
    w.i32(patches.len() as i32);
    for (key, vp) in patches {
        write_string(w, key);
        write_i32_patch(w, vp);
    }
}

fn write_keys(w: &mut Writer, keys: &Keys) {
    debug_assert!(keys.len() <= i32::MAX as usize);
    w.u8(ttype::STRING);
    w.i32(keys.len() as i32);
    for key in keys {
        write_string(w, key);
    }
}

fn write_i32_patch(w: &mut Writer, patch: &I32Patch) {
    if let Some(assign) = patch.assign() {
        write_field_header(w, ttype::I32, I32_FIELD_ASSIGN);
        w.i32(assign);
    }
    if let Some(clear) = patch.clear() {
        write_field_header(w, ttype::BOOL, I32_FIELD_CLEAR);
        w.u8(clear as u8);
    }
    if let Some(delta) = patch.add() {
        write_field_header(w, ttype::I32, I32_FIELD_ADD);
        w.i32(delta);
    }
    w.u8(ttype::STOP);
}

fn write_map_patch(w: &mut Writer, patch: &MapPatch) {
    if let Some(assign) = patch.assign() {
        write_field_header(w, ttype::MAP, FIELD_ASSIGN);
        write_entries(w, assign);
    }
    if let Some(clear) = patch.clear() {
        write_field_header(w, ttype::BOOL, FIELD_CLEAR);
        w.u8(clear as u8);
    }
    if let Some(prior) = patch.patch_prior() {
        write_field_header(w, ttype::MAP, FIELD_PATCH_PRIOR);
        write_value_patches(w, prior);
    }
    if let Some(add) = patch.add() {
        write_field_header(w, ttype::MAP, FIELD_ADD);
        write_entries(w, add);
    }
    if let Some(after) = patch.patch() {
        write_field_header(w, ttype::MAP, FIELD_PATCH);
        write_value_patches(w, after);
    }
    if let Some(remove) = patch.remove() {
        write_field_header(w, ttype::SET, FIELD_REMOVE);
        write_keys(w, remove);
    }
    if let Some(put) = patch.put() {
        write_field_header(w, ttype::MAP, FIELD_PUT);
        write_entries(w, put);
    }
    w.u8(ttype::STOP);
}

// ── Decode ────────────────────────────────────────────────────────────────

/// Decodes a framed byte sequence into a new [`MapPatch`].
///
/// Fields never seen on the wire stay absent, not defaulted to empty.
/// A standalone constructor: the input is never read into an existing
/// descriptor.
pub fn decode(data: &[u8]) -> Result<MapPatch, CodecError> {
    let mut r = Reader::new(data);
    let patch = read_map_patch(&mut r)?;
    if r.remaining() > 0 {
        return Err(CodecError::TrailingBytes(r.remaining()));
    }
    // Default validation has no required fields and accepts any combination.
    validate(&patch, false).ok();
    Ok(patch)
}

fn read_map_patch(r: &mut Reader) -> Result<MapPatch, CodecError> {
    let mut assign: Option<Entries> = None;
    let mut clear: Option<bool> = None;
    let mut patch_prior: Option<ValuePatches> = None;
    let mut add: Option<Entries> = None;
    let mut patch: Option<ValuePatches> = None;
    let mut remove: Option<Keys> = None;
    let mut put: Option<Entries> = None;

    loop {
        let field_type = r.try_u8()?;
        if field_type == ttype::STOP {
            break;
        }
        let id = r.try_i16()?;
        match (id, field_type) {
            (FIELD_ASSIGN, ttype::MAP) => {
                if let Some(entries) = read_entries(r)? {
                    assign = Some(entries);
                }
            }
            (FIELD_CLEAR, ttype::BOOL) => {
                clear = Some(r.try_u8()? != 0);
            }
            (FIELD_PATCH_PRIOR, ttype::MAP) => {
                if let Some(patches) = read_value_patches(r)? {
                    patch_prior = Some(patches);
                }
            }
            (FIELD_ADD, ttype::MAP) => {
                if let Some(entries) = read_entries(r)? {
                    add = Some(entries);
                }
            }
            (FIELD_PATCH, ttype::MAP) => {
                if let Some(patches) = read_value_patches(r)? {
                    patch = Some(patches);
                }
            }
            (FIELD_REMOVE, ttype::SET) => {
                if let Some(keys) = read_keys(r)? {
                    remove = Some(keys);
                }
            }
            (FIELD_PUT, ttype::MAP) => {
                if let Some(entries) = read_entries(r)? {
                    put = Some(entries);
                }
            }
            // Unknown id, or a known id carrying an unexpected type tag:
            // a producer on a different schema revision. Skip by type.
            _ => skip_value(r, field_type, 0)?,
        }
    }

    Ok(MapPatch::new(
        assign,
        clear,
        patch_prior,
        add,
        patch,
        remove,
        put,
    ))
}

fn read_i32_patch(r: &mut Reader) -> Result<I32Patch, CodecError> {
    let mut assign: Option<i32> = None;
    let mut clear: Option<bool> = None;
    let mut add: Option<i32> = None;

    loop {
        let field_type = r.try_u8()?;
        if field_type == ttype::STOP {
            break;
        }
        let id = r.try_i16()?;
        match (id, field_type) {
            (I32_FIELD_ASSIGN, ttype::I32) => assign = Some(r.try_i32()?),
            (I32_FIELD_CLEAR, ttype::BOOL) => clear = Some(r.try_u8()? != 0),
            (I32_FIELD_ADD, ttype::I32) => add = Some(r.try_i32()?),
            _ => skip_value(r, field_type, 0)?,
        }
    }

    Ok(I32Patch::new(assign, clear, add))
}

fn read_size(r: &mut Reader) -> Result<usize, CodecError> {
    let size = r.try_i32()?;
    if size < 0 {
        return Err(CodecError::NegativeLength(size));
    }
    Ok(size as usize)
}

fn read_string(r: &mut Reader) -> Result<String, CodecError> {
    let len = read_size(r)?;
    Ok(r.try_utf8(len)?.to_string())
}

/// Reads a `string → i32` map payload. Returns `None` (after consuming the
/// payload) when the declared element types differ from the expected ones —
/// the field is then treated as unseen, same as an outer type mismatch.
fn read_entries(r: &mut Reader) -> Result<Option<Entries>, CodecError> {
    let key_type = r.try_u8()?;
    let value_type = r.try_u8()?;
    let size = read_size(r)?;
    if key_type == ttype::STRING && value_type == ttype::I32 {
        let mut entries = Entries::with_capacity(size);
        for _ in 0..size {
            let key = read_string(r)?;
            let value = r.try_i32()?;
            entries.insert(key, value);
        }
        Ok(Some(entries))
    } else {
        skip_elements(r, &[key_type, value_type], size)?;
        Ok(None)
    }
}

/// Reads a `string → nested-patch` map payload; same mismatch handling as
/// [`read_entries`].
fn read_value_patches(r: &mut Reader) -> Result<Option<ValuePatches>, CodecError> {
    let key_type = r.try_u8()?;
    let value_type = r.try_u8()?;
    let size = read_size(r)?;
    if key_type == ttype::STRING && value_type == ttype::STRUCT {
        let mut patches = ValuePatches::with_capacity(size);
        for _ in 0..size {
            let key = read_string(r)?;
            let vp = read_i32_patch(r)?;
            patches.insert(key, vp);
        }
        Ok(Some(patches))
    } else {
        skip_elements(r, &[key_type, value_type], size)?;
        Ok(None)
    }
}

/// Reads a `set<string>` payload; same mismatch handling as
/// [`read_entries`].
fn read_keys(r: &mut Reader) -> Result<Option<Keys>, CodecError> {
    let elem_type = r.try_u8()?;
    let size = read_size(r)?;
    if elem_type == ttype::STRING {
        let mut keys = Keys::with_capacity(size);
        for _ in 0..size {
            keys.insert(read_string(r)?);
        }
        Ok(Some(keys))
    } else {
        skip_elements(r, &[elem_type], size)?;
        Ok(None)
    }
}

fn skip_elements(r: &mut Reader, element_types: &[u8], count: usize) -> Result<(), CodecError> {
    for _ in 0..count {
        for type_tag in element_types {
            skip_value(r, *type_tag, 1)?;
        }
    }
    Ok(())
}

/// Skips one value of the given on-wire type. `depth` bounds recursion
/// through nested containers and structs.
fn skip_value(r: &mut Reader, type_tag: u8, depth: u32) -> Result<(), CodecError> {
    if depth > MAX_SKIP_DEPTH {
        return Err(CodecError::DepthLimitExceeded);
    }
    match type_tag {
        ttype::BOOL | ttype::BYTE => r.try_skip(1)?,
        ttype::I16 => r.try_skip(2)?,
        ttype::I32 => r.try_skip(4)?,
        ttype::I64 | ttype::DOUBLE => r.try_skip(8)?,
        ttype::STRING => {
            let len = read_size(r)?;
            r.try_skip(len)?;
        }
        ttype::STRUCT => loop {
            let field_type = r.try_u8()?;
            if field_type == ttype::STOP {
                break;
            }
            r.try_i16()?;
            skip_value(r, field_type, depth + 1)?;
        },
        ttype::MAP => {
            let key_type = r.try_u8()?;
            let value_type = r.try_u8()?;
            let size = read_size(r)?;
            for _ in 0..size {
                skip_value(r, key_type, depth + 1)?;
                skip_value(r, value_type, depth + 1)?;
            }
        }
        ttype::SET | ttype::LIST => {
            let elem_type = r.try_u8()?;
            let size = read_size(r)?;
            for _ in 0..size {
                skip_value(r, elem_type, depth + 1)?;
            }
        }
        other => return Err(CodecError::InvalidTypeTag(other)),
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────
