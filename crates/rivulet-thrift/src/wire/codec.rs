//! Binary wire protocol.
//!
//! Structs are sequences of `[tag: u8][field id: i16 BE][value]` entries
//! terminated by a STOP byte. Values are big-endian; byte sequences are
//! `i32` length-prefixed; maps carry key and value tags, sets and lists
//! an element tag, each followed by an `i32` element count.
//!
//! Parsing is schema-free — every value is self-describing — and fully
//! validating: truncation, negative or oversized lengths, unknown tags
//! and runaway nesting all surface as [`CodecError`]s, never panics.

use bytes::{Buf, BufMut};

use crate::error::CodecError;
use crate::wire::tags;
use crate::wire::value::{WireStruct, WireValue};

/// Maximum nesting depth accepted while parsing.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The struct-level binary codec.
///
/// Stateless; both operations run over in-memory buffers only.
#[derive(Debug)]
pub struct BinaryCodec;

impl BinaryCodec {
    /// Parses `bytes` into `instance`, clearing it first.
    ///
    /// Bytes past the terminating STOP are ignored, matching the framing
    /// behavior of the upstream protocol.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] for truncated, over-nested, or otherwise
    /// malformed input. On error the instance is left partially filled
    /// and must be cleared (or re-parsed) before use.
    pub fn parse(instance: &mut WireStruct, bytes: &[u8]) -> Result<(), CodecError> {
        instance.clear();
        let mut buf = bytes;
        read_struct_fields(&mut buf, instance, 0)
    }

    /// Serializes an instance, fields in ascending-id order.
    #[must_use]
    pub fn serialize(instance: &WireStruct) -> Vec<u8> {
        let mut out = Vec::with_capacity(64);
        write_struct(&mut out, instance);
        out
    }
}

// ── Reading ────────────────────────────────────────────────────────

fn ensure(buf: &[u8], needed: usize) -> Result<(), CodecError> {
    if buf.remaining() < needed {
        Err(CodecError::UnexpectedEof {
            needed,
            remaining: buf.remaining(),
        })
    } else {
        Ok(())
    }
}

fn read_u8(buf: &mut &[u8]) -> Result<u8, CodecError> {
    ensure(buf, 1)?;
    Ok(buf.get_u8())
}

fn read_i16(buf: &mut &[u8]) -> Result<i16, CodecError> {
    ensure(buf, 2)?;
    Ok(buf.get_i16())
}

fn read_i32(buf: &mut &[u8]) -> Result<i32, CodecError> {
    ensure(buf, 4)?;
    Ok(buf.get_i32())
}

fn read_i64(buf: &mut &[u8]) -> Result<i64, CodecError> {
    ensure(buf, 8)?;
    Ok(buf.get_i64())
}

fn read_f64(buf: &mut &[u8]) -> Result<f64, CodecError> {
    ensure(buf, 8)?;
    Ok(buf.get_f64())
}

/// Reads an `i32` count and validates it against the bytes remaining
/// (every element takes at least one byte on the wire).
fn read_count(buf: &mut &[u8]) -> Result<usize, CodecError> {
    let count = read_i32(buf)?;
    if count < 0 {
        return Err(CodecError::InvalidLength(count));
    }
    #[allow(clippy::cast_sign_loss)]
    let count = count as usize;
    if count > buf.remaining() {
        return Err(CodecError::UnexpectedEof {
            needed: count,
            remaining: buf.remaining(),
        });
    }
    Ok(count)
}

fn read_bytes(buf: &mut &[u8]) -> Result<Vec<u8>, CodecError> {
    let len = read_count(buf)?;
    let mut out = vec![0u8; len];
    buf.copy_to_slice(&mut out);
    Ok(out)
}

fn read_struct_fields(
    buf: &mut &[u8],
    out: &mut WireStruct,
    depth: usize,
) -> Result<(), CodecError> {
    loop {
        let tag = read_u8(buf)?;
        if tag == tags::STOP {
            return Ok(());
        }
        let id = read_i16(buf)?;
        let value = read_value(buf, tag, depth)?;
        out.set(id, value);
    }
}

fn read_value(buf: &mut &[u8], tag: u8, depth: usize) -> Result<WireValue, CodecError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(CodecError::DepthExceeded(MAX_NESTING_DEPTH));
    }
    match tag {
        tags::BOOL => Ok(WireValue::Bool(read_u8(buf)? != 0)),
        #[allow(clippy::cast_possible_wrap)]
        tags::BYTE => Ok(WireValue::Byte(read_u8(buf)? as i8)),
        tags::DOUBLE => Ok(WireValue::Double(read_f64(buf)?)),
        tags::I16 => Ok(WireValue::I16(read_i16(buf)?)),
        tags::I32 => Ok(WireValue::I32(read_i32(buf)?)),
        tags::I64 => Ok(WireValue::I64(read_i64(buf)?)),
        tags::STRING => Ok(WireValue::Bytes(read_bytes(buf)?)),
        tags::STRUCT => {
            let mut nested = WireStruct::new();
            read_struct_fields(buf, &mut nested, depth + 1)?;
            Ok(WireValue::Struct(nested))
        }
        tags::MAP => {
            let key_tag = read_u8(buf)?;
            let value_tag = read_u8(buf)?;
            let count = read_count(buf)?;
            let mut entries = Vec::with_capacity(count);
            for _ in 0..count {
                let key = read_value(buf, key_tag, depth + 1)?;
                let value = read_value(buf, value_tag, depth + 1)?;
                entries.push((key, value));
            }
            Ok(WireValue::Map {
                key_tag,
                value_tag,
                entries,
            })
        }
        tags::SET => {
            let (elem_tag, elems) = read_sequence(buf, depth)?;
            Ok(WireValue::Set { elem_tag, elems })
        }
        tags::LIST => {
            let (elem_tag, elems) = read_sequence(buf, depth)?;
            Ok(WireValue::List { elem_tag, elems })
        }
        other => Err(CodecError::UnknownTypeTag(other)),
    }
}

fn read_sequence(buf: &mut &[u8], depth: usize) -> Result<(u8, Vec<WireValue>), CodecError> {
    let elem_tag = read_u8(buf)?;
    let count = read_count(buf)?;
    let mut elems = Vec::with_capacity(count);
    for _ in 0..count {
        elems.push(read_value(buf, elem_tag, depth + 1)?);
    }
    Ok((elem_tag, elems))
}

// ── Writing ────────────────────────────────────────────────────────

fn write_struct(out: &mut Vec<u8>, instance: &WireStruct) {
    for (id, value) in instance.iter() {
        out.put_u8(value.tag());
        out.put_i16(id);
        write_value(out, value);
    }
    out.put_u8(tags::STOP);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn write_value(out: &mut Vec<u8>, value: &WireValue) {
    match value {
        WireValue::Bool(b) => out.put_u8(u8::from(*b)),
        WireValue::Byte(b) => out.put_u8(*b as u8),
        WireValue::Double(d) => out.put_f64(*d),
        WireValue::I16(v) => out.put_i16(*v),
        WireValue::I32(v) => out.put_i32(*v),
        WireValue::I64(v) => out.put_i64(*v),
        WireValue::Bytes(bytes) => {
            out.put_i32(bytes.len() as i32);
            out.extend_from_slice(bytes);
        }
        WireValue::Struct(nested) => write_struct(out, nested),
        WireValue::Map {
            key_tag,
            value_tag,
            entries,
        } => {
            out.put_u8(*key_tag);
            out.put_u8(*value_tag);
            out.put_i32(entries.len() as i32);
            for (key, value) in entries {
                write_value(out, key);
                write_value(out, value);
            }
        }
        WireValue::Set { elem_tag, elems } | WireValue::List { elem_tag, elems } => {
            out.put_u8(*elem_tag);
            out.put_i32(elems.len() as i32);
            for elem in elems {
                write_value(out, elem);
            }
        }
    }
}
