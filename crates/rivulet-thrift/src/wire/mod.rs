//! Wire representation and codec.
//!
//! [`value`] holds the in-memory wire model ([`WireStruct`] /
//! [`WireValue`]); [`codec`] is the binary protocol that parses and
//! serializes it. Both are self-describing: every wire value carries its
//! type tag, so parsing needs no schema and the bridge's type decisions
//! happen entirely in the conversion layer above.

pub mod codec;
pub mod value;

pub use codec::BinaryCodec;
pub use value::{WireStruct, WireValue};

/// Wire type tags of the binary protocol.
pub mod tags {
    /// End of struct.
    pub const STOP: u8 = 0;
    /// Boolean (one byte, `0` or `1`).
    pub const BOOL: u8 = 2;
    /// Signed 8-bit integer.
    pub const BYTE: u8 = 3;
    /// IEEE 754 double, big-endian.
    pub const DOUBLE: u8 = 4;
    /// Signed 16-bit integer, big-endian.
    pub const I16: u8 = 6;
    /// Signed 32-bit integer, big-endian.
    pub const I32: u8 = 8;
    /// Signed 64-bit integer, big-endian.
    pub const I64: u8 = 10;
    /// Length-prefixed byte sequence (text and binary alike).
    pub const STRING: u8 = 11;
    /// Nested struct, STOP-terminated.
    pub const STRUCT: u8 = 12;
    /// Map: key tag, value tag, count, entries.
    pub const MAP: u8 = 13;
    /// Set: element tag, count, elements.
    pub const SET: u8 = 14;
    /// List: element tag, count, elements.
    pub const LIST: u8 = 15;
}
