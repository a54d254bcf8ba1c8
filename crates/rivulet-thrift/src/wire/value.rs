//! In-memory wire model.
//!
//! [`WireStruct`] is the mutable scratch instance payloads are parsed
//! into and rows are rebuilt into. It is owned by exactly one execution
//! context at a time; reuse it across calls, never across threads.

use std::collections::BTreeMap;

use crate::wire::tags;

/// One wire value.
///
/// Text never appears here — the wire carries text and binary fields
/// identically as [`WireValue::Bytes`], and enums as [`WireValue::I32`];
/// the conversion layer applies the declared types. Collections remember
/// their element tags so empty collections serialize losslessly.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// Boolean.
    Bool(bool),
    /// Signed 8-bit integer.
    Byte(i8),
    /// IEEE 754 double.
    Double(f64),
    /// Signed 16-bit integer.
    I16(i16),
    /// Signed 32-bit integer (also enum case values).
    I32(i32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Byte sequence (text and binary fields alike).
    Bytes(Vec<u8>),
    /// Nested struct.
    Struct(WireStruct),
    /// Map with element tags and entries.
    Map {
        /// Wire tag of the key type.
        key_tag: u8,
        /// Wire tag of the value type.
        value_tag: u8,
        /// Entries in wire order.
        entries: Vec<(WireValue, WireValue)>,
    },
    /// Set with element tag and elements.
    Set {
        /// Wire tag of the element type.
        elem_tag: u8,
        /// Elements in wire order.
        elems: Vec<WireValue>,
    },
    /// List with element tag and elements.
    List {
        /// Wire tag of the element type.
        elem_tag: u8,
        /// Elements in wire order.
        elems: Vec<WireValue>,
    },
}

impl WireValue {
    /// Returns the wire type tag of this value.
    #[must_use]
    pub fn tag(&self) -> u8 {
        match self {
            WireValue::Bool(_) => tags::BOOL,
            WireValue::Byte(_) => tags::BYTE,
            WireValue::Double(_) => tags::DOUBLE,
            WireValue::I16(_) => tags::I16,
            WireValue::I32(_) => tags::I32,
            WireValue::I64(_) => tags::I64,
            WireValue::Bytes(_) => tags::STRING,
            WireValue::Struct(_) => tags::STRUCT,
            WireValue::Map { .. } => tags::MAP,
            WireValue::Set { .. } => tags::SET,
            WireValue::List { .. } => tags::LIST,
        }
    }

    /// Returns a short name for the value's kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            WireValue::Bool(_) => "bool",
            WireValue::Byte(_) => "byte",
            WireValue::Double(_) => "double",
            WireValue::I16(_) => "i16",
            WireValue::I32(_) => "i32",
            WireValue::I64(_) => "i64",
            WireValue::Bytes(_) => "bytes",
            WireValue::Struct(_) => "struct",
            WireValue::Map { .. } => "map",
            WireValue::Set { .. } => "set",
            WireValue::List { .. } => "list",
        }
    }
}

/// A mutable wire struct instance: field values keyed by field id.
///
/// Iteration order is ascending field id, which is also serialization
/// order. A field is "set" exactly when it has an entry here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireStruct {
    fields: BTreeMap<i16, WireValue>,
}

impl WireStruct {
    /// Creates an empty instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of field `id`, replacing any previous value.
    pub fn set(&mut self, id: i16, value: WireValue) {
        self.fields.insert(id, value);
    }

    /// Returns the value of field `id`, if set.
    #[must_use]
    pub fn get(&self, id: i16) -> Option<&WireValue> {
        self.fields.get(&id)
    }

    /// Returns `true` if field `id` carries a value.
    #[must_use]
    pub fn is_set(&self, id: i16) -> bool {
        self.fields.contains_key(&id)
    }

    /// Unsets all fields, keeping the allocation for reuse.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Returns the number of set fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates set fields in ascending-id order.
    pub fn iter(&self) -> impl Iterator<Item = (i16, &WireValue)> {
        self.fields.iter().map(|(id, value)| (*id, value))
    }
}
