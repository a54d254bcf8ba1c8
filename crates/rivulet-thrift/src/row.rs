//! The tabular row model the bridge fills and reads.
//!
//! A [`Row`] is an index-addressable, fixed-arity sequence of [`Value`]s,
//! one per schema column; its arity always equals the struct's field
//! count. Rows are created fresh per decode and consumed by the caller —
//! the bridge never retains them.

/// One column value.
///
/// The variant at column `i` is dictated by the normalized schema: the
/// bridge guarantees this on decode and enforces it on encode. Enum
/// columns hold the case's integer value as [`Value::I32`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent composite value (unset list/set/map/struct field).
    Null,
    /// Boolean column value.
    Bool(bool),
    /// 8-bit integer column value.
    Byte(i8),
    /// 16-bit integer column value.
    I16(i16),
    /// 32-bit integer column value (also enum case values).
    I32(i32),
    /// 64-bit integer column value.
    I64(i64),
    /// Double column value.
    Double(f64),
    /// Text column value.
    Text(String),
    /// Byte-sequence column value.
    Binary(Vec<u8>),
    /// Sequence column value (list fields keep order; set fields do not
    /// guarantee one).
    List(Vec<Value>),
    /// Mapping column value as key/value pairs.
    Map(Vec<(Value, Value)>),
    /// Nested-row column value.
    Row(Row),
}

impl Value {
    /// Returns a short name for the value's kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Byte(_) => "byte",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::Double(_) => "double",
            Value::Text(_) => "text",
            Value::Binary(_) => "binary",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Row(_) => "row",
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// An ordered, fixed-arity sequence of column values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Creates a row from its column values.
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// Returns the value at column `index`, or `None` out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns all column values in order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consumes the row, yielding its column values.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
