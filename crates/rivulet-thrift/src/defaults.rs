//! Default values substituted for unset fields during decode.
//!
//! Primitives default to their zero value, text to the empty string,
//! binary to an empty byte sequence, and composite types (list, set, map,
//! struct) to [`Value::Null`]. Enum columns default to `0` whether or not
//! `0` is a declared case — encode will refuse such a value loudly, which
//! is the intended asymmetry between the two directions.

use crate::resolver::ResolvedType;
use crate::row::Value;

/// Returns the canonical default for an unset field of the given type.
#[must_use]
pub fn default_value(ty: &ResolvedType) -> Value {
    match ty {
        ResolvedType::Bool => Value::Bool(false),
        ResolvedType::Byte => Value::Byte(0),
        ResolvedType::I16 => Value::I16(0),
        ResolvedType::I32 | ResolvedType::Enum(_) => Value::I32(0),
        ResolvedType::I64 => Value::I64(0),
        ResolvedType::Double => Value::Double(0.0),
        ResolvedType::Text => Value::Text(String::new()),
        ResolvedType::Binary => Value::Binary(Vec::new()),
        ResolvedType::List(_)
        | ResolvedType::Set(_)
        | ResolvedType::Map(_, _)
        | ResolvedType::Struct(_) => Value::Null,
    }
}
