//! Mapping resolved struct types onto Arrow schemas.
//!
//! [`column_type`] is a pure function from a resolved field type to an
//! Arrow [`DataType`]; [`arrow_schema_of`] applies it to every field of a
//! struct, producing the normalized schema the host engine consumes.
//! Column order mirrors the resolved field order (ascending field id).
//!
//! Type mapping follows the wire format's base types:
//!
//! | Wire type | Column type |
//! |-----------|-------------|
//! | bool | `Boolean` |
//! | byte | `Int8` |
//! | i16 / i32 / i64 | `Int16` / `Int32` / `Int64` |
//! | double | `Float64` |
//! | string | `Utf8`, or `Binary` when the binary flag is set |
//! | enum | `Int32` (the case value) |
//! | list / set | `List` of the mapped element type |
//! | map | `Map` with both key and value types mapped |
//! | struct | `Struct` of the nested fields |

use std::collections::HashMap;
use std::sync::Arc;

use arrow_schema::{DataType, Field, FieldRef, Fields, Schema};

use crate::resolver::{ResolvedField, ResolvedStruct, ResolvedType};

/// Field metadata key carrying the wire field id on each Arrow field.
pub const FIELD_ID_META_KEY: &str = "thrift.field.id";

/// Maps a resolved field type to its Arrow column type.
///
/// Set fields map to `List` like list fields do; the distinction is
/// behavioral only (set iteration order is not guaranteed — callers must
/// not depend on it).
#[must_use]
pub fn column_type(ty: &ResolvedType) -> DataType {
    match ty {
        ResolvedType::Bool => DataType::Boolean,
        ResolvedType::Byte => DataType::Int8,
        ResolvedType::I16 => DataType::Int16,
        ResolvedType::I32 | ResolvedType::Enum(_) => DataType::Int32,
        ResolvedType::I64 => DataType::Int64,
        ResolvedType::Double => DataType::Float64,
        ResolvedType::Text => DataType::Utf8,
        ResolvedType::Binary => DataType::Binary,
        ResolvedType::List(elem) | ResolvedType::Set(elem) => {
            DataType::List(Arc::new(Field::new("item", column_type(elem), true)))
        }
        ResolvedType::Map(key, value) => {
            let entries = Field::new(
                "entries",
                DataType::Struct(Fields::from(vec![
                    Field::new("key", column_type(key), false),
                    Field::new("value", column_type(value), true),
                ])),
                false,
            );
            DataType::Map(Arc::new(entries), false)
        }
        ResolvedType::Struct(nested) => DataType::Struct(struct_fields(nested)),
    }
}

/// Builds the normalized Arrow schema of a resolved struct.
///
/// Columns appear in ascending field-id order; every column carries its
/// wire field id under [`FIELD_ID_META_KEY`].
#[must_use]
pub fn arrow_schema_of(resolved: &ResolvedStruct) -> Schema {
    Schema::new(struct_fields(resolved))
}

fn struct_fields(resolved: &ResolvedStruct) -> Fields {
    resolved.fields().iter().map(arrow_field).collect()
}

fn arrow_field(field: &ResolvedField) -> FieldRef {
    let metadata = HashMap::from([(FIELD_ID_META_KEY.to_string(), field.id.to_string())]);
    Arc::new(Field::new(&field.name, column_type(&field.ty), true).with_metadata(metadata))
}
