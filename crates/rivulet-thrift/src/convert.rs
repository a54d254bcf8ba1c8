//! Wire ⇄ row conversion.
//!
//! Both directions walk a [`ResolvedStruct`] and its field types; the
//! asymmetry between them is deliberate and load-bearing:
//!
//! - Wire → row never fails per record once the payload has parsed. A
//!   field that is absent, malformed, or type-shifted is treated as
//!   unset and takes the column default; the fold is counted and logged
//!   at debug level.
//! - Row → wire fails loudly. A mistyped, out-of-range, or colliding
//!   value aborts the whole record with a precise [`EncodeError`] and
//!   no partial output.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::defaults::default_value;
use crate::error::{EncodeError, FieldReadError};
use crate::resolver::{ResolvedStruct, ResolvedType};
use crate::row::{Row, Value};
use crate::wire::{tags, WireStruct, WireValue};

/// Decode-side diagnostics shared across records.
#[derive(Debug, Default)]
pub(crate) struct DecodeStats {
    defaulted_fields: AtomicU64,
}

impl DecodeStats {
    fn record_defaulted(&self) {
        self.defaulted_fields.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn defaulted_fields(&self) -> u64 {
        self.defaulted_fields.load(Ordering::Relaxed)
    }
}

/// Converts a parsed wire struct into a row, one column per resolved
/// field in ascending-id order. Infallible per record: every field-local
/// failure collapses to the column default.
pub(crate) fn struct_to_row(
    resolved: &ResolvedStruct,
    instance: &WireStruct,
    stats: &DecodeStats,
) -> Row {
    let mut values = Vec::with_capacity(resolved.field_count());
    for field in resolved.fields() {
        let value = match instance.get(field.id) {
            Some(wire) => match wire_to_value(&field.ty, wire, stats) {
                Ok(value) => value,
                Err(err) => {
                    stats.record_defaulted();
                    debug!(
                        struct_name = resolved.name(),
                        field = %field.name,
                        field_id = field.id,
                        error = %err,
                        "field read failed, substituting default"
                    );
                    default_value(&field.ty)
                }
            },
            None => default_value(&field.ty),
        };
        values.push(value);
    }
    Row::new(values)
}

fn wire_to_value(
    ty: &ResolvedType,
    wire: &WireValue,
    stats: &DecodeStats,
) -> Result<Value, FieldReadError> {
    match (ty, wire) {
        (ResolvedType::Bool, WireValue::Bool(b)) => Ok(Value::Bool(*b)),
        (ResolvedType::Byte, WireValue::Byte(b)) => Ok(Value::Byte(*b)),
        (ResolvedType::I16, WireValue::I16(v)) => Ok(Value::I16(*v)),
        (ResolvedType::I32, WireValue::I32(v)) => Ok(Value::I32(*v)),
        (ResolvedType::I64, WireValue::I64(v)) => Ok(Value::I64(*v)),
        (ResolvedType::Double, WireValue::Double(d)) => Ok(Value::Double(*d)),
        (ResolvedType::Text, WireValue::Bytes(bytes)) => {
            Ok(Value::Text(String::from_utf8(bytes.clone())?))
        }
        (ResolvedType::Binary, WireValue::Bytes(bytes)) => Ok(Value::Binary(bytes.clone())),
        (ResolvedType::Enum(cases), WireValue::I32(v)) => {
            if cases.case_by_value(*v).is_some() {
                Ok(Value::I32(*v))
            } else {
                Err(FieldReadError::UnknownEnumCase {
                    enum_name: cases.name().to_string(),
                    value: *v,
                })
            }
        }
        (
            ResolvedType::List(elem) | ResolvedType::Set(elem),
            WireValue::List { elems, .. } | WireValue::Set { elems, .. },
        ) => {
            let converted = elems
                .iter()
                .map(|e| wire_to_value(elem, e, stats))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(converted))
        }
        (ResolvedType::Map(key_ty, value_ty), WireValue::Map { entries, .. }) => {
            let converted = entries
                .iter()
                .map(|(k, v)| {
                    Ok((
                        wire_to_value(key_ty, k, stats)?,
                        wire_to_value(value_ty, v, stats)?,
                    ))
                })
                .collect::<Result<Vec<_>, FieldReadError>>()?;
            Ok(Value::Map(converted))
        }
        (ResolvedType::Struct(nested), WireValue::Struct(instance)) => {
            Ok(Value::Row(struct_to_row(nested, instance, stats)))
        }
        (ty, wire) => Err(FieldReadError::ShapeMismatch {
            expected: ty.kind(),
            found: wire.kind(),
        }),
    }
}

/// Converts a row back into a wire struct.
///
/// Null columns are simply not set — an unset field takes no bytes on
/// the wire, and the peer's decoder substitutes its own default.
pub(crate) fn row_to_struct(
    resolved: &ResolvedStruct,
    row: &Row,
) -> Result<WireStruct, EncodeError> {
    if row.arity() != resolved.field_count() {
        return Err(EncodeError::ArityMismatch {
            struct_name: resolved.name().to_string(),
            expected: resolved.field_count(),
            found: row.arity(),
        });
    }

    let mut instance = WireStruct::new();
    for (field, value) in resolved.fields().iter().zip(row.values()) {
        if value.is_null() {
            continue;
        }
        instance.set(field.id, value_to_wire(&field.ty, value)?);
    }
    Ok(instance)
}

fn value_to_wire(ty: &ResolvedType, value: &Value) -> Result<WireValue, EncodeError> {
    match (ty, value) {
        (ResolvedType::Bool, Value::Bool(b)) => Ok(WireValue::Bool(*b)),
        (ResolvedType::Byte, Value::Byte(b)) => Ok(WireValue::Byte(*b)),
        (ResolvedType::I16, Value::I16(v)) => Ok(WireValue::I16(*v)),
        (ResolvedType::I32, Value::I32(v)) => Ok(WireValue::I32(*v)),
        (ResolvedType::I64, Value::I64(v)) => Ok(WireValue::I64(*v)),
        (ResolvedType::Double, Value::Double(d)) => Ok(WireValue::Double(*d)),
        (ResolvedType::Text, Value::Text(s)) => Ok(WireValue::Bytes(s.clone().into_bytes())),
        (ResolvedType::Binary, Value::Binary(bytes)) => Ok(WireValue::Bytes(bytes.clone())),
        (ResolvedType::Enum(cases), Value::I32(v)) => {
            if cases.case_by_value(*v).is_some() {
                Ok(WireValue::I32(*v))
            } else {
                Err(EncodeError::UnknownEnumValue {
                    enum_name: cases.name().to_string(),
                    value: *v,
                })
            }
        }
        (ResolvedType::List(elem), Value::List(values)) => Ok(WireValue::List {
            elem_tag: wire_tag(elem),
            elems: sequence_to_wire(elem, values)?,
        }),
        (ResolvedType::Set(elem), Value::List(values)) => Ok(WireValue::Set {
            elem_tag: wire_tag(elem),
            elems: sequence_to_wire(elem, values)?,
        }),
        (ResolvedType::Map(key_ty, value_ty), Value::Map(pairs)) => {
            let mut entries: Vec<(WireValue, WireValue)> = Vec::with_capacity(pairs.len());
            for (key, value) in pairs {
                let wire_key = value_to_wire(key_ty, key)?;
                if entries.iter().any(|(existing, _)| *existing == wire_key) {
                    return Err(EncodeError::DuplicateMapKey {
                        key: format!("{wire_key:?}"),
                    });
                }
                let wire_value = value_to_wire(value_ty, value)?;
                entries.push((wire_key, wire_value));
            }
            Ok(WireValue::Map {
                key_tag: wire_tag(key_ty),
                value_tag: wire_tag(value_ty),
                entries,
            })
        }
        (ResolvedType::Struct(nested), Value::Row(row)) => row_to_struct(nested, row)
            .map(WireValue::Struct)
            .map_err(|err| EncodeError::NestedEncodeFailure {
                struct_name: nested.name().to_string(),
                source: Box::new(err),
            }),
        (ty, Value::Null) => Err(EncodeError::UnsupportedType(format!(
            "null cannot be encoded as {} inside a collection",
            ty.kind()
        ))),
        (ty, value) => Err(EncodeError::TypeMismatch {
            expected: ty.kind(),
            found: value.kind(),
        }),
    }
}

fn sequence_to_wire(elem: &ResolvedType, values: &[Value]) -> Result<Vec<WireValue>, EncodeError> {
    values.iter().map(|v| value_to_wire(elem, v)).collect()
}

/// The wire tag a resolved type serializes under.
fn wire_tag(ty: &ResolvedType) -> u8 {
    match ty {
        ResolvedType::Bool => tags::BOOL,
        ResolvedType::Byte => tags::BYTE,
        ResolvedType::I16 => tags::I16,
        ResolvedType::I32 | ResolvedType::Enum(_) => tags::I32,
        ResolvedType::I64 => tags::I64,
        ResolvedType::Double => tags::DOUBLE,
        ResolvedType::Text | ResolvedType::Binary => tags::STRING,
        ResolvedType::List(_) => tags::LIST,
        ResolvedType::Set(_) => tags::SET,
        ResolvedType::Map(_, _) => tags::MAP,
        ResolvedType::Struct(_) => tags::STRUCT,
    }
}
