//! Struct metadata descriptors.
//!
//! Descriptors describe a Thrift struct type the way its IDL does: a set
//! of fields keyed by small stable numeric ids, each carrying a wire type.
//! They are the registry-facing input of the bridge — the engine never
//! reads wire metadata at record time, only these descriptors.
//!
//! - [`StructDescriptor`]: ordered, id-keyed field set for one struct type
//! - [`FieldDescriptor`]: one field (id, name, type)
//! - [`TypeDescriptor`]: the wire type of a field, possibly composite
//! - [`EnumDescriptor`]: declared cases of an enum type

use std::sync::Arc;

/// Declared cases of a Thrift enum.
///
/// Case values are the stable integers the wire carries; case names are
/// only used for diagnostics and host-side lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: String,
    cases: Vec<(String, i32)>,
}

impl EnumDescriptor {
    /// Creates an enum descriptor with no cases.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Adds a declared case.
    #[must_use]
    pub fn with_case(mut self, name: impl Into<String>, value: i32) -> Self {
        self.cases.push((name.into(), value));
        self
    }

    /// Returns the enum type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a case name by its integer value.
    #[must_use]
    pub fn case_by_value(&self, value: i32) -> Option<&str> {
        self.cases
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(n, _)| n.as_str())
    }

    /// Looks up a case value by its name.
    #[must_use]
    pub fn case_by_name(&self, name: &str) -> Option<i32> {
        self.cases.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// Returns the declared cases in declaration order.
    #[must_use]
    pub fn cases(&self) -> &[(String, i32)] {
        &self.cases
    }
}

/// The wire type of a field.
///
/// `String` covers both text and binary fields — the two share a wire
/// representation and are told apart by the explicit `binary` flag carried
/// over from the source metadata, never inferred from content. Nested
/// structs are referenced *by type name* and resolved through the
/// [`StructRegistry`](crate::registry::StructRegistry), which keeps
/// self-referential definitions expressible (and detectable).
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Boolean.
    Bool,
    /// Signed 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// IEEE 754 double.
    Double,
    /// Text or binary payload, per the flag.
    String {
        /// `true` routes the field to a byte-sequence column.
        binary: bool,
    },
    /// Enum with a declared case set; carried as `i32` on the wire.
    Enum(Arc<EnumDescriptor>),
    /// Ordered sequence of elements.
    List(Box<TypeDescriptor>),
    /// Unordered collection of elements.
    Set(Box<TypeDescriptor>),
    /// Key/value mapping.
    Map(Box<TypeDescriptor>, Box<TypeDescriptor>),
    /// Nested struct, resolved by name through the registry.
    Struct {
        /// Registered type name of the nested struct.
        type_name: String,
    },
}

impl TypeDescriptor {
    /// A text string field.
    #[must_use]
    pub fn text() -> Self {
        Self::String { binary: false }
    }

    /// A binary (byte sequence) field.
    #[must_use]
    pub fn binary() -> Self {
        Self::String { binary: true }
    }

    /// A list of `elem`.
    #[must_use]
    pub fn list(elem: TypeDescriptor) -> Self {
        Self::List(Box::new(elem))
    }

    /// A set of `elem`.
    #[must_use]
    pub fn set(elem: TypeDescriptor) -> Self {
        Self::Set(Box::new(elem))
    }

    /// A map from `key` to `value`.
    #[must_use]
    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// A nested struct reference.
    #[must_use]
    pub fn struct_of(type_name: impl Into<String>) -> Self {
        Self::Struct {
            type_name: type_name.into(),
        }
    }
}

/// One field of a struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Stable numeric field id, unique within the struct and non-negative.
    /// Ids — not declaration order — determine column order.
    pub id: i16,

    /// Field name, used for column naming.
    pub name: String,

    /// Wire type of the field.
    pub value_type: TypeDescriptor,
}

impl FieldDescriptor {
    /// Creates a field descriptor.
    #[must_use]
    pub fn new(id: i16, name: impl Into<String>, value_type: TypeDescriptor) -> Self {
        Self {
            id,
            name: name.into(),
            value_type,
        }
    }
}

/// Field metadata for one struct type.
///
/// Fields are kept sorted by ascending id regardless of the order they
/// were added in; duplicate ids are allowed here and rejected during
/// resolution. Once handed to the registry a descriptor is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    /// Creates a struct descriptor with no fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field, keeping fields ordered by ascending id.
    #[must_use]
    pub fn with_field(mut self, id: i16, name: impl Into<String>, value_type: TypeDescriptor) -> Self {
        self.fields.push(FieldDescriptor::new(id, name, value_type));
        self.fields.sort_by_key(|f| f.id);
        self
    }

    /// Returns the struct type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in ascending-id order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_lookup() {
        let op = EnumDescriptor::new("Operation")
            .with_case("ADD", 1)
            .with_case("SUBTRACT", 2);

        assert_eq!(op.name(), "Operation");
        assert_eq!(op.case_by_value(2), Some("SUBTRACT"));
        assert_eq!(op.case_by_name("ADD"), Some(1));
        assert_eq!(op.case_by_value(9), None);
        assert_eq!(op.case_by_name("DIVIDE"), None);
    }

    #[test]
    fn test_fields_sorted_by_id() {
        let desc = StructDescriptor::new("Work")
            .with_field(3, "c", TypeDescriptor::I32)
            .with_field(1, "a", TypeDescriptor::I64)
            .with_field(2, "b", TypeDescriptor::text());

        let ids: Vec<i16> = desc.fields().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let names: Vec<&str> = desc.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_type_constructors() {
        assert_eq!(TypeDescriptor::text(), TypeDescriptor::String { binary: false });
        assert_eq!(TypeDescriptor::binary(), TypeDescriptor::String { binary: true });

        let ty = TypeDescriptor::map(TypeDescriptor::text(), TypeDescriptor::struct_of("Item"));
        match ty {
            TypeDescriptor::Map(k, v) => {
                assert_eq!(*k, TypeDescriptor::String { binary: false });
                assert_eq!(*v, TypeDescriptor::Struct { type_name: "Item".into() });
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_ids_kept_until_resolution() {
        let desc = StructDescriptor::new("Bad")
            .with_field(1, "x", TypeDescriptor::I32)
            .with_field(1, "y", TypeDescriptor::I32);
        assert_eq!(desc.field_count(), 2);
    }
}
