//! Struct resolution: descriptors → resolved per-type dispatch tables.
//!
//! A [`ResolvedStruct`] is the artifact every per-record operation runs
//! on: the fields of a [`StructDescriptor`] in ascending-id order with
//! every nested struct reference chased through the registry into an
//! `Arc`, so the decode/encode hot path performs zero registry lookups.
//!
//! Resolution is where all setup-time validation happens:
//!
//! - [`SchemaError::DuplicateFieldId`] if two fields of one struct share
//!   an id
//! - [`SchemaError::CyclicStruct`] if a struct transitively contains
//!   itself (checked with an explicit visited set along the recursion
//!   path — unguarded recursion would never terminate here)
//! - [`SchemaError::UnresolvableType`] if a referenced type name is not
//!   registered
//!
//! [`StructResolver`] memoizes per type name; resolved structs are
//! immutable and freely shared across threads.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use arrow_schema::SchemaRef;
use parking_lot::RwLock;

use crate::descriptor::{EnumDescriptor, StructDescriptor, TypeDescriptor};
use crate::error::{SchemaError, SchemaResult};
use crate::registry::StructRegistry;
use crate::schema;

/// A fully resolved field type: like [`TypeDescriptor`], but with nested
/// struct references replaced by shared resolved structs. The binary flag
/// has already been applied — [`ResolvedType::Text`] and
/// [`ResolvedType::Binary`] are distinct types from here on, however
/// deeply nested the field sits.
#[derive(Debug, Clone)]
pub enum ResolvedType {
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
    /// Text string.
    Text,
    /// Byte sequence.
    Binary,
    /// Enum with its declared case set.
    Enum(Arc<EnumDescriptor>),
    /// Ordered sequence.
    List(Box<ResolvedType>),
    /// Unordered collection.
    Set(Box<ResolvedType>),
    /// Key/value mapping.
    Map(Box<ResolvedType>, Box<ResolvedType>),
    /// Nested struct.
    Struct(Arc<ResolvedStruct>),
}

impl ResolvedType {
    /// Returns a short name for the type, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedType::Bool => "bool",
            ResolvedType::Byte => "byte",
            ResolvedType::I16 => "i16",
            ResolvedType::I32 => "i32",
            ResolvedType::I64 => "i64",
            ResolvedType::Double => "double",
            ResolvedType::Text => "text",
            ResolvedType::Binary => "binary",
            ResolvedType::Enum(_) => "enum",
            ResolvedType::List(_) => "list",
            ResolvedType::Set(_) => "set",
            ResolvedType::Map(_, _) => "map",
            ResolvedType::Struct(_) => "struct",
        }
    }
}

/// One resolved field.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    /// Stable field id.
    pub id: i16,
    /// Field name.
    pub name: String,
    /// Resolved field type.
    pub ty: ResolvedType,
}

/// A resolved struct type: fields in ascending-id order, nested structs
/// chased, normalized schema derived on first use.
#[derive(Debug)]
pub struct ResolvedStruct {
    name: String,
    fields: Vec<ResolvedField>,
    arrow: OnceLock<SchemaRef>,
}

impl ResolvedStruct {
    /// Returns the struct type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in ascending-id order.
    #[must_use]
    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// Returns the number of fields (always the arity of decoded rows).
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the normalized Arrow schema for this struct.
    ///
    /// Computed at most once and shared read-only thereafter.
    #[must_use]
    pub fn arrow_schema(&self) -> SchemaRef {
        self.arrow
            .get_or_init(|| Arc::new(schema::arrow_schema_of(self)))
            .clone()
    }
}

/// Resolves struct type names into [`ResolvedStruct`]s, memoized per name.
///
/// Concurrent first calls for the same type may redundantly compute, but
/// exactly one result is published; later calls share it.
#[derive(Debug)]
pub struct StructResolver {
    registry: Arc<StructRegistry>,
    cache: RwLock<HashMap<String, Arc<ResolvedStruct>>>,
}

impl StructResolver {
    /// Creates a resolver over the given registry.
    #[must_use]
    pub fn new(registry: Arc<StructRegistry>) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves a struct type by name, validating it on first use.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for unknown type names, duplicate field
    /// ids, or cyclic struct definitions.
    pub fn resolve(&self, type_name: &str) -> SchemaResult<Arc<ResolvedStruct>> {
        if let Some(hit) = self.cache.read().get(type_name) {
            return Ok(Arc::clone(hit));
        }

        let descriptor = self
            .registry
            .lookup(type_name)
            .ok_or_else(|| SchemaError::UnresolvableType(type_name.to_string()))?;

        let mut path = Vec::new();
        let resolved = self.resolve_struct(&descriptor, &mut path)?;

        Ok(Arc::clone(
            self.cache
                .write()
                .entry(type_name.to_string())
                .or_insert(resolved),
        ))
    }

    fn resolve_struct(
        &self,
        descriptor: &StructDescriptor,
        path: &mut Vec<String>,
    ) -> SchemaResult<Arc<ResolvedStruct>> {
        if path.iter().any(|name| name == descriptor.name()) {
            return Err(SchemaError::CyclicStruct(descriptor.name().to_string()));
        }

        let mut seen = HashSet::with_capacity(descriptor.field_count());
        for field in descriptor.fields() {
            if !seen.insert(field.id) {
                return Err(SchemaError::DuplicateFieldId {
                    struct_name: descriptor.name().to_string(),
                    id: field.id,
                });
            }
        }

        path.push(descriptor.name().to_string());
        let fields = descriptor
            .fields()
            .iter()
            .map(|field| {
                Ok(ResolvedField {
                    id: field.id,
                    name: field.name.clone(),
                    ty: self.resolve_type(&field.value_type, path)?,
                })
            })
            .collect::<SchemaResult<Vec<_>>>();
        path.pop();

        Ok(Arc::new(ResolvedStruct {
            name: descriptor.name().to_string(),
            fields: fields?,
            arrow: OnceLock::new(),
        }))
    }

    fn resolve_type(
        &self,
        ty: &TypeDescriptor,
        path: &mut Vec<String>,
    ) -> SchemaResult<ResolvedType> {
        Ok(match ty {
            TypeDescriptor::Bool => ResolvedType::Bool,
            TypeDescriptor::Byte => ResolvedType::Byte,
            TypeDescriptor::I16 => ResolvedType::I16,
            TypeDescriptor::I32 => ResolvedType::I32,
            TypeDescriptor::I64 => ResolvedType::I64,
            TypeDescriptor::Double => ResolvedType::Double,
            TypeDescriptor::String { binary: false } => ResolvedType::Text,
            TypeDescriptor::String { binary: true } => ResolvedType::Binary,
            TypeDescriptor::Enum(cases) => ResolvedType::Enum(Arc::clone(cases)),
            TypeDescriptor::List(elem) => {
                ResolvedType::List(Box::new(self.resolve_type(elem, path)?))
            }
            TypeDescriptor::Set(elem) => {
                ResolvedType::Set(Box::new(self.resolve_type(elem, path)?))
            }
            TypeDescriptor::Map(key, value) => ResolvedType::Map(
                Box::new(self.resolve_type(key, path)?),
                Box::new(self.resolve_type(value, path)?),
            ),
            TypeDescriptor::Struct { type_name } => {
                // Nested types hit the memo too, but only when fully
                // resolved outside the current recursion path — a cached
                // entry must never mask a cycle.
                if let Some(hit) = self.cache.read().get(type_name) {
                    if !path.iter().any(|name| name == type_name) {
                        return Ok(ResolvedType::Struct(Arc::clone(hit)));
                    }
                }
                let descriptor = self
                    .registry
                    .lookup(type_name)
                    .ok_or_else(|| SchemaError::UnresolvableType(type_name.clone()))?;
                let resolved = self.resolve_struct(&descriptor, path)?;
                let resolved = Arc::clone(
                    self.cache
                        .write()
                        .entry(type_name.clone())
                        .or_insert(resolved),
                );
                ResolvedType::Struct(resolved)
            }
        })
    }
}
