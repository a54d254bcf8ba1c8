//! Thrift struct ⇄ tabular row bridge.
//!
//! This crate turns annotated struct descriptors into a normalized
//! tabular schema and moves records across that boundary in both
//! directions:
//!
//! - **Descriptors** ([`descriptor`]) — struct, field, and enum
//!   metadata, the input to everything else
//! - **Registry** ([`registry`]) — thread-safe name → descriptor store
//!   nested struct references resolve through
//! - **Resolution** ([`resolver`]) — validated, memoized dispatch
//!   tables with duplicate-id and cycle detection
//! - **Schema** ([`schema`]) — the Arrow schema derived from a resolved
//!   struct, field ids carried as metadata
//! - **Row model** ([`row`]) — the fixed-arity value rows the bridge
//!   produces and consumes
//! - **Wire codec** ([`wire`]) — the tag/id binary struct format
//! - **Decoder / encoder** ([`decoder`], [`encoder`]) — the per-record
//!   operations, with configurable malformed-record policy
//!
//! # Architecture
//!
//! ```text
//! StructDescriptor ──register──▶ StructRegistry
//!                                     │
//!                        StructResolver::resolve()
//!                                     │ (dup ids, cycles, unknown names)
//!                                     ▼
//!                              ResolvedStruct ──▶ arrow_schema()
//!                              ▲            ▲
//!              ThriftDecoder ──┘            └── ThriftEncoder
//!              bytes → Row                      Row → bytes
//! ```
//!
//! Decode is tolerant per field (unset or unreadable fields take column
//! defaults) and policy-driven per record; encode is exact and rejects
//! any row that does not match its struct.

mod convert;

pub mod decoder;
pub mod defaults;
pub mod descriptor;
pub mod encoder;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod row;
pub mod schema;
pub mod wire;

// ── Re-exports for convenience ─────────────────────────────────────

pub use decoder::{FailurePolicy, ThriftDecoder};
pub use defaults::default_value;
pub use descriptor::{EnumDescriptor, FieldDescriptor, StructDescriptor, TypeDescriptor};
pub use encoder::ThriftEncoder;
pub use error::{
    CodecError, DecodeError, EncodeError, FieldReadError, SchemaError, SchemaResult,
};
pub use registry::StructRegistry;
pub use resolver::{ResolvedField, ResolvedStruct, ResolvedType, StructResolver};
pub use row::{Row, Value};
pub use schema::{arrow_schema_of, column_type, FIELD_ID_META_KEY};
pub use wire::{BinaryCodec, WireStruct, WireValue};
