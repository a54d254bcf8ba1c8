//! Error types for the Thrift format bridge.
//!
//! Three distinct stages, three distinct taxonomies:
//!
//! - [`SchemaError`] — setup-time failures. Always fatal; a decoder or
//!   encoder must refuse to construct before any record is processed.
//! - [`DecodeError`] / [`EncodeError`] — per-record failures. Decode
//!   follows the configured [`FailurePolicy`](crate::decoder::FailurePolicy);
//!   encode always surfaces the precise error and lets the caller decide.
//! - [`FieldReadError`] — field-local decode failures, always folded into
//!   "treat the field as unset". Never propagated, but named and counted.

use thiserror::Error;

/// Result alias for schema resolution operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Setup-time schema failures.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two fields of one struct share a field id.
    #[error("duplicate field id {id} in struct '{struct_name}'")]
    DuplicateFieldId {
        /// The struct declaring the colliding fields.
        struct_name: String,
        /// The colliding id.
        id: i16,
    },

    /// A struct transitively contains itself.
    #[error("struct '{0}' transitively contains itself")]
    CyclicStruct(String),

    /// A struct type name is not present in the registry.
    #[error("unresolvable struct type '{0}'")]
    UnresolvableType(String),
}

/// Wire codec failures (malformed framing, truncation, bad tags).
#[derive(Debug, Error)]
pub enum CodecError {
    /// The buffer ended before a complete value was read.
    #[error("unexpected end of input ({remaining} bytes remaining, {needed} needed)")]
    UnexpectedEof {
        /// Bytes the next read required.
        needed: usize,
        /// Bytes actually remaining.
        remaining: usize,
    },

    /// An unrecognized wire type tag.
    #[error("unknown wire type tag 0x{0:02x}")]
    UnknownTypeTag(u8),

    /// A negative or oversized length prefix.
    #[error("invalid length prefix {0}")]
    InvalidLength(i32),

    /// Nesting exceeded the codec's depth limit.
    #[error("nesting depth exceeds limit of {0}")]
    DepthExceeded(usize),
}

/// Per-record decode failures.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not a well-formed wire struct.
    #[error("malformed wire payload: {0}")]
    MalformedPayload(#[from] CodecError),
}

/// Per-record encode failures.
///
/// Encoding never substitutes defaults for invalid data — every variant
/// here aborts the whole record with no partial frame output.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A value cannot be represented on the wire where it stands.
    #[error("unsupported value for encoding: {0}")]
    UnsupportedType(String),

    /// A row value does not have the type its column declares.
    #[error("type mismatch: column expects {expected}, row holds {found}")]
    TypeMismatch {
        /// The declared column type.
        expected: &'static str,
        /// The kind of value actually present.
        found: &'static str,
    },

    /// An integer does not match any declared enum case.
    #[error("value {value} does not match any case of enum '{enum_name}'")]
    UnknownEnumValue {
        /// The enum type name.
        enum_name: String,
        /// The out-of-range value.
        value: i32,
    },

    /// Two map entries converted to the same wire key.
    #[error("duplicate map key after conversion: {key}")]
    DuplicateMapKey {
        /// Debug rendering of the colliding key.
        key: String,
    },

    /// Row arity differs from the struct's field count.
    #[error("row arity {found} does not match struct '{struct_name}' field count {expected}")]
    ArityMismatch {
        /// The target struct type.
        struct_name: String,
        /// The struct's field count.
        expected: usize,
        /// The row's arity.
        found: usize,
    },

    /// A nested row failed to encode.
    #[error("failed to encode nested struct '{struct_name}'")]
    NestedEncodeFailure {
        /// The nested struct type.
        struct_name: String,
        /// The underlying failure.
        #[source]
        source: Box<EncodeError>,
    },
}

/// A field-local read failure during decode.
///
/// These are deliberately not errors of [`DecodeError`]: the decoder
/// folds every one of them into "treat the field as unset" and substitutes
/// the column default, matching deployed behavior. The fold is observable
/// through [`ThriftDecoder::defaulted_field_count`](crate::decoder::ThriftDecoder::defaulted_field_count)
/// and a debug-level log line.
#[derive(Debug, Error)]
pub enum FieldReadError {
    /// The wire value's shape does not match the declared type.
    #[error("wire value {found} does not match declared type {expected}")]
    ShapeMismatch {
        /// The declared type.
        expected: &'static str,
        /// The wire value actually present.
        found: &'static str,
    },

    /// A text field holds bytes that are not valid UTF-8.
    #[error("text field holds invalid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The wire carried an integer that is not a declared enum case.
    #[error("wire value {value} is not a case of enum '{enum_name}'")]
    UnknownEnumCase {
        /// The enum type name.
        enum_name: String,
        /// The undeclared value.
        value: i32,
    },
}
