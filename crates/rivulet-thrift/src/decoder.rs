//! Payload → row decoding.
//!
//! A [`ThriftDecoder`] is built once per struct type and reused across
//! records; it owns a scratch wire instance so steady-state decoding
//! allocates only for the values that end up in the row.

use std::sync::Arc;

use arrow_schema::SchemaRef;
use tracing::warn;

use crate::convert::{self, DecodeStats};
use crate::error::{DecodeError, SchemaResult};
use crate::resolver::{ResolvedStruct, StructResolver};
use crate::row::Row;
use crate::wire::{BinaryCodec, WireStruct};

/// What to do with a record that fails to decode or encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Surface the error to the caller, halting the stream.
    Strict,
    /// Log the record and move on. The default, matching the deployed
    /// ignore-parse-errors behavior.
    #[default]
    Skip,
}

impl FailurePolicy {
    /// Parses a policy from its configuration string, `None` for
    /// unrecognized input.
    #[must_use]
    pub fn from_option_str(value: &str) -> Option<Self> {
        match value {
            "strict" => Some(FailurePolicy::Strict),
            "skip" => Some(FailurePolicy::Skip),
            _ => None,
        }
    }
}

/// Decodes binary struct payloads into rows of a fixed schema.
#[derive(Debug)]
pub struct ThriftDecoder {
    resolved: Arc<ResolvedStruct>,
    policy: FailurePolicy,
    scratch: WireStruct,
    stats: DecodeStats,
}

impl ThriftDecoder {
    /// Creates a decoder over an already resolved struct type.
    #[must_use]
    pub fn new(resolved: Arc<ResolvedStruct>, policy: FailurePolicy) -> Self {
        Self {
            resolved,
            policy,
            scratch: WireStruct::new(),
            stats: DecodeStats::default(),
        }
    }

    /// Resolves `type_name` and creates a decoder for it.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`](crate::error::SchemaError) if the type
    /// cannot be resolved.
    pub fn from_resolver(
        resolver: &StructResolver,
        type_name: &str,
        policy: FailurePolicy,
    ) -> SchemaResult<Self> {
        Ok(Self::new(resolver.resolve(type_name)?, policy))
    }

    /// Decodes one payload into a row.
    ///
    /// Fields that are unset or fail to read take their column defaults;
    /// only a payload that fails to parse as a wire struct counts as a
    /// record failure. Under [`FailurePolicy::Skip`] such a record is
    /// logged and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedPayload`] for an unparseable
    /// payload under [`FailurePolicy::Strict`].
    pub fn decode(&mut self, payload: &[u8]) -> Result<Option<Row>, DecodeError> {
        if let Err(err) = BinaryCodec::parse(&mut self.scratch, payload) {
            self.scratch.clear();
            match self.policy {
                FailurePolicy::Strict => return Err(err.into()),
                FailurePolicy::Skip => {
                    warn!(
                        struct_name = self.resolved.name(),
                        payload_len = payload.len(),
                        error = %err,
                        "skipping malformed payload"
                    );
                    return Ok(None);
                }
            }
        }
        Ok(Some(convert::struct_to_row(
            &self.resolved,
            &self.scratch,
            &self.stats,
        )))
    }

    /// Returns the normalized schema of produced rows.
    #[must_use]
    pub fn output_schema(&self) -> SchemaRef {
        self.resolved.arrow_schema()
    }

    /// Returns the struct type this decoder reads.
    #[must_use]
    pub fn struct_type(&self) -> &Arc<ResolvedStruct> {
        &self.resolved
    }

    /// Total fields defaulted because of field-local read failures, over
    /// the decoder's lifetime.
    #[must_use]
    pub fn defaulted_field_count(&self) -> u64 {
        self.stats.defaulted_fields()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{StructDescriptor, TypeDescriptor};
    use crate::registry::StructRegistry;
    use crate::row::Value;
    use crate::wire::{tags, WireValue};

    fn decoder(policy: FailurePolicy) -> ThriftDecoder {
        let registry = Arc::new(StructRegistry::new());
        registry.register(
            StructDescriptor::new("Work")
                .with_field(1, "id", TypeDescriptor::I64)
                .with_field(2, "name", TypeDescriptor::text()),
        );
        let resolver = StructResolver::new(registry);
        ThriftDecoder::from_resolver(&resolver, "Work", policy).expect("resolves")
    }

    fn sample_payload() -> Vec<u8> {
        let mut ws = WireStruct::new();
        ws.set(1, WireValue::I64(9));
        ws.set(2, WireValue::Bytes(b"alpha".to_vec()));
        BinaryCodec::serialize(&ws)
    }

    #[test]
    fn test_decode_produces_row() {
        let mut decoder = decoder(FailurePolicy::Strict);
        let row = decoder
            .decode(&sample_payload())
            .expect("decodes")
            .expect("some row");
        assert_eq!(row.values(), &[Value::I64(9), Value::Text("alpha".into())]);
    }

    #[test]
    fn test_empty_payload_is_malformed() {
        let mut decoder = decoder(FailurePolicy::Strict);
        assert!(matches!(
            decoder.decode(&[]).expect_err("empty"),
            DecodeError::MalformedPayload(_)
        ));
    }

    #[test]
    fn test_stop_only_payload_yields_all_defaults() {
        let mut decoder = decoder(FailurePolicy::Strict);
        let row = decoder
            .decode(&[tags::STOP])
            .expect("decodes")
            .expect("some row");
        assert_eq!(row.values(), &[Value::I64(0), Value::Text(String::new())]);
        assert_eq!(decoder.defaulted_field_count(), 0);
    }

    #[test]
    fn test_strict_policy_surfaces_malformed_payload() {
        let mut decoder = decoder(FailurePolicy::Strict);
        assert!(decoder.decode(b"not thrift").is_err());
    }

    #[test]
    fn test_skip_policy_drops_malformed_payload() {
        let mut decoder = decoder(FailurePolicy::Skip);
        assert_eq!(decoder.decode(b"not thrift").expect("skips"), None);
        // The decoder stays usable for the next record.
        assert!(decoder.decode(&sample_payload()).expect("decodes").is_some());
    }

    #[test]
    fn test_defaulted_field_count_accumulates() {
        let mut decoder = decoder(FailurePolicy::Strict);
        let mut ws = WireStruct::new();
        ws.set(1, WireValue::Bool(true));
        let payload = BinaryCodec::serialize(&ws);

        decoder.decode(&payload).expect("decodes");
        decoder.decode(&payload).expect("decodes");
        assert_eq!(decoder.defaulted_field_count(), 2);
    }

    #[test]
    fn test_scratch_state_does_not_leak_between_records() {
        let mut decoder = decoder(FailurePolicy::Strict);
        decoder.decode(&sample_payload()).expect("decodes");
        let row = decoder
            .decode(&[tags::STOP])
            .expect("decodes")
            .expect("some row");
        // Second record saw none of the first record's fields.
        assert_eq!(row.values(), &[Value::I64(0), Value::Text(String::new())]);
    }

    #[test]
    fn test_policy_from_option_str() {
        assert_eq!(
            FailurePolicy::from_option_str("strict"),
            Some(FailurePolicy::Strict)
        );
        assert_eq!(
            FailurePolicy::from_option_str("skip"),
            Some(FailurePolicy::Skip)
        );
        assert_eq!(FailurePolicy::from_option_str("lenient"), None);
        assert_eq!(FailurePolicy::default(), FailurePolicy::Skip);
    }

    #[test]
    fn test_output_schema_field_names() {
        let decoder = decoder(FailurePolicy::Skip);
        let schema = decoder.output_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, vec!["id", "name"]);
    }
}
