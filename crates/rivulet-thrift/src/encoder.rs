//! Row → payload encoding.
//!
//! The mirror of [`ThriftDecoder`](crate::decoder::ThriftDecoder), with
//! the opposite failure posture: encoding never invents data, so every
//! invalid row aborts with a precise error and produces no bytes.

use std::sync::Arc;

use arrow_schema::SchemaRef;
use tracing::warn;

use crate::convert;
use crate::decoder::FailurePolicy;
use crate::error::{EncodeError, SchemaResult};
use crate::resolver::{ResolvedStruct, StructResolver};
use crate::row::Row;
use crate::wire::BinaryCodec;

/// Encodes rows of a fixed schema into binary struct payloads.
#[derive(Debug)]
pub struct ThriftEncoder {
    resolved: Arc<ResolvedStruct>,
    policy: FailurePolicy,
}

impl ThriftEncoder {
    /// Creates an encoder over an already resolved struct type.
    #[must_use]
    pub fn new(resolved: Arc<ResolvedStruct>, policy: FailurePolicy) -> Self {
        Self { resolved, policy }
    }

    /// Resolves `type_name` and creates an encoder for it.
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

    /// Encodes one row into a payload. Null columns are left unset on
    /// the wire.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] for any row that does not match the
    /// struct's shape; no partial payload is produced.
    pub fn encode(&self, row: &Row) -> Result<Vec<u8>, EncodeError> {
        let instance = convert::row_to_struct(&self.resolved, row)?;
        Ok(BinaryCodec::serialize(&instance))
    }

    /// Encodes one row, applying the configured failure policy.
    ///
    /// Under [`FailurePolicy::Skip`] an invalid row is logged and yields
    /// `Ok(None)`; under [`FailurePolicy::Strict`] it is returned as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] under [`FailurePolicy::Strict`].
    pub fn encode_or_skip(&self, row: &Row) -> Result<Option<Vec<u8>>, EncodeError> {
        match self.encode(row) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) => match self.policy {
                FailurePolicy::Strict => Err(err),
                FailurePolicy::Skip => {
                    warn!(
                        struct_name = self.resolved.name(),
                        error = %err,
                        "skipping unencodable row"
                    );
                    Ok(None)
                }
            },
        }
    }

    /// Returns the normalized schema of accepted rows.
    #[must_use]
    pub fn input_schema(&self) -> SchemaRef {
        self.resolved.arrow_schema()
    }

    /// Returns the struct type this encoder writes.
    #[must_use]
    pub fn struct_type(&self) -> &Arc<ResolvedStruct> {
        &self.resolved
    }
}
