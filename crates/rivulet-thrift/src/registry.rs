//! Struct metadata registry.
//!
//! An explicit service with a clear lifecycle: connectors call
//! [`StructRegistry::register`] for every struct type at startup, and the
//! resolver performs pure [`StructRegistry::lookup`] reads thereafter.
//! There is deliberately no ambient global state — a registry is a value,
//! shared via `Arc` where multiple components need it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::descriptor::StructDescriptor;

/// Registry of struct type descriptors, keyed by type name.
#[derive(Debug, Default)]
pub struct StructRegistry {
    inner: RwLock<HashMap<String, Arc<StructDescriptor>>>,
}

impl StructRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a struct descriptor under its type name, replacing any
    /// previous registration of that name. Returns the shared handle.
    pub fn register(&self, descriptor: StructDescriptor) -> Arc<StructDescriptor> {
        let descriptor = Arc::new(descriptor);
        self.inner
            .write()
            .insert(descriptor.name().to_string(), Arc::clone(&descriptor));
        descriptor
    }

    /// Looks up a struct descriptor by type name.
    #[must_use]
    pub fn lookup(&self, type_name: &str) -> Option<Arc<StructDescriptor>> {
        self.inner.read().get(type_name).cloned()
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
