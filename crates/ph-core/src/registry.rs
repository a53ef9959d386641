// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Explicit backend registry.
//!
//! Backends are handed to the registry when it is constructed instead of
//! registering themselves through a shared table as a load-time side
//! effect. The registry dispatches inbound webhook bodies to the first
//! backend that understands them and looks backends up by key.

use crate::source::PackageSource;

/// Constructs sources for one hosting service.
pub trait SourceFactory: Send + Sync {
    /// Fixed key the backend is addressed by (e.g. `"bitbucket"`).
    fn key(&self) -> &'static str;

    /// Whether this backend understands the raw webhook body. Cheap
    /// validation only; does not construct a source.
    fn probe(&self, raw_body: &str) -> bool;

    /// Decode the raw webhook body into a ready source. `None` means
    /// the payload is not one this backend understands.
    fn from_hook(&self, raw_body: &str) -> Option<Box<dyn PackageSource>>;
}

/// Lookup table of hosting-service backends.
pub struct SourceRegistry {
    backends: Vec<Box<dyn SourceFactory>>,
}

impl SourceRegistry {
    /// Create a registry over an explicit list of backend factories.
    pub fn new(backends: Vec<Box<dyn SourceFactory>>) -> Self {
        Self { backends }
    }

    /// Look a backend up by its key.
    pub fn get(&self, key: &str) -> Option<&dyn SourceFactory> {
        self.backends
            .iter()
            .find(|backend| backend.key() == key)
            .map(|backend| backend.as_ref())
    }

    /// Registered backend keys, in registration order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.backends.iter().map(|backend| backend.key()).collect()
    }

    /// Dispatch a raw webhook body to the first backend that
    /// understands it.
    pub fn source_for_hook(&self, raw_body: &str) -> Option<Box<dyn PackageSource>> {
        for backend in &self.backends {
            if let Some(source) = backend.from_hook(raw_body) {
                tracing::debug!(key = backend.key(), "webhook payload matched backend");
                return Some(source);
            }
        }
        None
    }
}
