// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Package source abstraction for Plugin Harbor.
//!
//! This crate defines the interface hosting-service backends implement
//! ([`PackageSource`]), the error taxonomy shared by their operations,
//! and the explicit registry a composition root hands its backends to.

pub mod error;
pub mod registry;
pub mod source;

pub use error::{SourceError, SourceResult};
pub use registry::{SourceFactory, SourceRegistry};
pub use source::PackageSource;
