// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The interface every hosting-service backend implements.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::error::SourceResult;

/// A named, addressable repository on a code-hosting service.
///
/// Implementations own a local mirror and answer metadata queries
/// against it. Every query brings the mirror up to date first; there is
/// no "already synced this request" cache, so repeated calls re-sync.
/// Failures short-circuit: a sync error aborts the query and is
/// delivered as-is.
#[async_trait]
pub trait PackageSource: Send + Sync {
    /// Archive download URL for the given version. Pure string
    /// templating, no I/O.
    fn download_url(&self, version: &str) -> String;

    /// Make sure the local mirror exists and is up to date.
    async fn restore(&self) -> SourceResult<()>;

    /// Tag names, in the order the underlying tool reports them.
    async fn tags(&self) -> SourceResult<Vec<String>>;

    /// Paths of package manifest files present at the given tag.
    async fn manifest_files(&self, tag: &str) -> SourceResult<Vec<String>>;

    /// Content of a manifest file at the given version, or at the
    /// backend's default branch when no version is given.
    async fn manifest(&self, version: Option<&str>, file: &str) -> SourceResult<String>;

    /// Date of the most recent commit reachable from the given tag.
    async fn release_date(&self, tag: &str) -> SourceResult<DateTime<FixedOffset>>;
}
