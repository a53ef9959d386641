// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for package source operations

use thiserror::Error;

/// Result type alias for package source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Errors a package source operation can surface.
///
/// Rejected webhook payloads are not represented here: payload
/// validation reports a negative result (`None`/`false`) so a dispatcher
/// can try the next backend.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Mirror synchronization or a metadata query against it failed.
    #[error(transparent)]
    Mirror(#[from] ph_git::GitError),
}
