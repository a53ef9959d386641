// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for mirror maintenance and metadata queries

use thiserror::Error;

/// Result type alias for mirror operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Errors that can occur while maintaining or querying a mirror
#[derive(Debug, Error)]
pub enum GitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The subprocess ran but exited non-zero. Carries whatever
    /// diagnostics the tool wrote to stderr.
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("unparseable commit date {value:?}: {source}")]
    DateParse {
        value: String,
        source: chrono::ParseError,
    },
}
