// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Clone-or-fetch mirror synchronization and metadata queries.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use tokio::process::Command;

use crate::error::{GitError, GitResult};

/// A local full-history mirror of one remote repository.
///
/// The mirror directory corresponds 1:1 with the source URL. [`sync`]
/// brings it to parity with the remote and is safe to call repeatedly;
/// the query operations are read-only and assume a synced mirror.
///
/// Concurrent operations against the same mirror path are not serialized
/// here; callers that may race must queue per repository.
///
/// [`sync`]: GitMirror::sync
#[derive(Debug, Clone)]
pub struct GitMirror {
    path: PathBuf,
    source_url: String,
}

impl GitMirror {
    /// Create a handle for the mirror at `path`, cloned from `source_url`.
    pub fn new(path: impl Into<PathBuf>, source_url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source_url: source_url.into(),
        }
    }

    /// The local mirror directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The URL the mirror is cloned from.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Bring the mirror to parity with the remote.
    ///
    /// Creates the parent directory if needed, then clones when the
    /// mirror path does not exist yet and fetches (with tags) when it
    /// does. A stat failure other than not-found is fatal and never
    /// triggers a clone; an existing mirror is never deleted or
    /// recreated, so corruption surfaces as a subprocess error.
    pub async fn sync(&self) -> GitResult<()> {
        if let Some(parent) = self.path.parent() {
            let mut dir = tokio::fs::DirBuilder::new();
            dir.recursive(true);
            #[cfg(unix)]
            dir.mode(0o755);
            dir.create(parent).await?;
        }

        match tokio::fs::metadata(&self.path).await {
            Ok(_) => self.fetch().await,
            Err(err) if err.kind() == ErrorKind::NotFound => self.clone_mirror().await,
            Err(err) => Err(GitError::Io(err)),
        }
    }

    async fn clone_mirror(&self) -> GitResult<()> {
        tracing::info!(
            source = %self.source_url,
            path = %self.path.display(),
            "cloning mirror"
        );
        let path = self.path.to_string_lossy();
        run_git(None, &["clone", &self.source_url, path.as_ref()]).await?;
        Ok(())
    }

    async fn fetch(&self) -> GitResult<()> {
        tracing::debug!(path = %self.path.display(), "fetching mirror");
        self.run(&["fetch", "-t"]).await?;
        Ok(())
    }

    /// List tag names.
    ///
    /// The order is whatever `git tag` prints; it is not re-sorted here
    /// and callers must not rely on it being lexical or chronological.
    pub async fn tags(&self) -> GitResult<Vec<String>> {
        let stdout = self.run(&["tag"]).await?;
        Ok(stdout.lines().map(str::to_owned).collect())
    }

    /// List the top-level paths git knows at the given rev.
    pub async fn files_at(&self, rev: &str) -> GitResult<Vec<String>> {
        let stdout = self.run(&["ls-tree", rev, "--name-only"]).await?;
        Ok(stdout.lines().map(str::to_owned).collect())
    }

    /// Read a file's content at the given rev, trimmed of surrounding
    /// whitespace.
    pub async fn show(&self, rev: &str, file: &str) -> GitResult<String> {
        let spec = format!("{rev}:{file}");
        let stdout = self.run(&["show", &spec]).await?;
        Ok(stdout.trim().to_owned())
    }

    /// Date of the most recent commit reachable from the given rev.
    pub async fn commit_date(&self, rev: &str) -> GitResult<DateTime<FixedOffset>> {
        let stdout = self.run(&["log", "--pretty=%cD", "-1", rev]).await?;
        let raw = stdout.trim();
        DateTime::parse_from_rfc2822(raw).map_err(|source| GitError::DateParse {
            value: raw.to_owned(),
            source,
        })
    }

    async fn run(&self, args: &[&str]) -> GitResult<String> {
        run_git(Some(&self.path), args).await
    }
}

/// Run `git` with the given arguments, capturing stdout.
async fn run_git(cwd: Option<&Path>, args: &[&str]) -> GitResult<String> {
    let mut command = Command::new("git");
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output().await?;
    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: format!("git {}", args.join(" ")),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
