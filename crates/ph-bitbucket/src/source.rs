// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Bitbucket repository sources.
//!
//! A source owns its descriptor (owner, name, derived URLs and mirror
//! path) and the local mirror; it is the only entry point that mutates
//! the mirror directory. Every metadata query re-syncs the mirror
//! before it runs and short-circuits on the first failure.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use ph_config::MirrorConfig;
use ph_core::{PackageSource, SourceFactory, SourceResult};
use ph_git::GitMirror;

use crate::hook::{self, HookPayload};

/// Registry key this backend is addressed by.
pub const KEY: &str = "bitbucket";

const SITE_BASE: &str = "http://bitbucket.org";
const CLONE_BASE: &str = "git://bitbucket.org";
const HOST_DIR: &str = "bitbucket.org";

/// A named, addressable Bitbucket repository.
#[derive(Debug)]
pub struct BitbucketSource {
    owner: String,
    name: String,
    site_url: String,
    mirror: GitMirror,
    default_branch: String,
    manifest_suffix: String,
    /// Fork count reported by the hook payload, when built from one.
    pub forks: Option<u64>,
    /// Watcher count reported by the hook payload, when built from one.
    pub watchers: Option<u64>,
}

impl BitbucketSource {
    /// Source for a repository addressed directly by owner and name.
    pub fn new(config: &MirrorConfig, owner: &str, name: &str) -> Self {
        let site_url = format!("{SITE_BASE}/{owner}/{name}");
        let source_url = format!("{CLONE_BASE}/{owner}/{name}.git");
        let path = config.mirror_root.join(HOST_DIR).join(owner).join(name);

        Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
            site_url,
            mirror: GitMirror::new(path, source_url),
            default_branch: config.default_branch.clone(),
            manifest_suffix: config.manifest_suffix.clone(),
            forks: None,
            watchers: None,
        }
    }

    /// Source decoded from a raw webhook body. `None` when the body is
    /// not a Bitbucket hook payload.
    pub fn from_hook(config: &MirrorConfig, raw_body: &str) -> Option<Self> {
        Self::from_payload(config, &hook::decode(raw_body)?)
    }

    /// Source built from an already-decoded hook payload.
    pub fn from_payload(config: &MirrorConfig, payload: &HookPayload) -> Option<Self> {
        let (owner, name) = payload.owner_and_name()?;
        let mut source = Self::new(config, owner, name);
        source.forks = payload.repository.forks;
        source.watchers = payload.repository.watchers;
        Some(source)
    }

    /// Validate a raw webhook body without constructing a source.
    pub fn probe(raw_body: &str) -> Option<HookPayload> {
        hook::decode(raw_body)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Web-facing URL of the repository.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// The local mirror backing this source.
    pub fn mirror(&self) -> &GitMirror {
        &self.mirror
    }
}

/// A manifest filename contains the suffix past its first character; a
/// bare suffix with nothing before it does not qualify.
fn is_manifest_path(path: &str, suffix: &str) -> bool {
    matches!(path.find(suffix), Some(index) if index > 0)
}

#[async_trait]
impl PackageSource for BitbucketSource {
    fn download_url(&self, version: &str) -> String {
        format!("{}/zipball/{}", self.site_url, version)
    }

    async fn restore(&self) -> SourceResult<()> {
        self.mirror.sync().await?;
        Ok(())
    }

    async fn tags(&self) -> SourceResult<Vec<String>> {
        self.mirror.sync().await?;
        Ok(self.mirror.tags().await?)
    }

    async fn manifest_files(&self, tag: &str) -> SourceResult<Vec<String>> {
        self.mirror.sync().await?;
        let files = self.mirror.files_at(tag).await?;
        Ok(files
            .into_iter()
            .filter(|file| is_manifest_path(file, &self.manifest_suffix))
            .collect())
    }

    async fn manifest(&self, version: Option<&str>, file: &str) -> SourceResult<String> {
        self.mirror.sync().await?;
        let rev = version.unwrap_or(&self.default_branch);
        Ok(self.mirror.show(rev, file).await?)
    }

    async fn release_date(&self, tag: &str) -> SourceResult<DateTime<FixedOffset>> {
        self.mirror.sync().await?;
        Ok(self.mirror.commit_date(tag).await?)
    }
}

/// Injects Bitbucket support into a
/// [`SourceRegistry`](ph_core::SourceRegistry).
pub struct BitbucketFactory {
    config: MirrorConfig,
}

impl BitbucketFactory {
    pub fn new(config: MirrorConfig) -> Self {
        Self { config }
    }
}

impl SourceFactory for BitbucketFactory {
    fn key(&self) -> &'static str {
        KEY
    }

    fn probe(&self, raw_body: &str) -> bool {
        hook::decode(raw_body).is_some()
    }

    fn from_hook(&self, raw_body: &str) -> Option<Box<dyn PackageSource>> {
        let source = BitbucketSource::from_hook(&self.config, raw_body)?;
        tracing::debug!(
            owner = %source.owner,
            name = %source.name,
            "decoded bitbucket hook payload"
        );
        Some(Box::new(source))
    }
}
