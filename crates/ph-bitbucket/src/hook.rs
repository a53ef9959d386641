// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Webhook payload validation and decoding.
//!
//! Inbound notification bodies are URL-encoded forms carrying a JSON
//! `payload` field. Decoding is a pure validation step: anything
//! malformed yields `None` so a dispatcher can hand the body to the next
//! backend, never an error.

use regex::Regex;
use serde::Deserialize;

/// Repository-URL shape Bitbucket reports in hook payloads.
///
/// Captures owner and name; a trailing path segment after the repository
/// name is tolerated and ignored.
pub(crate) fn repo_url_pattern() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://bitbucket\.org/([^/]+)/([^/]+)(/.*)?$").unwrap())
}

/// Decoded hook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct HookPayload {
    pub repository: HookRepository,
}

/// The `repository` object of a hook payload.
///
/// `forks` and `watchers` are opaque pass-through counters: copied
/// verbatim when present, tolerated when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct HookRepository {
    pub url: String,
    #[serde(default)]
    pub forks: Option<u64>,
    #[serde(default)]
    pub watchers: Option<u64>,
}

impl HookPayload {
    /// Owner and repository name captured from the repository URL.
    pub fn owner_and_name(&self) -> Option<(&str, &str)> {
        let caps = repo_url_pattern().captures(&self.repository.url)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}

/// Decode a raw webhook body into a validated payload.
///
/// `None` is "not a payload this backend understands"; it covers a
/// missing `payload` field, invalid JSON and a repository URL of the
/// wrong shape.
pub fn decode(raw_body: &str) -> Option<HookPayload> {
    let payload = url::form_urlencoded::parse(raw_body.as_bytes())
        .find_map(|(key, value)| (key == "payload").then(|| value.into_owned()))?;
    let payload: HookPayload = serde_json::from_str(&payload).ok()?;
    repo_url_pattern()
        .is_match(&payload.repository.url)
        .then_some(payload)
}
