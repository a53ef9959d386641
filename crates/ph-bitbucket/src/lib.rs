// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Bitbucket repository source backend for Plugin Harbor.
//!
//! Turns Bitbucket webhook notifications into repository sources and
//! serves package metadata queries from a local git mirror of the
//! repository. The backend registers with a
//! [`SourceRegistry`](ph_core::SourceRegistry) under the key
//! `"bitbucket"` via [`BitbucketFactory`].

pub mod hook;
pub mod source;

pub use hook::{decode, HookPayload, HookRepository};
pub use source::{BitbucketFactory, BitbucketSource, KEY};
