// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Read/write options and their TOML configuration file

use crate::io::StlMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the decoder treats input that ends before it should
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Truncated binary data or a malformed ASCII facet fails the decode
    #[default]
    Strict,
    /// Keep every face read before the truncation or malformed facet
    Lenient,
}

/// Decoder options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    pub policy: DecodePolicy,
}

impl ReadOptions {
    pub fn strict() -> Self {
        Self {
            policy: DecodePolicy::Strict,
        }
    }

    pub fn lenient() -> Self {
        Self {
            policy: DecodePolicy::Lenient,
        }
    }
}

/// Encoder options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    pub mode: StlMode,
}

/// Configuration file contents
///
/// ```toml
/// [read]
/// policy = "lenient"
///
/// [write]
/// mode = "ascii"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrixConfig {
    pub read: ReadOptions,
    pub write: WriteOptions,
}

impl TrixConfig {
    /// Parse configuration from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse trix configuration")
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Serialize configuration to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize trix configuration")
    }
}
