// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL framing constants, modes and stream endpoints
//!
//! Binary layout (little-endian):
//!
//! ```text
//! UINT8[80]    - header, free text (mesh name on output, ignored on input)
//! UINT32       - number of facets
//! foreach facet
//!     REAL32[3] - normal
//!     REAL32[3] - vertex a
//!     REAL32[3] - vertex b
//!     REAL32[3] - vertex c
//!     UINT16    - attribute byte count (0 on output, ignored on input)
//! end
//! ```

use crate::error::{Result, TrixError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one binary facet record: 12 floats plus the attribute field.
pub const FACET_SIZE: usize = 50;

/// Bytes compared when deciding between ASCII and binary input.
pub const ASCII_MAGIC: &[u8; 5] = b"solid";

/// STL framing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlMode {
    #[default]
    Binary,
    Ascii,
}

impl fmt::Display for StlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StlMode::Binary => write!(f, "binary"),
            StlMode::Ascii => write!(f, "ascii"),
        }
    }
}

impl FromStr for StlMode {
    type Err = TrixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bin" | "stl" => Ok(StlMode::Binary),
            "ascii" | "text" | "stla" => Ok(StlMode::Ascii),
            other => Err(TrixError::invalid_argument(format!(
                "unknown STL mode '{}' (expected ascii or binary)",
                other
            ))),
        }
    }
}

/// Where a mesh is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Stdin,
}

impl Source {
    /// `None` and `-` mean standard input.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => Source::Stdin,
            Some(path) => Source::Path(PathBuf::from(path)),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Where a mesh is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// File created or truncated on write
    Path(PathBuf),
    Stdout,
}

impl Destination {
    /// `None` and `-` mean standard output.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => Destination::Stdout,
            Some(path) => Destination::Path(PathBuf::from(path)),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Path(path) => write!(f, "{}", path.display()),
            Destination::Stdout => write!(f, "<stdout>"),
        }
    }
}
