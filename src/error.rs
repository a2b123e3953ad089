// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for mesh storage and STL I/O

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, TrixError>;

/// Coarse failure classes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No usable mesh, triangle, source or destination was supplied.
    InvalidArgument,
    /// Open, read, write or seek failed on the underlying stream.
    IoFailure,
    /// Header or grammar mismatch, or truncated binary face data.
    FormatFailure,
    /// Face storage could not be grown.
    OutOfMemory,
}

/// Errors produced by the mesh store, decoder and encoder.
#[derive(Debug, Error)]
pub enum TrixError {
    /// A caller supplied an unusable argument.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument.
        message: String,
    },

    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary header could not be read in full.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Bytes required for the header and face count.
        expected: usize,
        /// Bytes actually available.
        got: usize,
    },

    /// ASCII text does not follow the STL grammar.
    #[error("STL syntax error: {message}")]
    Syntax {
        /// Description of the mismatch.
        message: String,
    },

    /// Binary source ended before the declared number of facets.
    #[error("truncated STL: header declares {expected} facets, only {got} present")]
    TruncatedFacets {
        /// Face count declared in the header.
        expected: u32,
        /// Complete facet records actually read.
        got: u32,
    },

    /// Mesh has more faces than a binary STL can count.
    #[error("mesh has {count} faces, binary STL holds at most {}", u32::MAX)]
    TooManyFaces {
        /// Number of faces in the mesh.
        count: usize,
    },

    /// Face storage allocation failed.
    #[error("out of memory while growing face storage")]
    OutOfMemory,
}

impl TrixError {
    /// Create an `InvalidArgument` error with the given message.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a `Syntax` error with the given message.
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Io(_) => ErrorKind::IoFailure,
            Self::InvalidHeader { .. }
            | Self::Syntax { .. }
            | Self::TruncatedFacets { .. }
            | Self::TooManyFaces { .. } => ErrorKind::FormatFailure,
            Self::OutOfMemory => ErrorKind::OutOfMemory,
        }
    }
}

impl From<std::collections::TryReserveError> for TrixError {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::OutOfMemory
    }
}
