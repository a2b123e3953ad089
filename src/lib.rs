// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Trix mesh library
//!
//! Stores triangular surface meshes in insertion order, reads and writes them
//! as ASCII or binary STL, and computes facet normals.
//!
//! ```no_run
//! use trix::{io, geometry, Destination, Source, StlMode};
//!
//! let mut mesh = io::read(&Source::Path("part.stl".into()))?;
//! geometry::recalculate_normals(&mut mesh)?;
//! io::write(&Destination::Stdout, &mesh, StlMode::Ascii)?;
//! # Ok::<(), trix::TrixError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use config::{DecodePolicy, ReadOptions, TrixConfig, WriteOptions};
pub use error::{ErrorKind, Result, TrixError};
pub use geometry::{Face, Mesh, Triangle, Vertex};
pub use io::{Destination, Source, StlMode};
