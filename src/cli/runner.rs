// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Decode, adjust normals, encode: the pipeline behind the CLI tools

use crate::config::ReadOptions;
use crate::error::{ErrorKind, TrixError};
use crate::geometry;
use crate::io::{self, Destination, Source, StlMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

/// What happens to facet normals between reading and writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalStep {
    Keep,
    Reset,
    Recalculate,
    RecalculateParallel,
}

/// Result of a pipeline run
pub struct RunResult {
    pub facecount: usize,
    pub duration: Duration,
}

/// One line of `facecount` output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacecountEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facecount: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runner for the command-line pipelines
pub struct Runner {
    options: ReadOptions,
}

impl Runner {
    pub fn new() -> Self {
        Self {
            options: ReadOptions::strict(),
        }
    }

    pub fn with_options(options: ReadOptions) -> Self {
        Self { options }
    }

    /// Read the STL file at `path` and count its faces
    pub fn facecount(&self, path: &Path) -> Result<usize> {
        let mesh = io::read_with(&Source::Path(path.to_path_buf()), self.options)
            .with_context(|| format!("Cannot open {}", path.display()))?;
        let count = mesh.verify_facecount();
        mesh.release();
        Ok(count)
    }

    /// Count faces in every path, recording failures instead of stopping
    pub fn facecount_all(&self, paths: &[String]) -> Vec<FacecountEntry> {
        paths
            .iter()
            .map(|path| match self.facecount(Path::new(path)) {
                Ok(count) => FacecountEntry {
                    path: path.clone(),
                    facecount: Some(count),
                    error: None,
                },
                Err(e) => FacecountEntry {
                    path: path.clone(),
                    facecount: None,
                    error: Some(format!("{:#}", e)),
                },
            })
            .collect()
    }

    /// Read `source`, apply `step`, write the mesh to `destination`
    pub fn run(
        &self,
        source: &Source,
        destination: &Destination,
        step: NormalStep,
        mode: StlMode,
    ) -> Result<RunResult> {
        let start = Instant::now();

        let mut mesh = io::read_with(source, self.options)
            .with_context(|| format!("input failed: {}", source))?;

        let normals = match step {
            NormalStep::Keep => Ok(()),
            NormalStep::Reset => geometry::reset_normals(&mut mesh),
            NormalStep::Recalculate => geometry::recalculate_normals(&mut mesh),
            NormalStep::RecalculateParallel => geometry::recalculate_normals_parallel(&mut mesh),
        };
        normals.context("surface normals calculation failed")?;

        io::write(destination, &mesh, mode)
            .with_context(|| format!("output failed: {}", destination))?;

        let facecount = mesh.facecount();
        mesh.release();

        Ok(RunResult {
            facecount,
            duration: start.elapsed(),
        })
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

/// Process exit code for a failed run
pub fn exit_code(error: &anyhow::Error) -> i32 {
    let kind = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<TrixError>())
        .map(TrixError::kind);

    match kind {
        Some(ErrorKind::FormatFailure) => 2,
        Some(ErrorKind::InvalidArgument) => 3,
        Some(ErrorKind::OutOfMemory) => 4,
        Some(ErrorKind::IoFailure) | None => 1,
    }
}
