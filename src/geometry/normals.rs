// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Facet normal computation

use super::{Face, Mesh, Vertex};
use crate::error::Result;
use crate::utils::face_normal;
use rayon::prelude::*;

/// Set every face normal to (0, 0, 0)
pub fn reset_normals(mesh: &mut Mesh) -> Result<()> {
    mesh.apply(|face| {
        face.triangle.n = Vertex::ZERO;
        Ok(())
    })
}

/// Recompute every face normal from its corners.
///
/// Degenerate faces receive NaN or infinite components; they are not
/// replaced with a fallback vector.
pub fn recalculate_normals(mesh: &mut Mesh) -> Result<()> {
    mesh.apply(|face| {
        renormal(face);
        Ok(())
    })
}

/// Same as [`recalculate_normals`], spread over the rayon thread pool.
///
/// Each face reads only its own corners, so the result is bit-identical
/// to the sequential version.
pub fn recalculate_normals_parallel(mesh: &mut Mesh) -> Result<()> {
    mesh.faces_mut().par_iter_mut().for_each(renormal);
    Ok(())
}

fn renormal(face: &mut Face) {
    let t = &mut face.triangle;
    t.n = face_normal(t.a, t.b, t.c);
}
