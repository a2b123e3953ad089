// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh comparison utilities for round-trip testing

use crate::geometry::{Mesh, Vertex};
use serde::{Deserialize, Serialize};

/// Result of mesh comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshComparison {
    pub facecount_a: usize,
    pub facecount_b: usize,
    pub facecount_match: bool,
    /// Index of the first face pair differing by more than the tolerance
    pub first_mismatch: Option<usize>,
    /// Largest absolute difference over all compared components
    pub max_deviation: f32,
    pub tolerance: f32,
    pub passed: bool,
}

/// Compare two meshes face by face, in order.
///
/// Components that are both NaN, or equal infinities, count as identical.
/// A NaN facing a number is an infinite deviation.
pub fn compare_meshes(mesh_a: &Mesh, mesh_b: &Mesh, tolerance: f32) -> MeshComparison {
    let mut max_deviation = 0.0f32;
    let mut first_mismatch = None;

    for (index, (a, b)) in mesh_a.triangles().zip(mesh_b.triangles()).enumerate() {
        let deviation = [(a.n, b.n), (a.a, b.a), (a.b, b.b), (a.c, b.c)]
            .iter()
            .map(|(u, v)| vertex_deviation(u, v))
            .fold(0.0f32, f32::max);

        max_deviation = max_deviation.max(deviation);
        if deviation > tolerance && first_mismatch.is_none() {
            first_mismatch = Some(index);
        }
    }

    let facecount_match = mesh_a.facecount() == mesh_b.facecount();
    MeshComparison {
        facecount_a: mesh_a.facecount(),
        facecount_b: mesh_b.facecount(),
        facecount_match,
        first_mismatch,
        max_deviation,
        tolerance,
        passed: facecount_match && first_mismatch.is_none(),
    }
}

fn vertex_deviation(u: &Vertex, v: &Vertex) -> f32 {
    component_deviation(u.x, v.x)
        .max(component_deviation(u.y, v.y))
        .max(component_deviation(u.z, v.z))
}

fn component_deviation(x: f32, y: f32) -> f32 {
    if x == y || (x.is_nan() && y.is_nan()) {
        0.0
    } else if x.is_nan() || y.is_nan() {
        f32::INFINITY
    } else {
        (x - y).abs()
    }
}
