// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use crate::geometry::Vertex;
use nalgebra::Vector3;

/// Unit normal of triangle a, b, c from the edges `b - a` and `c - b`.
///
/// Collinear or coincident corners give a zero cross product, and the
/// division leaves NaN or infinite components in the result.
pub fn face_normal(a: Vertex, b: Vertex, c: Vertex) -> Vertex {
    let u = b - a;
    let v = c - b;
    let cp = u.cross(&v);
    let magnitude = cp.norm();
    Vertex::from(Vector3::new(
        cp.x / magnitude,
        cp.y / magnitude,
        cp.z / magnitude,
    ))
}
