// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conversions to and from `stl_io` triangles

use crate::error::Result;
use crate::geometry::{Mesh, Triangle, Vertex};
use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

impl From<Triangle> for StlTriangle {
    fn from(t: Triangle) -> Self {
        StlTriangle {
            normal: Normal::new(t.n.to_array()),
            vertices: [
                StlVertex::new(t.a.to_array()),
                StlVertex::new(t.b.to_array()),
                StlVertex::new(t.c.to_array()),
            ],
        }
    }
}

impl From<StlTriangle> for Triangle {
    fn from(t: StlTriangle) -> Self {
        let [a, b, c] = &t.vertices;
        Triangle::new(
            vertex_of(&t.normal),
            vertex_of(a),
            vertex_of(b),
            vertex_of(c),
        )
    }
}

fn vertex_of(v: &StlVertex) -> Vertex {
    Vertex::new(v[0], v[1], v[2])
}

impl Mesh {
    /// Faces as `stl_io` triangles, in mesh order
    pub fn to_stl_triangles(&self) -> Vec<StlTriangle> {
        self.triangles().map(|t| StlTriangle::from(*t)).collect()
    }

    /// Build a mesh from `stl_io` triangles
    pub fn from_stl_triangles<I>(name: &str, triangles: I) -> Result<Mesh>
    where
        I: IntoIterator<Item = StlTriangle>,
    {
        let mut mesh = Mesh::named(name);
        for t in triangles {
            mesh.add_triangle(t.into())?;
        }
        Ok(mesh)
    }
}
