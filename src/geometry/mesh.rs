// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation: an ordered list of triangular faces

use crate::error::Result;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::ops::Sub;
use tracing::debug;

/// Name given to meshes created without one.
pub const DEFAULT_MESH_NAME: &str = "libtrix";

/// Longest mesh name in bytes; matches the binary STL header.
pub const MESH_NAME_MAX: usize = 80;

/// A point or direction with single-precision coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub const ZERO: Vertex = Vertex {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Bitwise equality; treats NaN components with the same bits as equal.
    pub fn bits_eq(&self, other: &Vertex) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vertex> for Vector3<f32> {
    fn from(v: Vertex) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f32>> for Vertex {
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Sub for Vertex {
    type Output = Vector3<f32>;

    fn sub(self, rhs: Vertex) -> Vector3<f32> {
        Vector3::from(self) - Vector3::from(rhs)
    }
}

/// Triangle with a facet normal and three corners in winding order a, b, c
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub n: Vertex,
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
}

impl Triangle {
    pub fn new(n: Vertex, a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { n, a, b, c }
    }

    /// Triangle with a zero normal
    pub fn from_corners(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self::new(Vertex::ZERO, a, b, c)
    }

    /// The twelve floats in STL field order: normal, a, b, c.
    pub fn to_floats(&self) -> [f32; 12] {
        let [nx, ny, nz] = self.n.to_array();
        let [ax, ay, az] = self.a.to_array();
        let [bx, by, bz] = self.b.to_array();
        let [cx, cy, cz] = self.c.to_array();
        [nx, ny, nz, ax, ay, az, bx, by, bz, cx, cy, cz]
    }

    /// Inverse of [`Triangle::to_floats`].
    pub fn from_floats(f: [f32; 12]) -> Self {
        Self {
            n: Vertex::new(f[0], f[1], f[2]),
            a: Vertex::new(f[3], f[4], f[5]),
            b: Vertex::new(f[6], f[7], f[8]),
            c: Vertex::new(f[9], f[10], f[11]),
        }
    }

    pub fn bits_eq(&self, other: &Triangle) -> bool {
        self.n.bits_eq(&other.n)
            && self.a.bits_eq(&other.a)
            && self.b.bits_eq(&other.b)
            && self.c.bits_eq(&other.c)
    }
}

/// One face of a mesh. Faces enter a mesh only through
/// [`Mesh::add_triangle`]; the mesh owns them from then on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub triangle: Triangle,
}

/// Named triangular mesh. Faces keep their insertion order.
///
/// Only serializable: a deserialized mesh could carry a facecount that
/// disagrees with its faces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mesh {
    name: String,
    faces: Vec<Face>,
    facecount: usize,
}

impl Mesh {
    /// Empty mesh with the default name
    pub fn new() -> Self {
        Self::named(DEFAULT_MESH_NAME)
    }

    /// Empty mesh with `name`.
    ///
    /// Control characters become spaces, so a name always fits on the
    /// `solid` line, and the result is cut to [`MESH_NAME_MAX`] bytes.
    pub fn named(name: &str) -> Self {
        Self {
            name: clean_name(name),
            faces: Vec::new(),
            facecount: 0,
        }
    }

    /// Empty mesh; `None` selects the default name
    pub fn create(name: Option<&str>) -> Self {
        Self::named(name.unwrap_or(DEFAULT_MESH_NAME))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the mesh; `name` is cleaned as in [`Mesh::named`]
    pub fn set_name(&mut self, name: &str) {
        self.name = clean_name(name);
    }

    /// Reserve room for `additional` more faces
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.faces.try_reserve(additional)?;
        Ok(())
    }

    /// Append a face holding `triangle` at the end of the mesh
    pub fn add_triangle(&mut self, triangle: Triangle) -> Result<()> {
        self.faces.try_reserve(1)?;
        self.faces.push(Face { triangle });
        self.facecount += 1;
        Ok(())
    }

    /// Number of faces, as maintained by [`Mesh::add_triangle`]
    pub fn facecount(&self) -> usize {
        debug_assert_eq!(self.facecount, self.faces.len());
        self.facecount
    }

    /// Number of faces, counted by walking the face sequence
    pub fn count_faces(&self) -> usize {
        self.faces.iter().fold(0, |count, _| count + 1)
    }

    /// Recount the faces and check the maintained counter.
    ///
    /// # Panics
    ///
    /// Panics if the counter has drifted from the face sequence; that can
    /// only happen through a bug in this module.
    pub fn verify_facecount(&self) -> usize {
        let counted = self.count_faces();
        assert_eq!(
            self.facecount, counted,
            "facecount {} disagrees with {} faces in mesh '{}'",
            self.facecount, counted, self.name
        );
        counted
    }

    pub fn is_empty(&self) -> bool {
        self.facecount == 0
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Mutable view of the faces. Face contents may change; the sequence
    /// itself cannot grow, shrink or be reordered through a slice.
    pub fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.faces.iter().map(|face| &face.triangle)
    }

    /// Run `op` on every face in insertion order, stopping at the first error
    pub fn apply<E, F>(&mut self, mut op: F) -> std::result::Result<(), E>
    where
        F: FnMut(&mut Face) -> std::result::Result<(), E>,
    {
        for face in self.faces.iter_mut() {
            op(face)?;
        }
        Ok(())
    }

    /// Release the mesh and every face it owns
    pub fn release(self) {
        debug!(name = %self.name, faces = self.facecount, "releasing mesh");
        drop(self);
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Face;
    type IntoIter = std::slice::Iter<'a, Face>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter()
    }
}

/// `name` with control characters replaced by spaces, cut to the longest
/// prefix that fits in [`MESH_NAME_MAX`] bytes without splitting a character.
fn clean_name(name: &str) -> String {
    let mut cleaned: String = name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if cleaned.len() > MESH_NAME_MAX {
        let mut end = MESH_NAME_MAX;
        while !cleaned.is_char_boundary(end) {
            end -= 1;
        }
        cleaned.truncate(end);
    }
    cleaned
}
