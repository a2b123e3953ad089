// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Facet normal recalculation and reset

use anyhow::Result;
use std::io::Cursor;
use trix::geometry::{self, Mesh, Triangle, Vertex};
use trix::io;
use trix::StlMode;

fn single(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Result<Mesh> {
    let mut mesh = Mesh::named("single");
    mesh.add_triangle(Triangle::new(
        Vertex::new(7.0, 7.0, 7.0),
        a.into(),
        b.into(),
        c.into(),
    ))?;
    Ok(mesh)
}

#[test]
fn test_right_handed_unit_normal() -> Result<()> {
    let mut mesh = single([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])?;
    geometry::recalculate_normals(&mut mesh)?;

    let n = mesh.faces()[0].triangle.n;
    assert_eq!(n, Vertex::new(0.0, 0.0, 1.0));
    assert!(n.z.is_sign_positive());
    Ok(())
}

#[test]
fn test_normal_is_unit_length() -> Result<()> {
    let mut mesh = single([1.0, 2.0, 3.0], [4.0, -1.0, 0.5], [-2.0, 0.0, 6.0])?;
    geometry::recalculate_normals(&mut mesh)?;

    let n = mesh.faces()[0].triangle.n;
    let length = (n.x * n.x + n.y * n.y + n.z * n.z).sqrt();
    approx::assert_relative_eq!(length, 1.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_degenerate_triangles_give_nan() -> Result<()> {
    let mut collinear = single([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0])?;
    geometry::recalculate_normals(&mut collinear)?;
    let n = collinear.faces()[0].triangle.n;
    assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());

    let mut coincident = single([3.0, 3.0, 3.0], [3.0, 3.0, 3.0], [3.0, 3.0, 3.0])?;
    geometry::recalculate_normals_parallel(&mut coincident)?;
    let n = coincident.faces()[0].triangle.n;
    assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    Ok(())
}

#[test]
fn test_nan_normals_survive_both_framings() -> Result<()> {
    let mut mesh = single([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0])?;
    geometry::recalculate_normals(&mut mesh)?;

    for mode in [StlMode::Binary, StlMode::Ascii] {
        let mut buf = Vec::new();
        io::write_to(&mut buf, &mesh, mode)?;
        let decoded = io::read_from(&mut Cursor::new(buf))?;
        let n = decoded.faces()[0].triangle.n;
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan(), "{:?}", mode);
    }
    Ok(())
}

#[test]
fn test_reset_then_ascii() -> Result<()> {
    let mut mesh = single([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])?;
    mesh.add_triangle(Triangle::new(
        Vertex::new(f32::NAN, f32::INFINITY, -3.0),
        Vertex::new(1.0, 1.0, 1.0),
        Vertex::new(2.0, 1.0, 1.0),
        Vertex::new(1.0, 2.0, 1.0),
    ))?;

    geometry::reset_normals(&mut mesh)?;

    let mut buf = Vec::new();
    io::write_to(&mut buf, &mesh, StlMode::Ascii)?;
    let text = String::from_utf8(buf)?;
    let normal_lines: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("facet normal"))
        .collect();
    assert_eq!(normal_lines.len(), 2);
    assert!(normal_lines
        .iter()
        .all(|line| *line == "facet normal 0.000000 0.000000 0.000000"));
    Ok(())
}

#[test]
fn test_recalculate_matches_winding_on_cube_side() -> Result<()> {
    // Two triangles of the x = 1 side, wound to face +x
    let mut mesh = Mesh::named("side");
    let p = |x, y, z| Vertex::new(x, y, z);
    mesh.add_triangle(Triangle::from_corners(p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(1.0, 1.0, 1.0)))?;
    mesh.add_triangle(Triangle::from_corners(p(1.0, 0.0, 0.0), p(1.0, 1.0, 1.0), p(1.0, 0.0, 1.0)))?;

    geometry::recalculate_normals(&mut mesh)?;
    for t in mesh.triangles() {
        assert_eq!(t.n, Vertex::new(1.0, 0.0, 0.0));
    }
    Ok(())
}
