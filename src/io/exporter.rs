// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL exporter for ASCII and binary framing

use super::format::{Destination, StlMode, ASCII_MAGIC, HEADER_SIZE};
use crate::error::{Result, TrixError};
use crate::geometry::{Mesh, Vertex};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::debug;

/// Write `mesh` to `destination`, creating or truncating a file path.
///
/// An I/O failure aborts immediately. Bytes already written stay written.
pub fn write(destination: &Destination, mesh: &Mesh, mode: StlMode) -> Result<()> {
    debug!(%destination, %mode, facets = mesh.facecount(), "writing STL");
    match destination {
        Destination::Path(path) => {
            if path.as_os_str().is_empty() {
                return Err(TrixError::invalid_argument("empty destination path"));
            }
            write_to(File::create(path)?, mesh, mode)
        }
        Destination::Stdout => write_to(std::io::stdout().lock(), mesh, mode),
    }
}

/// Encode `mesh` into any writer
pub fn write_to<W: Write>(writer: W, mesh: &Mesh, mode: StlMode) -> Result<()> {
    let mut out = BufWriter::new(writer);
    match mode {
        StlMode::Binary => write_binary(&mut out, mesh)?,
        StlMode::Ascii => write_ascii(&mut out, mesh)?,
    }
    out.flush()?;
    Ok(())
}

fn write_binary<W: Write>(out: &mut W, mesh: &Mesh) -> Result<()> {
    let count = u32::try_from(mesh.facecount()).map_err(|_| TrixError::TooManyFaces {
        count: mesh.facecount(),
    })?;

    out.write_all(&binary_header(mesh.name()))?;
    out.write_all(&count.to_le_bytes())?;
    for face in mesh {
        for value in face.triangle.to_floats() {
            out.write_all(&value.to_le_bytes())?;
        }
        out.write_all(&0u16.to_le_bytes())?; // attributes
    }
    Ok(())
}

/// Mesh name, cut at 80 bytes and padded with zeros.
///
/// A name starting with `solid` gets a leading space; otherwise readers
/// that sniff the first five bytes would take the file for ASCII.
fn binary_header(name: &str) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    let start = if name.as_bytes().starts_with(ASCII_MAGIC) {
        header[0] = b' ';
        1
    } else {
        0
    };
    let len = name.len().min(HEADER_SIZE - start);
    header[start..start + len].copy_from_slice(&name.as_bytes()[..len]);
    header
}

fn write_ascii<W: Write>(out: &mut W, mesh: &Mesh) -> Result<()> {
    writeln!(out, "solid {}", mesh.name())?;
    for t in mesh.triangles() {
        writeln!(out, "facet normal {}", Coords(t.n))?;
        writeln!(out, "outer loop")?;
        for corner in [t.a, t.b, t.c] {
            writeln!(out, "vertex {}", Coords(corner))?;
        }
        writeln!(out, "endloop")?;
        writeln!(out, "endfacet")?;
    }
    writeln!(out, "endsolid {}", mesh.name())?;
    Ok(())
}

/// Format a float the way C's `%f` does: six decimals, `nan`/`inf` spelled
/// out in lowercase with their sign.
pub fn format_float(value: f32) -> String {
    Fixed(value).to_string()
}

struct Fixed(f32);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        let sign = if value.is_sign_negative() { "-" } else { "" };
        if value.is_nan() {
            write!(f, "{}nan", sign)
        } else if value.is_infinite() {
            write!(f, "{}inf", sign)
        } else {
            write!(f, "{:.6}", value)
        }
    }
}

struct Coords(Vertex);

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", Fixed(self.0.x), Fixed(self.0.y), Fixed(self.0.z))
    }
}
