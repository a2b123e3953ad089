// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL importer: framing detection plus the binary and ASCII readers

use super::format::{Source, StlMode, ASCII_MAGIC, FACET_SIZE, HEADER_SIZE};
use super::parser::parse_ascii;
use crate::config::{DecodePolicy, ReadOptions};
use crate::error::{Result, TrixError};
use crate::geometry::{Mesh, Triangle};
use std::fs::File;
use std::io::{BufReader, Cursor, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, warn};

/// Upper bound on faces reserved up front from an untrusted header count.
const PREALLOCATE_LIMIT: usize = 1 << 16;

/// Read a mesh with the default (strict) options
pub fn read(source: &Source) -> Result<Mesh> {
    read_with(source, ReadOptions::default())
}

/// Read a mesh, keeping whatever faces precede a truncation or malformed facet
pub fn read_lenient(source: &Source) -> Result<Mesh> {
    read_with(source, ReadOptions::lenient())
}

/// Read a mesh from an STL file on disk
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    read(&Source::Path(path.as_ref().to_path_buf()))
}

/// Read a mesh from `source`.
///
/// Standard input cannot seek, so it is buffered in memory before the
/// framing is detected.
pub fn read_with(source: &Source, options: ReadOptions) -> Result<Mesh> {
    match source {
        Source::Path(path) => {
            if path.as_os_str().is_empty() {
                return Err(TrixError::invalid_argument("empty source path"));
            }
            let mut reader = BufReader::new(File::open(path)?);
            read_from_with(&mut reader, options)
        }
        Source::Stdin => {
            let mut bytes = Vec::new();
            std::io::stdin().lock().read_to_end(&mut bytes)?;
            read_from_with(&mut Cursor::new(bytes), options)
        }
    }
}

/// Decode a mesh from a seekable reader with the default options
pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Mesh> {
    read_from_with(reader, ReadOptions::default())
}

/// Decode a mesh from a seekable reader
pub fn read_from_with<R: Read + Seek>(reader: &mut R, options: ReadOptions) -> Result<Mesh> {
    let mode = sniff_mode(reader)?;
    debug!(%mode, policy = ?options.policy, "decoding STL");

    match mode {
        StlMode::Ascii => read_ascii(reader, options.policy),
        StlMode::Binary => read_binary(reader, options.policy),
    }
}

/// Decide the framing of the data at the reader's current position.
///
/// The data is ASCII exactly when its first five bytes are `solid`, so a
/// binary file whose header happens to start with `solid` is reported as
/// ASCII. The reader is left where it started.
pub fn sniff_mode<R: Read + Seek>(reader: &mut R) -> Result<StlMode> {
    let start = reader.stream_position()?;
    let mut magic = [0u8; 5];
    let got = read_up_to(reader, &mut magic)?;
    reader.seek(SeekFrom::Start(start))?;

    if magic[..got] == ASCII_MAGIC[..] {
        Ok(StlMode::Ascii)
    } else {
        Ok(StlMode::Binary)
    }
}

fn read_ascii<R: Read>(reader: &mut R, policy: DecodePolicy) -> Result<Mesh> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_ascii(&String::from_utf8_lossy(&bytes), policy)
}

fn read_binary<R: Read>(reader: &mut R, policy: DecodePolicy) -> Result<Mesh> {
    let mut header = [0u8; HEADER_SIZE + 4];
    let got = read_up_to(reader, &mut header)?;
    if got < header.len() {
        return Err(TrixError::InvalidHeader {
            expected: header.len(),
            got,
        });
    }

    let declared = u32::from_le_bytes([
        header[HEADER_SIZE],
        header[HEADER_SIZE + 1],
        header[HEADER_SIZE + 2],
        header[HEADER_SIZE + 3],
    ]);
    debug!(facets = declared, "binary STL header");

    let mut mesh = Mesh::new();
    mesh.reserve((declared as usize).min(PREALLOCATE_LIMIT))?;

    let mut record = [0u8; FACET_SIZE];
    for index in 0..declared {
        if read_up_to(reader, &mut record)? < FACET_SIZE {
            if policy == DecodePolicy::Lenient {
                warn!(
                    declared,
                    read = index,
                    "binary STL truncated, keeping complete facets"
                );
                break;
            }
            return Err(TrixError::TruncatedFacets {
                expected: declared,
                got: index,
            });
        }
        mesh.add_triangle(decode_facet(&record))?;
    }

    Ok(mesh)
}

/// Twelve little-endian floats; the trailing attribute field is ignored.
fn decode_facet(record: &[u8; FACET_SIZE]) -> Triangle {
    let mut floats = [0.0f32; 12];
    for (value, bytes) in floats.iter_mut().zip(record.chunks_exact(4)) {
        *value = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    Triangle::from_floats(floats)
}

/// Fill as much of `buf` as the reader can supply; returns the byte count.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind as TrixKind;
    use crate::geometry::Vertex;

    fn binary_bytes(triangles: &[Triangle], declared: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_SIZE];
        bytes.extend_from_slice(&declared.to_le_bytes());
        for t in triangles {
            for value in t.to_floats() {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
            bytes.extend_from_slice(&[0xAB, 0xCD]);
        }
        bytes
    }

    fn sample() -> Triangle {
        Triangle::new(
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_sniff_rewinds() -> Result<()> {
        let mut cursor = Cursor::new(b"solid x\nendsolid x\n".to_vec());
        assert_eq!(sniff_mode(&mut cursor)?, StlMode::Ascii);
        assert_eq!(cursor.position(), 0);

        let mut cursor = Cursor::new(vec![0u8; 84]);
        assert_eq!(sniff_mode(&mut cursor)?, StlMode::Binary);
        assert_eq!(cursor.position(), 0);
        Ok(())
    }

    #[test]
    fn test_sniff_is_case_sensitive() -> Result<()> {
        let mut cursor = Cursor::new(b"SOLID x\n".to_vec());
        assert_eq!(sniff_mode(&mut cursor)?, StlMode::Binary);
        Ok(())
    }

    #[test]
    fn test_binary_attribute_ignored() -> Result<()> {
        let mut cursor = Cursor::new(binary_bytes(&[sample(), sample()], 2));
        let mesh = read_from(&mut cursor)?;
        assert_eq!(mesh.facecount(), 2);
        assert_eq!(mesh.faces()[1].triangle, sample());
        Ok(())
    }

    #[test]
    fn test_binary_truncated_strict() {
        let mut cursor = Cursor::new(binary_bytes(&[sample()], 3));
        let err = read_from(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), TrixKind::FormatFailure);
        assert!(matches!(
            err,
            TrixError::TruncatedFacets {
                expected: 3,
                got: 1
            }
        ));
    }

    #[test]
    fn test_binary_truncated_lenient() -> Result<()> {
        let mut bytes = binary_bytes(&[sample()], 3);
        // half of a second record
        bytes.extend_from_slice(&[0u8; 20]);
        let mesh = read_from_with(&mut Cursor::new(bytes), ReadOptions::lenient())?;
        assert_eq!(mesh.facecount(), 1);
        Ok(())
    }

    #[test]
    fn test_short_header() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        let err = read_from(&mut cursor).unwrap_err();
        assert!(matches!(
            err,
            TrixError::InvalidHeader {
                expected: 84,
                got: 3
            }
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_file("/nonexistent/trix/model.stl").unwrap_err();
        assert_eq!(err.kind(), TrixKind::IoFailure);
    }

    #[test]
    fn test_empty_path() {
        let err = read(&Source::Path(Default::default())).unwrap_err();
        assert_eq!(err.kind(), TrixKind::InvalidArgument);
    }
}
