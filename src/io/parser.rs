// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! ASCII STL parser using pest

use crate::config::DecodePolicy;
use crate::error::{Result, TrixError};
use crate::geometry::{Mesh, Triangle};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use tracing::{debug, warn};

#[derive(Parser)]
#[grammar = "io/stl.pest"]
struct StlParser;

/// Parse an ASCII STL document into a mesh.
///
/// Facets are matched one at a time from the top; the first block that is
/// not an exact `facet ... endfacet` sequence ends the face list. No attempt
/// is made to resynchronize after it. A missing `endsolid` trailer is logged
/// and tolerated.
///
/// Under [`DecodePolicy::Strict`], a block that begins with the `facet`
/// keyword but does not match is an error. Under
/// [`DecodePolicy::Lenient`] it just ends the face list.
///
/// The name after `solid` is discarded; the mesh gets the default name.
pub fn parse_ascii(source: &str, policy: DecodePolicy) -> Result<Mesh> {
    let header = match_rule(Rule::header, source)
        .ok_or_else(|| TrixError::syntax("expected 'solid' at start of ASCII STL"))?;
    debug!(name = header.as_str()[5..].trim(), "ASCII STL header");

    let mut mesh = Mesh::new();
    let mut pos = skip_whitespace(source, header.as_span().end());

    while let Some(facet) = match_rule(Rule::facet, &source[pos..]) {
        let consumed = facet.as_span().end();
        mesh.add_triangle(triangle_from(facet)?)?;
        pos = skip_whitespace(source, pos + consumed);
    }
    debug!(facets = mesh.facecount(), offset = pos, "facet list ended");

    let rest = &source[pos..];
    if match_rule(Rule::trailer, rest).is_none() {
        if policy == DecodePolicy::Strict && match_rule(Rule::kw_facet, rest).is_some() {
            return Err(TrixError::syntax(format!(
                "malformed facet {} at byte {}",
                mesh.facecount() + 1,
                pos
            )));
        }
        warn!(
            offset = pos,
            facets = mesh.facecount(),
            "no 'endsolid' trailer after facet list"
        );
    }

    Ok(mesh)
}

/// Match `rule` at the very start of `input`.
fn match_rule(rule: Rule, input: &str) -> Option<Pair<'_, Rule>> {
    StlParser::parse(rule, input).ok()?.next()
}

fn skip_whitespace(source: &str, pos: usize) -> usize {
    let rest = &source[pos..];
    let trimmed = rest.trim_start_matches([' ', '\t', '\r', '\n']);
    pos + (rest.len() - trimmed.len())
}

fn triangle_from(facet: Pair<'_, Rule>) -> Result<Triangle> {
    let mut floats = [0.0f32; 12];
    let mut count = 0;

    for number in facet
        .into_inner()
        .flatten()
        .filter(|pair| pair.as_rule() == Rule::number)
    {
        let slot = floats
            .get_mut(count)
            .ok_or_else(|| TrixError::syntax("facet holds more than 12 numbers"))?;
        *slot = parse_float(number.as_str())?;
        count += 1;
    }

    if count != floats.len() {
        return Err(TrixError::syntax(format!(
            "facet holds {} numbers, expected 12",
            count
        )));
    }
    Ok(Triangle::from_floats(floats))
}

/// Parse one numeric token, including `nan`, `-nan`, `inf` and `-inf`.
pub(crate) fn parse_float(token: &str) -> Result<f32> {
    let (negative, magnitude) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let value: f32 = magnitude
        .parse()
        .map_err(|e| TrixError::syntax(format!("invalid number '{}': {}", token, e)))?;
    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::geometry::Vertex;

    const ONE_FACET: &str = "solid part
facet normal 0 0 1
outer loop
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
endloop
endfacet
endsolid part
";

    #[test]
    fn test_parse_single_facet() -> Result<()> {
        let mesh = parse_ascii(ONE_FACET, DecodePolicy::Strict)?;
        assert_eq!(mesh.facecount(), 1);

        let t = mesh.faces()[0].triangle;
        assert_eq!(t.n, Vertex::new(0.0, 0.0, 1.0));
        assert_eq!(t.b, Vertex::new(1.0, 0.0, 0.0));
        assert_eq!(t.c, Vertex::new(0.0, 1.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_name_is_discarded() -> Result<()> {
        let mesh = parse_ascii(ONE_FACET, DecodePolicy::Strict)?;
        assert_eq!(mesh.name(), crate::geometry::DEFAULT_MESH_NAME);
        Ok(())
    }

    #[test]
    fn test_whitespace_tolerance() -> Result<()> {
        let source = "solid\r\n  facet   normal\t1.5e0 -2 +3\n\n outer loop vertex 1 2 3 \
                      vertex 4 5 6\tvertex 7 8 9 endloop endfacet\r\n\tendsolid";
        let mesh = parse_ascii(source, DecodePolicy::Strict)?;
        assert_eq!(mesh.facecount(), 1);

        let t = mesh.faces()[0].triangle;
        assert_eq!(t.n, Vertex::new(1.5, -2.0, 3.0));
        assert_eq!(t.c, Vertex::new(7.0, 8.0, 9.0));
        Ok(())
    }

    #[test]
    fn test_missing_trailer_is_tolerated() -> Result<()> {
        let source = ONE_FACET.replace("endsolid part\n", "");
        let mesh = parse_ascii(&source, DecodePolicy::Strict)?;
        assert_eq!(mesh.facecount(), 1);
        Ok(())
    }

    #[test]
    fn test_junk_stops_facet_list() -> Result<()> {
        let source = ONE_FACET.replace("endsolid part\n", "garbage\nfacet normal 0 0 0\n");
        let mesh = parse_ascii(&source, DecodePolicy::Strict)?;
        assert_eq!(mesh.facecount(), 1);
        Ok(())
    }

    #[test]
    fn test_malformed_facet_strict_and_lenient() -> Result<()> {
        let broken = ONE_FACET.replace(
            "endsolid part\n",
            "facet normal 0 0 1\nouter loop\nvertex 0 0\nendloop\nendfacet\nendsolid part\n",
        );

        let err = parse_ascii(&broken, DecodePolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FormatFailure);

        let mesh = parse_ascii(&broken, DecodePolicy::Lenient)?;
        assert_eq!(mesh.facecount(), 1);
        Ok(())
    }

    #[test]
    fn test_keywords_need_separation() -> Result<()> {
        let glued = ONE_FACET.replace("facet normal", "facetnormal");
        let mesh = parse_ascii(&glued, DecodePolicy::Lenient)?;
        assert_eq!(mesh.facecount(), 0);
        Ok(())
    }

    #[test]
    fn test_missing_header() {
        let err = parse_ascii("facet normal 0 0 1", DecodePolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FormatFailure);
    }

    #[test]
    fn test_parse_float_specials() -> Result<()> {
        assert!(parse_float("nan")?.is_nan());
        assert!(parse_float("-nan")?.is_sign_negative());
        assert_eq!(parse_float("-inf")?, f32::NEG_INFINITY);
        assert_eq!(parse_float("Infinity")?, f32::INFINITY);
        assert_eq!(parse_float("1e3")?, 1000.0);
        assert_eq!(parse_float(".25")?, 0.25);
        assert!(parse_float("-0.000000")?.is_sign_negative());
        Ok(())
    }

    #[test]
    fn test_nan_normal_in_facet() -> Result<()> {
        let source = ONE_FACET.replace("facet normal 0 0 1", "facet normal nan -nan inf");
        let mesh = parse_ascii(&source, DecodePolicy::Strict)?;
        let n = mesh.faces()[0].triangle.n;
        assert!(n.x.is_nan() && n.y.is_nan());
        assert_eq!(n.z, f32::INFINITY);
        Ok(())
    }
}
