// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - STL decoding, encoding and comparison

mod compare;
mod exporter;
mod format;
mod importer;
mod interop;
mod parser;

pub use compare::{compare_meshes, MeshComparison};
pub use exporter::{format_float, write, write_to};
pub use format::{Destination, Source, StlMode, ASCII_MAGIC, FACET_SIZE, HEADER_SIZE};
pub use importer::{
    read, read_file, read_from, read_from_with, read_lenient, read_with, sniff_mode,
};
pub use parser::parse_ascii;
