// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and normal computation

mod mesh;
mod normals;

pub use mesh::{Face, Mesh, Triangle, Vertex, DEFAULT_MESH_NAME, MESH_NAME_MAX};
pub use normals::{recalculate_normals, recalculate_normals_parallel, reset_normals};
