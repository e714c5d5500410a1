// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry buffers attached to model objects

/// Raw geometry buffers as stored by the host model
///
/// Both buffers are little-endian: `indices` holds `u32` triangle vertex
/// indices, `vertices` holds `f32` positions as [x, y, z, x, y, z, ...].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryData {
    /// Index buffer (little-endian u32)
    pub indices: Vec<u8>,
    /// Vertex buffer (little-endian f32)
    pub vertices: Vec<u8>,
}

impl GeometryData {
    /// Create geometry data from raw byte buffers
    pub fn new(indices: Vec<u8>, vertices: Vec<u8>) -> Self {
        Self { indices, vertices }
    }

    /// Encode typed buffers into the little-endian byte layout
    pub fn from_mesh(mesh: &MeshData) -> Self {
        Self {
            indices: mesh.indices.iter().flat_map(|i| i.to_le_bytes()).collect(),
            vertices: mesh.positions.iter().flat_map(|v| v.to_le_bytes()).collect(),
        }
    }
}

/// Geometry attached to an object
///
/// Hosts that already know the triangle count can supply it directly as
/// `primitive_count`; otherwise it is derived from the index buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryInfo {
    /// Precomputed primitive (triangle) count
    pub primitive_count: Option<u64>,
    /// Raw buffers
    pub data: Option<GeometryData>,
}

impl GeometryInfo {
    /// Geometry backed by raw buffers
    pub fn from_data(data: GeometryData) -> Self {
        Self {
            primitive_count: None,
            data: Some(data),
        }
    }

    /// Geometry known only by its primitive count
    pub fn with_primitive_count(count: u64) -> Self {
        Self {
            primitive_count: Some(count),
            data: None,
        }
    }

    /// Geometry encoded from a typed index list (no vertices)
    pub fn from_indices(indices: &[u32]) -> Self {
        Self::from_data(GeometryData::from_mesh(&MeshData {
            positions: Vec::new(),
            indices: indices.to_vec(),
        }))
    }
}

/// Decoded mesh data
///
/// Flattened vertex positions and triangle indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions as flattened [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
