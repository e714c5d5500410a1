// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry buffer decoding

use ifc_analyses_model::{GeometryData, GeometryInfo, MeshData};

const INDEX_SIZE: usize = std::mem::size_of::<u32>();
const TRIANGLE_SIZE: usize = 3 * INDEX_SIZE;

/// Triangle count of one geometry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodedTriangles {
    /// Complete triangles
    pub triangles: u64,
    /// Bytes after the last complete triangle that were ignored
    pub trailing_bytes: usize,
}

/// Decodes little-endian geometry buffers
pub struct GeometryDecoder;

impl GeometryDecoder {
    /// Triangle count of a geometry
    ///
    /// A precomputed primitive count wins over the index buffer. Index buffers
    /// whose length is not a multiple of 12 bytes are truncated to the last
    /// complete triangle; this never fails.
    pub fn triangle_count(geometry: &GeometryInfo) -> DecodedTriangles {
        if let Some(count) = geometry.primitive_count {
            return DecodedTriangles {
                triangles: count,
                trailing_bytes: 0,
            };
        }

        match &geometry.data {
            Some(data) => DecodedTriangles {
                triangles: (data.indices.len() / TRIANGLE_SIZE) as u64,
                trailing_bytes: data.indices.len() % TRIANGLE_SIZE,
            },
            None => DecodedTriangles::default(),
        }
    }

    /// Decode the index buffer, dropping a trailing partial value
    pub fn decode_indices(bytes: &[u8]) -> Vec<u32> {
        bytes
            .chunks_exact(INDEX_SIZE)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    /// Decode the vertex buffer, dropping a trailing partial value
    pub fn decode_positions(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(INDEX_SIZE)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    /// Decode both buffers into a mesh
    ///
    /// Indices are truncated to whole triangles and positions to whole vertices.
    pub fn decode_mesh(data: &GeometryData) -> MeshData {
        let mut indices = Self::decode_indices(&data.indices);
        indices.truncate(indices.len() - indices.len() % 3);

        let mut positions = Self::decode_positions(&data.vertices);
        positions.truncate(positions.len() - positions.len() % 3);

        MeshData { positions, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_bytes(indices: &[u32]) -> Vec<u8> {
        indices.iter().flat_map(|i| i.to_le_bytes()).collect()
    }

    #[test]
    fn test_thirty_indices_make_ten_triangles() {
        let indices: Vec<u32> = (0..30).collect();
        let decoded = GeometryDecoder::triangle_count(&GeometryInfo::from_indices(&indices));
        assert_eq!(decoded.triangles, 10);
        assert_eq!(decoded.trailing_bytes, 0);
    }

    #[test]
    fn test_truncates_partial_triangle() {
        // 4 indices plus 2 stray bytes: one full triangle
        let mut bytes = index_bytes(&[0, 1, 2, 3]);
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let geometry = GeometryInfo::from_data(GeometryData::new(bytes, Vec::new()));

        let decoded = GeometryDecoder::triangle_count(&geometry);
        assert_eq!(decoded.triangles, 1);
        assert_eq!(decoded.trailing_bytes, 6);
    }

    #[test]
    fn test_primitive_count_wins() {
        let mut geometry = GeometryInfo::from_indices(&[0, 1, 2]);
        geometry.primitive_count = Some(42);
        assert_eq!(GeometryDecoder::triangle_count(&geometry).triangles, 42);
    }

    #[test]
    fn test_empty_geometry_has_no_triangles() {
        assert_eq!(
            GeometryDecoder::triangle_count(&GeometryInfo::default()),
            DecodedTriangles::default()
        );
    }

    #[test]
    fn test_decode_mesh() {
        let positions: Vec<f32> = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mut vertices: Vec<u8> = positions.iter().flat_map(|v| v.to_le_bytes()).collect();
        vertices.push(0xFF);
        let data = GeometryData::new(index_bytes(&[0, 1, 2, 2]), vertices);

        let mesh = GeometryDecoder::decode_mesh(&data);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.positions, positions);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
    }
}
