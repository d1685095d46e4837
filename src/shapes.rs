//! Fixed geometry the renderer can draw.

use glam::Vec3;

use crate::abs::{MeshData, Vertex};
use crate::error::Result;

/// Six faces, two triangles each, over the eight corners built by [`cube`].
const CUBE_INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0, // front
    4, 5, 6, 6, 7, 4, // back
    0, 1, 5, 5, 4, 0, // left
    2, 3, 7, 7, 6, 2, // right
    0, 3, 7, 7, 4, 0, // top
    1, 2, 6, 6, 5, 1, // bottom
];

/// A cube centred on `center`, extending `size` along each axis in both
/// directions.
pub fn cube(center: Vec3, size: f32) -> Result<MeshData> {
    let Vec3 { x, y, z } = center;
    let vertices = vec![
        // front
        Vertex::new(x - size, y + size, z + size),
        Vertex::new(x - size, y - size, z + size),
        Vertex::new(x + size, y - size, z + size),
        Vertex::new(x + size, y + size, z + size),
        // back
        Vertex::new(x - size, y + size, z - size),
        Vertex::new(x - size, y - size, z - size),
        Vertex::new(x + size, y - size, z - size),
        Vertex::new(x + size, y + size, z - size),
    ];
    MeshData::new(vertices, Some(CUBE_INDICES.to_vec()))
}

/// The unindexed unit quad in the z = 0 plane.
///
/// Four corners but no indices, so a draw covers only the first triangle.
pub fn quad() -> Result<MeshData> {
    MeshData::new(
        vec![
            Vertex::new(-0.5, 0.5, 0.0),
            Vertex::new(-0.5, -0.5, 0.0),
            Vertex::new(0.5, -0.5, 0.0),
            Vertex::new(0.5, 0.5, 0.0),
        ],
        None,
    )
}
