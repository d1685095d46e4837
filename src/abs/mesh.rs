//! Mesh management module.
//!
//! [`MeshData`] is validated CPU-side geometry; [`Mesh`] is that geometry
//! uploaded once into GPU buffers. Meshes are static: there is no way to
//! change the data after upload.

use std::sync::Arc;

use glam::Vec3;

use super::gpu::{BufferTarget, Gpu};
use crate::error::{RenderError, Result};

/// Attribute slot the position is bound to in every shader.
pub const POSITION_ATTRIBUTE: u32 = 0;

/// A single vertex: a position and nothing else.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: Vec3,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
        }
    }
}

/// Geometry for one static shape, drawn as a triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    vertices: Vec<Vertex>,
    indices: Option<Vec<u32>>,
}

impl MeshData {
    /// Checks that `indices` describes whole triangles over `vertices`.
    pub fn new(vertices: Vec<Vertex>, indices: Option<Vec<u32>>) -> Result<Self> {
        if let Some(indices) = &indices {
            if indices.len() % 3 != 0 {
                return Err(RenderError::IncompleteTriangle(indices.len()));
            }
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(RenderError::IndexOutOfRange {
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, indices })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh<G: Gpu> {
    gl: Arc<G>,
    vao: G::VertexArray,
    vbo: Option<G::Buffer>,
    ebo: Option<G::Buffer>,
    vertex_count: usize,
    index_count: Option<usize>,
    destroyed: bool,
}

impl<G: Gpu> Mesh<G> {
    /// Uploads `data` into a new vertex array.
    pub fn new(gl: &Arc<G>, data: &MeshData) -> Result<Self> {
        let vao = gl.create_vertex_array().map_err(RenderError::Gpu)?;
        // From here on, an early return drops `mesh` and frees what exists.
        let mut mesh = Self {
            gl: Arc::clone(gl),
            vao,
            vbo: None,
            ebo: None,
            vertex_count: data.vertices.len(),
            index_count: data.indices.as_ref().map(Vec::len),
            destroyed: false,
        };

        let vbo = gl.create_buffer().map_err(RenderError::Gpu)?;
        mesh.vbo = Some(vbo);
        let ebo = match data.indices {
            Some(_) => {
                let ebo = gl.create_buffer().map_err(RenderError::Gpu)?;
                mesh.ebo = Some(ebo);
                Some(ebo)
            }
            None => None,
        };

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(BufferTarget::Array, Some(vbo));
        gl.buffer_data(BufferTarget::Array, bytemuck::cast_slice(&data.vertices));

        if let (Some(ebo), Some(indices)) = (ebo, &data.indices) {
            gl.bind_buffer(BufferTarget::ElementArray, Some(ebo));
            gl.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(indices));
        }

        gl.vertex_attrib_pointer_f32(POSITION_ATTRIBUTE, 3);
        gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);

        // The element buffer binding is VAO state, so unbind the VAO first.
        gl.bind_vertex_array(None);
        gl.bind_buffer(BufferTarget::Array, None);
        gl.bind_buffer(BufferTarget::ElementArray, None);

        log::debug!(
            "uploaded mesh: {} vertices, {} indices",
            mesh.vertex_count,
            mesh.index_count.unwrap_or(0)
        );
        Ok(mesh)
    }

    /// Draws the mesh.
    pub fn draw(&self) -> Result<()> {
        if self.destroyed {
            return Err(RenderError::Destroyed("mesh"));
        }

        self.gl.bind_vertex_array(Some(self.vao));
        match self.index_count {
            Some(count) => self.gl.draw_elements(count as i32),
            None => self.gl.draw_arrays(self.triangle_count() as i32 * 3),
        }
        self.gl.bind_vertex_array(None);
        Ok(())
    }

    /// Number of triangles a draw call produces.
    pub fn triangle_count(&self) -> usize {
        self.index_count.unwrap_or(self.vertex_count) / 3
    }

    /// Releases the GPU buffers. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for buffer in [self.ebo.take(), self.vbo.take()].into_iter().flatten() {
            self.gl.delete_buffer(buffer);
        }
        self.gl.delete_vertex_array(self.vao);
        self.destroyed = true;
    }
}

impl<G: Gpu> Drop for Mesh<G> {
    fn drop(&mut self) {
        self.destroy();
    }
}
