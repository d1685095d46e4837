//! This module contains the thin layer over the windowing and graphics APIs:
//! the platform and GPU service traits, shader programs and meshes.

pub mod app;
pub mod gpu;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use gpu::*;
pub use mesh::*;
pub use shader::*;
