//! Shader source loading.
//!
//! Sources come either from the `shaders/` directory compiled into the binary
//! or from a path on disk.

use std::{io, path::PathBuf};

use include_dir::{Dir, include_dir};

use crate::error::{RenderError, Result};

static SHADERS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/shaders");

/// Location of one shader stage's source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// Path relative to the embedded `shaders/` directory.
    Embedded(&'static str),
    File(PathBuf),
}

impl ShaderSource {
    /// Reads the source text.
    pub fn load(&self) -> Result<String> {
        match self {
            ShaderSource::Embedded(path) => {
                let file = SHADERS.get_file(path).ok_or_else(|| RenderError::ResourceLoad {
                    path: PathBuf::from(path),
                    source: io::Error::new(io::ErrorKind::NotFound, "no such embedded shader"),
                })?;
                let text = file.contents_utf8().ok_or_else(|| RenderError::ResourceLoad {
                    path: PathBuf::from(path),
                    source: io::Error::new(io::ErrorKind::InvalidData, "shader is not UTF-8"),
                })?;
                Ok(text.to_owned())
            }
            ShaderSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| RenderError::ResourceLoad {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

/// A vertex/fragment source pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPair {
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
}

impl ShaderPair {
    /// Projects positions through the `projection` uniform.
    pub const CUBE: ShaderPair = ShaderPair {
        vertex: ShaderSource::Embedded("cube/vertex_shader.glsl"),
        fragment: ShaderSource::Embedded("cube/fragment_shader.glsl"),
    };

    /// Passes positions through untransformed.
    pub const FLAT: ShaderPair = ShaderPair {
        vertex: ShaderSource::Embedded("flat/vertex_shader.glsl"),
        fragment: ShaderSource::Embedded("flat/fragment_shader.glsl"),
    };
}
