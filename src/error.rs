//! Error type shared by every stage of the renderer.

use std::path::PathBuf;

use thiserror::Error;

use crate::abs::StageKind;

/// Everything that can go wrong while starting up or driving the render loop.
///
/// Startup failures are fatal. Only the usage errors (`NotLinked`, `NotBound`,
/// `Destroyed`) can show up once the loop is running, and those are logged
/// and skipped for the frame.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unable to initialize the windowing subsystem: {0}")]
    PlatformInit(String),
    #[error("failed to create window: {0}")]
    WindowCreation(String),
    #[error("failed to create or activate the GL context: {0}")]
    ContextCreation(String),
    #[error("error creating {stage} shader\n{log}")]
    ShaderCompile { stage: StageKind, log: String },
    #[error("error linking shader program\n{log}")]
    ShaderLink { log: String },
    #[error("shader program has not been linked")]
    NotLinked,
    #[error("shader program is not bound")]
    NotBound,
    #[error("shader program is already linked")]
    AlreadyLinked,
    #[error("{0} shader stage has not been attached")]
    MissingStage(StageKind),
    #[error("failed to load shader source {}: {source}", .path.display())]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("index {index} is out of range for a mesh with {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("index count {0} does not describe whole triangles")]
    IncompleteTriangle(usize),
    #[error("GPU object allocation failed: {0}")]
    Gpu(String),
    #[error("{0} used after it was destroyed")]
    Destroyed(&'static str),
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
