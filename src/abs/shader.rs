//! OpenGL Shaders
//!
//! This module defines [`ShaderProgram`], which owns a vertex and a fragment
//! stage, links them, and sets uniforms while bound.

use std::{fmt, sync::Arc};

use fxhash::FxHashSet;
use glam::Mat4;

use super::gpu::Gpu;
use crate::error::{RenderError, Result};

/// The two programmable stages a program is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Where a [`ShaderProgram`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    Empty,
    Staged { vertex: bool, fragment: bool },
    Linked { bound: bool },
    Deleted,
}

/// An OpenGL program composed of one vertex and one fragment stage.
///
/// Stages are compiled as they are attached. Linking consumes them; after a
/// successful [`link`](Self::link) only the program object remains.
pub struct ShaderProgram<G: Gpu> {
    gl: Arc<G>,
    vertex: Option<G::Shader>,
    fragment: Option<G::Shader>,
    program: Option<G::Program>,
    bound: bool,
    deleted: bool,
    missing_uniforms: FxHashSet<String>,
}

impl<G: Gpu> ShaderProgram<G> {
    /// Creates an empty program. No GPU objects exist until a stage is attached.
    pub fn new(gl: &Arc<G>) -> Self {
        Self {
            gl: Arc::clone(gl),
            vertex: None,
            fragment: None,
            program: None,
            bound: false,
            deleted: false,
            missing_uniforms: FxHashSet::default(),
        }
    }

    pub fn state(&self) -> ProgramState {
        if self.deleted {
            ProgramState::Deleted
        } else if self.program.is_some() {
            ProgramState::Linked { bound: self.bound }
        } else if self.vertex.is_none() && self.fragment.is_none() {
            ProgramState::Empty
        } else {
            ProgramState::Staged {
                vertex: self.vertex.is_some(),
                fragment: self.fragment.is_some(),
            }
        }
    }

    /// Compiles `source` as the given stage and keeps it for linking.
    ///
    /// A stage that fails to compile is deleted before the error is returned.
    /// Attaching a stage that is already present replaces it.
    pub fn attach_stage(&mut self, stage: StageKind, source: &str) -> Result<()> {
        if self.deleted {
            return Err(RenderError::Destroyed("shader program"));
        }
        if self.program.is_some() {
            return Err(RenderError::AlreadyLinked);
        }

        let shader = self.gl.create_shader(stage).map_err(RenderError::Gpu)?;
        self.gl.shader_source(shader, source);
        self.gl.compile_shader(shader);

        if !self.gl.shader_compile_status(shader) {
            let log = self.gl.shader_info_log(shader);
            self.gl.delete_shader(shader);
            return Err(RenderError::ShaderCompile { stage, log });
        }

        let slot = match stage {
            StageKind::Vertex => &mut self.vertex,
            StageKind::Fragment => &mut self.fragment,
        };
        if let Some(previous) = slot.replace(shader) {
            self.gl.delete_shader(previous);
        }
        log::debug!("compiled {stage} shader");
        Ok(())
    }

    /// Links the attached stages into a program.
    ///
    /// Both stages must be attached, and a program links at most once.
    pub fn link(&mut self) -> Result<()> {
        if self.deleted {
            return Err(RenderError::Destroyed("shader program"));
        }
        if self.program.is_some() {
            return Err(RenderError::AlreadyLinked);
        }
        let vertex = self.vertex.ok_or(RenderError::MissingStage(StageKind::Vertex))?;
        let fragment = self
            .fragment
            .ok_or(RenderError::MissingStage(StageKind::Fragment))?;

        let program = self.gl.create_program().map_err(RenderError::Gpu)?;
        self.gl.attach_shader(program, vertex);
        self.gl.attach_shader(program, fragment);
        self.gl.link_program(program);

        if !self.gl.program_link_status(program) {
            let log = self.gl.program_info_log(program);
            self.gl.detach_shader(program, vertex);
            self.gl.detach_shader(program, fragment);
            self.gl.delete_program(program);
            return Err(RenderError::ShaderLink { log });
        }

        for shader in [vertex, fragment] {
            self.gl.detach_shader(program, shader);
            self.gl.delete_shader(shader);
        }
        self.vertex = None;
        self.fragment = None;
        self.program = Some(program);
        log::debug!("linked shader program");
        Ok(())
    }

    /// Makes this the active program for subsequent draws.
    pub fn bind(&mut self) -> Result<()> {
        let program = self.linked()?;
        self.gl.use_program(Some(program));
        self.bound = true;
        Ok(())
    }

    pub fn unbind(&mut self) {
        if self.bound {
            self.gl.use_program(None);
            self.bound = false;
        }
    }

    /// Uploads a 4x4 matrix to the uniform called `name`.
    ///
    /// A name the linked program does not expose is not an error: the call
    /// does nothing and a warning is logged the first time the name is seen.
    pub fn set_uniform_mat4(&mut self, name: &str, value: &Mat4) -> Result<()> {
        let program = self.linked()?;
        if !self.bound {
            return Err(RenderError::NotBound);
        }

        match self.gl.uniform_location(program, name) {
            Some(location) => self.gl.uniform_matrix4(&location, &value.to_cols_array()),
            None => {
                if self.missing_uniforms.insert(name.to_owned()) {
                    log::warn!("uniform `{name}` is not active in the shader program, ignoring");
                }
            }
        }
        Ok(())
    }

    /// Releases every GPU object still owned by the program.
    ///
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.deleted {
            return;
        }
        self.unbind();
        for shader in [self.vertex.take(), self.fragment.take()].into_iter().flatten() {
            self.gl.delete_shader(shader);
        }
        if let Some(program) = self.program.take() {
            self.gl.delete_program(program);
        }
        self.deleted = true;
        log::debug!("deleted shader program");
    }

    fn linked(&self) -> Result<G::Program> {
        if self.deleted {
            return Err(RenderError::Destroyed("shader program"));
        }
        self.program.ok_or(RenderError::NotLinked)
    }
}

impl<G: Gpu> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.destroy();
    }
}
