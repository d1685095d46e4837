//! The render loop.
//!
//! [`run`] takes an initialized [`Platform`], builds the [`Scene`] on its GPU,
//! draws until the window is closed, and tears everything down in reverse
//! order of acquisition.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::{
    abs::{Gpu, Mesh, Platform, ShaderProgram, StageKind, WindowConfig},
    asset::ShaderPair,
    camera::Camera,
    error::Result,
    shapes,
    timer::FrameTimer,
};

/// Name of the projection matrix uniform in the shaders.
pub const PROJECTION_UNIFORM: &str = "projection";

/// Geometry to upload at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshKind {
    Cube { center: Vec3, size: f32 },
    Quad,
}

/// Everything that varies between the demos. There is no runtime
/// configuration; pick one of the presets or build one in code.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub window: WindowConfig,
    pub clear_color: [f32; 4],
    /// Enables depth testing and clears the depth buffer each frame.
    pub depth_test: bool,
    pub swap_interval: i32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub shaders: ShaderPair,
    pub meshes: Vec<MeshKind>,
}

impl RenderOptions {
    /// A cube two units in front of the camera under a 60 degree perspective.
    pub fn cube() -> Self {
        Self {
            window: WindowConfig {
                title: "Hello World!".to_owned(),
                width: 800,
                height: 800,
            },
            clear_color: [0.0, 0.0, 0.0, 1.0],
            depth_test: false,
            swap_interval: 1,
            fov: 60.0,
            near: 0.1,
            far: 100.0,
            shaders: ShaderPair::CUBE,
            meshes: vec![MeshKind::Cube {
                center: Vec3::new(0.0, 0.0, -2.0),
                size: 0.5,
            }],
        }
    }

    /// One flat triangle straight in clip space on purple.
    pub fn quad() -> Self {
        Self {
            window: WindowConfig {
                title: "Hello World!".to_owned(),
                width: 800,
                height: 600,
            },
            clear_color: [0.5, 0.0, 0.5, 1.0],
            shaders: ShaderPair::FLAT,
            meshes: vec![MeshKind::Quad],
            ..Self::cube()
        }
    }

    /// An empty purple window.
    pub fn blank() -> Self {
        Self {
            window: WindowConfig {
                title: "Purple Window".to_owned(),
                width: 800,
                height: 600,
            },
            depth_test: true,
            meshes: Vec::new(),
            ..Self::quad()
        }
    }

    /// Perspective projection for the configured window.
    pub fn projection(&self) -> Mat4 {
        let aspect = self.window.width as f32 / self.window.height as f32;
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, self.near, self.far)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::cube()
    }
}

/// Title shown while the loop runs.
pub fn fps_title(fps: f64) -> String {
    format!("FPS: {fps:.2}")
}

/// GPU resources and per-frame state owned by the render loop.
pub struct Scene<G: Gpu> {
    gl: Arc<G>,
    program: ShaderProgram<G>,
    meshes: Vec<Mesh<G>>,
    projection: Mat4,
    camera: Camera,
    timer: FrameTimer,
    clear_depth: bool,
}

impl<G: Gpu> Scene<G> {
    /// Builds the projection, uploads the meshes, then compiles and links the
    /// shader program. Whatever was created before a failure is released when
    /// the partial scene is dropped.
    pub fn new(gl: &Arc<G>, options: &RenderOptions) -> Result<Self> {
        let projection = options.projection();

        let meshes = options
            .meshes
            .iter()
            .map(|kind| -> Result<Mesh<G>> {
                let data = match *kind {
                    MeshKind::Cube { center, size } => shapes::cube(center, size)?,
                    MeshKind::Quad => shapes::quad()?,
                };
                Mesh::new(gl, &data)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut program = ShaderProgram::new(gl);
        let vertex = options.shaders.vertex.load()?;
        program.attach_stage(StageKind::Vertex, &vertex)?;
        let fragment = options.shaders.fragment.load()?;
        program.attach_stage(StageKind::Fragment, &fragment)?;
        program.link()?;

        log::info!("scene ready: {} mesh(es)", meshes.len());
        Ok(Self {
            gl: Arc::clone(gl),
            program,
            meshes,
            projection,
            camera: Camera::new(),
            timer: FrameTimer::new(),
            clear_depth: options.depth_test,
        })
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Clears the framebuffer and draws every mesh with the program bound.
    pub fn render(&mut self) -> Result<()> {
        self.gl.clear(self.clear_depth);

        self.program.bind()?;
        let drawn = self
            .program
            .set_uniform_mat4(PROJECTION_UNIFORM, &self.projection)
            .and_then(|()| self.meshes.iter().try_for_each(Mesh::draw));
        self.program.unbind();
        drawn
    }

    /// Counts a presented frame; returns a new FPS sample when one is due.
    pub fn tick(&mut self) -> Option<f64> {
        self.timer.tick()
    }

    /// Releases the meshes, then the program. The context must still be current.
    pub fn destroy(&mut self) {
        for mesh in &mut self.meshes {
            mesh.destroy();
        }
        self.program.destroy();
        log::debug!("scene resources released");
    }
}

/// Drives `platform` until its window is closed.
///
/// The platform is terminated on every path out of this function, after the
/// scene's GPU resources have been released.
pub fn run<P: Platform>(mut platform: P, options: &RenderOptions) -> Result<()> {
    let result = Scene::new(platform.gpu(), options).map(|mut scene| {
        present(&mut platform, &mut scene, options);
        scene.destroy();
    });
    platform.terminate();
    result
}

fn present<P: Platform>(
    platform: &mut P,
    scene: &mut Scene<P::Gpu>,
    options: &RenderOptions,
) {
    platform.set_swap_interval(options.swap_interval);
    platform.show_window();
    let [red, green, blue, alpha] = options.clear_color;
    let gl = platform.gpu();
    gl.clear_color(red, green, blue, alpha);
    if options.depth_test {
        gl.enable_depth_test();
    }

    log::info!("entering render loop");
    while !platform.should_close() {
        platform.poll_events();

        if let Err(e) = scene.render() {
            log::error!("frame skipped: {e}");
        }

        platform.swap_buffers();

        if let Some(fps) = scene.tick() {
            platform.set_title(&fps_title(fps));
        }
    }
    log::info!("window closed, shutting down");
}
