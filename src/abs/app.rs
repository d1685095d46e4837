//! SDL2 and OpenGL application management.
//!
//! This module defines the [`Platform`] trait the render loop drives, and
//! [`App`], its SDL2 implementation owning the window and the OpenGL context.

use std::sync::Arc;

use super::gpu::Gpu;
use crate::error::{RenderError, Result};

/// Windowing and event service.
///
/// Creating the platform covers subsystem init, window creation and making the
/// context current. Everything after that goes through this trait.
pub trait Platform {
    type Gpu: Gpu;

    /// The GPU API bound to this platform's context.
    fn gpu(&self) -> &Arc<Self::Gpu>;

    fn set_swap_interval(&mut self, interval: i32);

    fn show_window(&mut self);

    fn poll_events(&mut self);

    /// Whether the user asked to close the window. Stays set once set.
    fn should_close(&self) -> bool;

    fn swap_buffers(&mut self);

    fn set_title(&mut self, title: &str);

    /// Destroys the context, the window and the subsystem, in that order.
    fn terminate(self);
}

/// Window parameters fixed for the lifetime of the [`App`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Field order is drop order: GL state goes before the window, and the
/// window before the SDL context.
pub struct App {
    gl: Arc<glow::Context>,
    gl_context: sdl2::video::GLContext,
    event_pump: sdl2::EventPump,
    window: sdl2::video::Window,
    video_subsystem: sdl2::VideoSubsystem,
    sdl: sdl2::Sdl,
    close_requested: bool,
}

impl App {
    /// Initializes SDL2, creates a hidden window with a 3.3 core context and
    /// makes that context current.
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let sdl = sdl2::init().map_err(RenderError::PlatformInit)?;
        let video_subsystem = sdl.video().map_err(RenderError::PlatformInit)?;
        log::info!("SDL version: {}", sdl2::version::version());

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .hidden()
            .build()
            .map_err(|e| RenderError::WindowCreation(e.to_string()))?;

        let gl_context = window
            .gl_create_context()
            .map_err(RenderError::ContextCreation)?;
        window
            .gl_make_current(&gl_context)
            .map_err(RenderError::ContextCreation)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let gl = Arc::new(gl);
        log::info!("OpenGL version: {}", gl.version());

        let event_pump = sdl.event_pump().map_err(RenderError::PlatformInit)?;

        log::info!(
            "created {}x{} window \"{}\"",
            config.width,
            config.height,
            config.title
        );
        Ok(Self {
            gl,
            gl_context,
            event_pump,
            window,
            video_subsystem,
            sdl,
            close_requested: false,
        })
    }
}

impl Platform for App {
    type Gpu = glow::Context;

    fn gpu(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    fn set_swap_interval(&mut self, interval: i32) {
        if let Err(e) = self.video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("could not set swap interval {interval}: {e}");
        }
    }

    fn show_window(&mut self) {
        self.window.show();
    }

    fn poll_events(&mut self) {
        for event in self.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. }
                | sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::Close,
                    ..
                } => self.close_requested = true,
                _ => {}
            }
        }
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }

    fn set_title(&mut self, title: &str) {
        if let Err(e) = self.window.set_title(title) {
            log::warn!("could not set window title: {e}");
        }
    }

    fn terminate(self) {
        let Self {
            gl,
            gl_context,
            event_pump,
            window,
            video_subsystem,
            sdl,
            ..
        } = self;
        drop(gl);
        drop(gl_context);
        drop(event_pump);
        drop(window);
        drop(video_subsystem);
        drop(sdl);
        log::info!("platform terminated");
    }
}
