//! A window, one shader program and a cube, redrawn every frame.
//!
//! The graphics API and the windowing system sit behind the [`abs::Gpu`] and
//! [`abs::Platform`] traits; [`renderer::run`] drives them.

pub mod abs;
pub mod asset;
pub mod camera;
pub mod error;
pub mod logging;
pub mod renderer;
pub mod shapes;
pub mod timer;

#[cfg(test)]
mod testing;

pub use error::{RenderError, Result};
