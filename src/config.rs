//! Render settings.
//!
//! A [`RenderConfig`] is built once (the binary fills it from command line
//! flags) and handed to [`crate::Engine::new`]; nothing reads settings from
//! global state.

use thiserror::Error;

use crate::colors::{self, Color};
use crate::light::DirectionalLight;
use crate::math::Vec3;
use crate::projection::Viewport;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 800;
/// Integer range that model z in [-1, 1] is spread over.
pub const DEFAULT_DEPTH: u32 = 255;

/// What a render pass draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Triangle edges only, no depth test and no culling.
    Wireframe,
    /// Filled triangles, base color scaled by each face's light intensity.
    #[default]
    Flat,
    /// Filled triangles, texture sample scaled by each face's light intensity.
    Textured,
    /// Flat fill with the visible faces' edges drawn on top.
    FilledWireframe,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Wireframe => write!(f, "Wireframe"),
            RenderMode::Flat => write!(f, "Flat"),
            RenderMode::Textured => write!(f, "Textured"),
            RenderMode::FilledWireframe => write!(f, "FilledWireframe"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("canvas size must be non-zero, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("depth range must be non-zero")]
    EmptyDepthRange,
    #[error("light direction must be a non-zero, finite vector")]
    InvalidLightDirection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub light_direction: Vec3,
    pub mode: RenderMode,
    pub base_color: Color,
    pub wireframe_color: Color,
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            depth: DEFAULT_DEPTH,
            light_direction: Vec3::BACK,
            mode: RenderMode::default(),
            base_color: colors::FILL,
            wireframe_color: colors::WIREFRAME,
            background: colors::BACKGROUND,
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if self.depth == 0 {
            return Err(ConfigError::EmptyDepthRange);
        }
        let m = self.light_direction.magnitude();
        if !m.is_finite() || m == 0.0 {
            return Err(ConfigError::InvalidLightDirection);
        }
        Ok(())
    }

    /// The model-to-screen mapping for this canvas and depth range.
    pub fn viewport(&self) -> Viewport {
        Viewport::orthographic(self.width, self.height, self.depth)
    }

    pub fn light(&self) -> DirectionalLight {
        DirectionalLight::new(self.light_direction)
    }
}
