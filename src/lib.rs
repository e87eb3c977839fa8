//! A CPU software rasterizer for triangle meshes.
//!
//! Meshes are projected orthographically, flat shaded from a single
//! directional light (with back faces culled), and filled scanline by
//! scanline into a color canvas with a z-buffer resolving occlusion. No
//! graphics API is involved.
//!
//! # Quick Start
//!
//! ```ignore
//! use scanrast::prelude::*;
//!
//! let mesh = Mesh::from_obj("obj/african_head.obj")?;
//! let engine = Engine::new(RenderConfig::default());
//! let mut frame = engine.render(&mesh, None);
//! frame.canvas.flip_vertically();
//! frame.canvas.save("render.tga")?;
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod texture;

// Re-export commonly needed types at crate root for convenience
pub use colors::Color;
pub use config::{ConfigError, RenderConfig, RenderMode};
pub use engine::{Engine, Frame, RenderStats};
pub use mesh::{LoadError, Mesh, MeshSource};
pub use projection::Viewport;
pub use texture::{Texture, TextureSource};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use scanrast::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::config::{RenderConfig, RenderMode};
    pub use crate::engine::{Engine, Frame, RenderStats};

    // Scene inputs
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::{Face, Mesh, MeshSource};
    pub use crate::projection::Viewport;
    pub use crate::texture::{Texture, TextureSource};

    // Math
    pub use crate::math::{Vec2, Vec3, Vec3i};

    // Rendering
    pub use crate::colors::Color;
    pub use crate::render::{Canvas, DepthBuffer};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        draw_line, Canvas, DepthBuffer, FlatShader, FrameBuffer, ScanlineRasterizer,
        ScreenTriangle,
    };
}
