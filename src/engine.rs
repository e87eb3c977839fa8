//! Core rendering engine.
//!
//! The [`Engine`] runs one render pass: every face of a mesh is projected,
//! shaded or culled, and rasterized into a freshly allocated canvas and depth
//! buffer, which are handed back as a [`Frame`].

use log::{debug, warn};

use crate::config::{RenderConfig, RenderMode};
use crate::light::DirectionalLight;
use crate::mesh::MeshSource;
use crate::projection::Viewport;
use crate::render::{
    draw_line, draw_line_with_depth, Canvas, DepthBuffer, FlatShader, FrameBuffer,
    ScanlineRasterizer, TextureShader,
};
use crate::texture::TextureSource;

/// Depth added to edges in [`RenderMode::FilledWireframe`] so they win the
/// strictly-greater test against the surface they lie on.
const WIREFRAME_DEPTH_BIAS: i32 = 1;

/// Counters for one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces: usize,
    /// Faces that reached the rasterizer.
    pub drawn: usize,
    /// Back faces and faces with no area.
    pub culled: usize,
    /// Pixels that passed the depth test.
    pub pixels: usize,
    /// Faces drawn flat in textured mode for lack of UVs.
    pub untextured: usize,
}

/// The output of a render pass, in bottom-left-origin orientation.
#[derive(Debug, Clone)]
pub struct Frame {
    pub canvas: Canvas,
    pub depth: DepthBuffer,
    pub stats: RenderStats,
}

pub struct Engine {
    config: RenderConfig,
    viewport: Viewport,
    light: DirectionalLight,
    rasterizer: ScanlineRasterizer,
}

impl Engine {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            viewport: config.viewport(),
            light: config.light(),
            rasterizer: ScanlineRasterizer::new(),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn light(&self) -> DirectionalLight {
        self.light
    }

    /// Renders `mesh` in the configured mode.
    ///
    /// Faces are processed in mesh order. Textured mode without a texture
    /// falls back to flat shading.
    pub fn render<M>(&self, mesh: &M, texture: Option<&dyn TextureSource>) -> Frame
    where
        M: MeshSource + ?Sized,
    {
        let mode = match (self.config.mode, texture) {
            (RenderMode::Textured, None) => {
                warn!("Textured mode requested without a texture; using flat shading");
                RenderMode::Flat
            }
            (mode, _) => mode,
        };

        let mut canvas = Canvas::new(self.config.width, self.config.height, self.config.background);
        let mut depth = DepthBuffer::new(self.config.width, self.config.height);
        let mut stats = RenderStats {
            faces: mesh.face_count(),
            ..RenderStats::default()
        };

        if mode == RenderMode::Wireframe {
            self.draw_wireframe(mesh, &mut canvas, &mut stats);
        } else {
            let mut buffer = FrameBuffer::new(&mut canvas, &mut depth);
            for face in 0..mesh.face_count() {
                self.draw_face(mesh, face, mode, texture, &mut buffer, &mut stats);
            }
        }

        if stats.untextured > 0 {
            warn!(
                "{} faces have no texture coordinates and were drawn flat",
                stats.untextured
            );
        }
        debug!(
            "{} pass: {} faces, {} drawn, {} culled, {} pixels",
            mode, stats.faces, stats.drawn, stats.culled, stats.pixels
        );

        Frame {
            canvas,
            depth,
            stats,
        }
    }

    fn draw_wireframe<M>(&self, mesh: &M, canvas: &mut Canvas, stats: &mut RenderStats)
    where
        M: MeshSource + ?Sized,
    {
        let color = self.config.wireframe_color;
        for face in 0..mesh.face_count() {
            let points = self.viewport.project_face(mesh, face).screen.points;
            for j in 0..3 {
                let (p0, p1) = (points[j], points[(j + 1) % 3]);
                stats.pixels += draw_line(canvas, p0.x, p0.y, p1.x, p1.y, color);
            }
            stats.drawn += 1;
        }
    }

    fn draw_face<M>(
        &self,
        mesh: &M,
        face: usize,
        mode: RenderMode,
        texture: Option<&dyn TextureSource>,
        buffer: &mut FrameBuffer,
        stats: &mut RenderStats,
    ) where
        M: MeshSource + ?Sized,
    {
        let projected = self.viewport.project_face(mesh, face);
        let Some(intensity) = self.light.shade_face(&projected.world) else {
            stats.culled += 1;
            return;
        };

        let triangle = &projected.screen;
        let written = match texture {
            Some(texture) if mode == RenderMode::Textured && projected.has_uvs => {
                let shader = TextureShader::new(texture, intensity);
                self.rasterizer.fill_triangle(triangle, buffer, &shader)
            }
            _ => {
                if mode == RenderMode::Textured {
                    stats.untextured += 1;
                }
                let shader = FlatShader::new(self.config.base_color, intensity);
                self.rasterizer.fill_triangle(triangle, buffer, &shader)
            }
        };
        stats.pixels += written;
        stats.drawn += 1;

        if mode == RenderMode::FilledWireframe {
            let points = triangle.points;
            for j in 0..3 {
                stats.pixels += draw_line_with_depth(
                    buffer,
                    points[j],
                    points[(j + 1) % 3],
                    WIREFRAME_DEPTH_BIAS,
                    self.config.wireframe_color,
                );
            }
        }
    }
}
