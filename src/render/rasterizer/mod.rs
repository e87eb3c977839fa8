//! Triangle rasterization.
//!
//! [`ScanlineRasterizer`] fills screen-space triangles row by row, carrying
//! depth and texture coordinates, and asks a [`PixelShader`] for the color of
//! every pixel that passes the depth test.

mod scanline;
mod shader;

pub use scanline::ScanlineRasterizer;
pub use shader::{FlatShader, PixelShader, TextureShader};

use crate::math::{Vec2, Vec3i};

/// A triangle ready for rasterization in screen space.
///
/// Built per mesh face during a render pass and dropped right after.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    /// Pixel column, pixel row and integer depth of each corner.
    pub points: [Vec3i; 3],
    /// Texture coordinate of each corner, paired by index with `points`.
    pub uvs: [Vec2; 3],
}

impl ScreenTriangle {
    pub fn new(points: [Vec3i; 3], uvs: [Vec2; 3]) -> Self {
        Self { points, uvs }
    }

    /// A triangle without texture coordinates.
    pub fn untextured(points: [Vec3i; 3]) -> Self {
        Self {
            points,
            uvs: [Vec2::ZERO; 3],
        }
    }

    /// True when all three corners share a row, so the triangle covers no area.
    pub fn is_degenerate(&self) -> bool {
        let [p0, p1, p2] = self.points;
        p0.y == p1.y && p0.y == p2.y
    }
}
