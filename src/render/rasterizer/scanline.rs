//! Scanline-based triangle rasterization.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by Y with a fixed three-step bubble sort, so that
//!    `p0.y <= p1.y <= p2.y`. Texture coordinates move with their vertex.
//! 2. **Walk rows** `i` in `0..p2.y - p0.y`. Each row belongs to the lower
//!    half (`p0 -> p1`) or the upper half (`p1 -> p2`) of the triangle.
//! 3. **Find the span**: point A lies on the long edge `p0 -> p2` at
//!    `alpha = i / total_height`, point B on the active short edge at `beta`,
//!    the fraction along that half. Depth and UV are interpolated with x.
//! 4. **Fill the span** left to right. Each pixel interpolates depth and UV by
//!    `phi`, the fraction between A and B, and is written only if its depth is
//!    strictly greater than the stored one.
//!
//! ```text
//!            p2
//!            /\
//!           /  \   upper half
//!     A ---/----\--- B      <- row i
//!         /     / p1
//!        /   /
//!       / /         lower half
//!      p0
//! ```
//!
//! All fractions are floats; positions and depths are truncated to integers
//! only when a pixel is addressed. The top row (`y == p2.y`) is never filled,
//! so triangles sharing an edge do not both cover it.

use super::{PixelShader, ScreenTriangle};
use crate::math::{Vec2, Vec3};
use crate::render::framebuffer::FrameBuffer;

/// Scanline-based triangle rasterizer.
///
/// Input triangles can have vertices in any order and either winding.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Fills `triangle` into `buffer`, coloring each visible pixel with `shader`.
    ///
    /// Returns the number of pixels that passed the depth test.
    pub fn fill_triangle<S>(
        &self,
        triangle: &ScreenTriangle,
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize
    where
        S: PixelShader + ?Sized,
    {
        if triangle.is_degenerate() {
            return 0;
        }

        let [mut p0, mut p1, mut p2] = triangle.points;
        let [mut uv0, mut uv1, mut uv2] = triangle.uvs;
        if p0.y > p1.y {
            std::mem::swap(&mut p0, &mut p1);
            std::mem::swap(&mut uv0, &mut uv1);
        }
        if p0.y > p2.y {
            std::mem::swap(&mut p0, &mut p2);
            std::mem::swap(&mut uv0, &mut uv2);
        }
        if p1.y > p2.y {
            std::mem::swap(&mut p1, &mut p2);
            std::mem::swap(&mut uv1, &mut uv2);
        }

        // i64 so rows saturated at the i32 limits by projection still subtract
        let total_height = p2.y as i64 - p0.y as i64;
        let lower_height = p1.y as i64 - p0.y as i64;
        let upper_height = p2.y as i64 - p1.y as i64;
        let (f0, f1, f2) = (p0.to_f32(), p1.to_f32(), p2.to_f32());
        let max_x = buffer.width() as i32 - 1;

        // only the rows that land on the buffer
        let first = (-(p0.y as i64)).max(0);
        let last = total_height.min(buffer.height() as i64 - p0.y as i64);

        let mut written = 0;
        for i in first..last {
            let y = (p0.y as i64 + i) as i32;

            let upper = i > lower_height || p1.y == p0.y;
            let segment_height = if upper { upper_height } else { lower_height };
            if segment_height == 0 {
                continue;
            }

            let alpha = i as f32 / total_height as f32;
            let beta = (i - if upper { lower_height } else { 0 }) as f32 / segment_height as f32;

            let mut a = f0.lerp(f2, alpha);
            let mut uv_a = uv0.lerp(uv2, alpha);
            let (mut b, mut uv_b) = if upper {
                (f1.lerp(f2, beta), uv1.lerp(uv2, beta))
            } else {
                (f0.lerp(f1, beta), uv0.lerp(uv1, beta))
            };
            if a.x > b.x {
                std::mem::swap(&mut a, &mut b);
                std::mem::swap(&mut uv_a, &mut uv_b);
            }

            written += Self::fill_span(y, a, b, uv_a, uv_b, max_x, buffer, shader);
        }
        written
    }

    /// Fills row `y` from A to B inclusive.
    ///
    /// The span's ends are truncated once; `phi` is measured between those
    /// integer ends so the first and last pixel get exactly A's and B's
    /// attributes. Columns outside the buffer are skipped without changing
    /// the interpolation.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn fill_span<S>(
        y: i32,
        a: Vec3,
        b: Vec3,
        uv_a: Vec2,
        uv_b: Vec2,
        max_x: i32,
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize
    where
        S: PixelShader + ?Sized,
    {
        let x_start = a.x as i32;
        let x_end = b.x as i32;
        let span = x_end as i64 - x_start as i64;

        let mut written = 0;
        for x in x_start.max(0)..=x_end.min(max_x) {
            let phi = if span == 0 {
                1.0
            } else {
                (x as i64 - x_start as i64) as f32 / span as f32
            };
            let depth = (a.z + (b.z - a.z) * phi) as i32;
            let uv = uv_a.lerp(uv_b, phi);
            if buffer.set_pixel_with_depth_lazy(x, y, depth, || shader.shade(uv)) {
                written += 1;
            }
        }
        written
    }
}
