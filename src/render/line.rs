//! Line rasterization.
//!
//! Lines are walked with the integer-error form of Bresenham's algorithm:
//!
//! 1. If the line is steep (`|dy| > |dx|`) the axes are transposed so x is
//!    always the major axis, giving exactly one pixel per column with no gaps.
//! 2. Endpoints are swapped so x increases.
//! 3. Each step along x adds `2|dy|` to an error accumulator; once it exceeds
//!    `dx`, y moves one pixel toward the end point and `2dx` is paid back.
//!
//! No floating point is needed to place pixels. Depth, when carried, is
//! interpolated linearly along the major axis and truncated per pixel.
//!
//! The walk state is `i64`, so endpoints anywhere in the `i32` range are
//! safe, and [`LinePixels::clipped_to`] starts and stops the walk at the
//! buffer edge so far-off endpoints do not cost one step per off-screen
//! pixel.

use super::canvas::Canvas;
use super::framebuffer::FrameBuffer;
use crate::colors::Color;
use crate::math::Vec3i;

/// Iterator over the pixels of a line segment, endpoints included.
///
/// Yields points in the segment's (possibly transposed and reversed) walk
/// order; `z` carries the interpolated depth.
#[derive(Debug, Clone)]
pub struct LinePixels {
    steep: bool,
    x: i64,
    x_end: i64,
    y: i64,
    y_step: i64,
    dx: i64,
    derror2: i64,
    error2: i64,
    x_start: i64,
    y_start: i64,
    z0: f32,
    z1: f32,
}

impl LinePixels {
    pub fn new(p0: Vec3i, p1: Vec3i) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (p0.x as i64, p0.y as i64, p1.x as i64, p1.y as i64);
        let (mut z0, mut z1) = (p0.z, p1.z);

        let steep = (x0 - x1).abs() < (y0 - y1).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
            std::mem::swap(&mut z0, &mut z1);
        }

        Self {
            steep,
            x: x0,
            x_end: x1,
            y: y0,
            y_step: if y1 > y0 { 1 } else { -1 },
            dx: x1 - x0,
            derror2: (y1 - y0).abs() * 2,
            error2: 0,
            x_start: x0,
            y_start: y0,
            z0: z0 as f32,
            z1: z1 as f32,
        }
    }

    /// Restricts the walk to major-axis positions inside a `width x height`
    /// buffer.
    ///
    /// The pixels yielded are exactly the in-range part of the full walk;
    /// the minor axis is not clipped.
    pub fn clipped_to(mut self, width: u32, height: u32) -> Self {
        let extent = i64::from(if self.steep { height } else { width });
        self.x_end = self.x_end.min(extent - 1);
        if self.x < 0 && self.x <= self.x_end {
            self.skip_to(0);
        }
        self
    }

    /// Moves the walk to major-axis position `x`, as if every step before it
    /// had been taken.
    fn skip_to(&mut self, x: i64) {
        let k = (x - self.x_start) as i128;
        let (dx, derror2) = (self.dx as i128, self.derror2 as i128);
        // y steps taken after k error updates
        let steps = if dx == 0 { 0 } else { (k * derror2 + dx - 1) / (2 * dx) };
        self.y = self.y_start + self.y_step * steps as i64;
        self.error2 = (k * derror2 - 2 * dx * steps) as i64;
        self.x = x;
    }
}

impl Iterator for LinePixels {
    type Item = Vec3i;

    fn next(&mut self) -> Option<Vec3i> {
        if self.x > self.x_end {
            return None;
        }

        let t = if self.dx == 0 {
            0.0
        } else {
            (self.x - self.x_start) as f32 / self.dx as f32
        };
        let z = (self.z0 + (self.z1 - self.z0) * t) as i32;
        // both coordinates lie between the i32 endpoints
        let (x, y) = (self.x as i32, self.y as i32);
        let point = if self.steep {
            Vec3i::new(y, x, z)
        } else {
            Vec3i::new(x, y, z)
        };

        self.error2 += self.derror2;
        if self.error2 > self.dx {
            self.y += self.y_step;
            self.error2 -= self.dx * 2;
        }
        self.x += 1;

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.x_end - self.x + 1).max(0) as usize;
        (n, Some(n))
    }
}

/// Draws a line between two integer points with no depth testing.
///
/// Returns the number of pixels that landed on the canvas.
pub fn draw_line(canvas: &mut Canvas, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> usize {
    LinePixels::new(Vec3i::new(x0, y0, 0), Vec3i::new(x1, y1, 0))
        .clipped_to(canvas.width(), canvas.height())
        .filter(|p| canvas.set(p.x, p.y, color))
        .count()
}

/// Draws a line whose depth is interpolated between the endpoints' `z`.
///
/// Each pixel is depth tested, so a later line never overwrites a nearer one.
/// `depth_bias` is added to every interpolated depth. Returns the number of
/// pixels written.
pub fn draw_line_with_depth(
    buffer: &mut FrameBuffer,
    p0: Vec3i,
    p1: Vec3i,
    depth_bias: i32,
    color: Color,
) -> usize {
    LinePixels::new(p0, p1)
        .clipped_to(buffer.width(), buffer.height())
        .filter(|p| buffer.set_pixel_with_depth(p.x, p.y, p.z.saturating_add(depth_bias), color))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, BLUE, RED, WHITE};
    use crate::render::depth::DepthBuffer;
    use std::collections::HashSet;

    fn pixels(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Vec3i> {
        LinePixels::new(Vec3i::new(x0, y0, 0), Vec3i::new(x1, y1, 0)).collect()
    }

    #[test]
    fn zero_length_is_single_pixel() {
        assert_eq!(pixels(5, 7, 5, 7), vec![Vec3i::new(5, 7, 0)]);
    }

    #[test]
    fn horizontal_and_vertical_lines() {
        let h = pixels(2, 3, 6, 3);
        assert_eq!(h.len(), 5);
        assert!(h.iter().all(|p| p.y == 3));

        let v = pixels(4, 9, 4, 1);
        assert_eq!(v.len(), 9);
        assert!(v.iter().all(|p| p.x == 4));
        let ys: HashSet<i32> = v.iter().map(|p| p.y).collect();
        assert_eq!(ys, (1..=9).collect());
    }

    #[test]
    fn endpoints_are_included() {
        for &(x0, y0, x1, y1) in &[(13, 20, 80, 40), (20, 13, 40, 80), (80, 40, 13, 20)] {
            let pts = pixels(x0, y0, x1, y1);
            assert!(pts.iter().any(|p| p.x == x0 && p.y == y0));
            assert!(pts.iter().any(|p| p.x == x1 && p.y == y1));
        }
    }

    #[test]
    fn line_totality_and_closeness() {
        let endpoints = [
            (0, 0, 10, 3),
            (0, 0, 3, 10),
            (10, 10, 0, 0),
            (5, 20, 25, 2),
            (30, 1, 2, 29),
            (7, 7, 8, 30),
            (0, 15, 31, 15),
            (31, 0, 0, 31),
        ];
        for &(x0, y0, x1, y1) in &endpoints {
            let pts = pixels(x0, y0, x1, y1);
            let unique: HashSet<(i32, i32)> = pts.iter().map(|p| (p.x, p.y)).collect();
            let (dx, dy) = ((x1 - x0).abs(), (y1 - y0).abs());
            assert!(unique.len() as i32 >= dx.max(dy) + 1, "{:?}", (x0, y0, x1, y1));

            for p in &pts {
                // distance along the minor axis to the ideal segment
                let off = if dx >= dy {
                    let t = (p.x - x0) as f32 / (x1 - x0) as f32;
                    (p.y as f32 - (y0 as f32 + t * (y1 - y0) as f32)).abs()
                } else {
                    let t = (p.y - y0) as f32 / (y1 - y0) as f32;
                    (p.x as f32 - (x0 as f32 + t * (x1 - x0) as f32)).abs()
                };
                assert!(off <= 1.0, "{:?} too far from {:?}", p, (x0, y0, x1, y1));
            }
        }
    }

    #[test]
    fn draw_line_clips_silently() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        let written = draw_line(&mut canvas, -5, 5, 20, 5, WHITE);
        assert_eq!(written, 10);
        assert_eq!(canvas.get(0, 5), Some(WHITE));
        assert_eq!(canvas.get(9, 5), Some(WHITE));
    }

    #[test]
    fn depth_is_interpolated_along_the_line() {
        let pts: Vec<Vec3i> =
            LinePixels::new(Vec3i::new(0, 0, 0), Vec3i::new(10, 0, 100)).collect();
        assert_eq!(pts.first().map(|p| p.z), Some(0));
        assert_eq!(pts[5].z, 50);
        assert_eq!(pts.last().map(|p| p.z), Some(100));

        // reversed endpoints carry their depth with them
        let rev: Vec<Vec3i> =
            LinePixels::new(Vec3i::new(10, 0, 100), Vec3i::new(0, 0, 0)).collect();
        assert_eq!(rev.iter().find(|p| p.x == 10).map(|p| p.z), Some(100));
    }

    #[test]
    fn depth_line_does_not_overwrite_nearer_pixels() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        let mut depth = DepthBuffer::new(10, 10);
        let mut fb = FrameBuffer::new(&mut canvas, &mut depth);

        draw_line_with_depth(&mut fb, Vec3i::new(0, 5, 50), Vec3i::new(9, 5, 50), 0, RED);
        let written = draw_line_with_depth(&mut fb, Vec3i::new(0, 5, 10), Vec3i::new(9, 5, 10), 0, BLUE);
        assert_eq!(written, 0);
        assert_eq!(fb.canvas().get(4, 5), Some(RED));

        let written = draw_line_with_depth(&mut fb, Vec3i::new(0, 5, 50), Vec3i::new(9, 5, 50), 1, BLUE);
        assert_eq!(written, 10);
        assert_eq!(fb.canvas().get(4, 5), Some(BLUE));
    }

    #[test]
    fn clipping_keeps_exactly_the_visible_pixels() {
        let on_canvas = |p: &Vec3i| (0..20).contains(&p.x) && (0..20).contains(&p.y);
        let endpoints = [
            (-30, -7, 45, 60),
            (45, 60, -30, -7),
            (-13, 50, 33, -41),
            (-100, 3, 100, 17),
            (5, -90, 12, 90),
            (25, 25, 40, 40),
        ];
        for &(x0, y0, x1, y1) in &endpoints {
            let (p0, p1) = (Vec3i::new(x0, y0, 0), Vec3i::new(x1, y1, 90));
            let full: Vec<Vec3i> = LinePixels::new(p0, p1).filter(on_canvas).collect();
            let clipped: Vec<Vec3i> =
                LinePixels::new(p0, p1).clipped_to(20, 20).filter(on_canvas).collect();
            assert_eq!(full, clipped, "{:?}", (x0, y0, x1, y1));
        }
    }

    #[test]
    fn endpoints_at_the_i32_limits_do_not_overflow() {
        let mut canvas = Canvas::new(20, 20, BLACK);
        assert_eq!(draw_line(&mut canvas, 0, 0, 10, i32::MAX, RED), 20);
        assert_eq!(canvas.get(0, 19), Some(RED));

        let mut canvas = Canvas::new(10, 10, BLACK);
        assert_eq!(draw_line(&mut canvas, i32::MIN, 5, i32::MAX, 5, RED), 10);
        // the anti-diagonal through the limits passes below this canvas
        assert_eq!(draw_line(&mut canvas, i32::MAX, i32::MIN, i32::MIN, i32::MAX, RED), 0);

        let mut depth = DepthBuffer::new(10, 10);
        let mut fb = FrameBuffer::new(&mut canvas, &mut depth);
        let written = draw_line_with_depth(
            &mut fb,
            Vec3i::new(3, i32::MIN, 0),
            Vec3i::new(3, i32::MAX, 100),
            0,
            BLUE,
        );
        assert_eq!(written, 10);
        assert_eq!(fb.canvas().get(3, 9), Some(BLUE));
    }

    #[test]
    fn line_entirely_off_canvas_writes_nothing() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        assert_eq!(draw_line(&mut canvas, 50, 2, 90, 8, RED), 0);
        assert_eq!(draw_line(&mut canvas, -90, 2, -50, 8, RED), 0);
        assert!(canvas.pixels().iter().all(|&c| c == BLACK));
    }
}
