//! Frame buffer abstraction pairing color and depth storage.
//!
//! Every depth-tested write goes through [`FrameBuffer`], so a pixel's depth
//! and color are always updated together, and both buffers share a single
//! index rule: [`pixel_index`].

use super::canvas::Canvas;
use super::depth::DepthBuffer;
use crate::colors::Color;

/// Flat offset `x + y * width` of a pixel, or `None` outside the buffer.
#[inline]
pub fn pixel_index(width: u32, height: u32, x: i32, y: i32) -> Option<usize> {
    if x >= 0 && (x as u32) < width && y >= 0 && (y as u32) < height {
        Some(x as usize + y as usize * width as usize)
    } else {
        None
    }
}

/// A view into a canvas and its depth buffer.
///
/// This is a borrowed view, not an owning type: it is created for the
/// duration of a render pass so rasterizers can receive both buffers as one
/// argument.
pub struct FrameBuffer<'a> {
    canvas: &'a mut Canvas,
    depth: &'a mut DepthBuffer,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view.
    ///
    /// # Panics
    /// Panics in debug builds if the two buffers differ in size.
    pub fn new(canvas: &'a mut Canvas, depth: &'a mut DepthBuffer) -> Self {
        debug_assert_eq!(
            (canvas.width(), canvas.height()),
            (depth.width(), depth.height()),
            "Depth buffer size doesn't match canvas"
        );
        Self { canvas, depth }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is strictly greater than the stored
    /// depth. Silently ignores out-of-bounds coordinates. Returns whether the
    /// pixel was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: i32, color: Color) -> bool {
        if self.depth.test_and_set(x, y, depth) {
            self.canvas.set(x, y, color);
            true
        } else {
            false
        }
    }

    /// Depth-tested write whose color is only computed when the test passes.
    #[inline]
    pub fn set_pixel_with_depth_lazy<F>(&mut self, x: i32, y: i32, depth: i32, color: F) -> bool
    where
        F: FnOnce() -> Color,
    {
        if self.depth.test_and_set(x, y, depth) {
            self.canvas.set(x, y, color());
            true
        } else {
            false
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &*self.canvas
    }

    pub fn depth(&self) -> &DepthBuffer {
        &*self.depth
    }
}
