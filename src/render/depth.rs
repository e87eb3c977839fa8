//! Per-pixel depth storage for hidden surface removal.

use image::GrayImage;

use super::framebuffer::pixel_index;

/// Depth value meaning "nothing drawn here yet".
pub const DEPTH_CLEAR: i32 = i32::MIN;

/// A `width * height` grid of integer depths, indexed like [`super::Canvas`].
///
/// Larger values are nearer: a write only lands when its depth is strictly
/// greater than what is stored, so ties keep the first writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthBuffer {
    depths: Vec<i32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![DEPTH_CLEAR; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self) {
        self.depths.fill(DEPTH_CLEAR);
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<i32> {
        pixel_index(self.width, self.height, x, y).map(|idx| self.depths[idx])
    }

    /// Stores `depth` at (x, y) if it is strictly greater than the current value.
    ///
    /// Returns whether the test passed. Out-of-bounds coordinates never pass.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: i32) -> bool {
        match pixel_index(self.width, self.height, x, y) {
            Some(idx) if depth > self.depths[idx] => {
                self.depths[idx] = depth;
                true
            }
            _ => false,
        }
    }

    pub fn depths(&self) -> &[i32] {
        &self.depths
    }

    /// Grayscale visualisation: each depth clamped to 0..=255, untouched pixels black.
    ///
    /// Row 0 of the image is row 0 of the buffer (bottom-left origin).
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let d = self.depths[x as usize + y as usize * self.width as usize];
            image::Luma([d.clamp(0, 255) as u8])
        })
    }
}
