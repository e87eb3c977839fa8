//! The color surface every rasterizer draws into.
//!
//! Rasterization uses a bottom-left origin; [`Canvas::flip_vertically`]
//! converts to the top-left origin image files expect, right before encoding.

use std::path::Path;

use image::{DynamicImage, ImageResult, RgbaImage};

use super::framebuffer::pixel_index;
use crate::colors::Color;

/// An owned `width * height` grid of colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Creates a canvas with every pixel set to `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            pixels: vec![background; width as usize * height as usize],
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

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Writes a pixel. Out-of-bounds coordinates are ignored.
    ///
    /// Returns whether the pixel was inside the canvas.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        match pixel_index(self.width, self.height, x, y) {
            Some(idx) => {
                self.pixels[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        pixel_index(self.width, self.height, x, y).map(|idx| self.pixels[idx])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mirrors the canvas top-to-bottom in place.
    pub fn flip_vertically(&mut self) {
        let row = self.width as usize;
        let rows = self.height as usize;
        for y in 0..rows / 2 {
            let (top, bottom) = self.pixels.split_at_mut((rows - 1 - y) * row);
            top[y * row..(y + 1) * row].swap_with_slice(&mut bottom[..row]);
        }
    }

    /// Copies the canvas into an `image` buffer, row 0 first.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.pixels[x as usize + y as usize * self.width as usize].to_array())
        })
    }

    /// Encodes the canvas as an RGB image; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        DynamicImage::ImageRgba8(self.to_image())
            .to_rgb8()
            .save(path)
    }
}
