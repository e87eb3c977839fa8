//! Texture sampling.

use std::path::Path;

use log::info;

use crate::colors::Color;
use crate::math::Vec2;

/// Anything that can be sampled at a texture coordinate.
pub trait TextureSource {
    /// Returns the color at `uv`, with (0, 0) the bottom-left of the texture.
    fn sample(&self, uv: Vec2) -> Color;
}

/// Represents a 2D texture for texture mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    data: Vec<Color>, // Row-major texels, top row first.
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from an image file (TGA, PNG).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = img.dimensions();
        info!(
            "Loaded texture {} ({}x{})",
            path.as_ref().display(),
            width,
            height
        );

        let data: Vec<Color> = img.pixels().map(|p| Color::from(p.0)).collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a texture from raw texels, top row first.
    ///
    /// # Panics
    /// Panics if `data.len() != width * height` or either dimension is zero.
    pub fn from_pixels(width: u32, height: u32, data: Vec<Color>) -> Self {
        assert!(width > 0 && height > 0, "texture must not be empty");
        assert_eq!(
            data.len(),
            width as usize * height as usize,
            "Texel count doesn't match dimensions"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// # UV Coordinate Convention
    /// - UV coordinates are in [0,1] range
    /// - (0,0) = bottom-left in OBJ convention, but textures are stored top-left origin
    /// - We flip V to correct for this: v_corrected = 1.0 - v
    ///
    /// # Wrapping
    /// Uses repeat/wrap mode via rem_euclid for UVs outside [0,1]; the closed
    /// range itself is left alone so 1.0 still addresses the last texel.
    #[inline]
    pub fn sample_uv(&self, u: f32, v: f32) -> Color {
        let u = wrap(u);
        let v = 1.0 - wrap(v);

        // `as u32` saturates, so NaN lands on texel 0
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);

        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[inline]
fn wrap(t: f32) -> f32 {
    if (0.0..=1.0).contains(&t) {
        t
    } else {
        t.rem_euclid(1.0)
    }
}

impl TextureSource for Texture {
    #[inline]
    fn sample(&self, uv: Vec2) -> Color {
        self.sample_uv(uv.x, uv.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLUE, GREEN, RED, WHITE};

    // top row: RED GREEN, bottom row: BLUE WHITE
    fn quad() -> Texture {
        Texture::from_pixels(2, 2, vec![RED, GREEN, BLUE, WHITE])
    }

    #[test]
    fn v_is_flipped_to_bottom_left_origin() {
        let t = quad();
        assert_eq!(t.sample(Vec2::new(0.25, 0.25)), BLUE);
        assert_eq!(t.sample(Vec2::new(0.75, 0.25)), WHITE);
        assert_eq!(t.sample(Vec2::new(0.25, 0.75)), RED);
        assert_eq!(t.sample(Vec2::new(0.75, 0.75)), GREEN);
    }

    #[test]
    fn coordinates_wrap() {
        let t = quad();
        assert_eq!(t.sample(Vec2::new(1.25, 0.25)), BLUE);
        assert_eq!(t.sample(Vec2::new(-0.25, 0.25)), WHITE);
    }

    #[test]
    fn edges_stay_in_range() {
        let t = quad();
        assert_eq!(t.sample(Vec2::new(0.0, 0.0)), BLUE);
        assert_eq!(t.sample(Vec2::new(0.999_999, 0.999_999)), GREEN);
        assert_eq!(t.sample(Vec2::new(1.0, 1.0)), GREEN);
    }

    #[test]
    #[should_panic]
    fn mismatched_texel_count_panics() {
        Texture::from_pixels(2, 2, vec![RED]);
    }
}
