//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer decides which pixels a triangle covers and interpolates the
//! texture coordinate; a shader turns that coordinate into the final color.

use crate::colors::Color;
use crate::math::Vec2;
use crate::texture::TextureSource;

/// Trait for per-pixel shading computations.
///
/// Only called for pixels that passed the depth test.
pub trait PixelShader {
    /// Compute the color for a pixel given its interpolated texture coordinate.
    fn shade(&self, uv: Vec2) -> Color;
}

/// Returns one constant color for every pixel.
///
/// The color is the base color scaled by the face's light intensity.
pub struct FlatShader {
    color: Color,
}

impl FlatShader {
    pub fn new(base: Color, intensity: f32) -> Self {
        Self {
            color: base.modulate(intensity),
        }
    }

    /// A shader that writes `color` unchanged.
    pub fn solid(color: Color) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _uv: Vec2) -> Color {
        self.color
    }
}

/// Samples a texture and scales the result by the face's light intensity.
///
/// The output is always opaque whatever the texture's alpha.
pub struct TextureShader<'a, T: TextureSource + ?Sized> {
    texture: &'a T,
    intensity: f32,
}

impl<'a, T: TextureSource + ?Sized> TextureShader<'a, T> {
    pub fn new(texture: &'a T, intensity: f32) -> Self {
        Self { texture, intensity }
    }
}

impl<T: TextureSource + ?Sized> PixelShader for TextureShader<'_, T> {
    #[inline]
    fn shade(&self, uv: Vec2) -> Color {
        self.texture.sample(uv).modulate(self.intensity)
    }
}
