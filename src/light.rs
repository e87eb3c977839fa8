//! Lighting for the renderer.

use crate::math::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// A face is lit in proportion to how closely its normal lines up with the
/// light direction. Faces whose normal is perpendicular to or points away from
/// the light are back faces and are never drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// The normalized light direction.
    pub direction: Vec3,
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
        }
    }

    /// Unit normal of a face, `(v2 - v0) x (v1 - v0)`.
    ///
    /// NaN for a face with no area.
    pub fn face_normal(vertices: &[Vec3; 3]) -> Vec3 {
        let [v0, v1, v2] = *vertices;
        (v2 - v0).cross(v1 - v0).normalize()
    }

    /// Raw light intensity of a face: its normal dotted with the light direction.
    ///
    /// Unclamped; may be negative or NaN.
    pub fn intensity(&self, vertices: &[Vec3; 3]) -> f32 {
        Self::face_normal(vertices).dot(self.direction)
    }

    /// Intensity of a face that should be drawn, or `None` for a back face.
    ///
    /// Degenerate faces produce a NaN normal and are culled too.
    pub fn shade_face(&self, vertices: &[Vec3; 3]) -> Option<f32> {
        let intensity = self.intensity(vertices);
        if intensity > 0.0 {
            Some(intensity)
        } else {
            None
        }
    }
}

impl Default for DirectionalLight {
    /// Light travelling into the screen, along -Z.
    fn default() -> Self {
        Self::new(Vec3::BACK)
    }
}
