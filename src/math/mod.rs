//! Small vector types used by the projector, shading model and rasterizers.

pub mod vec2;
pub mod vec3;

pub use vec2::Vec2;
pub use vec3::{Vec3, Vec3i};
