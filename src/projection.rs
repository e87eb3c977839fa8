//! Model space to screen space mapping.
//!
//! The camera is orthographic and looks down -Z: a vertex maps to the screen
//! by `(vertex + offset) * scale`, per axis, with no perspective divide.
//! Larger screen depths are nearer the viewer.

use crate::math::{Vec2, Vec3, Vec3i};
use crate::mesh::MeshSource;
use crate::render::ScreenTriangle;

/// An affine model-to-screen transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    offset: Vec3,
    scale: Vec3,
}

/// One mesh face, ready for shading and rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedFace {
    /// Model-space corners, for the face normal.
    pub world: [Vec3; 3],
    pub screen: ScreenTriangle,
    /// False when the mesh supplied no texture coordinates for this face;
    /// `screen.uvs` are then all zero.
    pub has_uvs: bool,
}

impl Viewport {
    pub fn new(offset: Vec3, scale: Vec3) -> Self {
        Self { offset, scale }
    }

    /// Maps a model spanning [-1, 1] onto a `width x height` canvas, and z
    /// onto `0..=depth`.
    ///
    /// The half-extents are integer divided, so an odd size leaves its last
    /// column or row unused.
    pub fn orthographic(width: u32, height: u32, depth: u32) -> Self {
        Self {
            offset: Vec3::ONE,
            scale: Vec3::new(
                (width / 2) as f32,
                (height / 2) as f32,
                (depth / 2) as f32,
            ),
        }
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Screen position of a model-space point, computed in float and then
    /// truncated toward zero.
    #[inline]
    pub fn project(&self, v: Vec3) -> Vec3i {
        Vec3i::truncate((v + self.offset).mul_elem(self.scale))
    }

    /// Projects face `face` of `mesh`, pairing each corner with its UV.
    pub fn project_face<M: MeshSource + ?Sized>(&self, mesh: &M, face: usize) -> ProjectedFace {
        let indices = mesh.face_vertices(face);
        let world = indices.map(|i| mesh.vertex(i));
        let uvs = [0, 1, 2].map(|corner| mesh.uv(face, corner));
        let has_uvs = uvs.iter().all(Option::is_some);

        ProjectedFace {
            world,
            screen: ScreenTriangle::new(
                world.map(|v| self.project(v)),
                uvs.map(|uv| uv.unwrap_or(Vec2::ZERO)),
            ),
            has_uvs,
        }
    }
}
