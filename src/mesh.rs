//! Triangle meshes and OBJ loading.
//!
//! The renderer reads geometry through the [`MeshSource`] trait. [`Mesh`] is
//! the in-memory implementation, filled from Wavefront OBJ files via `tobj`.

use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::math::{Vec2, Vec3};

/// Errors produced while loading or assembling a mesh.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse OBJ data: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("mesh contains no triangles")]
    NoTriangles,
    #[error("face {face} references vertex {index}, but the mesh has {count} vertices")]
    VertexIndexOutOfRange {
        face: usize,
        index: usize,
        count: usize,
    },
    #[error("face {face} references texture coordinate {index}, but the mesh has {count}")]
    UvIndexOutOfRange {
        face: usize,
        index: usize,
        count: usize,
    },
}

/// Read access to triangle geometry.
///
/// Implementors guarantee that every index returned by [`face_vertices`]
/// is valid for [`vertex`].
///
/// [`face_vertices`]: MeshSource::face_vertices
/// [`vertex`]: MeshSource::vertex
pub trait MeshSource {
    fn face_count(&self) -> usize;

    /// Vertex indices of the three corners of `face`.
    fn face_vertices(&self, face: usize) -> [usize; 3];

    /// Model-space position of a vertex.
    fn vertex(&self, index: usize) -> Vec3;

    /// Texture coordinate of one corner of `face`, if the face has any.
    fn uv(&self, face: usize, corner: usize) -> Option<Vec2>;
}

/// A triangle: indices into the mesh's vertex pool and, optionally, its UV pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub vertices: [usize; 3],
    pub uvs: Option<[usize; 3]>,
}

impl Face {
    pub fn new(vertices: [usize; 3]) -> Self {
        Self {
            vertices,
            uvs: None,
        }
    }

    pub fn with_uvs(vertices: [usize; 3], uvs: [usize; 3]) -> Self {
        Self {
            vertices,
            uvs: Some(uvs),
        }
    }
}

/// An indexed triangle mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    uvs: Vec<Vec2>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Assemble a mesh, checking that every face index is in range.
    pub fn new(vertices: Vec<Vec3>, uvs: Vec<Vec2>, faces: Vec<Face>) -> Result<Self, LoadError> {
        for (i, face) in faces.iter().enumerate() {
            if let Some(&index) = face.vertices.iter().find(|&&v| v >= vertices.len()) {
                return Err(LoadError::VertexIndexOutOfRange {
                    face: i,
                    index,
                    count: vertices.len(),
                });
            }
            if let Some(&index) = face.uvs.iter().flatten().find(|&&t| t >= uvs.len()) {
                return Err(LoadError::UvIndexOutOfRange {
                    face: i,
                    index,
                    count: uvs.len(),
                });
            }
        }
        Ok(Self {
            vertices,
            uvs,
            faces,
        })
    }

    /// Load every object in an OBJ file into a single mesh.
    ///
    /// Polygons are triangulated; `mtllib` references are ignored.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj(path.as_ref(), &Self::load_options())?;
        let mesh = Self::from_models(&models)?;
        info!(
            "Loaded {} ({} vertices, {} faces, {} texture coordinates)",
            path.as_ref().display(),
            mesh.vertices.len(),
            mesh.faces.len(),
            mesh.uvs.len()
        );
        Ok(mesh)
    }

    /// Parse OBJ source text held in memory.
    pub fn from_obj_str(source: &str) -> Result<Self, LoadError> {
        let mut reader = BufReader::new(source.as_bytes());
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::from_models(&models)
    }

    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            single_index: false,
            triangulate: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        }
    }

    fn from_models(models: &[tobj::Model]) -> Result<Self, LoadError> {
        let mut vertices = Vec::new();
        let mut uvs = Vec::new();
        let mut faces = Vec::new();

        for model in models {
            let m = &model.mesh;
            let vertex_base = vertices.len();
            let uv_base = uvs.len();

            vertices.extend(
                m.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            uvs.extend(m.texcoords.chunks_exact(2).map(|t| Vec2::new(t[0], t[1])));

            let has_uvs = !m.texcoord_indices.is_empty()
                && m.texcoord_indices.len() == m.indices.len();
            for (i, tri) in m.indices.chunks_exact(3).enumerate() {
                let corners = [
                    vertex_base + tri[0] as usize,
                    vertex_base + tri[1] as usize,
                    vertex_base + tri[2] as usize,
                ];
                let face = if has_uvs {
                    let t = &m.texcoord_indices[i * 3..i * 3 + 3];
                    Face::with_uvs(
                        corners,
                        [
                            uv_base + t[0] as usize,
                            uv_base + t[1] as usize,
                            uv_base + t[2] as usize,
                        ],
                    )
                } else {
                    Face::new(corners)
                };
                faces.push(face);
            }
            debug!(
                "OBJ object '{}': {} triangles, uvs: {}",
                model.name,
                m.indices.len() / 3,
                has_uvs
            );
        }

        if faces.is_empty() {
            return Err(LoadError::NoTriangles);
        }
        Self::new(vertices, uvs, faces)
    }

    /// A cube spanning [-1, 1] on every axis, wound counter-clockwise seen
    /// from outside, with each side mapped to the full texture.
    pub fn cube() -> Self {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        let uvs = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let sides: [[usize; 4]; 6] = [
            [4, 5, 6, 7], // front (+z)
            [1, 0, 3, 2], // back
            [5, 1, 2, 6], // right
            [0, 4, 7, 3], // left
            [7, 6, 2, 3], // top
            [0, 1, 5, 4], // bottom
        ];
        let faces = sides
            .iter()
            .flat_map(|&[a, b, c, d]| {
                [
                    Face::with_uvs([a, b, c], [0, 1, 2]),
                    Face::with_uvs([a, c, d], [0, 2, 3]),
                ]
            })
            .collect();

        Self {
            vertices,
            uvs,
            faces,
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Recentre and uniformly rescale so the model fits [-1, 1] on every axis.
    ///
    /// A model already inside that cube is left untouched. Returns whether
    /// the vertices changed.
    pub fn normalize(&mut self) -> bool {
        let Some(&first) = self.vertices.first() else {
            return false;
        };
        let (min, max) = self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (
                Vec3::new(lo.x.min(v.x), lo.y.min(v.y), lo.z.min(v.z)),
                Vec3::new(hi.x.max(v.x), hi.y.max(v.y), hi.z.max(v.z)),
            )
        });

        let inside = |v: Vec3| [v.x, v.y, v.z].iter().all(|c| (-1.0..=1.0).contains(c));
        if inside(min) && inside(max) {
            return false;
        }

        let center = (min + max) * 0.5;
        let half = (max - min) * 0.5;
        let extent = half.x.max(half.y).max(half.z);
        let scale = if extent > 0.0 { 1.0 / extent } else { 1.0 };

        for v in &mut self.vertices {
            *v = (*v - center) * scale;
        }
        debug!("Normalized mesh: center {:?}, scale {}", center, scale);
        true
    }
}

impl MeshSource for Mesh {
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face_vertices(&self, face: usize) -> [usize; 3] {
        self.faces[face].vertices
    }

    fn vertex(&self, index: usize) -> Vec3 {
        self.vertices[index]
    }

    fn uv(&self, face: usize, corner: usize) -> Option<Vec2> {
        self.faces[face].uvs.map(|t| self.uvs[t[corner]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const QUAD_OBJ: &str = "\
o quad
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
f 1/1 2/2 3/3 4/4
";

    #[test]
    fn obj_quad_is_triangulated_with_uvs() {
        let mesh = Mesh::from_obj_str(QUAD_OBJ).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertices().len(), 4);
        for face in 0..mesh.face_count() {
            for corner in 0..3 {
                let v = mesh.vertex(mesh.face_vertices(face)[corner]);
                let uv = mesh.uv(face, corner).unwrap();
                // uv mirrors position for this quad
                assert_relative_eq!(uv.x, (v.x + 1.0) / 2.0);
                assert_relative_eq!(uv.y, (v.y + 1.0) / 2.0);
            }
        }
    }

    #[test]
    fn obj_without_texcoords_has_no_uvs() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = Mesh::from_obj_str(src).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.uv(0, 0), None);
    }

    #[test]
    fn multiple_objects_share_one_pool() {
        let src = "o a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
                   o b\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n";
        let mesh = Mesh::from_obj_str(src).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex(mesh.face_vertices(1)[0]), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn obj_without_faces_is_an_error() {
        let err = Mesh::from_obj_str("v 0 0 0\n").unwrap_err();
        assert!(matches!(err, LoadError::NoTriangles));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let err = Mesh::new(vec![Vec3::ZERO; 3], vec![], vec![Face::new([0, 1, 3])]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::VertexIndexOutOfRange { face: 0, index: 3, count: 3 }
        ));

        let err = Mesh::new(
            vec![Vec3::ZERO; 3],
            vec![Vec2::ZERO],
            vec![Face::with_uvs([0, 1, 2], [0, 0, 1])],
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::UvIndexOutOfRange { index: 1, .. }));
    }

    #[test]
    fn cube_is_closed_and_in_range() {
        let mesh = Mesh::cube();
        assert_eq!(mesh.face_count(), 12);
        assert!(Mesh::new(mesh.vertices.clone(), mesh.uvs.clone(), mesh.faces.clone()).is_ok());
    }

    #[test]
    fn normalize_fits_unit_cube() {
        let mut mesh = Mesh::new(
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 4.0, 2.0), Vec3::new(2.0, 8.0, 0.0)],
            vec![],
            vec![Face::new([0, 1, 2])],
        )
        .unwrap();
        assert!(mesh.normalize());
        for v in mesh.vertices() {
            for c in [v.x, v.y, v.z] {
                assert!((-1.0..=1.0).contains(&c), "{:?}", v);
            }
        }
        // longest axis spans exactly [-1, 1]
        assert_relative_eq!(mesh.vertex(0).x, -1.0);
        assert_relative_eq!(mesh.vertex(1).x, 1.0);
    }

    #[test]
    fn normalize_leaves_unit_models_alone() {
        let mut mesh = Mesh::cube();
        let before = mesh.clone();
        assert!(!mesh.normalize());
        assert_eq!(mesh, before);
    }
}
