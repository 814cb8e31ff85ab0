//! Face normals and planar UVs over flat vertex/index arrays
//!
//! Models arrive as a flat `f32` coordinate array (three per vertex) and a
//! flat `u32` index array (three per triangle), the layout vertex buffers
//! use. `TriangleMesh` validates the arrays once at construction, then
//! derives per-face normals and a planar UV projection from them.

use thiserror::Error;

use crate::foundation::math::{Point3, Vec2, Vec3};
use crate::physics::Aabb;

/// Errors raised while validating or deriving mesh data
#[derive(Error, Debug)]
pub enum GeometryError {
    /// Vertex array length was not a multiple of three
    #[error("vertex array length {0} is not a multiple of 3")]
    RaggedVertices(usize),

    /// Index array length was not a multiple of three
    #[error("index array length {0} is not a multiple of 3")]
    RaggedIndices(usize),

    /// The mesh had no vertices at all
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// A triangle referenced a vertex index past the end of the vertex array
    #[error("triangle {triangle} references vertex {index}, but only {count} exist")]
    IndexOutOfRange {
        /// Offending triangle number
        triangle: usize,
        /// Offending vertex index
        index: u32,
        /// Number of vertices available
        count: usize,
    },

    /// A triangle had (numerically) zero area, so its normal is undefined
    #[error("triangle {0} is degenerate (zero area)")]
    DegenerateTriangle(usize),

    /// The mesh is flat along X or Y, so the planar UV projection is undefined
    #[error("mesh has zero extent along {0}, planar UVs are undefined")]
    FlatProjection(char),

    /// Too few control points to interpolate a curve through
    #[error("curve needs at least 2 control points, got {0}")]
    TooFewControlPoints(usize),
}

const DEGENERATE_EPSILON: f32 = 1e-12;

/// Indexed triangle soup with derived per-face attributes
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    points: Vec<Point3>,
    triangles: Vec<[u32; 3]>,
    bounds: Aabb,
}

impl TriangleMesh {
    /// Group flat vertex and index arrays into points and triangles
    ///
    /// Validates the layout up front so the derivation methods can index
    /// freely.
    pub fn new(vertices: &[f32], indices: &[u32]) -> Result<Self, GeometryError> {
        if vertices.is_empty() {
            return Err(GeometryError::EmptyMesh);
        }
        if vertices.len() % 3 != 0 {
            return Err(GeometryError::RaggedVertices(vertices.len()));
        }
        if indices.len() % 3 != 0 {
            return Err(GeometryError::RaggedIndices(indices.len()));
        }

        let points: Vec<Point3> = vertices
            .chunks_exact(3)
            .map(|v| Point3::new(v[0], v[1], v[2]))
            .collect();

        let triangles: Vec<[u32; 3]> = indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();

        for (n, tri) in triangles.iter().enumerate() {
            for &index in tri {
                if index as usize >= points.len() {
                    return Err(GeometryError::IndexOutOfRange {
                        triangle: n,
                        index,
                        count: points.len(),
                    });
                }
            }
        }

        let bounds = Aabb::from_points(&points).ok_or(GeometryError::EmptyMesh)?;

        Ok(Self {
            points,
            triangles,
            bounds,
        })
    }

    /// The grouped vertex points
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// The grouped triangle index triples
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Local-space bounding box of all vertices
    pub fn local_bounds(&self) -> Aabb {
        self.bounds
    }

    /// One unit normal per triangle, packed as 3 floats each
    ///
    /// `normal = normalize((p2 - p1) x (p3 - p2))` with the winding the index
    /// array supplies. Zero-area triangles are an error instead of a NaN
    /// normal.
    pub fn face_normals(&self) -> Result<Vec<f32>, GeometryError> {
        let mut normals = Vec::with_capacity(3 * self.triangles.len());

        for (n, tri) in self.triangles.iter().enumerate() {
            let p1 = self.points[tri[0] as usize];
            let p2 = self.points[tri[1] as usize];
            let p3 = self.points[tri[2] as usize];

            let v1: Vec3 = p2 - p1;
            let v2: Vec3 = p3 - p2;
            let cross = v1.cross(&v2);

            if cross.magnitude_squared() < DEGENERATE_EPSILON {
                return Err(GeometryError::DegenerateTriangle(n));
            }

            let normal = cross.normalize();
            normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
        }

        Ok(normals)
    }

    /// Planar UVs per triangle vertex, packed as 6 floats per triangle
    ///
    /// Each vertex is projected onto the XY plane and normalized against the
    /// mesh bounding box: `uv = (vertex.xy - min.xy) / (max.xy - min.xy)`.
    pub fn planar_uvs(&self) -> Result<Vec<f32>, GeometryError> {
        let bounds = self.local_bounds();
        let offset = Vec2::new(-bounds.min.x, -bounds.min.y);
        let range = Vec2::new(bounds.max.x - bounds.min.x, bounds.max.y - bounds.min.y);

        if range.x.abs() < f32::EPSILON {
            return Err(GeometryError::FlatProjection('X'));
        }
        if range.y.abs() < f32::EPSILON {
            return Err(GeometryError::FlatProjection('Y'));
        }

        let mut uvs = Vec::with_capacity(6 * self.triangles.len());

        for tri in &self.triangles {
            for &index in tri {
                let p = self.points[index as usize];
                uvs.push((p.x + offset.x) / range.x);
                uvs.push((p.y + offset.y) / range.y);
            }
        }

        Ok(uvs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Unit right triangle in the XY plane plus one lifted copy
    fn quad_soup() -> (Vec<f32>, Vec<u32>) {
        let vertices = vec![
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0, //
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];
        (vertices, indices)
    }

    #[test]
    fn test_grouping_counts() {
        let (vertices, indices) = quad_soup();
        let mesh = TriangleMesh::new(&vertices, &indices).unwrap();

        assert_eq!(mesh.points().len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_ragged_arrays_are_rejected() {
        assert!(matches!(
            TriangleMesh::new(&[0.0, 1.0], &[]),
            Err(GeometryError::RaggedVertices(2))
        ));
        assert!(matches!(
            TriangleMesh::new(&[0.0, 1.0, 2.0], &[0, 0]),
            Err(GeometryError::RaggedIndices(2))
        ));
        assert!(matches!(
            TriangleMesh::new(&[], &[]),
            Err(GeometryError::EmptyMesh)
        ));
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let err = TriangleMesh::new(&[0.0, 0.0, 0.0], &[0, 0, 7]).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::IndexOutOfRange {
                triangle: 0,
                index: 7,
                count: 1
            }
        ));
    }

    #[test]
    fn test_normals_are_unit_length_and_packed() {
        let (vertices, indices) = quad_soup();
        let mesh = TriangleMesh::new(&vertices, &indices).unwrap();
        let normals = mesh.face_normals().unwrap();

        assert_eq!(normals.len(), 3 * mesh.triangle_count());

        for n in normals.chunks_exact(3) {
            let magnitude = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert_relative_eq!(magnitude, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_ccw_triangle_in_xy_plane_points_toward_positive_z() {
        let vertices = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mesh = TriangleMesh::new(&vertices, &[0, 1, 2]).unwrap();
        let normals = mesh.face_normals().unwrap();

        assert_relative_eq!(normals[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(normals[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(normals[2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_triangle_is_an_error() {
        // all three vertices collinear
        let vertices = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        let mesh = TriangleMesh::new(&vertices, &[0, 1, 2]).unwrap();

        assert!(matches!(
            mesh.face_normals(),
            Err(GeometryError::DegenerateTriangle(0))
        ));
    }

    #[test]
    fn test_planar_uvs_normalize_into_unit_square() {
        let (vertices, indices) = quad_soup();
        let mesh = TriangleMesh::new(&vertices, &indices).unwrap();
        let uvs = mesh.planar_uvs().unwrap();

        assert_eq!(uvs.len(), 6 * mesh.triangle_count());
        for &v in &uvs {
            assert!((0.0..=1.0).contains(&v));
        }

        // first triangle vertex sits at the bounding-box min corner
        assert_relative_eq!(uvs[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(uvs[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_flat_mesh_has_no_planar_uvs() {
        // zero extent along Y
        let vertices = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 1.0];
        let mesh = TriangleMesh::new(&vertices, &[0, 1, 2]).unwrap();

        assert!(matches!(
            mesh.planar_uvs(),
            Err(GeometryError::FlatProjection('Y'))
        ));
    }
}
