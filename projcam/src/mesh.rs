//! Owned mesh value types for projection baking
//!
//! The bake core never touches a live scene graph. Host integration marshals
//! scene meshes into [`BakeMesh`] (positions, normals, UVs, triangle indices,
//! object-to-world transform) and back. UV seams are represented by split
//! vertices, so UVs are per-vertex and `uvs.len() == positions.len()` for any
//! bake-eligible mesh.

use glam::{Mat4, Vec3};

use crate::error::BakeError;

/// Triangle mesh with per-vertex normals and UVs, in object space plus an
/// object-to-world transform
#[derive(Debug, Clone)]
pub struct BakeMesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Vertex normals (recomputed from faces when empty, see
    /// [`BakeMesh::ensure_normals`])
    pub normals: Vec<Vec3>,
    /// UV coordinates in [0,1]x[0,1] texture space (empty if the mesh has no
    /// UV layer)
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices, three per face
    pub indices: Vec<u32>,
    /// Object-to-world transform
    pub transform: Mat4,
}

impl BakeMesh {
    /// Create an empty mesh with an identity transform
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
            transform: Mat4::IDENTITY,
        }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether every vertex has a UV entry
    pub fn has_uv_layer(&self) -> bool {
        !self.positions.is_empty() && self.uvs.len() == self.positions.len()
    }

    /// Fail with [`BakeError::MissingUvLayer`] unless the UV layer is complete
    pub fn require_uv_layer(&self) -> Result<(), BakeError> {
        if self.has_uv_layer() {
            Ok(())
        } else {
            Err(BakeError::MissingUvLayer {
                uvs: self.uvs.len(),
                vertices: self.positions.len(),
            })
        }
    }

    /// Vertex positions transformed into world space
    pub fn world_positions(&self) -> Vec<Vec3> {
        self.positions
            .iter()
            .map(|&p| self.transform.transform_point3(p))
            .collect()
    }

    /// Vertex normals transformed into world space
    ///
    /// Uses the inverse-transpose so non-uniform scaling keeps normals
    /// perpendicular to the surface. Recomputes from geometry if the mesh
    /// carries no normals.
    pub fn world_normals(&self) -> Vec<Vec3> {
        let normals = if self.normals.len() == self.positions.len() {
            self.normals.clone()
        } else {
            smooth_normals(&self.positions, &self.indices)
        };
        let normal_matrix = self.transform.inverse().transpose();
        normals
            .iter()
            .map(|&n| normal_matrix.transform_vector3(n).normalize_or_zero())
            .collect()
    }

    /// Recompute per-vertex normals from face geometry if missing
    pub fn ensure_normals(&mut self) {
        if self.normals.len() != self.positions.len() {
            self.normals = smooth_normals(&self.positions, &self.indices);
        }
    }

    /// World-space axis-aligned bounds of this mesh
    pub fn world_aabb(&self) -> Aabb {
        let mut aabb = Aabb::new();
        for &p in &self.positions {
            aabb.union_point(self.transform.transform_point3(p));
        }
        aabb
    }
}

impl Default for BakeMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Area-weighted smooth vertex normals
///
/// Cross products are accumulated unnormalized, so large faces dominate
/// shared vertices.
fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut accum = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[i1] - positions[i0]).cross(positions[i2] - positions[i0]);
        accum[i0] += face;
        accum[i1] += face;
        accum[i2] += face;
    }
    accum
        .into_iter()
        .map(|n| n.normalize_or(Vec3::Y))
        .collect()
}

/// Axis-aligned bounding box, initialised inverted so the first
/// [`Aabb::union_point`] defines it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create empty (inverted) bounds
    pub fn new() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Bounds of a point set
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut aabb = Self::new();
        for &p in points {
            aabb.union_point(p);
        }
        aabb
    }

    /// Grow to include a point
    pub fn union_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow to include another box
    pub fn union(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Whether any point has been added
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Size along each axis
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The eight corner points
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new()
    }
}
