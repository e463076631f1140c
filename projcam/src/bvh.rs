//! Triangle BVH for occlusion queries
//!
//! Built once per bake invocation over the world-space triangles of every
//! mesh taking part, then shared read-only across all texel workers. Median
//! split on the longest centroid axis; any-hit traversal only, since the
//! baker just needs "is something in the way", not the nearest hit.

use glam::Vec3;
use log::debug;

use crate::mesh::{Aabb, BakeMesh};

const LEAF_SIZE: usize = 4;

/// World-space triangle, expanded for intersection tests
#[derive(Debug, Clone, Copy)]
struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
}

impl Triangle {
    fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    fn aabb(&self) -> Aabb {
        let mut aabb = Aabb::new();
        aabb.union_point(self.v0);
        aabb.union_point(self.v1);
        aabb.union_point(self.v2);
        aabb
    }
}

#[derive(Debug, Clone)]
struct Node {
    aabb: Aabb,
    /// Index of the left child; right child is `left + 1`. Leaves store the
    /// triangle range instead.
    left: u32,
    first_tri: u32,
    tri_count: u32,
}

/// Bounding volume hierarchy over mesh triangles
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<Node>,
    triangles: Vec<Triangle>,
}

impl Bvh {
    /// Build over the world-space triangles of the given meshes
    pub fn build(meshes: &[&BakeMesh]) -> Self {
        let mut triangles = Vec::new();
        for mesh in meshes {
            let positions = mesh.world_positions();
            for tri in mesh.indices.chunks_exact(3) {
                triangles.push(Triangle {
                    v0: positions[tri[0] as usize],
                    v1: positions[tri[1] as usize],
                    v2: positions[tri[2] as usize],
                });
            }
        }

        let mut bvh = Self {
            nodes: Vec::new(),
            triangles,
        };
        if !bvh.triangles.is_empty() {
            let count = bvh.triangles.len() as u32;
            bvh.nodes.push(Node {
                aabb: Aabb::new(),
                left: 0,
                first_tri: 0,
                tri_count: count,
            });
            bvh.split(0);
        }
        debug!(
            "bvh: {} triangles in {} nodes",
            bvh.triangles.len(),
            bvh.nodes.len()
        );
        bvh
    }

    /// Whether the hierarchy holds any geometry
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    fn split(&mut self, node_idx: usize) {
        let (first, count) = {
            let node = &self.nodes[node_idx];
            (node.first_tri as usize, node.tri_count as usize)
        };

        let mut aabb = Aabb::new();
        for tri in &self.triangles[first..first + count] {
            aabb.union(&tri.aabb());
        }
        self.nodes[node_idx].aabb = aabb;

        if count <= LEAF_SIZE {
            return;
        }

        // Median split on the longest centroid axis
        let mut centroid_bounds = Aabb::new();
        for tri in &self.triangles[first..first + count] {
            centroid_bounds.union_point(tri.centroid());
        }
        let extents = centroid_bounds.extents();
        let axis = if extents.x >= extents.y && extents.x >= extents.z {
            0
        } else if extents.y >= extents.z {
            1
        } else {
            2
        };
        if extents[axis] < 1e-8 {
            // All centroids coincide; keep as a leaf
            return;
        }

        let range = &mut self.triangles[first..first + count];
        range.sort_by(|a, b| a.centroid()[axis].total_cmp(&b.centroid()[axis]));
        let mid = count / 2;

        let left_idx = self.nodes.len() as u32;
        self.nodes.push(Node {
            aabb: Aabb::new(),
            left: 0,
            first_tri: first as u32,
            tri_count: mid as u32,
        });
        self.nodes.push(Node {
            aabb: Aabb::new(),
            left: 0,
            first_tri: (first + mid) as u32,
            tri_count: (count - mid) as u32,
        });
        let node = &mut self.nodes[node_idx];
        node.left = left_idx;
        node.tri_count = 0;

        self.split(left_idx as usize);
        self.split(left_idx as usize + 1);
    }

    /// Any-hit query: does any triangle intersect the ray strictly between
    /// `t_min` and `t_max`?
    pub fn occluded(&self, origin: Vec3, dir: Vec3, t_min: f32, t_max: f32) -> bool {
        if self.triangles.is_empty() || t_max <= t_min {
            return false;
        }
        let inv_dir = dir.recip();

        let mut stack = [0u32; 64];
        let mut top = 0usize;
        stack[top] = 0;
        top += 1;

        while top > 0 {
            top -= 1;
            let node = &self.nodes[stack[top] as usize];
            if !ray_aabb_hit(origin, inv_dir, &node.aabb, t_max) {
                continue;
            }
            if node.tri_count > 0 {
                let first = node.first_tri as usize;
                for tri in &self.triangles[first..first + node.tri_count as usize] {
                    if let Some(t) = ray_triangle_intersect(origin, dir, tri) {
                        if t > t_min && t < t_max {
                            return true;
                        }
                    }
                }
            } else {
                stack[top] = node.left;
                stack[top + 1] = node.left + 1;
                top += 2;
            }
        }
        false
    }
}

/// Slab test against an AABB, `inv_dir` precomputed
fn ray_aabb_hit(origin: Vec3, inv_dir: Vec3, aabb: &Aabb, t_max: f32) -> bool {
    let t0 = (aabb.min - origin) * inv_dir;
    let t1 = (aabb.max - origin) * inv_dir;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    t_near <= t_far && t_far >= 0.0 && t_near <= t_max
}

/// Möller–Trumbore ray-triangle intersection, returning the hit distance
fn ray_triangle_intersect(origin: Vec3, dir: Vec3, tri: &Triangle) -> Option<f32> {
    let edge1 = tri.v1 - tri.v0;
    let edge2 = tri.v2 - tri.v0;
    let h = dir.cross(edge2);
    let a = edge1.dot(h);

    if a.abs() < 1e-7 {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - tri.v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > 0.0).then_some(t)
}
