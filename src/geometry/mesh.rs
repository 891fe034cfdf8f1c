//! Closed triangle mesh primitive.
//!
//! Intersection and the BVH build are adapted from the GPU path tracer's
//! `src/bvh.rs` (midpoint split on the longest axis, indirect-index arrays)
//! and `kernels/compute/src/intersection.rs` (Möller–Trumbore, explicit-stack
//! traversal), generalized to collect every positive root along a ray rather
//! than only the nearest one, since the intersection service needs the full
//! ordered list. Precision is single-precision `f32` throughout, a known
//! limitation for scenes mixing small features with large extent.

use glam::Vec3;
use std::collections::HashMap;

use crate::error::GeometryError;
use super::{Containment, Hit};

#[derive(Debug, Clone, Copy, Default)]
struct BvhNode {
    aabb_min: Vec3,
    aabb_max: Vec3,
    left_or_first_triangle: u32,
    triangle_count: u32,
}

impl BvhNode {
    fn is_leaf(&self) -> bool {
        self.triangle_count > 0
    }
}

#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    /// Each triangle is a triple of vertex indices.
    triangles: Vec<[u32; 3]>,
    nodes: Vec<BvhNode>,
    indirect_indices: Vec<u32>,
}

fn triangle_edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self, GeometryError> {
        if triangles.is_empty() {
            return Err(GeometryError::EmptyMesh);
        }

        // Closedness: every edge must be shared by exactly two triangles.
        let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();
        for tri in &triangles {
            for i in 0..3 {
                let a = tri[i];
                let b = tri[(i + 1) % 3];
                *edge_counts.entry(triangle_edge_key(a, b)).or_insert(0) += 1;
            }
        }
        let boundary_edges = edge_counts.values().filter(|&&count| count != 2).count();
        if boundary_edges > 0 {
            return Err(GeometryError::OpenMesh(boundary_edges));
        }

        let (nodes, indirect_indices) = build_bvh(&vertices, &triangles);
        Ok(Self { vertices, triangles, nodes, indirect_indices })
    }

    fn triangle_vertices(&self, tri: [u32; 3]) -> (Vec3, Vec3, Vec3) {
        (
            self.vertices[tri[0] as usize],
            self.vertices[tri[1] as usize],
            self.vertices[tri[2] as usize],
        )
    }

    pub fn intersections(&self, origin: Vec3, direction: Vec3, eps: f32) -> Vec<Hit> {
        let mut out = Vec::new();
        let mut stack = vec![0usize];
        while let Some(node_index) = stack.pop() {
            let node = &self.nodes[node_index];
            if !intersect_aabb(node.aabb_min, node.aabb_max, origin, direction) {
                continue;
            }
            if node.is_leaf() {
                for i in 0..node.triangle_count {
                    let triangle_index = self.indirect_indices[(node.left_or_first_triangle + i) as usize];
                    let tri = self.triangles[triangle_index as usize];
                    let (a, b, c) = self.triangle_vertices(tri);
                    if let Some(t) = moller_trumbore(origin, direction, a, b, c) {
                        if t > eps {
                            out.push(Hit { t, facet: format!("tri{}", triangle_index) });
                        }
                    }
                }
            } else {
                stack.push(node.left_or_first_triangle as usize);
                stack.push(node.left_or_first_triangle as usize + 1);
            }
        }
        out.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
        out
    }

    /// Parity count of surface crossings from `point` along a fixed ray
    /// direction: odd means inside, even means outside.
    pub fn contains(&self, point: Vec3, eps: f32) -> Containment {
        // +z is arbitrary but fixed; odd crossing count => inside.
        let probe_direction = Vec3::new(0.3312, 0.4271, 0.8421).normalize();
        let hits = self.intersections(point, probe_direction, 0.0);
        for hit in &hits {
            if hit.t.abs() <= eps {
                return Containment::OnSurface;
            }
        }
        if hits.len() % 2 == 1 {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }

    pub fn local_bounds(&self) -> (Vec3, Vec3) {
        (self.nodes[0].aabb_min, self.nodes[0].aabb_max)
    }

    pub fn normal_at(&self, point: Vec3) -> (Vec3, String) {
        // Find the triangle nearest to `point` and return its face normal.
        let mut best: Option<(f32, usize, Vec3)> = None;
        for (index, tri) in self.triangles.iter().enumerate() {
            let (a, b, c) = self.triangle_vertices(*tri);
            let normal = (b - a).cross(c - a).normalize_or_zero();
            let centroid = (a + b + c) / 3.0;
            let dist = (point - centroid).length_squared();
            if best.map_or(true, |(best_dist, _, _)| dist < best_dist) {
                best = Some((dist, index, normal));
            }
        }
        match best {
            Some((_, index, normal)) => (normal, format!("tri{}", index)),
            None => (Vec3::ZERO, "surface".to_string()),
        }
    }
}

fn moller_trumbore(ro: Vec3, rd: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let pv = rd.cross(edge2);
    let det = edge1.dot(pv);
    if det.abs() < 1.0e-9 {
        return None;
    }
    let inv_det = 1.0 / det;
    let tv = ro - a;
    let u = tv.dot(pv) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let qv = tv.cross(edge1);
    let v = rd.dot(qv) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(qv) * inv_det;
    Some(t)
}

fn intersect_aabb(aabb_min: Vec3, aabb_max: Vec3, ro: Vec3, rd: Vec3) -> bool {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let inv_d = 1.0 / rd[axis];
        let mut t0 = (aabb_min[axis] - ro[axis]) * inv_d;
        let mut t1 = (aabb_max[axis] - ro[axis]) * inv_d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
    }
    t_max >= t_min && t_max > 0.0
}

fn triangle_bounds(vertices: &[Vec3], tri: [u32; 3]) -> (Vec3, Vec3) {
    let a = vertices[tri[0] as usize];
    let b = vertices[tri[1] as usize];
    let c = vertices[tri[2] as usize];
    (a.min(b).min(c), a.max(b).max(c))
}

fn update_aabb(node: &mut BvhNode, vertices: &[Vec3], triangles: &[[u32; 3]], indirect_indices: &[u32]) {
    node.aabb_min = Vec3::splat(f32::INFINITY);
    node.aabb_max = Vec3::splat(f32::NEG_INFINITY);
    for i in 0..node.triangle_count {
        let triangle_index = indirect_indices[(node.left_or_first_triangle + i) as usize];
        let (min, max) = triangle_bounds(vertices, triangles[triangle_index as usize]);
        node.aabb_min = node.aabb_min.min(min);
        node.aabb_max = node.aabb_max.max(max);
    }
}

/// Builds a binary BVH over `triangles` by repeatedly splitting the longest
/// axis at its midpoint. A surface-area-heuristic split is more effective
/// but this crate's meshes are small enough that it isn't worth the added
/// complexity.
fn build_bvh(vertices: &[Vec3], triangles: &[[u32; 3]]) -> (Vec<BvhNode>, Vec<u32>) {
    let mut indirect_indices: Vec<u32> = (0..triangles.len() as u32).collect();
    let centroids: Vec<Vec3> = triangles
        .iter()
        .map(|tri| {
            let (min, max) = triangle_bounds(vertices, *tri);
            (min + max) * 0.5
        })
        .collect();

    let mut nodes = vec![BvhNode::default(); (triangles.len() * 2).max(1) - 1];
    let mut node_count = 1usize;
    nodes[0].left_or_first_triangle = 0;
    nodes[0].triangle_count = triangles.len() as u32;
    update_aabb(&mut nodes[0], vertices, triangles, &indirect_indices);

    let mut stack = vec![0usize];
    while let Some(node_index) = stack.pop() {
        let (extent, triangle_count, first) = {
            let node = &nodes[node_index];
            (node.aabb_max - node.aabb_min, node.triangle_count, node.left_or_first_triangle)
        };
        if triangle_count <= 2 {
            continue;
        }

        let mut axis = 0usize;
        if extent.y > extent.x {
            axis = 1;
        }
        if extent.z > extent[axis] {
            axis = 2;
        }
        let split = nodes[node_index].aabb_min[axis] + extent[axis] * 0.5;

        let mut a = first;
        let mut b = first + triangle_count - 1;
        while a <= b {
            let centroid = centroids[indirect_indices[a as usize] as usize][axis];
            if centroid < split {
                a += 1;
            } else {
                indirect_indices.swap(a as usize, b as usize);
                if b == 0 {
                    break;
                }
                b -= 1;
            }
        }

        let left_count = a - first;
        if left_count == 0 || left_count == triangle_count {
            continue;
        }

        let left_index = node_count;
        let right_index = node_count + 1;
        node_count += 2;

        nodes[left_index].left_or_first_triangle = first;
        nodes[left_index].triangle_count = left_count;
        nodes[right_index].left_or_first_triangle = a;
        nodes[right_index].triangle_count = triangle_count - left_count;
        update_aabb(&mut nodes[left_index], vertices, triangles, &indirect_indices);
        update_aabb(&mut nodes[right_index], vertices, triangles, &indirect_indices);

        nodes[node_index].left_or_first_triangle = left_index as u32;
        nodes[node_index].triangle_count = 0;

        stack.push(right_index);
        stack.push(left_index);
    }

    nodes.truncate(node_count.max(1));
    (nodes, indirect_indices)
}
