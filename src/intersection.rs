//! Intersection service: aggregates every node's local intersections into a
//! single globally-ordered list, and resolves which node contains a point.

use glam::Vec3;

use crate::error::NumericalDegeneracy;
use crate::geometry::Containment;
use crate::scene::{NodeId, Scene};

/// One ordered boundary crossing along a world-space ray, tagged with the
/// node it belongs to and how deeply that node is nested.
#[derive(Debug, Clone)]
pub struct SurfaceHit {
    pub t: f32,
    pub node: NodeId,
    pub facet: String,
    pub depth: usize,
}

/// Walks every node carrying geometry, transforms `(origin, direction)` into
/// each node's local frame, and returns every positive-t crossing globally
/// ordered by `t` ascending.
///
/// Ties within `eps` are broken by nesting depth ascending (the outer
/// surface first), then by node name, giving a total order independent of
/// node declaration order.
pub fn intersect(scene: &Scene, origin: Vec3, direction: Vec3, eps: f32) -> Vec<SurfaceHit> {
    let mut hits = Vec::new();
    for (id, node) in scene.nodes() {
        let Some(geometry) = &node.geometry else { continue };
        let world = scene.world_transform(id);
        let local = world.inverse();
        let local_origin = local.transform_point(origin);
        let local_direction = local.transform_direction(direction);
        let depth = scene.depth(id);
        for hit in geometry.intersections(local_origin, local_direction, eps) {
            hits.push(SurfaceHit { t: hit.t, node: id, facet: hit.facet, depth });
        }
    }
    // Bucket by t/eps first so any two hits within eps of each other land in
    // the same bucket and fall through to the depth/name tie-break, rather
    // than only ties that are bit-identical in t (then_with only fires when
    // the primary comparison is already Equal, which float ties essentially
    // never are).
    hits.sort_by(|a, b| {
        let bucket_a = (a.t / eps).round();
        let bucket_b = (b.t / eps).round();
        bucket_a
            .partial_cmp(&bucket_b)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.depth.cmp(&b.depth))
            .then_with(|| scene.node(a.node).name.cmp(&scene.node(b.node).name))
    });
    hits
}

/// Finds the deepest node whose geometry strictly contains `point` in world
/// space, walking depth-first from `scene.root()`.
pub fn resolve_container(scene: &Scene, point: Vec3, eps: f32) -> Result<NodeId, NumericalDegeneracy> {
    let mut deepest: Option<(NodeId, usize)> = None;
    for id in scene.walk(scene.root()) {
        let node = scene.node(id);
        let Some(geometry) = &node.geometry else { continue };
        let local = scene.world_transform(id).inverse();
        let local_point = local.transform_point(point);
        if geometry.contains(local_point, eps) == Containment::Inside {
            let depth = scene.depth(id);
            if deepest.map(|(_, d)| depth > d).unwrap_or(true) {
                deepest = Some((id, depth));
            }
        }
    }
    deepest.map(|(id, _)| id).ok_or(NumericalDegeneracy::NoContainer)
}
