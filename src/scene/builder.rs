//! Scene construction. The tree is mutated only during this phase; once
//! built, a `Scene` is immutable.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::geometry::Geometry;
use crate::light::LightSource;
use crate::material::Material;

use super::node::{Node, NodeId};
use super::transform::Transform;
use super::Scene;

pub struct SceneBuilder {
    nodes: Vec<Node>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds the root ("world") node. Must be called exactly once, before any
    /// other node is added.
    pub fn add_root(&mut self, name: impl Into<Arc<str>>, geometry: Geometry, material: Arc<Material>) -> Result<NodeId, ConfigError> {
        if !self.nodes.is_empty() {
            return Err(ConfigError::AmbiguousRoot);
        }
        let mut node = Node::new(name, Transform::identity());
        node.geometry = Some(geometry);
        node.material = Some(material);
        self.nodes.push(node);
        Ok(NodeId(0))
    }

    /// Adds a child node under `parent`.
    pub fn add_node(&mut self, name: impl Into<Arc<str>>, transform: Transform, parent: NodeId) -> Result<NodeId, ConfigError> {
        let name: Arc<str> = name.into();
        if parent.0 >= self.nodes.len() {
            return Err(ConfigError::UnknownParent(name.to_string(), format!("#{}", parent.0)));
        }
        if self.nodes.iter().any(|n| n.name == name) {
            return Err(ConfigError::DuplicateName(name.to_string(), name.to_string()));
        }
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(name, transform);
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn set_geometry(&mut self, id: NodeId, geometry: Geometry) {
        self.nodes[id.0].geometry = Some(geometry);
    }

    pub fn set_material(&mut self, id: NodeId, material: Arc<Material>) {
        self.nodes[id.0].material = Some(material);
    }

    pub fn set_light(&mut self, id: NodeId, light: Arc<LightSource>) {
        self.nodes[id.0].light = Some(light);
    }

    /// Overrides the default Fresnel surface delegate for this node's
    /// boundary with a custom coating.
    pub fn set_surface(&mut self, id: NodeId, surface: Arc<dyn crate::surface::SurfaceDelegate>) {
        self.nodes[id.0].surface = Some(surface);
    }

    pub fn build(self) -> Result<Scene, ConfigError> {
        if self.nodes.is_empty() {
            return Err(ConfigError::MissingRoot);
        }
        let root = NodeId(0);

        // Acyclicity: every node must reach the root in a bounded number of
        // hops.
        for (index, node) in self.nodes.iter().enumerate() {
            let mut visited = HashSet::new();
            let mut current = node.parent;
            while let Some(parent) = current {
                if !visited.insert(parent) {
                    return Err(ConfigError::ParentCycle(self.nodes[index].name.to_string()));
                }
                current = self.nodes[parent.0].parent;
            }
        }

        let world_transforms = compute_world_transforms(&self.nodes, root);

        let world_root_geometry = self.nodes[root.0]
            .geometry
            .as_ref()
            .expect("root always carries geometry (required by add_root)");
        for (index, node) in self.nodes.iter().enumerate() {
            if index == 0 {
                continue;
            }
            if let Some(geometry) = &node.geometry {
                let world_transform = world_transforms[index];
                let (local_min, local_max) = geometry.local_bounds();
                let corners = aabb_corners(local_min, local_max);
                for corner in corners {
                    let world_point = world_transform.transform_point(corner);
                    let root_local_point = world_transforms[root.0].inverse().transform_point(world_point);
                    if world_root_geometry.contains(root_local_point, 1.0e-4) == crate::geometry::Containment::Outside {
                        return Err(ConfigError::WorldTooSmall(node.name.to_string()));
                    }
                }
            }
        }

        log::debug!("scene built: {} nodes under root `{}`", self.nodes.len(), self.nodes[root.0].name);
        Ok(Scene {
            nodes: self.nodes,
            root,
            world_transforms,
        })
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn aabb_corners(min: glam::Vec3, max: glam::Vec3) -> [glam::Vec3; 8] {
    [
        glam::Vec3::new(min.x, min.y, min.z),
        glam::Vec3::new(min.x, min.y, max.z),
        glam::Vec3::new(min.x, max.y, min.z),
        glam::Vec3::new(min.x, max.y, max.z),
        glam::Vec3::new(max.x, min.y, min.z),
        glam::Vec3::new(max.x, min.y, max.z),
        glam::Vec3::new(max.x, max.y, min.z),
        glam::Vec3::new(max.x, max.y, max.z),
    ]
}

fn compute_world_transforms(nodes: &[Node], root: NodeId) -> Vec<Transform> {
    let mut world = vec![Transform::identity(); nodes.len()];
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let parent_world = match nodes[id.0].parent {
            Some(parent) => world[parent.0],
            None => Transform::identity(),
        };
        world[id.0] = parent_world.then(nodes[id.0].local_transform);
        for &child in &nodes[id.0].children {
            stack.push(child);
        }
    }
    world
}
