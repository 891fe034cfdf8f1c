//! Scene graph node.

use std::sync::Arc;

use crate::geometry::Geometry;
use crate::light::LightSource;
use crate::material::Material;
use crate::scene::transform::Transform;
use crate::surface::SurfaceDelegate;

/// Index into the scene's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Clone)]
pub struct Node {
    pub name: Arc<str>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub local_transform: Transform,
    pub geometry: Option<Geometry>,
    pub material: Option<Arc<Material>>,
    pub light: Option<Arc<LightSource>>,
    /// Overrides the default [`crate::surface::Fresnel`] delegate for this
    /// node's boundary, e.g. a wavelength/angle-dependent reflectance table
    /// or an absorbing coating. `None` means "use `Fresnel`".
    pub surface: Option<Arc<dyn SurfaceDelegate>>,
}

impl Node {
    pub fn new(name: impl Into<Arc<str>>, local_transform: Transform) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            local_transform,
            geometry: None,
            material: None,
            light: None,
            surface: None,
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("has_geometry", &self.geometry.is_some())
            .field("has_material", &self.material.is_some())
            .field("has_light", &self.light.is_some())
            .field("has_surface_override", &self.surface.is_some())
            .finish()
    }
}
