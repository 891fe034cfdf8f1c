//! Geometry primitives.
//!
//! The primitive set is closed and fixed, so a tagged variant enum is a
//! better fit than a virtual-dispatch hierarchy here; components and
//! delegates stay open-ended `trait`s elsewhere in the crate, but
//! `Geometry` is this enum.

mod cylinder;
mod cuboid;
mod mesh;
mod sphere;

pub use cylinder::Cylinder;
pub use cuboid::Cuboid;
pub use mesh::Mesh;
pub use sphere::Sphere;

use glam::Vec3;

/// Result of a contains-test against a geometry's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    OnSurface,
    Outside,
}

/// One ordered intersection root, tagged with the facet it struck.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub facet: String,
}

/// A closed surface: sphere, axis-aligned box, finite cylinder, or triangle
/// mesh. All queries are against a ray/point already transformed into this
/// geometry's local frame.
#[derive(Debug, Clone)]
pub enum Geometry {
    Sphere(Sphere),
    Cuboid(Cuboid),
    Cylinder(Cylinder),
    Mesh(Mesh),
}

impl Geometry {
    /// Ordered positive t-roots at which `ray` crosses this surface, in the
    /// geometry's local frame. Roots within `eps` of the ray origin are
    /// dropped, so a ray that just left a surface does not immediately
    /// re-intersect it.
    pub fn intersections(&self, origin: Vec3, direction: Vec3, eps: f32) -> Vec<Hit> {
        match self {
            Geometry::Sphere(s) => s.intersections(origin, direction, eps),
            Geometry::Cuboid(b) => b.intersections(origin, direction, eps),
            Geometry::Cylinder(c) => c.intersections(origin, direction, eps),
            Geometry::Mesh(m) => m.intersections(origin, direction, eps),
        }
    }

    pub fn contains(&self, point: Vec3, eps: f32) -> Containment {
        match self {
            Geometry::Sphere(s) => s.contains(point, eps),
            Geometry::Cuboid(b) => b.contains(point, eps),
            Geometry::Cylinder(c) => c.contains(point, eps),
            Geometry::Mesh(m) => m.contains(point, eps),
        }
    }

    /// Outward unit normal at a point known to be on (or very near) the
    /// surface, and the facet it belongs to.
    pub fn normal_at(&self, point: Vec3) -> (Vec3, String) {
        match self {
            Geometry::Sphere(s) => s.normal_at(point),
            Geometry::Cuboid(b) => b.normal_at(point),
            Geometry::Cylinder(c) => c.normal_at(point),
            Geometry::Mesh(m) => m.normal_at(point),
        }
    }

    /// A local-space axis-aligned bounding box, used only to sanity-check
    /// the "root strictly contains everyone" invariant at scene-construction
    /// time. Not used by intersection/contains queries themselves.
    pub fn local_bounds(&self) -> (Vec3, Vec3) {
        match self {
            Geometry::Sphere(s) => (Vec3::splat(-s.radius), Vec3::splat(s.radius)),
            Geometry::Cuboid(b) => (-b.half_extent, b.half_extent),
            Geometry::Cylinder(c) => (
                Vec3::new(-c.radius, -c.radius, -c.half_length),
                Vec3::new(c.radius, c.radius, c.half_length),
            ),
            Geometry::Mesh(m) => m.local_bounds(),
        }
    }
}
