//! Sphere primitive: quadratic ray intersection, analytic contains-test,
//! radial normal.

use glam::Vec3;

use crate::error::GeometryError;
use super::{Containment, Hit};

#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    pub fn new(radius: f32) -> Result<Self, GeometryError> {
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn intersections(&self, origin: Vec3, direction: Vec3, eps: f32) -> Vec<Hit> {
        // Sphere is centered at the local-frame origin.
        let a = direction.length_squared();
        let b = 2.0 * origin.dot(direction);
        let c = origin.length_squared() - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return Vec::new();
        }
        let sqrt_disc = disc.sqrt();
        let t0 = (-b - sqrt_disc) / (2.0 * a);
        let t1 = (-b + sqrt_disc) / (2.0 * a);
        let mut out = Vec::with_capacity(2);
        for t in [t0, t1] {
            if t > eps {
                out.push(Hit { t, facet: "surface".to_string() });
            }
        }
        out
    }

    pub fn contains(&self, point: Vec3, eps: f32) -> Containment {
        let d = point.length() - self.radius;
        if d.abs() <= eps {
            Containment::OnSurface
        } else if d < 0.0 {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }

    pub fn normal_at(&self, point: Vec3) -> (Vec3, String) {
        (point.normalize_or_zero(), "surface".to_string())
    }
}
