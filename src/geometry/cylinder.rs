//! Finite cylinder primitive, aligned along the local z axis: quadratic
//! roots on the curved surface plus two end-cap disk tests.

use glam::Vec3;

use crate::error::GeometryError;
use super::{Containment, Hit};

#[derive(Debug, Clone, Copy)]
pub struct Cylinder {
    pub radius: f32,
    pub half_length: f32,
}

impl Cylinder {
    pub fn new(radius: f32, length: f32) -> Result<Self, GeometryError> {
        if radius <= 0.0 || length <= 0.0 {
            return Err(GeometryError::NonPositiveCylinder(radius, length));
        }
        Ok(Self { radius, half_length: length * 0.5 })
    }

    pub fn intersections(&self, origin: Vec3, direction: Vec3, eps: f32) -> Vec<Hit> {
        let mut out = Vec::with_capacity(4);

        // Curved surface: quadratic in (x, y) only.
        let a = direction.x * direction.x + direction.y * direction.y;
        let b = 2.0 * (origin.x * direction.x + origin.y * direction.y);
        let c = origin.x * origin.x + origin.y * origin.y - self.radius * self.radius;
        if a.abs() > 1.0e-12 {
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sqrt_disc = disc.sqrt();
                for t in [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)] {
                    if t > eps {
                        let z = origin.z + direction.z * t;
                        if z.abs() <= self.half_length {
                            out.push(Hit { t, facet: "side".to_string() });
                        }
                    }
                }
            }
        }

        // End caps: plane z = +/- half_length, clipped to the disk radius.
        if direction.z.abs() > 1.0e-12 {
            for (z_plane, facet) in [(self.half_length, "+z"), (-self.half_length, "-z")] {
                let t = (z_plane - origin.z) / direction.z;
                if t > eps {
                    let p = origin + direction * t;
                    if p.x * p.x + p.y * p.y <= self.radius * self.radius {
                        out.push(Hit { t, facet: facet.to_string() });
                    }
                }
            }
        }

        out.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
        out
    }

    pub fn contains(&self, point: Vec3, eps: f32) -> Containment {
        let radial = (point.x * point.x + point.y * point.y).sqrt();
        let radial_outside = radial > self.radius + eps;
        let axial_outside = point.z.abs() > self.half_length + eps;
        if radial_outside || axial_outside {
            return Containment::Outside;
        }
        let on_radial_surface = (radial - self.radius).abs() <= eps;
        let on_axial_surface = (point.z.abs() - self.half_length).abs() <= eps;
        if on_radial_surface || on_axial_surface {
            Containment::OnSurface
        } else {
            Containment::Inside
        }
    }

    pub fn normal_at(&self, point: Vec3) -> (Vec3, String) {
        let radial = (point.x * point.x + point.y * point.y).sqrt();
        let radial_dist = (radial - self.radius).abs();
        let cap_dist = (point.z.abs() - self.half_length).abs();
        if radial_dist <= cap_dist {
            let normal = Vec3::new(point.x, point.y, 0.0).normalize_or_zero();
            (normal, "side".to_string())
        } else if point.z > 0.0 {
            (Vec3::Z, "+z".to_string())
        } else {
            (Vec3::NEG_Z, "-z".to_string())
        }
    }
}
