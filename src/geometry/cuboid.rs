//! Axis-aligned box primitive: slab-method intersection.
//! Rotation is carried by the enclosing node's transform, not by the box
//! itself, so in local space this is always axis-aligned.

use glam::Vec3;

use crate::error::GeometryError;
use super::{Containment, Hit};

#[derive(Debug, Clone, Copy)]
pub struct Cuboid {
    /// Half-extent along each axis; the box spans [-half, half] locally.
    pub half_extent: Vec3,
}

impl Cuboid {
    pub fn new(size: Vec3) -> Result<Self, GeometryError> {
        if size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
            return Err(GeometryError::NonPositiveExtents([size.x, size.y, size.z]));
        }
        Ok(Self { half_extent: size * 0.5 })
    }

    pub fn intersections(&self, origin: Vec3, direction: Vec3, eps: f32) -> Vec<Hit> {
        let min = -self.half_extent;
        let max = self.half_extent;
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            if d.abs() < 1.0e-12 {
                if o < min[axis] || o > max[axis] {
                    return Vec::new();
                }
                continue;
            }
            let inv_d = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv_d;
            let mut t1 = (max[axis] - o) * inv_d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
        }
        if t_min > t_max {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(2);
        for t in [t_min, t_max] {
            if t > eps {
                let facet = self.facet_at(origin + direction * t);
                out.push(Hit { t, facet });
            }
        }
        out
    }

    pub fn contains(&self, point: Vec3, eps: f32) -> Containment {
        let min = -self.half_extent;
        let max = self.half_extent;
        let outside = point.x < min.x - eps
            || point.y < min.y - eps
            || point.z < min.z - eps
            || point.x > max.x + eps
            || point.y > max.y + eps
            || point.z > max.z + eps;
        if outside {
            return Containment::Outside;
        }
        let on_surface = (point.x - min.x).abs() <= eps
            || (point.y - min.y).abs() <= eps
            || (point.z - min.z).abs() <= eps
            || (point.x - max.x).abs() <= eps
            || (point.y - max.y).abs() <= eps
            || (point.z - max.z).abs() <= eps;
        if on_surface {
            Containment::OnSurface
        } else {
            Containment::Inside
        }
    }

    fn facet_at(&self, point: Vec3) -> String {
        let half = self.half_extent;
        let distances = [
            ((point.x - (-half.x)).abs(), "-x"),
            ((point.x - half.x).abs(), "+x"),
            ((point.y - (-half.y)).abs(), "-y"),
            ((point.y - half.y).abs(), "+y"),
            ((point.z - (-half.z)).abs(), "-z"),
            ((point.z - half.z).abs(), "+z"),
        ];
        distances
            .iter()
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| "surface".to_string())
    }

    pub fn normal_at(&self, point: Vec3) -> (Vec3, String) {
        let facet = self.facet_at(point);
        let normal = match facet.as_str() {
            "-x" => Vec3::NEG_X,
            "+x" => Vec3::X,
            "-y" => Vec3::NEG_Y,
            "+y" => Vec3::Y,
            "-z" => Vec3::NEG_Z,
            "+z" => Vec3::Z,
            _ => Vec3::ZERO,
        };
        (normal, facet)
    }
}
