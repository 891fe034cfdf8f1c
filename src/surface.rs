//! Surface interaction at a boundary between two media.

use glam::Vec3;
use rand::RngCore;

use crate::rng::{uniform_open_below, DynRng};

/// What happens to a ray at a boundary, decided by a [`SurfaceDelegate`].
#[derive(Debug, Clone, Copy)]
pub enum SurfaceOutcome {
    Reflect(Vec3),
    Refract(Vec3),
    /// An absorbing coating terminates the ray at the surface; custom
    /// delegates may override the default Fresnel behavior with this.
    Absorb,
}

/// Decides how a ray behaves at a boundary given the two media's refractive
/// indices, the surface normal, and the incident direction.
pub trait SurfaceDelegate: Send + Sync {
    fn interact(&self, incident: Vec3, normal: Vec3, n1: f32, n2: f32, rng: &mut dyn RngCore) -> SurfaceOutcome;
}

/// The default, exact (non-Schlick) unpolarised Fresnel reflectance model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fresnel;

impl SurfaceDelegate for Fresnel {
    fn interact(&self, incident: Vec3, normal: Vec3, n1: f32, n2: f32, rng: &mut dyn RngCore) -> SurfaceOutcome {
        let d = incident.normalize();
        let mut n = normal.normalize();
        let mut cos_i = -d.dot(n);
        if cos_i <= 0.0 {
            n = -n;
            cos_i = -d.dot(n);
        }

        let eta = n1 / n2;
        let sin_t_sq = eta * eta * (1.0 - cos_i * cos_i).max(0.0);
        if sin_t_sq > 1.0 {
            // Total internal reflection.
            return SurfaceOutcome::Reflect(d + 2.0 * cos_i * n);
        }
        let cos_t = (1.0 - sin_t_sq).max(0.0).sqrt();

        let r_s = ((n1 * cos_i - n2 * cos_t) / (n1 * cos_i + n2 * cos_t)).powi(2);
        let r_p = ((n1 * cos_t - n2 * cos_i) / (n1 * cos_t + n2 * cos_i)).powi(2);
        let reflectance = 0.5 * (r_s + r_p);

        let xi = uniform_open_below(&mut DynRng(rng));
        if xi < reflectance {
            SurfaceOutcome::Reflect(d + 2.0 * cos_i * n)
        } else {
            let refracted = eta * d + (eta * cos_i - cos_t) * n;
            SurfaceOutcome::Refract(refracted)
        }
    }
}
