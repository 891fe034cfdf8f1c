//! Phase functions for volume scattering/re-emission. Isotropic by default,
//! but implementers can plug in any distribution behind the same trait.

use glam::Vec3;
use rand::RngCore;

use crate::rng::{create_cartesian, uniform_sample_sphere, DynRng};

pub trait PhaseFunction: Send + Sync {
    /// Samples an outgoing direction given the incoming direction.
    fn sample(&self, incoming: Vec3, rng: &mut dyn RngCore) -> Vec3;

    /// Probability density of scattering from `incoming` to `outgoing`.
    fn pdf(&self, incoming: Vec3, outgoing: Vec3) -> f32;
}

/// Uniform scattering in all directions, independent of the incoming
/// direction. The default phase function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Isotropic;

impl PhaseFunction for Isotropic {
    fn sample(&self, _incoming: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let mut rand_rng = DynRng(rng);
        uniform_sample_sphere(&mut rand_rng)
    }

    fn pdf(&self, _incoming: Vec3, _outgoing: Vec3) -> f32 {
        1.0 / (4.0 * std::f32::consts::PI)
    }
}

/// The Henyey-Greenstein phase function, parameterized by asymmetry `g`
/// (g=0 is isotropic, g>0 forward-scattering, g<0 back-scattering).
#[derive(Debug, Clone, Copy)]
pub struct HenyeyGreenstein {
    pub g: f32,
}

impl PhaseFunction for HenyeyGreenstein {
    fn sample(&self, incoming: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let mut rand_rng = DynRng(rng);
        use rand::Rng;
        let r1: f32 = rand_rng.gen();
        let r2: f32 = rand_rng.gen();

        let cos_theta = if self.g.abs() < 1.0e-3 {
            1.0 - 2.0 * r1
        } else {
            let g = self.g;
            let sq = (1.0 - g * g) / (1.0 + g - 2.0 * g * r1);
            -(1.0 + g * g - sq * sq) / (2.0 * g)
        };
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = 2.0 * std::f32::consts::PI * r2;

        // Henyey-Greenstein scatters relative to the *forward* continuation
        // of the incoming ray.
        let forward = incoming.normalize();
        let (up, tangent, bitangent) = create_cartesian(forward);
        let local = Vec3::new(sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin());
        (local.x * bitangent + local.y * up + local.z * tangent).normalize()
    }

    fn pdf(&self, incoming: Vec3, outgoing: Vec3) -> f32 {
        let g = self.g;
        let cos_theta = incoming.normalize().dot(outgoing.normalize());
        let denom = (1.0 + g * g - 2.0 * g * cos_theta).max(1.0e-6).powf(1.5);
        (1.0 - g * g) / (4.0 * std::f32::consts::PI * denom)
    }
}
