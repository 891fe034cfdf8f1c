//! Direction delegates: sample a base emission direction in the node's
//! local +z frame.

use glam::Vec3;
use rand::RngCore;

use crate::rng::{cosine_sample_hemisphere, DynRng};

pub trait DirectionDelegate: Send + Sync {
    fn sample(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// Every ray travels exactly along +z (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct Collimated;

impl DirectionDelegate for Collimated {
    fn sample(&self, _rng: &mut dyn RngCore) -> Vec3 {
        Vec3::Z
    }
}

/// Uniform divergence from +z up to `half_angle_rad`.
#[derive(Debug, Clone, Copy)]
pub struct Cone {
    pub half_angle_rad: f32,
}

impl DirectionDelegate for Cone {
    fn sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        use rand::Rng;
        let mut rng = DynRng(rng);
        let cos_max = self.half_angle_rad.cos();
        let r1: f32 = rng.gen();
        let cos_theta = 1.0 - r1 * (1.0 - cos_max);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = 2.0 * std::f32::consts::PI * rng.gen::<f32>();
        Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
    }
}

/// Cosine-weighted (Lambertian) divergence from +z.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lambertian;

impl DirectionDelegate for Lambertian {
    fn sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let mut rng = DynRng(rng);
        cosine_sample_hemisphere(&mut rng, Vec3::Z)
    }
}
