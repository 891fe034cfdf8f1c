//! Position delegates: sample a base emission point in the node's local
//! xy-plane.

use glam::Vec3;
use rand::{Rng, RngCore};

use crate::rng::DynRng;

pub trait PositionDelegate: Send + Sync {
    fn sample(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// A single emission point at the node's local origin (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct Point;

impl PositionDelegate for Point {
    fn sample(&self, _rng: &mut dyn RngCore) -> Vec3 {
        Vec3::ZERO
    }
}

/// A uniform rectangular mask of size `a` x `b`, centred on the origin.
#[derive(Debug, Clone, Copy)]
pub struct Square {
    pub a: f32,
    pub b: f32,
}

impl PositionDelegate for Square {
    fn sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let mut rng = DynRng(rng);
        let x = (rng.gen::<f32>() - 0.5) * self.a;
        let y = (rng.gen::<f32>() - 0.5) * self.b;
        Vec3::new(x, y, 0.0)
    }
}

/// A uniform circular mask of radius `r`, centred on the origin.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub radius: f32,
}

impl PositionDelegate for Circle {
    fn sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let mut rng = DynRng(rng);
        let r = self.radius * rng.gen::<f32>().sqrt();
        let theta = 2.0 * std::f32::consts::PI * rng.gen::<f32>();
        Vec3::new(r * theta.cos(), r * theta.sin(), 0.0)
    }
}
