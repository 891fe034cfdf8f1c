//! Per-worker RNG and sampling routines.
//!
//! Each worker owns a seedable RNG; sampling routines take it explicitly
//! rather than reaching for a global, so a batch stays reproducible across
//! runs. The direction-sampling helpers (`cosine_sample_hemisphere`,
//! `uniform_sample_sphere`) are adapted from `kernels/src/util.rs` in the
//! GPU path tracer this crate grew out of, ported from the SPIR-V-targeted
//! `spirv_std::glam` API onto plain `glam` with `rand_distr` driving the
//! uniform draws instead of the low-discrepancy sequence used there for
//! per-pixel antialiasing (there are no pixels to decorrelate against here,
//! so a seeded PRNG is the more direct fit for reproducibility under a
//! fixed seed).

use glam::Vec3;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp1};

/// Adapter letting the `rand::Rng` convenience methods, and the sampling
/// helpers in this module, work over a `&mut dyn RngCore` trait object.
///
/// Object-safe traits like [`crate::material::Component`] and
/// [`crate::material::PhaseFunction`] must take `&mut dyn RngCore` in their
/// signatures rather than a generic `impl Rng`; this wraps that reference in
/// a concrete `Sized` type so it can still be passed to `impl Rng`-bound
/// functions.
pub struct DynRng<'a>(pub &'a mut dyn RngCore);

impl<'a> RngCore for DynRng<'a> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

/// Builds one per-worker RNG, deterministically derived from a master seed
/// and worker index, so a given (seed, worker count) pair always produces
/// the same batch.
pub fn worker_rng(master_seed: u64, worker_index: u32) -> ChaCha8Rng {
    // splitmix-style mix so adjacent worker indices don't produce
    // correlated low bits in the seed.
    let mut seed = master_seed ^ (worker_index as u64).wrapping_mul(0x9E3779B97F4A7C15);
    seed ^= seed >> 33;
    seed = seed.wrapping_mul(0xff51afd7ed558ccd);
    seed ^= seed >> 33;
    ChaCha8Rng::seed_from_u64(seed)
}

/// Samples a uniform direction on the unit sphere, used for isotropic
/// re-emission.
pub fn uniform_sample_sphere(rng: &mut impl Rng) -> Vec3 {
    let r1: f32 = rng.gen();
    let r2: f32 = rng.gen();
    let cos_phi = 2.0 * r1 - 1.0;
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
    let theta = 2.0 * std::f32::consts::PI * r2;
    Vec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}

/// Samples a cosine-weighted direction on the hemisphere around `up`.
pub fn cosine_sample_hemisphere(rng: &mut impl Rng, up: Vec3) -> Vec3 {
    let r1: f32 = rng.gen();
    let r2: f32 = rng.gen();
    let theta = r1.sqrt().acos();
    let phi = 2.0 * std::f32::consts::PI * r2;
    let local = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
    let (up, nt, nb) = create_cartesian(up);
    Vec3::new(
        local.x * nb.x + local.y * up.x + local.z * nt.x,
        local.x * nb.y + local.y * up.y + local.z * nt.y,
        local.x * nb.z + local.y * up.z + local.z * nt.z,
    )
    .normalize()
}

/// Builds an orthonormal basis around `up`, used to rotate a locally-sampled
/// direction into world space.
pub fn create_cartesian(up: Vec3) -> (Vec3, Vec3, Vec3) {
    let arbitrary = if up.x.abs() < 0.9 {
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        Vec3::new(0.0, 1.0, 0.0)
    };
    let tangent = up.cross(arbitrary).normalize();
    let bitangent = up.cross(tangent).normalize();
    (up, tangent, bitangent)
}

/// Samples an exponentially-distributed free-flight distance with rate
/// `alpha_total` (`d = -ln(xi) / alpha_total`). Returns `+inf` when
/// `alpha_total` is zero (pure dielectric, no volume interaction).
pub fn sample_free_flight(rng: &mut impl Rng, alpha_total: f32) -> f32 {
    if alpha_total <= 0.0 {
        return f32::INFINITY;
    }
    let unit: f32 = Exp1.sample(rng);
    unit / alpha_total
}

/// Draws a uniform value on (0, 1] (the Fresnel reflect/transmit coin flip,
/// the categorical component draw, and similar "xi uniform on (0,1]" uses).
pub fn uniform_open_below(rng: &mut impl Rng) -> f32 {
    1.0 - rng.gen::<f32>()
}
