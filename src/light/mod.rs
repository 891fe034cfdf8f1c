//! Light sources: a lazy sequence of rays built from three independent
//! delegates.

pub mod direction;
pub mod position;
pub mod wavelength;

use std::sync::Arc;

use rand::RngCore;

use crate::ray::Ray;
use crate::scene::transform::Transform;

pub use direction::DirectionDelegate;
pub use position::PositionDelegate;
pub use wavelength::WavelengthDelegate;

/// Combines a position, direction, and wavelength delegate into an emitter.
/// Defaults to a collimated point source along +z.
pub struct LightSource {
    pub position: Box<dyn PositionDelegate>,
    pub direction: Box<dyn DirectionDelegate>,
    pub wavelength: Box<dyn WavelengthDelegate>,
}

impl LightSource {
    pub fn new(
        position: Box<dyn PositionDelegate>,
        direction: Box<dyn DirectionDelegate>,
        wavelength: Box<dyn WavelengthDelegate>,
    ) -> Self {
        Self { position, direction, wavelength }
    }

    pub fn collimated_point(wavelength: Box<dyn WavelengthDelegate>) -> Self {
        Self::new(Box::new(position::Point), Box::new(direction::Collimated), wavelength)
    }

    /// Draws one ray in the emitting node's world frame: wavelength, then
    /// local direction, then local position, composed into a world-space
    /// ray. `world_transform` and `source_name` identify the emitting node.
    pub fn emit(&self, world_transform: Transform, source_name: Arc<str>, rng: &mut dyn RngCore) -> Ray {
        let wavelength_nm = self.wavelength.sample(rng);
        let local_direction = self.direction.sample(rng);
        let local_position = self.position.sample(rng);

        let world_position = world_transform.transform_point(local_position);
        let world_direction = world_transform.transform_direction(local_direction).normalize_or_zero();

        Ray::new(world_position, world_direction, wavelength_nm, source_name)
    }

    /// A finite lazy sequence of `count` rays.
    pub fn rays<'a>(
        &'a self,
        world_transform: Transform,
        source_name: Arc<str>,
        rng: &'a mut dyn RngCore,
        count: u64,
    ) -> RaySequence<'a> {
        RaySequence { light: self, world_transform, source_name, rng, remaining: count }
    }
}

/// The lazy, non-restartable ray sequence a [`LightSource`] produces. Not
/// restartable unless the delegates are seeded deterministically and the
/// sequence is rebuilt from scratch.
pub struct RaySequence<'a> {
    light: &'a LightSource,
    world_transform: Transform,
    source_name: Arc<str>,
    rng: &'a mut dyn RngCore,
    remaining: u64,
}

impl<'a> Iterator for RaySequence<'a> {
    type Item = Ray;

    fn next(&mut self) -> Option<Ray> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.light.emit(self.world_transform, self.source_name.clone(), self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}
