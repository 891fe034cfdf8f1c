//! Immutable ray records.

use glam::Vec3;
use std::sync::Arc;

/// A single, immutable snapshot of a photon in flight.
///
/// Every event produces a new `Ray`; nothing here is ever mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub position: Vec3,
    pub direction: Vec3,
    pub wavelength_nm: f32,
    pub source: Arc<str>,
    pub travelled: f32,
    pub elapsed: f32,
    pub alive: bool,
}

impl Ray {
    pub fn new(position: Vec3, direction: Vec3, wavelength_nm: f32, source: Arc<str>) -> Self {
        Self {
            position,
            direction: direction.normalize(),
            wavelength_nm,
            source,
            travelled: 0.0,
            elapsed: 0.0,
            alive: true,
        }
    }

    /// Returns true if this ray's direction is usable (finite, non-zero length).
    pub fn direction_is_valid(&self) -> bool {
        self.direction.is_finite() && self.direction.length_squared() > 1.0e-12
    }

    /// Advance the ray to `position + direction * distance`, accumulating
    /// `travelled` and `elapsed` (elapsed uses the medium's group velocity
    /// c/n; DESIGN.md records this choice).
    pub fn advance(&self, distance: f32, refractive_index: f32) -> Ray {
        const C: f32 = 299_792_458.0;
        let new_position = self.position + self.direction * distance;
        Ray {
            position: new_position,
            travelled: self.travelled + distance,
            elapsed: self.elapsed + distance * refractive_index / C,
            ..self.clone()
        }
    }

    /// Nudge the ray's position along `direction` by `eps` to avoid
    /// immediate self-intersection with the surface it just crossed.
    pub fn nudge(&self, eps: f32) -> Ray {
        Ray {
            position: self.position + self.direction * eps,
            ..self.clone()
        }
    }

    /// Change direction only, e.g. after a reflect/transmit/scatter event.
    pub fn turn(&self, new_direction: Vec3) -> Ray {
        Ray {
            direction: new_direction.normalize(),
            ..self.clone()
        }
    }

    /// Change direction and wavelength only, for re-emission at an
    /// absorption point; the caller keeps `position` unchanged by never
    /// touching it here.
    pub fn re_emit(&self, new_wavelength_nm: f32, new_direction: Vec3) -> Ray {
        Ray {
            direction: new_direction.normalize(),
            wavelength_nm: new_wavelength_nm,
            ..self.clone()
        }
    }

    pub fn kill(&self) -> Ray {
        Ray {
            alive: false,
            ..self.clone()
        }
    }
}
