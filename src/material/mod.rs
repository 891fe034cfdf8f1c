//! Material model: refractive index plus an ordered list of interaction
//! components.

pub mod component;
pub mod phase;
pub mod spectrum;

use std::sync::Arc;

use rand::RngCore;

pub use component::{Component, ComponentKind};
pub use phase::PhaseFunction;
pub use spectrum::Spectrum;

use crate::rng::{sample_free_flight, DynRng};

/// A homogeneous medium: a refractive index and an ordered set of
/// interaction channels (absorbers, scatterers, luminophores, reactors).
///
/// Component order matters only as a tie-break when weights are equal;
/// the draw itself is weighted by each component's share of the total
/// extinction coefficient.
pub struct Material {
    pub name: String,
    pub refractive_index: Arc<dyn Spectrum>,
    pub components: Vec<Arc<dyn Component>>,
}

impl Material {
    pub fn new(name: impl Into<String>, refractive_index: Arc<dyn Spectrum>, components: Vec<Arc<dyn Component>>) -> Self {
        Self { name: name.into(), refractive_index, components }
    }

    /// A non-interacting medium (vacuum/air), for nodes that carry no
    /// optical components.
    pub fn vacuum() -> Self {
        Self::new("vacuum", Arc::new(spectrum::Flat(1.0)), Vec::new())
    }

    pub fn refractive_index(&self, wavelength_nm: f32) -> f32 {
        self.refractive_index.value(wavelength_nm)
    }

    /// Total extinction coefficient at `wavelength_nm`: the sum of every
    /// component's individual coefficient.
    pub fn total_extinction(&self, wavelength_nm: f32) -> f32 {
        self.components.iter().map(|c| c.absorption_coefficient(wavelength_nm)).sum()
    }

    /// Draws the distance to the next volume interaction, assuming the ray
    /// travels through this material at `wavelength_nm`. Returns
    /// `f32::INFINITY` for a non-interacting (zero-extinction) material.
    pub fn sample_free_flight(&self, wavelength_nm: f32, rng: &mut dyn RngCore) -> f32 {
        sample_free_flight(&mut DynRng(rng), self.total_extinction(wavelength_nm))
    }

    /// Draws which component a volume interaction belongs to, weighted by
    /// `component.absorption_coefficient(wavelength_nm) / total_extinction`.
    ///
    /// A linear cumulative scan, same shape as a categorical light-source
    /// draw over cumulative weights; a material's component list is
    /// expected to stay small enough that this beats building an alias
    /// table.
    pub fn sample_component(&self, wavelength_nm: f32, rng: &mut dyn RngCore) -> Option<&Arc<dyn Component>> {
        if self.components.is_empty() {
            return None;
        }
        let total = self.total_extinction(wavelength_nm);
        if total <= 0.0 {
            return None;
        }
        let mut threshold = crate::rng::uniform_open_below(&mut DynRng(rng)) * total;
        for component in &self.components {
            let weight = component.absorption_coefficient(wavelength_nm);
            if threshold < weight {
                return Some(component);
            }
            threshold -= weight;
        }
        // Floating-point round-off can leave a residual threshold; fall
        // back to the last component rather than returning None.
        self.components.last()
    }
}
