//! Material components: absorbers, scatterers, luminophores, reactors.
//!
//! Unlike [`crate::geometry::Geometry`] (a closed, fixed set expressed as a
//! tagged enum), the component set is explicitly open-ended, so this is a
//! `trait` implemented by the four built-in kinds.

use std::sync::Arc;

use rand::RngCore;

use super::phase::{Isotropic, PhaseFunction};
use super::spectrum::{EmissionSpectrum, Spectrum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Absorber,
    Scatterer,
    Luminophore,
    Reactor,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Absorber => "absorber",
            ComponentKind::Scatterer => "scatterer",
            ComponentKind::Luminophore => "luminophore",
            ComponentKind::Reactor => "reactor",
        }
    }
}

/// One interaction channel within a [`super::Material`].
pub trait Component: Send + Sync {
    fn name(&self) -> &str;
    fn kind(&self) -> ComponentKind;

    /// Extinction coefficient contributed by this component at
    /// `wavelength_nm` (`alpha_i(lambda)`), in inverse scene-length units.
    fn absorption_coefficient(&self, wavelength_nm: f32) -> f32;

    /// Probability that an absorption by this component leads to
    /// re-emission rather than termination.
    fn quantum_yield(&self) -> f32;

    /// Draws a new wavelength for a re-emission event caused by this
    /// component, given the absorbed wavelength.
    fn sample_emission_wavelength(&self, incoming_wavelength_nm: f32, rng: &mut dyn RngCore) -> f32;

    /// The direction distribution a re-emission samples from.
    fn phase_function(&self) -> &dyn PhaseFunction;
}

/// Pure absorber: terminates the ray on every interaction (qy = 0).
pub struct Absorber {
    pub name: String,
    pub coefficient: Arc<dyn Spectrum>,
}

impl Component for Absorber {
    fn name(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> ComponentKind {
        ComponentKind::Absorber
    }
    fn absorption_coefficient(&self, wavelength_nm: f32) -> f32 {
        self.coefficient.value(wavelength_nm)
    }
    fn quantum_yield(&self) -> f32 {
        0.0
    }
    fn sample_emission_wavelength(&self, incoming_wavelength_nm: f32, _rng: &mut dyn RngCore) -> f32 {
        incoming_wavelength_nm
    }
    fn phase_function(&self) -> &dyn PhaseFunction {
        &ISOTROPIC
    }
}

/// Elastic scatterer: always re-emits (qy = 1) at the incoming wavelength,
/// redirected by a phase function.
pub struct Scatterer {
    pub name: String,
    pub coefficient: Arc<dyn Spectrum>,
    pub phase_function: Box<dyn PhaseFunction>,
}

impl Component for Scatterer {
    fn name(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> ComponentKind {
        ComponentKind::Scatterer
    }
    fn absorption_coefficient(&self, wavelength_nm: f32) -> f32 {
        self.coefficient.value(wavelength_nm)
    }
    fn quantum_yield(&self) -> f32 {
        1.0
    }
    fn sample_emission_wavelength(&self, incoming_wavelength_nm: f32, _rng: &mut dyn RngCore) -> f32 {
        incoming_wavelength_nm
    }
    fn phase_function(&self) -> &dyn PhaseFunction {
        self.phase_function.as_ref()
    }
}

/// Absorber + emitter with 0 < qy < 1: quantum yield is the probability a
/// re-emission occurs per absorption.
pub struct Luminophore {
    pub name: String,
    pub coefficient: Arc<dyn Spectrum>,
    pub quantum_yield: f32,
    pub emission: Arc<dyn EmissionSpectrum>,
    pub phase_function: Box<dyn PhaseFunction>,
}

impl Component for Luminophore {
    fn name(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> ComponentKind {
        ComponentKind::Luminophore
    }
    fn absorption_coefficient(&self, wavelength_nm: f32) -> f32 {
        self.coefficient.value(wavelength_nm)
    }
    fn quantum_yield(&self) -> f32 {
        self.quantum_yield
    }
    fn sample_emission_wavelength(&self, _incoming_wavelength_nm: f32, rng: &mut dyn RngCore) -> f32 {
        self.emission.sample(rng)
    }
    fn phase_function(&self) -> &dyn PhaseFunction {
        self.phase_function.as_ref()
    }
}

/// A component with qy = 0 by construction, distinguished from [`Absorber`]
/// only by its `kind` tag (reactor-specific kinetics beyond the shared
/// capability set are left to a caller's own component; DESIGN.md records
/// this resolution).
pub struct Reactor {
    pub name: String,
    pub coefficient: Arc<dyn Spectrum>,
}

impl Component for Reactor {
    fn name(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> ComponentKind {
        ComponentKind::Reactor
    }
    fn absorption_coefficient(&self, wavelength_nm: f32) -> f32 {
        self.coefficient.value(wavelength_nm)
    }
    fn quantum_yield(&self) -> f32 {
        0.0
    }
    fn sample_emission_wavelength(&self, incoming_wavelength_nm: f32, _rng: &mut dyn RngCore) -> f32 {
        incoming_wavelength_nm
    }
    fn phase_function(&self) -> &dyn PhaseFunction {
        &ISOTROPIC
    }
}

static ISOTROPIC: Isotropic = Isotropic;
