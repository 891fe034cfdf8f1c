//! Wavelength delegates: sample an emission wavelength.

use rand::RngCore;

use crate::material::spectrum::EmissionSpectrum;

pub trait WavelengthDelegate: Send + Sync {
    fn sample(&self, rng: &mut dyn RngCore) -> f32;
}

/// Every ray carries exactly the same wavelength, e.g. a monochromatic
/// laser source.
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub f32);

impl WavelengthDelegate for Fixed {
    fn sample(&self, _rng: &mut dyn RngCore) -> f32 {
        self.0
    }
}

/// Draws a wavelength from an arbitrary [`EmissionSpectrum`], e.g. a solar
/// spectrum approximation or a lamp emission band.
pub struct FromSpectrum {
    pub spectrum: Box<dyn EmissionSpectrum>,
}

impl WavelengthDelegate for FromSpectrum {
    fn sample(&self, rng: &mut dyn RngCore) -> f32 {
        self.spectrum.sample(rng)
    }
}
