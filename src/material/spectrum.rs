//! Wavelength-dependent scalar functions: a material's refractive index and
//! a component's absorption coefficient are both functions of wavelength.
//!
//! A full spectral catalogue (loading named/CSV/histogram spectra) is an
//! out-of-scope external collaborator; this module only provides the
//! handful of closed-form shapes needed to build realistic test scenes.

use rand::RngCore;
use rand_distr::{Distribution, Normal};

/// A scalar function of wavelength, used for refractive index and
/// absorption-coefficient lookups.
pub trait Spectrum: Send + Sync {
    fn value(&self, wavelength_nm: f32) -> f32;
}

/// A constant value across all wavelengths.
#[derive(Debug, Clone, Copy)]
pub struct Flat(pub f32);

impl Spectrum for Flat {
    fn value(&self, _wavelength_nm: f32) -> f32 {
        self.0
    }
}

/// A Gaussian peak, e.g. for a luminophore's absorption cross-section.
#[derive(Debug, Clone, Copy)]
pub struct Gaussian {
    pub peak_nm: f32,
    pub fwhm_nm: f32,
    pub amplitude: f32,
}

impl Spectrum for Gaussian {
    fn value(&self, wavelength_nm: f32) -> f32 {
        let sigma = self.fwhm_nm / 2.354_82;
        let d = (wavelength_nm - self.peak_nm) / sigma;
        self.amplitude * (-0.5 * d * d).exp()
    }
}

/// A probability density over wavelength that can also be sampled, used for
/// a luminophore's emission spectrum: a re-emission draws a new wavelength
/// from its causing component's emission pdf.
pub trait EmissionSpectrum: Send + Sync {
    /// Probability density at `wavelength_nm` (need not integrate to 1 over
    /// a finite range if callers only use it for relative comparisons).
    fn pdf(&self, wavelength_nm: f32) -> f32;

    /// Draws a wavelength from this distribution.
    fn sample(&self, rng: &mut dyn RngCore) -> f32;
}

/// A single Gaussian emission band.
#[derive(Debug, Clone, Copy)]
pub struct GaussianEmission {
    pub peak_nm: f32,
    pub fwhm_nm: f32,
}

impl EmissionSpectrum for GaussianEmission {
    fn pdf(&self, wavelength_nm: f32) -> f32 {
        let sigma = self.fwhm_nm / 2.354_82;
        let d = (wavelength_nm - self.peak_nm) / sigma;
        (1.0 / (sigma * (2.0 * std::f32::consts::PI).sqrt())) * (-0.5 * d * d).exp()
    }

    fn sample(&self, rng: &mut dyn RngCore) -> f32 {
        let sigma = self.fwhm_nm / 2.354_82;
        let normal = Normal::new(self.peak_nm, sigma).expect("fwhm_nm must be positive");
        normal.sample(rng)
    }
}

/// An emission spectrum identical to the incoming wavelength: used by
/// scatterer components, which always re-emit at the wavelength they
/// absorbed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Elastic;

impl Elastic {
    pub fn pdf_for(&self, incoming_nm: f32, candidate_nm: f32) -> f32 {
        if (incoming_nm - candidate_nm).abs() < 1.0e-6 {
            1.0
        } else {
            0.0
        }
    }
}
