//! Garching quasi-thermal ("pinched") neutrino spectra.
//!
//! `pinched_shape` is the unit-normalized energy distribution with mean
//! `mean_energy`; `normalize_flux` turns it into a per-bin number flux at a
//! given distance for a species of luminosity `L`.

use crate::common::constants::FOUR_PI;
use crate::domain::SpeciesParameters;
use statrs::function::gamma::ln_gamma;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpectrumError {
    #[error("spectrum parameter '{field}' must be finite, got {value}")]
    NonFiniteParameter { field: &'static str, value: f64 },
    #[error("luminosity must be >= 0, got {value}")]
    NegativeLuminosity { value: f64 },
    #[error("pinching parameter must exceed -1 for an active species, got {value}")]
    AlphaOutOfRange { value: f64 },
}

/// Normalized pinched distribution
/// `N (E/E0)^alpha exp(-(alpha+1) E/E0)` with
/// `N = (alpha+1)^(alpha+1) / (E0 Gamma(alpha+1))`.
///
/// Integrates to one over `[0, inf)` with mean `E0`. Inputs are not checked:
/// `mean_energy <= 0` or `alpha <= -1` give NaN or infinite values.
pub fn pinched_shape(energy: f64, mean_energy: f64, alpha: f64) -> f64 {
    let shape = alpha + 1.0;
    // ln form keeps (alpha+1)^(alpha+1) / Gamma(alpha+1) finite for large alpha
    let normalization = (shape * shape.ln() - ln_gamma(shape)).exp() / mean_energy;
    let ratio = energy / mean_energy;

    normalization * ratio.powf(alpha) * (-shape * ratio).exp()
}

/// Flux in one `bin_width` energy bin at `distance` (cm).
///
/// `luminosity / mean_energy` is the number luminosity; an inactive species
/// (`mean_energy` not > 0, NaN included) yields exactly zero.
pub fn normalize_flux(
    energy: f64,
    luminosity: f64,
    mean_energy: f64,
    alpha: f64,
    distance: f64,
    bin_width: f64,
) -> f64 {
    if mean_energy > 0.0 {
        let geometric_dilution = 1.0 / (FOUR_PI * distance * distance);
        geometric_dilution
            * (luminosity / mean_energy)
            * pinched_shape(energy, mean_energy, alpha)
            * bin_width
    } else {
        0.0
    }
}

/// Checks an active species (`E0 > 0`). A switched-off species is never
/// evaluated, so its other fields are not inspected.
pub fn validate_species_parameters(parameters: &SpeciesParameters) -> Result<(), SpectrumError> {
    if !parameters.is_active() {
        return Ok(());
    }

    for (field, value) in [
        ("alpha", parameters.alpha),
        ("mean_energy", parameters.mean_energy),
        ("luminosity", parameters.luminosity),
    ] {
        if !value.is_finite() {
            return Err(SpectrumError::NonFiniteParameter { field, value });
        }
    }

    if parameters.luminosity < 0.0 {
        return Err(SpectrumError::NegativeLuminosity {
            value: parameters.luminosity,
        });
    }
    if parameters.alpha <= -1.0 {
        return Err(SpectrumError::AlphaOutOfRange {
            value: parameters.alpha,
        });
    }

    Ok(())
}

/// One species' spectrum bound to a distance and bin width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchedSpectrum {
    parameters: SpeciesParameters,
    distance: f64,
    bin_width: f64,
}

impl PinchedSpectrum {
    pub const fn new(parameters: SpeciesParameters, distance: f64, bin_width: f64) -> Self {
        Self {
            parameters,
            distance,
            bin_width,
        }
    }

    pub fn flux_at(&self, energy: f64) -> f64 {
        normalize_flux(
            energy,
            self.parameters.luminosity,
            self.parameters.mean_energy,
            self.parameters.alpha,
            self.distance,
            self.bin_width,
        )
    }
}
