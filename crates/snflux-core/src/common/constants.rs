//! Physical and grid constants shared by the pinched flux kernels.
//!
//! Energies are in GeV, distances in cm and luminosities in GeV/s (or GeV for
//! time-integrated fluence) once a record has been converted.

pub const PI: f64 = std::f64::consts::PI;
pub const FOUR_PI: f64 = 4.0 * PI;

/// 10 kpc, the canonical galactic supernova distance.
pub const SUPERNOVA_DISTANCE_CM: f64 = 3.085_680_25e22;
pub const GEV_PER_ERG: f64 = 624.15;
pub const MEV_PER_GEV: f64 = 1_000.0;

/// Grid step and bin width baked into every tabulated flux value.
pub const ENERGY_STEP_GEV: f64 = 0.0002;
pub const ENERGY_BIN_COUNT: usize = 500;
pub const ENERGY_SAMPLE_COUNT: usize = ENERGY_BIN_COUNT + 1;

/// Heavy-lepton flavors represented by a single per-flavor νx flux.
pub const HEAVY_FLAVOR_COUNT: usize = 4;
