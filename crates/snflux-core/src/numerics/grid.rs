use crate::common::constants::{ENERGY_SAMPLE_COUNT, ENERGY_STEP_GEV};

/// Uniform energy grid starting at 0 GeV.
///
/// Samples are `index * step`, so the grid carries no accumulated drift and
/// is strictly increasing. The step doubles as the bin width of each
/// tabulated flux value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyGrid {
    step: f64,
    sample_count: usize,
}

impl EnergyGrid {
    /// 501 samples from 0 to 0.1 GeV in 0.2 MeV steps.
    pub const fn standard() -> Self {
        Self {
            step: ENERGY_STEP_GEV,
            sample_count: ENERGY_SAMPLE_COUNT,
        }
    }

    pub const fn step(&self) -> f64 {
        self.step
    }

    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn energies(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.sample_count).map(|index| index as f64 * self.step)
    }
}

impl Default for EnergyGrid {
    fn default() -> Self {
        Self::standard()
    }
}
