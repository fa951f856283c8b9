pub mod errors;

pub use errors::{FluxError, FluxErrorCategory, FluxResult, ParserResult};

use crate::common::constants::{GEV_PER_ERG, HEAVY_FLAVOR_COUNT, MEV_PER_GEV};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Nue,
    Nuebar,
    Nux,
}

impl Species {
    pub const ALL: [Species; 3] = [Self::Nue, Self::Nuebar, Self::Nux];

    pub const fn index(self) -> usize {
        match self {
            Self::Nue => 0,
            Self::Nuebar => 1,
            Self::Nux => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nue => "nue",
            Self::Nuebar => "nuebar",
            Self::Nux => "nux",
        }
    }
}

impl Display for Species {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Neutrino mass ordering selecting the adiabatic level-crossing pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hierarchy {
    Normal,
    Inverted,
}

impl Hierarchy {
    pub const BOTH: [Hierarchy; 2] = [Self::Normal, Self::Inverted];

    /// Subdirectory of the output root holding this hierarchy's tables.
    pub const fn directory_name(self) -> &'static str {
        match self {
            Self::Normal => "nh",
            Self::Inverted => "ih",
        }
    }
}

impl Display for Hierarchy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => f.write_str("NH"),
            Self::Inverted => f.write_str("IH"),
        }
    }
}

/// Per-energy flux for `[nue, nuebar, nux]`; `nux` is a single heavy flavor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FluxTriple([f64; 3]);

impl FluxTriple {
    pub const ZERO: FluxTriple = FluxTriple([0.0; 3]);

    pub const fn new(nue: f64, nuebar: f64, nux: f64) -> Self {
        Self([nue, nuebar, nux])
    }

    pub const fn from_array(values: [f64; 3]) -> Self {
        Self(values)
    }

    pub const fn get(&self, species: Species) -> f64 {
        self.0[species.index()]
    }

    pub const fn nue(&self) -> f64 {
        self.0[0]
    }

    pub const fn nuebar(&self) -> f64 {
        self.0[1]
    }

    pub const fn nux(&self) -> f64 {
        self.0[2]
    }

    pub const fn values(&self) -> [f64; 3] {
        self.0
    }

    /// Sum over all six flavors, counting `nux` once per heavy flavor.
    pub fn weighted_total(&self) -> f64 {
        self.nue() + self.nuebar() + HEAVY_FLAVOR_COUNT as f64 * self.nux()
    }
}

/// Six-flavor flux in SNOwGLoBES column order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlavorFluxes {
    pub nue: f64,
    pub numu: f64,
    pub nutau: f64,
    pub nuebar: f64,
    pub numubar: f64,
    pub nutaubar: f64,
}

impl FlavorFluxes {
    /// Unoscillated fluxes: every heavy flavor carries the same `nux`.
    pub const fn unmixed(triple: FluxTriple) -> Self {
        Self {
            nue: triple.nue(),
            numu: triple.nux(),
            nutau: triple.nux(),
            nuebar: triple.nuebar(),
            numubar: triple.nux(),
            nutaubar: triple.nux(),
        }
    }

    pub const fn columns(&self) -> [f64; 6] {
        [
            self.nue,
            self.numu,
            self.nutau,
            self.nuebar,
            self.numubar,
            self.nutaubar,
        ]
    }

    pub fn neutrino_total(&self) -> f64 {
        self.nue + self.numu + self.nutau
    }

    pub fn antineutrino_total(&self) -> f64 {
        self.nuebar + self.numubar + self.nutaubar
    }

    pub fn total(&self) -> f64 {
        self.neutrino_total() + self.antineutrino_total()
    }

    /// Collapses to a triple whose `nux` is the mean heavy-flavor flux.
    pub fn to_triple(&self) -> FluxTriple {
        let heavy = self.numu + self.nutau + self.numubar + self.nutaubar;
        FluxTriple::new(self.nue, self.nuebar, heavy / HEAVY_FLAVOR_COUNT as f64)
    }
}

/// Pinched-spectrum parameters for one species, in GeV-based units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesParameters {
    pub alpha: f64,
    pub mean_energy: f64,
    pub luminosity: f64,
}

impl SpeciesParameters {
    pub fn is_active(&self) -> bool {
        self.mean_energy > 0.0
    }
}

/// One line of the parameter file after unit conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesParameterRecord {
    pub id: i64,
    alpha: [f64; 3],
    mean_energy_gev: [f64; 3],
    luminosity_gev: [f64; 3],
}

impl SpeciesParameterRecord {
    /// Builds a record from file units: average energies in MeV, luminosities
    /// in erg/s (or erg for fluence).
    pub fn from_input_units(
        id: i64,
        alpha: [f64; 3],
        mean_energy_mev: [f64; 3],
        luminosity_erg: [f64; 3],
    ) -> Self {
        Self {
            id,
            alpha,
            mean_energy_gev: mean_energy_mev.map(|energy| energy / MEV_PER_GEV),
            luminosity_gev: luminosity_erg.map(|luminosity| luminosity * GEV_PER_ERG),
        }
    }

    pub const fn species(&self, species: Species) -> SpeciesParameters {
        let index = species.index();
        SpeciesParameters {
            alpha: self.alpha[index],
            mean_energy: self.mean_energy_gev[index],
            luminosity: self.luminosity_gev[index],
        }
    }

    pub const fn alpha(&self) -> [f64; 3] {
        self.alpha
    }

    pub const fn mean_energy_gev(&self) -> [f64; 3] {
        self.mean_energy_gev
    }

    pub const fn luminosity_gev(&self) -> [f64; 3] {
        self.luminosity_gev
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// `E nue nuebar nux`
    #[default]
    Triple,
    /// `E nue numu nutau nuebar numubar nutaubar`
    Snowglobes,
}

impl OutputLayout {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Triple => "triple",
            Self::Snowglobes => "snowglobes",
        }
    }
}

impl Display for OutputLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Resolved run configuration handed from the CLI to the pinched module.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub theta12: Option<f64>,
    pub layout: OutputLayout,
    pub report_path: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            theta12: None,
            layout: OutputLayout::Triple,
            report_path: None,
        }
    }

    pub fn with_theta12(mut self, theta12: f64) -> Self {
        self.theta12 = Some(theta12);
        self
    }

    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_report_path(mut self, report_path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(report_path.into());
        self
    }

    /// Mixing angle when the run should also write hierarchy tables.
    pub fn mixing_angle(&self) -> Option<f64> {
        self.theta12.filter(|theta| theta.abs() > 0.0)
    }
}
