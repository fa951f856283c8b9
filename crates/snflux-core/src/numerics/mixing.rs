//! Adiabatic MSW flavor conversion in the supernova envelope.
//!
//! Assumes a large theta13 and a fully adiabatic H resonance, so the flavor
//! content at Earth is fixed per hierarchy by theta12 alone:
//!
//! | hierarchy | nue | nuebar | numu + nutau | numubar + nutaubar |
//! |-----------|-----|--------|--------------|--------------------|
//! | normal    | Fx  | c2 Febar + s2 Fx | Fe + Fx | s2 Febar + (1 + c2) Fx |
//! | inverted  | s2 Fe + c2 Fx | Fx | c2 Fe + (1 + s2) Fx | Febar + Fx |
//!
//! with `s2 = sin^2(theta12)`, `c2 = cos^2(theta12)` and `Fx` the unmixed
//! flux of a single heavy flavor. Heavy pairs split evenly between mu and tau.

use crate::domain::{FlavorFluxes, FluxTriple, Hierarchy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingAngle {
    sin2: f64,
    cos2: f64,
}

impl MixingAngle {
    pub fn from_radians(theta12: f64) -> Self {
        let sin = theta12.sin();
        let sin2 = sin * sin;
        Self {
            sin2,
            cos2: 1.0 - sin2,
        }
    }

    pub const fn sin2(&self) -> f64 {
        self.sin2
    }

    pub const fn cos2(&self) -> f64 {
        self.cos2
    }
}

/// Six-flavor fluxes at Earth for one hierarchy.
pub fn mix_flavors(triple: FluxTriple, angle: MixingAngle, hierarchy: Hierarchy) -> FlavorFluxes {
    let (fe, febar, fx) = (triple.nue(), triple.nuebar(), triple.nux());
    let (s2, c2) = (angle.sin2, angle.cos2);

    let (nue, nuebar, heavy, heavy_bar) = match hierarchy {
        Hierarchy::Normal => (
            fx,
            c2 * febar + s2 * fx,
            fe + fx,
            s2 * febar + (1.0 + c2) * fx,
        ),
        Hierarchy::Inverted => (
            s2 * fe + c2 * fx,
            fx,
            c2 * fe + (1.0 + s2) * fx,
            febar + fx,
        ),
    };

    FlavorFluxes {
        nue,
        numu: 0.5 * heavy,
        nutau: 0.5 * heavy,
        nuebar,
        numubar: 0.5 * heavy_bar,
        nutaubar: 0.5 * heavy_bar,
    }
}

/// Mixed `[nue, nuebar, nux]` where `nux` averages the four heavy flavors.
pub fn mix(triple: FluxTriple, theta12: f64, hierarchy: Hierarchy) -> FluxTriple {
    mix_flavors(triple, MixingAngle::from_radians(theta12), hierarchy).to_triple()
}
