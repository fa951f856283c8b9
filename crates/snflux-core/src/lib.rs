//! Supernova neutrino flux tables from the Garching pinched parameterization.
//!
//! Each parameter record (pinching, average energy and luminosity for
//! `nue`, `nuebar` and one heavy flavor) becomes a table of per-bin flux at
//! 10 kpc over a 0-100 MeV grid, optionally with adiabatic MSW mixed tables
//! for both mass hierarchies.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
