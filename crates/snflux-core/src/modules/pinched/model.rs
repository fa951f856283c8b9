use crate::common::constants::SUPERNOVA_DISTANCE_CM;
use crate::domain::{
    FluxError, FluxResult, FluxTriple, Hierarchy, Species, SpeciesParameterRecord,
};
use crate::modules::FluxRow;
use crate::modules::report::SpeciesTotals;
use crate::numerics::{
    EnergyGrid, MixingAngle, PinchedSpectrum, mix_flavors, stable_sum, validate_species_parameters,
};

/// Unmixed fluxes of one record tabulated over the energy grid.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct RecordTable {
    id: i64,
    samples: Vec<(f64, FluxTriple)>,
}

impl RecordTable {
    pub(super) fn tabulate(record: &SpeciesParameterRecord, grid: &EnergyGrid) -> Self {
        let spectra = Species::ALL.map(|species| {
            PinchedSpectrum::new(record.species(species), SUPERNOVA_DISTANCE_CM, grid.step())
        });

        let samples = grid
            .energies()
            .map(|energy| {
                let triple = FluxTriple::from_array(spectra.map(|spectrum| spectrum.flux_at(energy)));
                (energy, triple)
            })
            .collect();

        Self {
            id: record.id,
            samples,
        }
    }

    pub(super) const fn id(&self) -> i64 {
        self.id
    }

    pub(super) fn len(&self) -> usize {
        self.samples.len()
    }

    pub(super) fn base_rows(&self) -> impl Iterator<Item = FluxRow> + '_ {
        self.samples
            .iter()
            .map(|(energy, triple)| FluxRow::unmixed(*energy, *triple))
    }

    pub(super) fn mixed_rows(
        &self,
        angle: MixingAngle,
        hierarchy: Hierarchy,
    ) -> impl Iterator<Item = FluxRow> + '_ {
        self.samples.iter().map(move |(energy, triple)| {
            FluxRow::mixed(*energy, mix_flavors(*triple, angle, hierarchy))
        })
    }

    pub(super) fn species_totals(&self) -> SpeciesTotals {
        let column = |species: Species| {
            let values = self
                .samples
                .iter()
                .map(|(_, triple)| triple.get(species))
                .collect::<Vec<_>>();
            stable_sum(&values)
        };

        SpeciesTotals {
            nue: column(Species::Nue),
            nuebar: column(Species::Nuebar),
            nux: column(Species::Nux),
        }
    }
}

pub(super) fn validate_record(record: &SpeciesParameterRecord, line: usize) -> FluxResult<()> {
    for species in Species::ALL {
        validate_species_parameters(&record.species(species)).map_err(|reason| {
            FluxError::input_validation(
                "INPUT.PINCHED_RECORD",
                format!(
                    "record {} (line {}) has invalid {} parameters: {}",
                    record.id, line, species, reason
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{RecordTable, validate_record};
    use crate::common::constants::{ENERGY_STEP_GEV, FOUR_PI, SUPERNOVA_DISTANCE_CM};
    use crate::domain::{FluxErrorCategory, Hierarchy, SpeciesParameterRecord};
    use crate::numerics::{EnergyGrid, MixingAngle, pinched_shape, within_tolerance};

    fn reference_record() -> SpeciesParameterRecord {
        SpeciesParameterRecord::from_input_units(
            1,
            [2.0, 2.0, 2.0],
            [12.0, 15.0, 18.0],
            [5.0e52, 5.0e52, 5.0e52],
        )
    }

    fn expected_flux(energy: f64, mean_energy: f64) -> f64 {
        let luminosity = 5.0e52 * 624.15;
        luminosity / mean_energy / (FOUR_PI * SUPERNOVA_DISTANCE_CM * SUPERNOVA_DISTANCE_CM)
            * pinched_shape(energy, mean_energy, 2.0)
            * ENERGY_STEP_GEV
    }

    #[test]
    fn tabulated_rows_cover_grid_in_order() {
        let table = RecordTable::tabulate(&reference_record(), &EnergyGrid::standard());
        let rows = table.base_rows().collect::<Vec<_>>();

        assert_eq!(table.id(), 1);
        assert_eq!(table.len(), 501);
        assert_eq!(rows.len(), 501);
        assert_eq!(rows[0].energy, 0.0);
        assert!((rows[500].energy - 0.1).abs() <= 1.0e-15);
        assert!(rows.windows(2).all(|pair| pair[1].energy > pair[0].energy));
        assert!(
            rows.iter()
                .all(|row| row.triple.values().iter().all(|flux| *flux >= 0.0))
        );
        assert_eq!(rows[0].triple.values(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn flux_at_average_energy_matches_closed_form() {
        let table = RecordTable::tabulate(&reference_record(), &EnergyGrid::standard());
        let rows = table.base_rows().collect::<Vec<_>>();

        // E0 = 12, 15, 18 MeV fall on samples 60, 75, 90
        for (index, column, mean_energy) in [(60, 0, 0.012), (75, 1, 0.015), (90, 2, 0.018)] {
            let row = rows[index];
            let expected = expected_flux(row.energy, mean_energy);
            assert!(
                within_tolerance(row.triple.values()[column], expected, 0.0, 1.0e-12, 1.0e-300),
                "column {column}"
            );
        }

        // same L and alpha: flux at E = E0 scales as 1 / E0^2
        assert!(rows[60].triple.nue() > rows[90].triple.nux());
    }

    #[test]
    fn inactive_species_column_is_zero() {
        let record = SpeciesParameterRecord::from_input_units(
            4,
            [2.0, 2.0, 2.0],
            [12.0, 15.0, 0.0],
            [5.0e52, 5.0e52, 5.0e52],
        );
        let table = RecordTable::tabulate(&record, &EnergyGrid::standard());

        assert!(table.base_rows().all(|row| row.triple.nux() == 0.0));
        assert_eq!(table.species_totals().nux, 0.0);
        assert!(table.species_totals().nue > 0.0);
    }

    #[test]
    fn mixed_rows_conserve_weighted_total_per_sample() {
        let table = RecordTable::tabulate(&reference_record(), &EnergyGrid::standard());
        let angle = MixingAngle::from_radians(0.59);

        for hierarchy in Hierarchy::BOTH {
            for (base, mixed) in table.base_rows().zip(table.mixed_rows(angle, hierarchy)) {
                assert_eq!(base.energy, mixed.energy);
                assert!(within_tolerance(
                    mixed.triple.weighted_total(),
                    base.triple.weighted_total(),
                    1.0e-300,
                    1.0e-12,
                    1.0e-300
                ));
            }
        }
    }

    #[test]
    fn species_totals_integrate_number_flux_over_grid() {
        let table = RecordTable::tabulate(&reference_record(), &EnergyGrid::standard());
        let totals = table.species_totals();

        // 0.1 GeV covers the bulk of a 12 MeV alpha=2 spectrum
        let number_fluence = 5.0e52 * 624.15
            / 0.012
            / (FOUR_PI * SUPERNOVA_DISTANCE_CM * SUPERNOVA_DISTANCE_CM);
        assert!((totals.nue - number_fluence).abs() / number_fluence < 1.0e-3);
        assert!(totals.nue > totals.nuebar && totals.nuebar > totals.nux);
    }

    #[test]
    fn validation_names_record_and_species() {
        let record = SpeciesParameterRecord::from_input_units(
            9,
            [2.0, -1.5, 2.0],
            [12.0, 15.0, 18.0],
            [1.0, 1.0, 1.0],
        );
        let error = validate_record(&record, 4).expect_err("alpha should be rejected");

        assert_eq!(error.category(), FluxErrorCategory::InputValidationError);
        assert_eq!(error.placeholder(), "INPUT.PINCHED_RECORD");
        assert!(error.message().contains("record 9 (line 4)"));
        assert!(error.message().contains("nuebar"));

        assert!(validate_record(&reference_record(), 1).is_ok());
    }
}
