mod model;
mod outputs;
mod parser;

pub use parser::{
    ParsedRecord, RecordParseError, RecordReader, open_parameter_source, parse_record_line,
};

use super::ModuleExecutor;
use super::report::{OutputKind, RecordSummary, RunSummary, write_run_report};
use crate::domain::{FluxResult, Hierarchy, OutputLayout, RunConfig, SpeciesParameterRecord};
use crate::numerics::{EnergyGrid, MixingAngle};
use model::{RecordTable, validate_record};
use outputs::{RecordOutputs, prepare_output_root};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_PARAMETER_FILE: &str = "pinched_info.dat";
pub const OUTPUT_DIR_ENV: &str = "OUTFLUXDIR";

/// Writes one flux table per parameter record, plus normal and inverted
/// hierarchy tables when a non-zero mixing angle is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinchedModule {
    grid: EnergyGrid,
}

impl PinchedModule {
    pub const fn new() -> Self {
        Self {
            grid: EnergyGrid::standard(),
        }
    }

    /// Tabulates and writes one record. All of the record's files are closed
    /// before this returns, and removed again if writing failed.
    pub fn process_record(
        &self,
        parsed: &ParsedRecord,
        output_dir: &Path,
        mixing: Option<MixingAngle>,
        layout: OutputLayout,
    ) -> FluxResult<RecordSummary> {
        let record = &parsed.record;
        validate_record(record, parsed.line)?;
        log_record(record);

        let table = RecordTable::tabulate(record, &self.grid);
        debug!(record = table.id(), samples = table.len(), "tabulated record");

        let mut kinds = vec![OutputKind::Base];
        if mixing.is_some() {
            kinds.extend(Hierarchy::BOTH.map(OutputKind::mixed));
        }

        let mut outputs = RecordOutputs::open(output_dir, record.id, &kinds, layout)?;
        outputs.write_rows(OutputKind::Base, table.base_rows())?;
        if let Some(angle) = mixing {
            for hierarchy in Hierarchy::BOTH {
                outputs.write_rows(
                    OutputKind::mixed(hierarchy),
                    table.mixed_rows(angle, hierarchy),
                )?;
            }
        }

        Ok(RecordSummary {
            id: record.id,
            line: parsed.line,
            outputs: outputs.commit()?,
            species_totals: table.species_totals(),
        })
    }
}

impl ModuleExecutor for PinchedModule {
    fn execute(&self, config: &RunConfig) -> FluxResult<RunSummary> {
        let theta12 = config.mixing_angle();
        match theta12 {
            Some(theta) => info!(theta12 = theta, "assuming MSW with theta12 in radians"),
            None => info!("no oscillations assumed"),
        }

        let records = open_parameter_source(&config.input_path)?;
        prepare_output_root(&config.output_dir, theta12.is_some())?;

        let mixing = theta12.map(MixingAngle::from_radians);
        let mut summary = RunSummary::new(theta12, config.layout);
        for parsed in records {
            let parsed = parsed?;
            let record_summary =
                self.process_record(&parsed, &config.output_dir, mixing, config.layout)?;
            summary.records.push(record_summary);
        }

        info!(
            records = summary.records.len(),
            files = summary.output_count(),
            "pinched flux tables written"
        );

        if let Some(report_path) = &config.report_path {
            write_run_report(report_path, &summary)?;
            info!(path = %report_path.display(), "run report written");
        }

        Ok(summary)
    }
}

fn log_record(record: &SpeciesParameterRecord) {
    info!(
        record = record.id,
        alpha = ?record.alpha(),
        e0_gev = ?record.mean_energy_gev(),
        luminosity_gev = ?record.luminosity_gev(),
        "flux record"
    );
}
