use crate::domain::{FluxError, FluxResult, Hierarchy, OutputLayout};
use crate::modules::serialization::write_text_artifact;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Base,
    Normal,
    Inverted,
}

impl OutputKind {
    pub const fn mixed(hierarchy: Hierarchy) -> Self {
        match hierarchy {
            Hierarchy::Normal => Self::Normal,
            Hierarchy::Inverted => Self::Inverted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSummary {
    pub kind: OutputKind,
    pub path: PathBuf,
    pub rows: usize,
}

/// Grid-summed unmixed flux per species, in the table's per-bin units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesTotals {
    pub nue: f64,
    pub nuebar: f64,
    pub nux: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSummary {
    pub id: i64,
    pub line: usize,
    pub outputs: Vec<OutputSummary>,
    pub species_totals: SpeciesTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub theta12: Option<f64>,
    pub layout: OutputLayout,
    pub records: Vec<RecordSummary>,
}

impl RunSummary {
    pub fn new(theta12: Option<f64>, layout: OutputLayout) -> Self {
        Self {
            theta12,
            layout,
            records: Vec::new(),
        }
    }

    pub fn output_count(&self) -> usize {
        self.records.iter().map(|record| record.outputs.len()).sum()
    }
}

pub fn write_run_report(path: &Path, summary: &RunSummary) -> FluxResult<()> {
    let rendered = serde_json::to_string_pretty(summary).map_err(|source| {
        FluxError::internal(
            "SYS.PINCHED_REPORT_SERIALIZE",
            format!("failed to serialize run report: {}", source),
        )
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| {
            FluxError::io_system(
                "IO.PINCHED_REPORT_WRITE",
                format!(
                    "failed to create report directory '{}': {}",
                    parent.display(),
                    source
                ),
            )
        })?;
    }

    write_text_artifact(path, &rendered).map_err(|source| {
        FluxError::io_system(
            "IO.PINCHED_REPORT_WRITE",
            format!("failed to write run report '{}': {}", path.display(), source),
        )
    })
}
