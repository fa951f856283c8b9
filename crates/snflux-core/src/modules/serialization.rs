use crate::domain::OutputLayout;
use crate::modules::FluxRow;
use std::fs;
use std::path::Path;

pub const ENERGY_PRECISION: usize = 4;
pub const FLUX_PRECISION: usize = 6;

pub fn format_fixed_f64(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

pub fn format_scientific_f64(value: f64, precision: usize) -> String {
    format!("{value:.precision$e}")
}

/// One table line without the trailing newline.
pub fn render_flux_row(row: &FluxRow, layout: OutputLayout) -> String {
    let mut fields = Vec::with_capacity(7);
    fields.push(format_fixed_f64(row.energy, ENERGY_PRECISION));

    match layout {
        OutputLayout::Triple => fields.extend(
            row.triple
                .values()
                .iter()
                .map(|flux| format_scientific_f64(*flux, FLUX_PRECISION)),
        ),
        OutputLayout::Snowglobes => fields.extend(
            row.flavors
                .columns()
                .iter()
                .map(|flux| format_scientific_f64(*flux, FLUX_PRECISION)),
        ),
    }

    fields.join(" ")
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, normalize_text_artifact(content))
}
