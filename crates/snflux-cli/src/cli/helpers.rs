use super::{CliError, LayoutArg};
use anyhow::anyhow;
use snflux_core::domain::{FluxError, OutputLayout};
use snflux_core::modules::pinched::OUTPUT_DIR_ENV;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Logs go to stderr; `RUST_LOG` overrides the default `info` filter.
pub(super) fn init_logging() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to install tracing subscriber: {error}"))
}

pub(super) fn resolve_theta12(theta12: Option<f64>) -> Result<Option<f64>, CliError> {
    match theta12 {
        Some(value) if !value.is_finite() => Err(CliError::Usage(format!(
            "mixing angle must be a finite number of radians, got '{value}'"
        ))),
        other => Ok(other),
    }
}

pub(super) fn resolve_output_dir(output_dir: Option<PathBuf>) -> Result<PathBuf, CliError> {
    output_dir
        .filter(|path| !path.as_os_str().is_empty())
        .ok_or_else(|| {
            CliError::Compute(FluxError::io_system(
                "IO.PINCHED_OUTPUT_DIRECTORY",
                format!(
                    "no output directory configured; set {OUTPUT_DIR_ENV} or pass --output-dir"
                ),
            ))
        })
}

pub(super) const fn output_layout(layout: LayoutArg) -> OutputLayout {
    match layout {
        LayoutArg::Triple => OutputLayout::Triple,
        LayoutArg::Snowglobes => OutputLayout::Snowglobes,
    }
}
