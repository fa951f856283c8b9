use super::helpers::{output_layout, resolve_output_dir, resolve_theta12};
use super::{Cli, CliError};
use snflux_core::domain::RunConfig;
use snflux_core::modules::{ModuleExecutor, PinchedModule};
use tracing::debug;

pub(super) fn run_pinched_command(cli: Cli) -> Result<i32, CliError> {
    let theta12 = resolve_theta12(cli.theta12)?;
    let output_dir = resolve_output_dir(cli.output_dir)?;

    let mut config = RunConfig::new(cli.input, output_dir).with_layout(output_layout(cli.layout));
    if let Some(theta12) = theta12 {
        config = config.with_theta12(theta12);
    }
    if let Some(report) = cli.report {
        config = config.with_report_path(report);
    }

    debug!(
        input = %config.input_path.display(),
        output_dir = %config.output_dir.display(),
        layout = ?config.layout,
        "resolved run configuration"
    );

    let summary = PinchedModule::new()
        .execute(&config)
        .map_err(CliError::Compute)?;

    println!(
        "Wrote {} flux tables for {} records to '{}'.",
        summary.output_count(),
        summary.records.len(),
        config.output_dir.display()
    );
    Ok(0)
}
