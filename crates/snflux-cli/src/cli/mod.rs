mod commands;
mod helpers;

use clap::Parser;
use snflux_core::domain::FluxError;
use snflux_core::modules::pinched::{DEFAULT_PARAMETER_FILE, OUTPUT_DIR_ENV};
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(error) = helpers::init_logging() {
        eprintln!("warning: {error:#}");
    }

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let flux_error = error.as_flux_error();
            eprintln!("{}", flux_error.diagnostic_line());
            if let Some(summary_line) = flux_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            flux_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("pinched".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    match Cli::try_parse_from(&full_args) {
        Ok(cli) => commands::run_pinched_command(cli),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// Writes pinched supernova neutrino flux tables, one per parameter record.
///
/// With a non-zero TH12 the adiabatic MSW tables for the normal and
/// inverted hierarchies are written to `nh/` and `ih/` as well.
#[derive(Parser)]
#[command(name = "pinched", version, about = "Pinched supernova neutrino flux tables")]
struct Cli {
    /// Mixing angle theta12 in radians; absent or zero assumes no oscillations
    #[arg(value_name = "TH12", allow_negative_numbers = true)]
    theta12: Option<f64>,

    /// Parameter file, one record per line
    #[arg(long, default_value = DEFAULT_PARAMETER_FILE)]
    input: PathBuf,

    /// Output directory for flux tables
    #[arg(long, env = OUTPUT_DIR_ENV)]
    output_dir: Option<PathBuf>,

    /// Column layout of the flux tables
    #[arg(long, value_enum, default_value_t = LayoutArg::Triple)]
    layout: LayoutArg,

    /// Write a JSON run summary to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum LayoutArg {
    /// E nue nuebar nux
    Triple,
    /// E nue numu nutau nuebar numubar nutaubar
    Snowglobes,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(FluxError),
}

impl CliError {
    fn as_flux_error(&self) -> FluxError {
        match self {
            Self::Usage(message) => {
                FluxError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, CliError, LayoutArg};
    use clap::Parser;
    use snflux_core::domain::{FluxError, FluxErrorCategory};

    #[test]
    fn angle_is_optional_and_may_be_negative() {
        let cli = Cli::try_parse_from(["pinched", "--output-dir", "out"]).expect("parse");
        assert_eq!(cli.theta12, None);
        assert_eq!(cli.layout, LayoutArg::Triple);
        assert_eq!(cli.input.to_str(), Some("pinched_info.dat"));

        let cli = Cli::try_parse_from(["pinched", "-0.59", "--layout", "snowglobes"])
            .expect("parse");
        assert_eq!(cli.theta12, Some(-0.59));
        assert_eq!(cli.layout, LayoutArg::Snowglobes);
    }

    #[test]
    fn second_positional_is_rejected() {
        assert!(Cli::try_parse_from(["pinched", "0.59", "0.1"]).is_err());
    }

    #[test]
    fn cli_errors_map_to_exit_codes() {
        let usage = CliError::Usage("unexpected argument '0.1'\n".to_string()).as_flux_error();
        assert_eq!(usage.category(), FluxErrorCategory::InputValidationError);
        assert_eq!(usage.exit_code(), 2);
        assert_eq!(usage.message(), "unexpected argument '0.1'");

        let compute = CliError::Compute(FluxError::io_system("IO.PINCHED_INPUT_READ", "missing"))
            .as_flux_error();
        assert_eq!(compute.exit_code(), 3);

        let internal =
            CliError::Compute(FluxError::internal("SYS.PINCHED_REPORT_SERIALIZE", "bad float"))
                .as_flux_error();
        assert_eq!(internal.exit_code(), 5);
    }
}
