//! Binary entry point for the `volname` CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use volname::{
    ConfigError, NameError, NameResolver, ParamsError, ProvisionRequest, VolnameConfig,
    load_parameters, sanitize_volume_name,
};

mod cli;

use cli::{Cli, ResolveCommand, SanitizeCommand};

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("parameter error: {0}")]
    Params(#[from] ParamsError),
    #[error("volume name error: {0}")]
    Name(#[from] NameError),
    #[error("failed to write output: {0}")]
    Output(String),
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let exit_code = match dispatch(cli, &mut io::stdout()) {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn dispatch(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    match cli {
        Cli::Sanitize(args) => run_sanitize(&args, out),
        Cli::Resolve(args) => {
            let config = VolnameConfig::load_without_cli_args()?;
            run_resolve(&args, config, out)
        }
    }
}

fn run_sanitize(args: &SanitizeCommand, out: &mut impl Write) -> Result<(), CliError> {
    let name = sanitize_volume_name(&args.raw)?;
    write_name(out, &name)
}

fn run_resolve(
    args: &ResolveCommand,
    mut config: VolnameConfig,
    out: &mut impl Write,
) -> Result<(), CliError> {
    apply_overrides(&mut config, args);

    let parameters = load_parameters(args.params_file.as_deref(), &args.params)?;
    let request = ProvisionRequest::from_parameters(args.fallback_name.as_str(), &parameters);
    let resolver = NameResolver::new(config.build_source()?);
    let name = resolver.resolve(&request)?;

    write_name(out, &name)
}

fn apply_overrides(config: &mut VolnameConfig, args: &ResolveCommand) {
    if let Some(mode) = &args.metadata_source {
        config.metadata_source.clone_from(mode);
    }
    if let Some(driver) = &args.driver_name {
        config.driver_name.clone_from(driver);
    }
}

fn write_name(out: &mut impl Write, name: &str) -> Result<(), CliError> {
    writeln!(out, "{name}").map_err(|err| CliError::Output(err.to_string()))
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
