//! Command-line interface definitions for the `volname` binary.
//!
//! This module isolates the clap parser structures so the build script can
//! reuse them when generating the manual page.

use camino::Utf8PathBuf;
use clap::{Args, Parser};

/// Top-level command parser.
#[derive(Debug, Parser)]
#[command(
    name = "volname",
    version,
    about = "Resolve storage-compliant names for CSI-provisioned volumes",
    arg_required_else_help = true
)]
pub enum Cli {
    /// Sanitise a raw string into a valid volume name.
    #[command(name = "sanitize")]
    Sanitize(SanitizeCommand),
    /// Resolve the final name for a volume create request.
    #[command(name = "resolve")]
    Resolve(ResolveCommand),
}

/// Arguments for `volname sanitize`.
#[derive(Debug, Args)]
pub struct SanitizeCommand {
    /// Raw name to sanitise.
    pub raw: String,
}

/// Arguments for `volname resolve`.
#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Provisioner-generated name used when no claim metadata applies.
    #[arg(long, value_name = "NAME")]
    pub fallback_name: String,
    /// Request parameter as KEY=VALUE; may be repeated.
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
    /// JSON object of string request parameters. `--param` entries win.
    #[arg(long, value_name = "PATH")]
    pub params_file: Option<Utf8PathBuf>,
    /// Override the configured metadata strategy (parameters, annotations, none).
    #[arg(long, value_name = "MODE")]
    pub metadata_source: Option<String>,
    /// Override the configured CSI driver name.
    #[arg(long, value_name = "NAME")]
    pub driver_name: Option<String>,
}
