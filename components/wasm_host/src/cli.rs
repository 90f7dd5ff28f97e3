//! Command-line arguments

use crate::logging::{LogFormat, LogLevel};
use clap::Parser;
use std::path::PathBuf;

/// Run a Go-compiled WebAssembly module.
///
/// The process exits with the status the guest passes to its exit call.
#[derive(Parser, Debug)]
#[command(name = "wasm-host", version, about)]
pub struct Cli {
    /// WebAssembly module (binary or text format)
    #[arg(value_name = "MODULE")]
    pub module: PathBuf,

    /// JSON file overriding the import module and export names
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum level of host diagnostics; RUST_LOG takes precedence
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Diagnostic output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
