//! Error types for the CLI

use abi_bridge::ConfigError;
use core_types::HostError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that stops the host before the guest exits.
#[derive(Debug, Error)]
pub enum CliError {
    /// The module file could not be read
    #[error("cannot read module {path}: {source}")]
    ReadModule {
        /// Module path given on the command line
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A bridge operation failed
    #[error(transparent)]
    Host(#[from] HostError),

    /// Compilation, instantiation or a guest trap
    #[error("{0:#}")]
    Guest(anyhow::Error),
}

impl From<anyhow::Error> for CliError {
    /// Host errors raised inside an import come back wrapped in the
    /// interpreter's trap; unwrap them so they keep their own message.
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<HostError>() {
            Ok(host) => CliError::Host(host),
            Err(other) => CliError::Guest(other),
        }
    }
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// Setup I/O and configuration failures exit with 1; anything that goes
    /// wrong once the guest is loaded is fatal and exits with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ReadModule { .. } | CliError::Config(_) => 1,
            CliError::Host(_) | CliError::Guest(_) => 2,
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
