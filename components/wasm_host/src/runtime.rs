//! Runtime orchestration for guest execution
//!
//! Loads the configuration and module, builds the host context and drives
//! the guest to completion.

use crate::error::{CliError, CliResult};
use crate::guest::WasmtimeGuest;
use abi_bridge::{run_to_completion, HostConfig, HostContext, HostSys, NativeSys};
use std::path::Path;

/// Runs Go guests against one configuration and syscall backend.
pub struct Runtime {
    config: HostConfig,
    sys: Box<dyn HostSys>,
}

impl Runtime {
    /// Runtime over the real process with `config`.
    ///
    /// # Example
    /// ```
    /// use abi_bridge::HostConfig;
    /// use wasm_host::Runtime;
    ///
    /// let runtime = Runtime::new(HostConfig::default());
    /// assert_eq!(runtime.config().run_export, "run");
    /// ```
    pub fn new(config: HostConfig) -> Self {
        Runtime {
            config,
            sys: Box::new(NativeSys::new()),
        }
    }

    /// Runtime configured from an optional JSON file.
    ///
    /// # Errors
    /// `CliError::Config` if the file cannot be read or parsed.
    pub fn from_config_file(path: Option<&Path>) -> CliResult<Self> {
        let config = match path {
            Some(path) => HostConfig::from_file(path)?,
            None => HostConfig::default(),
        };
        Ok(Self::new(config))
    }

    /// Replaces the syscall backend, e.g. with a capturing one in tests.
    pub fn with_sys(mut self, sys: Box<dyn HostSys>) -> Self {
        self.sys = sys;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Reads and runs the module at `path`, returning the guest's exit code.
    ///
    /// # Errors
    /// `CliError::ReadModule` if the file cannot be read, otherwise as
    /// [`Runtime::execute_bytes`].
    pub fn execute_file(self, path: &Path) -> CliResult<i32> {
        let wasm = std::fs::read(path).map_err(|source| CliError::ReadModule {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(module = %path.display(), bytes = wasm.len(), "module loaded");
        self.execute_bytes(&wasm)
    }

    /// Runs a module given as WebAssembly binary or text.
    ///
    /// # Errors
    /// `CliError::Host` for bridge failures (missing import or export,
    /// unsupported calls, protocol violations) and `CliError::Guest` for
    /// compilation failures and guest traps.
    pub fn execute_bytes(self, wasm: &[u8]) -> CliResult<i32> {
        let ctx = HostContext::new(self.sys);
        let mut guest = WasmtimeGuest::new(wasm, ctx, &self.config)?;
        let code = run_to_completion(&mut guest, &self.config)?;
        Ok(code)
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
