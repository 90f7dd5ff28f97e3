//! Integration test suite for the Go/WebAssembly host
//!
//! These tests load WebAssembly text guests into wasmtime through
//! `wasm_host` and check what the bridge observed through a capturing
//! syscall backend.

/// Re-export components for test convenience
pub mod components {
    pub use abi_bridge;
    pub use core_types;
    pub use linear_memory;
    pub use wasm_host;
}

use abi_bridge::{run_to_completion, BufferedSys, HostConfig, HostContext};
use wasm_host::WasmtimeGuest;

/// Instantiates `wat` over a fresh capture and runs it to completion.
///
/// Returns the guest, its exit code (or the error that stopped it) and the
/// capture probe.
pub fn run_guest(wat: &str) -> (Option<WasmtimeGuest>, Result<i32, wasm_host::CliError>, BufferedSys) {
    let sys = BufferedSys::new();
    let config = HostConfig::default();
    let ctx = HostContext::new(Box::new(sys.clone()));
    let mut guest = match WasmtimeGuest::new(wat.as_bytes(), ctx, &config) {
        Ok(guest) => guest,
        Err(err) => return (None, Err(err.into()), sys),
    };
    let outcome = run_to_completion(&mut guest, &config).map_err(Into::into);
    (Some(guest), outcome, sys)
}
