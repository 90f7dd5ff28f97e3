//! Guest lifecycle.
//!
//! The bridge does not execute WebAssembly itself. An interpreter adapter
//! implements [`Guest`] and [`run_to_completion`] drives it: one call to the
//! entry export, then the resume export until the guest records an exit
//! code.

use crate::config::HostConfig;
use crate::context::HostContext;
use core_types::HostError;

/// An instantiated guest module.
pub trait Guest {
    /// Error type of the interpreter; host errors must convert into it.
    type Error: From<HostError>;

    /// Calls export `export` with i32 arguments, discarding any results.
    fn invoke(&mut self, export: &str, args: &[i32]) -> Result<(), Self::Error>;

    /// Host state attached to this instance.
    fn context(&self) -> &HostContext;
}

/// Runs the guest until it exits and returns its exit code.
///
/// The entry export is invoked as `run(0, 0)` (no argc/argv).
pub fn run_to_completion<G: Guest>(guest: &mut G, config: &HostConfig) -> Result<i32, G::Error> {
    tracing::info!(export = %config.run_export, "starting guest");
    guest.invoke(&config.run_export, &[0, 0])?;

    let mut resumptions = 0u64;
    loop {
        if let Some(code) = guest.context().exit_code() {
            tracing::info!(code, resumptions, "guest exited");
            return Ok(code);
        }
        resumptions += 1;
        tracing::debug!(resumptions, "resuming guest");
        guest.invoke(&config.resume_export, &[])?;
    }
}
