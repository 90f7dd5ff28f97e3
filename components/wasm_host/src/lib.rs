//! Go/WebAssembly Host CLI Library
//!
//! Provides the [`Runtime`] that loads a Go-compiled module into wasmtime,
//! links the `abi_bridge` imports and drives the guest until it exits.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod error;
pub mod guest;
pub mod logging;
pub mod runtime;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use guest::WasmtimeGuest;
pub use logging::{LogFormat, LogLevel};
pub use runtime::Runtime;
