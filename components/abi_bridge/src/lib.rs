//! Host side of the Go/WebAssembly `syscall/js` ABI.
//!
//! A Go program compiled for `GOOS=js GOARCH=wasm` talks to its host through
//! a fixed set of imports. Each import receives only a stack pointer; its
//! arguments and results sit in linear memory at fixed offsets from it, and
//! dynamic values travel as NaN-boxed 8-byte slots that either carry a
//! number inline or a handle into the host's reference table.
//!
//! # Overview
//!
//! - [`codec`] - NaN-boxed encoding and decoding of [`Value`](core_types::Value)s
//! - [`ReferenceTable`] - identity-preserving handle table
//! - [`object_model`] - objects, arrays, typed views and native callables
//! - [`bootstrap`] - the global, memory and environment objects
//! - [`ImportTable`] - `(module, name)` to handler dispatch
//! - [`HostContext`] - all mutable host state for one guest
//! - [`driver`] - run/resume lifecycle over an interpreter adapter
//!
//! # Examples
//!
//! ```
//! use abi_bridge::{BufferedSys, HostContext};
//! use core_types::Value;
//!
//! let mut ctx = HostContext::new(Box::new(BufferedSys::new()));
//! let mut bytes = vec![0u8; 64];
//! let mut memory = linear_memory::LinearMemory::new(&mut bytes);
//!
//! ctx.store_value(&mut memory, 8, &Value::from("hello")).unwrap();
//! assert_eq!(ctx.load_value(&memory, 8).unwrap(), Value::from("hello"));
//! assert_eq!(
//!     ctx.refs().lookup(&Value::from("hello")),
//!     Some(8),
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod bootstrap;
pub mod codec;
pub mod config;
pub mod context;
pub mod driver;
pub mod imports;
pub mod natives;
pub mod object_model;
pub mod reference_table;
pub mod sys;

pub use bootstrap::Environment;
pub use config::{ConfigError, HostConfig};
pub use context::HostContext;
pub use driver::{run_to_completion, Guest};
pub use imports::{Frame, Import, ImportHandler, ImportTable};
pub use reference_table::ReferenceTable;
pub use sys::{BufferedSys, HostSys, NativeSys, PositionedWrite};
