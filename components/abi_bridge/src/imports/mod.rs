//! Import Dispatch Table
//!
//! Maps each `(module, name)` import a Go guest declares to a host handler.
//! Every handler receives the host context, linear memory and the guest
//! stack pointer; arguments and results live in the call frame at fixed
//! offsets from that pointer.
//!
//! # Examples
//!
//! ```
//! use abi_bridge::imports::ImportTable;
//!
//! let table = ImportTable::standard("go");
//! assert!(table.resolve("go", "runtime.wasmExit").is_ok());
//! assert!(table.resolve("env", "runtime.wasmExit").is_err());
//! ```

mod frame;
mod js;
mod runtime;

pub use frame::Frame;

use crate::context::HostContext;
use core_types::{HostError, HostResult};
use linear_memory::LinearMemory;
use std::collections::HashMap;

/// Signature shared by every import handler.
pub type ImportHandler = fn(&mut HostContext, &mut LinearMemory<'_>, u32) -> HostResult<()>;

/// A resolved import.
#[derive(Clone, Copy)]
pub struct Import {
    name: &'static str,
    handler: ImportHandler,
}

impl Import {
    /// Import field name, e.g. `syscall/js.valueGet`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the handler for one guest call.
    pub fn call(
        &self,
        ctx: &mut HostContext,
        memory: &mut LinearMemory<'_>,
        sp: u32,
    ) -> HostResult<()> {
        tracing::debug!(import = self.name, sp, "dispatch");
        (self.handler)(ctx, memory, sp)
    }
}

impl std::fmt::Debug for Import {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Import").field(&self.name).finish()
    }
}

const STANDARD: [(&str, ImportHandler); 20] = [
    ("runtime.wasmExit", runtime::wasm_exit),
    ("runtime.wasmWrite", runtime::wasm_write),
    ("runtime.nanotime", runtime::nanotime),
    ("runtime.walltime", runtime::walltime),
    ("runtime.scheduleTimeoutEvent", runtime::schedule_timeout_event),
    ("runtime.clearTimeoutEvent", runtime::clear_timeout_event),
    ("runtime.getRandomData", runtime::get_random_data),
    ("syscall/js.stringVal", js::string_val),
    ("syscall/js.valueGet", js::value_get),
    ("syscall/js.valueSet", js::value_set),
    ("syscall/js.valueIndex", js::value_index),
    ("syscall/js.valueSetIndex", js::value_set_index),
    ("syscall/js.valueCall", js::value_call),
    ("syscall/js.valueInvoke", js::value_invoke),
    ("syscall/js.valueNew", js::value_new),
    ("syscall/js.valueLength", js::value_length),
    ("syscall/js.valuePrepareString", js::value_prepare_string),
    ("syscall/js.valueLoadString", js::value_load_string),
    ("syscall/js.valueInstanceOf", js::value_instance_of),
    ("debug", runtime::debug),
];

/// Handlers for one import module.
#[derive(Debug)]
pub struct ImportTable {
    module: String,
    imports: HashMap<&'static str, Import>,
}

impl ImportTable {
    /// The full Go runtime and `syscall/js` surface under `module`.
    pub fn standard(module: impl Into<String>) -> Self {
        let imports = STANDARD
            .iter()
            .map(|&(name, handler)| (name, Import { name, handler }))
            .collect();
        ImportTable {
            module: module.into(),
            imports,
        }
    }

    /// Module name the guest imports from.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Every import name this table provides.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.imports.keys().copied()
    }

    /// Finds the handler for `module.name`.
    ///
    /// # Errors
    ///
    /// - `HostError::MissingImportModule` for any other module
    /// - `HostError::MissingImport` for an unknown name
    pub fn resolve(&self, module: &str, name: &str) -> HostResult<Import> {
        if module != self.module {
            return Err(HostError::MissingImportModule(module.to_string()));
        }
        self.imports
            .get(name)
            .copied()
            .ok_or_else(|| HostError::MissingImport {
                module: module.to_string(),
                name: name.to_string(),
            })
    }
}
