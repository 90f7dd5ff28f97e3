//! Wasmtime adapter for the bridge's [`Guest`] contract.
//!
//! Every import the module declares is resolved against the bridge's
//! [`ImportTable`] before instantiation, so an unknown import is reported
//! by name rather than as a generic link failure. Each resolved handler is
//! linked as a `(param i32)` host function that borrows linear memory and
//! the [`HostContext`] for the duration of the call.

use abi_bridge::{Guest, HostConfig, HostContext, Import, ImportTable};
use anyhow::Context as _;
use core_types::HostError;
use linear_memory::LinearMemory;
use wasmtime::{Caller, Engine, Extern, Instance, Linker, Module, Store, Val};

/// A guest module instantiated under wasmtime.
pub struct WasmtimeGuest {
    store: Store<HostContext>,
    instance: Instance,
}

impl WasmtimeGuest {
    /// Compiles `wasm` (binary or text format), links the bridge imports and
    /// instantiates it with `ctx` as its host state.
    ///
    /// # Errors
    ///
    /// - `HostError::MissingImportModule` / `HostError::MissingImport` for
    ///   an import the bridge does not provide
    /// - `HostError::MissingExport` if the memory, entry or resume export
    ///   is absent
    /// - an `anyhow` error for compilation or instantiation failures
    pub fn new(wasm: &[u8], ctx: HostContext, config: &HostConfig) -> anyhow::Result<Self> {
        let engine = Engine::default();
        let module = Module::new(&engine, wasm).context("compile module")?;
        let table = ImportTable::standard(config.import_module.as_str());

        let mut linker = Linker::new(&engine);
        linker.allow_shadowing(true);
        for import in module.imports() {
            let resolved = table.resolve(import.module(), import.name())?;
            link(&mut linker, import.module(), resolved, &config.memory_export)?;
        }
        tracing::debug!(imports = module.imports().len(), "imports linked");

        for export in [
            &config.memory_export,
            &config.run_export,
            &config.resume_export,
        ] {
            if module.get_export(export).is_none() {
                return Err(HostError::MissingExport(export.clone()).into());
            }
        }

        let mut store = Store::new(&engine, ctx);
        let instance = linker
            .instantiate(&mut store, &module)
            .context("instantiate module")?;
        Ok(WasmtimeGuest { store, instance })
    }
}

fn link(
    linker: &mut Linker<HostContext>,
    module: &str,
    import: Import,
    memory_export: &str,
) -> anyhow::Result<()> {
    let memory_export = memory_export.to_string();
    linker.func_wrap(
        module,
        import.name(),
        move |mut caller: Caller<'_, HostContext>, sp: i32| -> anyhow::Result<()> {
            let memory = caller
                .get_export(&memory_export)
                .and_then(Extern::into_memory)
                .ok_or_else(|| HostError::MissingExport(memory_export.clone()))?;
            let (data, ctx) = memory.data_and_store_mut(&mut caller);
            let mut memory = LinearMemory::new(data);
            import.call(ctx, &mut memory, sp as u32)?;
            Ok(())
        },
    )?;
    Ok(())
}

impl Guest for WasmtimeGuest {
    type Error = anyhow::Error;

    fn invoke(&mut self, export: &str, args: &[i32]) -> anyhow::Result<()> {
        let func = self
            .instance
            .get_func(&mut self.store, export)
            .ok_or_else(|| HostError::MissingExport(export.to_string()))?;
        let params: Vec<Val> = args.iter().copied().map(Val::I32).collect();
        let mut results = vec![Val::I32(0); func.ty(&self.store).results().len()];
        func.call(&mut self.store, &params, &mut results)?;
        Ok(())
    }

    fn context(&self) -> &HostContext {
        self.store.data()
    }
}

impl std::fmt::Debug for WasmtimeGuest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WasmtimeGuest")
            .field("context", self.store.data())
            .finish()
    }
}
