//! Host context: all mutable host state for one guest.
//!
//! Built once at startup and threaded into every import handler and native
//! callable. The interpreter stores it as its per-instance data, so import
//! handlers borrow it alongside linear memory and nothing is global.

use crate::bootstrap::{self, Environment};
use crate::codec;
use crate::object_model::Heap;
use crate::reference_table::ReferenceTable;
use crate::sys::HostSys;
use core_types::{HostResult, ObjectId, Value};
use linear_memory::LinearMemory;

/// Name of the environment slot holding the single pending callback record.
pub const PENDING_EVENT: &str = "_pendingEvent";

/// Mutable state shared by every import call.
pub struct HostContext {
    heap: Heap,
    refs: ReferenceTable,
    env: Environment,
    sys: Box<dyn HostSys>,
    exit_code: Option<i32>,
}

impl HostContext {
    /// Builds the bootstrap object graph and reference table.
    pub fn new(sys: Box<dyn HostSys>) -> Self {
        let mut heap = Heap::new();
        let env = bootstrap::build(&mut heap);
        let refs = ReferenceTable::with_bootstrap(env.global, env.memory, env.environment);
        HostContext {
            heap,
            refs,
            env,
            sys,
            exit_code: None,
        }
    }

    /// The object heap.
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// The object heap, mutably.
    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    /// The reference table.
    pub fn refs(&self) -> &ReferenceTable {
        &self.refs
    }

    /// Identities of the bootstrap objects.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The syscall backend.
    pub fn sys(&mut self) -> &mut dyn HostSys {
        self.sys.as_mut()
    }

    /// Records the guest's exit code and marks it terminated.
    pub fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }

    /// Exit code, once the guest has called its exit import.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Whether the guest has terminated.
    pub fn exited(&self) -> bool {
        self.exit_code.is_some()
    }

    /// Decodes the value slot at `addr`.
    pub fn load_value(&self, memory: &LinearMemory<'_>, addr: u64) -> HostResult<Value> {
        codec::load_value(memory, addr, &self.refs)
    }

    /// Decodes the `[]ref` slice whose header is at `addr`.
    pub fn load_values(&self, memory: &LinearMemory<'_>, addr: u64) -> HostResult<Vec<Value>> {
        codec::load_values(memory, addr, &self.refs)
    }

    /// Encodes `value` into the slot at `addr`.
    pub fn store_value(
        &mut self,
        memory: &mut LinearMemory<'_>,
        addr: u64,
        value: &Value,
    ) -> HostResult<()> {
        codec::store_value(memory, addr, value, &mut self.refs)
    }

    /// Current content of the pending-event slot.
    pub fn pending_event(&self) -> HostResult<Value> {
        self.heap.get(self.env.environment, PENDING_EVENT)
    }

    /// Replaces the pending-event slot with a `{id, this, args}` record.
    ///
    /// The guest drains the slot itself on its next resumption.
    pub fn post_event(&mut self, id: Value, this: Value, args: Vec<Value>) -> HostResult<ObjectId> {
        let args = self.heap.alloc_array(args);
        let record = self.heap.alloc(crate::object_model::HostObject::from_properties([
            ("id", id),
            ("this", this),
            ("args", args),
        ]));
        let record_id = record.as_object("pending event")?;
        self.heap.set(self.env.environment, PENDING_EVENT, record)?;
        Ok(record_id)
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext")
            .field("objects", &self.heap.len())
            .field("references", &self.refs.len())
            .field("exit_code", &self.exit_code)
            .finish()
    }
}
