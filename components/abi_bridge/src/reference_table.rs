//! Reference table: stable integer handles for host values.
//!
//! The guest never sees host values directly. Anything that cannot be
//! NaN-boxed inline is appended here once and addressed by its index from
//! then on. Entries are never removed; the guest process is short-lived.

use core_types::{HostError, HostResult, ObjectId, Value};
use std::collections::HashMap;

/// Handle of the NaN singleton.
pub const NAN: u32 = 0;
/// Handle of positive zero (the all-zero bit pattern means `undefined`).
pub const ZERO: u32 = 1;
/// Handle of `null`.
pub const NULL: u32 = 2;
/// Handle of `true`.
pub const TRUE: u32 = 3;
/// Handle of `false`.
pub const FALSE: u32 = 4;
/// Handle of the global object.
pub const GLOBAL: u32 = 5;
/// Handle of the memory object (`{buffer}`).
pub const MEMORY: u32 = 6;
/// Handle of the environment object the guest runtime talks to.
pub const ENVIRONMENT: u32 = 7;

/// Identity key for the reverse index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Identity {
    String(String),
    Object(ObjectId),
}

impl Identity {
    fn of(value: &Value) -> Option<Identity> {
        match value {
            Value::String(s) => Some(Identity::String(s.clone())),
            Value::Object(id) | Value::Function(id) => Some(Identity::Object(*id)),
            _ => None,
        }
    }
}

/// Append-only handle table with identity deduplication.
#[derive(Debug)]
pub struct ReferenceTable {
    values: Vec<Value>,
    handles: HashMap<Identity, u32>,
}

impl ReferenceTable {
    /// Builds the table with the fixed bootstrap entries.
    ///
    /// `global`, `memory` and `environment` become handles [`GLOBAL`],
    /// [`MEMORY`] and [`ENVIRONMENT`].
    pub fn with_bootstrap(global: ObjectId, memory: ObjectId, environment: ObjectId) -> Self {
        let mut table = ReferenceTable {
            values: vec![
                Value::Number(f64::NAN),
                Value::Number(0.0),
                Value::Null,
                Value::Boolean(true),
                Value::Boolean(false),
            ],
            handles: HashMap::new(),
        };
        for id in [global, memory, environment] {
            table.intern(&Value::Object(id));
        }
        table
    }

    /// Looks up the value behind `handle`.
    ///
    /// # Errors
    ///
    /// `HostError::InvalidHandle` for a handle never handed out.
    pub fn get(&self, handle: u32) -> HostResult<&Value> {
        self.values
            .get(handle as usize)
            .ok_or(HostError::InvalidHandle(handle))
    }

    /// Returns the handle for `value`, appending it on first sight.
    ///
    /// Singletons, NaN and `+0` map to their bootstrap handles and never grow
    /// the table. `undefined` and every other number travel inline and have
    /// no handle.
    pub fn intern(&mut self, value: &Value) -> Option<u32> {
        let identity = match value {
            Value::Undefined => return None,
            Value::Null => return Some(NULL),
            Value::Boolean(true) => return Some(TRUE),
            Value::Boolean(false) => return Some(FALSE),
            Value::Number(n) if n.is_nan() => return Some(NAN),
            Value::Number(n) if n.to_bits() == 0 => return Some(ZERO),
            Value::Number(_) => return None,
            other => Identity::of(other)?,
        };

        if let Some(handle) = self.handles.get(&identity) {
            return Some(*handle);
        }
        let handle = self.values.len() as u32;
        self.values.push(value.clone());
        self.handles.insert(identity, handle);
        Some(handle)
    }

    /// Returns the existing handle for `value` without interning it.
    pub fn lookup(&self, value: &Value) -> Option<u32> {
        Identity::of(value).and_then(|key| self.handles.get(&key).copied())
    }

    /// Number of entries, bootstrap entries included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false once bootstrapped.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
