//! Call-frame access relative to the guest stack pointer.

use crate::context::HostContext;
use core_types::{HostResult, Value};
use linear_memory::LinearMemory;

/// The argument and result area of one import call.
///
/// Offsets are the byte positions the Go toolchain assigns to each argument
/// and result, counted from the stack pointer the guest passes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    sp: u64,
}

impl Frame {
    /// Frame at stack pointer `sp`.
    pub fn new(sp: u32) -> Self {
        Frame { sp: u64::from(sp) }
    }

    /// Absolute address of `offset`.
    pub fn addr(&self, offset: u64) -> u64 {
        self.sp + offset
    }

    /// Reads an `int32` argument.
    pub fn i32(&self, memory: &LinearMemory<'_>, offset: u64) -> HostResult<i32> {
        memory.get_i32(self.addr(offset))
    }

    /// Reads an `int64` argument.
    pub fn i64(&self, memory: &LinearMemory<'_>, offset: u64) -> HostResult<i64> {
        memory.get_i64(self.addr(offset))
    }

    /// Writes an `int64` result.
    pub fn set_i64(&self, memory: &mut LinearMemory<'_>, offset: u64, value: i64) -> HostResult<()> {
        memory.set_i64(self.addr(offset), value)
    }

    /// Writes a Go `bool`.
    pub fn set_bool(&self, memory: &mut LinearMemory<'_>, offset: u64, value: bool) -> HostResult<()> {
        memory.set_u8(self.addr(offset), u8::from(value))
    }

    /// Reads the Go string whose header sits at `offset`.
    pub fn string(&self, memory: &LinearMemory<'_>, offset: u64) -> HostResult<String> {
        memory.load_string(self.addr(offset))
    }

    /// Decodes the value slot at `offset`.
    pub fn value(
        &self,
        ctx: &HostContext,
        memory: &LinearMemory<'_>,
        offset: u64,
    ) -> HostResult<Value> {
        ctx.load_value(memory, self.addr(offset))
    }

    /// Decodes the `[]ref` slice whose header sits at `offset`.
    pub fn values(
        &self,
        ctx: &HostContext,
        memory: &LinearMemory<'_>,
        offset: u64,
    ) -> HostResult<Vec<Value>> {
        ctx.load_values(memory, self.addr(offset))
    }

    /// Encodes `value` into the slot at `offset`.
    pub fn set_value(
        &self,
        ctx: &mut HostContext,
        memory: &mut LinearMemory<'_>,
        offset: u64,
        value: &Value,
    ) -> HostResult<()> {
        ctx.store_value(memory, self.addr(offset), value)
    }
}
