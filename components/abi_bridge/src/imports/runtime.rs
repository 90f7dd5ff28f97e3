//! `runtime.*` imports and `debug`.

use super::frame::Frame;
use crate::context::HostContext;
use core_types::{HostError, HostResult};
use linear_memory::LinearMemory;

/// `runtime.wasmExit(code int32)`
pub fn wasm_exit(ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let code = Frame::new(sp).i32(memory, 8)?;
    tracing::info!(code, "guest exit");
    ctx.exit(code);
    Ok(())
}

/// `runtime.wasmWrite(fd uintptr, p unsafe.Pointer, n int32)`
pub fn wasm_write(ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let frame = Frame::new(sp);
    let fd = frame.i64(memory, 8)?;
    let ptr = frame.i64(memory, 16)? as u64;
    let len = u64::from(frame.i32(memory, 24)? as u32);
    let bytes = memory.bytes(ptr, len)?;
    let fd = i32::try_from(fd)
        .map_err(|_| HostError::type_mismatch("runtime.wasmWrite", "file descriptor", fd.to_string()))?;
    ctx.sys()
        .write(fd, bytes)
        .map_err(|err| HostError::io("write", err))?;
    Ok(())
}

/// `runtime.nanotime() int64`
pub fn nanotime(ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let now = ctx.sys().monotonic_nanos();
    Frame::new(sp).set_i64(memory, 8, now)
}

/// `runtime.walltime() (sec int64, nsec int32)`
pub fn walltime(_ctx: &mut HostContext, _memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    unimplemented_import("runtime.walltime", sp)
}

/// `runtime.scheduleTimeoutEvent(delay int64) int32`
pub fn schedule_timeout_event(
    _ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    sp: u32,
) -> HostResult<()> {
    let delay = Frame::new(sp).i64(memory, 8)?;
    tracing::debug!(delay, "timeout requested");
    unimplemented_import("runtime.scheduleTimeoutEvent", sp)
}

/// `runtime.clearTimeoutEvent(id int32)`
pub fn clear_timeout_event(
    _ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    sp: u32,
) -> HostResult<()> {
    let id = Frame::new(sp).i32(memory, 8)?;
    tracing::debug!(id, "timeout cleared");
    unimplemented_import("runtime.clearTimeoutEvent", sp)
}

/// `runtime.getRandomData(r []byte)`
pub fn get_random_data(
    ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    sp: u32,
) -> HostResult<()> {
    let buf = memory.load_slice_mut(Frame::new(sp).addr(8))?;
    ctx.sys()
        .fill_random(buf)
        .map_err(|err| HostError::io("getRandomData", err))
}

/// `debug(sp)`: prints the stack pointer on stderr.
pub fn debug(ctx: &mut HostContext, _memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let line = format!("DEBUG: {}\n", sp);
    ctx.sys()
        .write(2, line.as_bytes())
        .map_err(|err| HostError::io("debug", err))?;
    Ok(())
}

pub(super) fn unimplemented_import(name: &str, sp: u32) -> HostResult<()> {
    tracing::warn!(import = name, sp, "unsupported import called");
    Err(HostError::Unimplemented(name.to_string()))
}
