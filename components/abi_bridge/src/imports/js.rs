//! `syscall/js.*` imports: the dynamic value surface.

use super::frame::Frame;
use super::runtime::unimplemented_import;
use crate::context::HostContext;
use crate::object_model;
use core_types::{HostResult, Value};
use linear_memory::LinearMemory;

/// `stringVal(value string) ref`
pub fn string_val(_ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let value = Frame::new(sp).string(memory, 8)?;
    tracing::debug!(len = value.len(), "stringVal");
    unimplemented_import("syscall/js.stringVal", sp)
}

/// `valueGet(v ref, p string) ref`
pub fn value_get(ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let frame = Frame::new(sp);
    let target = frame.value(ctx, memory, 8)?.as_object("valueGet")?;
    let name = frame.string(memory, 16)?;
    let result = ctx.heap().get(target, &name)?;
    frame.set_value(ctx, memory, 32, &result)
}

/// `valueSet(v ref, p string, x ref)`
pub fn value_set(ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let frame = Frame::new(sp);
    let target = frame.value(ctx, memory, 8)?.as_object("valueSet")?;
    let name = frame.string(memory, 16)?;
    let value = frame.value(ctx, memory, 32)?;
    ctx.heap_mut().set(target, &name, value)
}

/// `valueIndex(v ref, i int) ref`
pub fn value_index(ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let frame = Frame::new(sp);
    let target = frame.value(ctx, memory, 8)?.as_object("valueIndex")?;
    let index = frame.i64(memory, 16)?;
    let result = ctx.heap().index(target, index)?;
    frame.set_value(ctx, memory, 24, &result)
}

/// `valueSetIndex(v ref, i int, x ref)`
pub fn value_set_index(
    ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    sp: u32,
) -> HostResult<()> {
    let frame = Frame::new(sp);
    let target = frame.value(ctx, memory, 8)?.as_object("valueSetIndex")?;
    let index = frame.i64(memory, 16)?;
    let value = frame.value(ctx, memory, 24)?;
    ctx.heap_mut().set_index(target, index, value)
}

/// `valueCall(v ref, m string, args []ref) (ref, bool)`
pub fn value_call(ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let frame = Frame::new(sp);
    let receiver = frame.value(ctx, memory, 8)?;
    let name = frame.string(memory, 16)?;
    let args = frame.values(ctx, memory, 32)?;
    let (result, ok) = object_model::call(ctx, memory, &receiver, &name, args)?;
    frame.set_value(ctx, memory, 56, &result)?;
    frame.set_bool(memory, 64, ok)
}

/// `valueInvoke(v ref, args []ref) (ref, bool)`
pub fn value_invoke(ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let frame = Frame::new(sp);
    let callee = frame.value(ctx, memory, 8)?;
    let args = frame.values(ctx, memory, 16)?;
    tracing::debug!(callee = %callee.describe(), argc = args.len(), "valueInvoke");
    unimplemented_import("syscall/js.valueInvoke", sp)
}

/// `valueNew(v ref, args []ref) (ref, bool)`
pub fn value_new(ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let frame = Frame::new(sp);
    let constructor = frame.value(ctx, memory, 8)?;
    let args = frame.values(ctx, memory, 16)?;
    let (result, ok) = object_model::construct(ctx, memory, &constructor, args)?;
    frame.set_value(ctx, memory, 40, &result)?;
    frame.set_bool(memory, 48, ok)
}

/// `valueLength(v ref) int`
pub fn value_length(ctx: &mut HostContext, memory: &mut LinearMemory<'_>, sp: u32) -> HostResult<()> {
    let frame = Frame::new(sp);
    let target = frame.value(ctx, memory, 8)?.as_object("valueLength")?;
    let length = ctx.heap().length(target)?;
    frame.set_i64(memory, 16, length as i64)
}

/// `valuePrepareString(v ref) (ref, int)`
///
/// Converts `v` to a string value and reports its UTF-8 length so the guest
/// can size the buffer it passes to `valueLoadString`. Arrays join their
/// elements; typed views do not read their contents and come out as
/// `[object Object]`.
pub fn value_prepare_string(
    ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    sp: u32,
) -> HostResult<()> {
    let frame = Frame::new(sp);
    let value = frame.value(ctx, memory, 8)?;
    let text = ctx.heap().stringify(&value);
    let len = text.len() as i64;
    frame.set_value(ctx, memory, 16, &Value::String(text))?;
    frame.set_i64(memory, 24, len)
}

/// `valueLoadString(v ref, b []byte)`
///
/// Copies as much of the string as fits into `b`.
pub fn value_load_string(
    ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    sp: u32,
) -> HostResult<()> {
    let frame = Frame::new(sp);
    let value = frame.value(ctx, memory, 8)?;
    let text = ctx.heap().stringify(&value);
    let dst = memory.load_slice_mut(frame.addr(16))?;
    let n = dst.len().min(text.len());
    dst[..n].copy_from_slice(&text.as_bytes()[..n]);
    Ok(())
}

/// `valueInstanceOf(v ref, t ref) bool`
pub fn value_instance_of(
    ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    sp: u32,
) -> HostResult<()> {
    let frame = Frame::new(sp);
    let value = frame.value(ctx, memory, 8)?;
    let class = frame.value(ctx, memory, 16)?;
    tracing::debug!(value = %value.describe(), class = %class.describe(), "valueInstanceOf");
    unimplemented_import("syscall/js.valueInstanceOf", sp)
}
