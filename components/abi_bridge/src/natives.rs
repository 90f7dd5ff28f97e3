//! Native callables installed by the bootstrap graph.
//!
//! Each function here has the [`NativeFn`](crate::object_model::NativeFn)
//! shape and is reached through `valueCall` or `valueNew`.

use crate::context::HostContext;
use crate::object_model::{HostObject, ObjectKind, TypedArrayView};
use core_types::{HostError, HostResult, ObjectId, Value};
use linear_memory::LinearMemory;

fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&Value::Undefined)
}

/// Reads a non-negative integral number argument.
fn whole_number(value: &Value, context: &'static str) -> HostResult<u64> {
    let n = value.as_number(context)?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 {
        Ok(n as u64)
    } else {
        Err(HostError::type_mismatch(
            context,
            "non-negative integer",
            value.describe(),
        ))
    }
}

/// `new Object()`
pub fn new_object(
    _ctx: &mut HostContext,
    _memory: &mut LinearMemory<'_>,
    _receiver: &Value,
    _args: Vec<Value>,
) -> HostResult<Value> {
    Err(HostError::Unimplemented("new Object".to_string()))
}

/// `new Array()`
pub fn new_array(
    _ctx: &mut HostContext,
    _memory: &mut LinearMemory<'_>,
    _receiver: &Value,
    _args: Vec<Value>,
) -> HostResult<Value> {
    Err(HostError::Unimplemented("new Array".to_string()))
}

/// `new <Kind>Array(buffer, byteOffset, length)`.
///
/// The element kind comes from the class object the guest constructed.
/// The window must lie inside linear memory when it is created.
pub fn new_typed_array(
    ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    receiver: &Value,
    args: Vec<Value>,
) -> HostResult<Value> {
    let class = receiver.as_object("typed array constructor")?;
    let kind = match ctx.heap().object(class)?.kind {
        ObjectKind::TypedArrayClass(kind) => kind,
        _ => return Err(HostError::NotConstructor(receiver.describe())),
    };

    let buffer = array_buffer(ctx, arg(&args, 0))?;
    let view = TypedArrayView {
        buffer,
        kind,
        byte_offset: whole_number(arg(&args, 1), kind.name())?,
        length: whole_number(arg(&args, 2), kind.name())?,
    };
    memory.range(view.byte_offset, view.byte_length())?;

    tracing::trace!(
        kind = kind.name(),
        offset = view.byte_offset,
        length = view.length,
        "typed view"
    );
    Ok(ctx.heap_mut().alloc(HostObject::with_kind(ObjectKind::TypedArray(view))))
}

fn array_buffer(ctx: &HostContext, value: &Value) -> HostResult<ObjectId> {
    let id = value.as_object("typed array constructor")?;
    match ctx.heap().object(id)?.kind {
        ObjectKind::ArrayBuffer => Ok(id),
        _ => Err(HostError::type_mismatch(
            "typed array constructor",
            "ArrayBuffer",
            value.describe(),
        )),
    }
}

/// `_makeFuncWrapper(id)`: wraps a guest callback id in a host object.
pub fn make_func_wrapper(
    ctx: &mut HostContext,
    _memory: &mut LinearMemory<'_>,
    _receiver: &Value,
    args: Vec<Value>,
) -> HostResult<Value> {
    let id = args.into_iter().next().unwrap_or(Value::Undefined);
    Ok(ctx
        .heap_mut()
        .alloc(HostObject::with_kind(ObjectKind::FuncWrapper { id })))
}

/// `fs.write(fd, buffer, offset, length, position, callback)`.
///
/// Writes `length` bytes starting `offset` bytes into the typed view, at
/// `position` when it is a number, then posts the completion as the single
/// pending event `{id: callback.id, this: null, args: [null, length]}`.
pub fn fs_write(
    ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    _receiver: &Value,
    args: Vec<Value>,
) -> HostResult<Value> {
    const CONTEXT: &str = "fs.write";

    let fd = arg(&args, 0).as_number(CONTEXT)? as i32;
    let view = match &ctx.heap().object(arg(&args, 1).as_object(CONTEXT)?)?.kind {
        ObjectKind::TypedArray(view) => view.clone(),
        _ => {
            return Err(HostError::type_mismatch(
                CONTEXT,
                "typed array",
                arg(&args, 1).describe(),
            ))
        }
    };
    let offset = whole_number(arg(&args, 2), CONTEXT)?;
    let length = whole_number(arg(&args, 3), CONTEXT)?;
    let callback_id = match &ctx.heap().object(arg(&args, 5).as_object(CONTEXT)?)?.kind {
        ObjectKind::FuncWrapper { id } => id.clone(),
        _ => {
            return Err(HostError::type_mismatch(
                CONTEXT,
                "callback wrapper",
                arg(&args, 5).describe(),
            ))
        }
    };

    let end = offset
        .checked_add(length)
        .filter(|end| *end <= view.byte_length())
        .ok_or(HostError::IndexOutOfBounds {
            index: i64::try_from(offset.saturating_add(length)).unwrap_or(i64::MAX),
            length: view.byte_length() as usize,
        })?;
    let bytes = &view.contents(memory)?[offset as usize..end as usize];

    let written = match arg(&args, 4) {
        position if position.is_nullish() => ctx.sys().write(fd, bytes),
        position => {
            let position = position.as_number(CONTEXT)? as i64;
            ctx.sys().pwrite(fd, bytes, position)
        }
    }
    .map_err(|err| HostError::io("write", err))?;
    tracing::debug!(fd, written, "fs.write");

    ctx.post_event(
        callback_id,
        Value::Null,
        vec![Value::Null, Value::Number(length as f64)],
    )?;
    Ok(Value::Null)
}
