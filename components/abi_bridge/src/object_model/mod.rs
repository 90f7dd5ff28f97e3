//! Object/Property Model
//!
//! The minimal dynamic object surface a Go guest expects from its host:
//! property get/set, indexed access, method calls, constructors and length.
//! There is no prototype chain, deletion or enumeration.
//!
//! Plain property and element access lives on [`Heap`]; [`call`] and
//! [`construct`] need the whole [`HostContext`] because native callables may
//! allocate, write to file descriptors, or post pending events.

mod heap;
mod object;
mod typed_array;

pub use heap::Heap;
pub use object::{HostObject, NativeFn, ObjectKind};
pub use typed_array::{TypedArrayKind, TypedArrayView};

use crate::context::HostContext;
use core_types::{HostError, HostResult, Value};
use linear_memory::LinearMemory;

/// Invokes method `name` on `receiver` with `args`.
///
/// Returns the result and a success flag. The flag is always `true`: a
/// failing native is a host error, not a guest-visible exception.
///
/// # Errors
///
/// - `HostError::MissingMethod` if the receiver lacks `name`
/// - `HostError::TypeMismatch` if the receiver is not an object or the
///   property is not callable
pub fn call(
    ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    receiver: &Value,
    name: &str,
    args: Vec<Value>,
) -> HostResult<(Value, bool)> {
    let id = receiver.as_object("valueCall")?;
    let method = match ctx.heap().get(id, name) {
        Ok(method) => method,
        Err(HostError::MissingProperty(_)) => {
            return Err(HostError::MissingMethod(name.to_string()))
        }
        Err(other) => return Err(other),
    };
    let native = match &method {
        Value::Function(fid) => match ctx.heap().object(*fid)?.kind {
            ObjectKind::Function { call, .. } => call,
            _ => return Err(HostError::type_mismatch("valueCall", "function", method.describe())),
        },
        other => return Err(HostError::type_mismatch("valueCall", "function", other.describe())),
    };
    tracing::debug!(method = name, receiver = %id, argc = args.len(), "native call");
    let result = native(ctx, memory, receiver, args)?;
    Ok((result, true))
}

/// Invokes the constructor capability of `constructor` with `args`.
///
/// # Errors
///
/// `HostError::NotConstructor` if the object has no constructor capability.
pub fn construct(
    ctx: &mut HostContext,
    memory: &mut LinearMemory<'_>,
    constructor: &Value,
    args: Vec<Value>,
) -> HostResult<(Value, bool)> {
    let id = constructor.as_object("valueNew")?;
    let native = ctx
        .heap()
        .object(id)?
        .constructor
        .ok_or_else(|| HostError::NotConstructor(constructor.describe()))?;
    tracing::debug!(constructor = %id, argc = args.len(), "native construct");
    let result = native(ctx, memory, constructor, args)?;
    Ok((result, true))
}
