//! Host Environment Bootstrap
//!
//! Builds the object graph a Go guest finds when it starts: the global
//! scope, the memory object and the environment object. Everything is
//! configuration; the natives behind the callable entries live in
//! [`crate::natives`].

use crate::context::PENDING_EVENT;
use crate::natives;
use crate::object_model::{Heap, HostObject, ObjectKind, TypedArrayKind};
use core_types::{ObjectId, Value};

/// Identities of the bootstrap objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    /// Global scope
    pub global: ObjectId,
    /// `{buffer}` object handed to the guest as its memory
    pub memory: ObjectId,
    /// Array buffer aliasing linear memory
    pub memory_buffer: ObjectId,
    /// Environment object carrying `_makeFuncWrapper` and `_pendingEvent`
    pub environment: ObjectId,
}

/// Open flags published under `fs.constants`, taken from the host platform.
pub fn fs_constants() -> [(&'static str, i32); 6] {
    [
        ("O_WRONLY", libc::O_WRONLY),
        ("O_RDWR", libc::O_RDWR),
        ("O_CREAT", libc::O_CREAT),
        ("O_TRUNC", libc::O_TRUNC),
        ("O_APPEND", libc::O_APPEND),
        ("O_EXCL", libc::O_EXCL),
    ]
}

/// Allocates the bootstrap graph in `heap`.
pub fn build(heap: &mut Heap) -> Environment {
    let mut global = HostObject::plain();

    let object_ctor = HostObject::plain().with_constructor(natives::new_object);
    global
        .properties
        .insert("Object".into(), heap.alloc(object_ctor));
    let array_ctor = HostObject::plain().with_constructor(natives::new_array);
    global
        .properties
        .insert("Array".into(), heap.alloc(array_ctor));

    for kind in TypedArrayKind::ALL {
        let class = HostObject::with_kind(ObjectKind::TypedArrayClass(kind))
            .with_constructor(natives::new_typed_array);
        global
            .properties
            .insert(kind.name().into(), heap.alloc(class));
    }

    global
        .properties
        .insert("process".into(), heap.alloc(HostObject::plain()));

    let constants = HostObject::from_properties(
        fs_constants()
            .into_iter()
            .map(|(name, flag)| (name, Value::from(flag))),
    );
    let constants = heap.alloc(constants);
    let write = heap.alloc_function("fs.write", natives::fs_write);
    let fs = HostObject::from_properties([("constants", constants), ("write", write)]);
    global.properties.insert("fs".into(), heap.alloc(fs));

    let global = heap.insert(global);

    let memory_buffer = heap.insert(HostObject::with_kind(ObjectKind::ArrayBuffer));
    let memory = heap.insert(HostObject::from_properties([(
        "buffer",
        Value::Object(memory_buffer),
    )]));

    let make_func_wrapper = heap.alloc_function("_makeFuncWrapper", natives::make_func_wrapper);
    let environment = heap.insert(HostObject::from_properties([
        ("_makeFuncWrapper", make_func_wrapper),
        (PENDING_EVENT, Value::Null),
    ]));

    Environment {
        global,
        memory,
        memory_buffer,
        environment,
    }
}
