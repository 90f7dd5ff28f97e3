use super::{Harness, SP};
use abi_bridge::BufferedSys;
use core_types::{ErrorKind, HostError, Value};

const ARGS: u64 = 4096;
const NAME: u64 = 8192;

/// `receiver[name](...args)` through `syscall/js.valueCall`.
fn call_method(h: &mut Harness, receiver: &Value, name: &str, args: &[Value]) -> Value {
    h.put_value(8, receiver);
    h.put_string(16, NAME, name);
    h.put_values(32, ARGS, args);
    h.call("syscall/js.valueCall").unwrap();
    assert_eq!(h.memory().get_u8(Harness::at(64)).unwrap(), 1);
    h.value(56)
}

/// `new class(...args)` through `syscall/js.valueNew`.
fn construct(h: &mut Harness, class: &Value, args: &[Value]) -> Value {
    h.put_value(8, class);
    h.put_values(16, ARGS, args);
    h.call("syscall/js.valueNew").unwrap();
    assert_eq!(h.memory().get_u8(Harness::at(48)).unwrap(), 1);
    h.value(40)
}

fn uint8_view(h: &mut Harness, addr: u64, bytes: &[u8]) -> Value {
    h.memory()
        .bytes_mut(addr, bytes.len() as u64)
        .unwrap()
        .copy_from_slice(bytes);
    let class = h.global("Uint8Array");
    let buffer = Value::Object(h.ctx.env().memory_buffer);
    construct(
        h,
        &class,
        &[buffer, Value::from(addr as i32), Value::from(bytes.len() as i32)],
    )
}

fn callback(h: &mut Harness, id: i32) -> Value {
    let env = Value::Object(h.ctx.env().environment);
    call_method(h, &env, "_makeFuncWrapper", &[Value::from(id)])
}

#[test]
fn test_exit_records_code() {
    let mut h = Harness::new();
    h.put_i32(8, 7);
    h.call("runtime.wasmExit").unwrap();
    assert_eq!(h.ctx.exit_code(), Some(7));
    assert!(h.ctx.exited());
}

#[test]
fn test_raw_write_hello() {
    let mut h = Harness::new();
    h.memory().bytes_mut(2048, 5).unwrap().copy_from_slice(b"hello");
    h.put_i64(8, 1);
    h.put_i64(16, 2048);
    h.put_i32(24, 5);
    h.call("runtime.wasmWrite").unwrap();
    assert_eq!(h.sys.written(1), b"hello");
    assert!(h.sys.written(2).is_empty());
}

#[test]
fn test_raw_write_outside_memory() {
    let mut h = Harness::new();
    h.put_i64(8, 1);
    h.put_i64(16, 64 * 1024 - 2);
    h.put_i32(24, 5);
    let err = h.call("runtime.wasmWrite").unwrap_err();
    assert!(matches!(err, HostError::OutOfBounds { .. }));
    assert!(h.sys.written(1).is_empty());
}

#[test]
fn test_nanotime_is_monotonic() {
    let mut h = Harness::new();
    h.call("runtime.nanotime").unwrap();
    let first = h.get_i64(8);
    h.call("runtime.nanotime").unwrap();
    let second = h.get_i64(8);
    assert_eq!(second - first, BufferedSys::TICK);
}

#[test]
fn test_random_data_fills_slice() {
    let mut h = Harness::new();
    h.put_i64(8, 3000);
    h.put_i64(16, 16);
    h.call("runtime.getRandomData").unwrap();
    let memory = h.memory();
    assert!(memory.bytes(3000, 16).unwrap().iter().all(|b| *b != 0));
    assert_eq!(memory.get_u8(3016).unwrap(), 0);
}

#[test]
fn test_debug_reports_stack_pointer() {
    let mut h = Harness::new();
    h.call("debug").unwrap();
    assert_eq!(h.sys.written(2), format!("DEBUG: {}\n", SP).as_bytes());
}

#[test]
fn test_unsupported_imports_fail_by_name() {
    for name in [
        "runtime.walltime",
        "runtime.scheduleTimeoutEvent",
        "runtime.clearTimeoutEvent",
        "syscall/js.stringVal",
        "syscall/js.valueInvoke",
        "syscall/js.valueInstanceOf",
    ] {
        let mut h = Harness::new();
        let err = h.call(name).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unimplemented, "{}", name);
        assert_eq!(err.to_string(), format!("not implemented: {}", name));
    }
}

#[test]
fn test_value_get_global_property() {
    let mut h = Harness::new();
    let global = Value::Object(h.ctx.env().global);
    h.put_value(8, &global);
    h.put_string(16, NAME, "fs");
    h.call("syscall/js.valueGet").unwrap();
    assert_eq!(h.value(32), h.global("fs"));
}

#[test]
fn test_value_get_missing_property() {
    let mut h = Harness::new();
    let global = Value::Object(h.ctx.env().global);
    h.put_value(8, &global);
    h.put_string(16, NAME, "navigator");
    let err = h.call("syscall/js.valueGet").unwrap_err();
    assert!(matches!(err, HostError::MissingProperty(name) if name == "navigator"));
}

#[test]
fn test_value_get_on_number_is_type_mismatch() {
    let mut h = Harness::new();
    h.put_value(8, &Value::from(12));
    h.put_string(16, NAME, "x");
    let err = h.call("syscall/js.valueGet").unwrap_err();
    assert!(matches!(err, HostError::TypeMismatch { .. }));
}

#[test]
fn test_value_set_then_get() {
    let mut h = Harness::new();
    let process = h.global("process");
    h.put_value(8, &process);
    h.put_string(16, NAME, "pid");
    h.put_value(32, &Value::from(41));
    h.call("syscall/js.valueSet").unwrap();

    h.put_value(32, &Value::Undefined);
    h.call("syscall/js.valueGet").unwrap();
    assert_eq!(h.value(32), Value::Number(41.0));
}

#[test]
fn test_invalid_handle_in_frame() {
    let mut h = Harness::new();
    h.put_i64(8, abi_bridge::codec::boxed(999, abi_bridge::codec::TypeFlag::Object) as i64);
    h.put_string(16, NAME, "x");
    let err = h.call("syscall/js.valueGet").unwrap_err();
    assert!(matches!(err, HostError::InvalidHandle(999)));
}

#[test]
fn test_fs_write_posts_single_pending_event() {
    let mut h = Harness::new();
    let view = uint8_view(&mut h, 3000, b"hello");
    let wrapper = callback(&mut h, 42);
    let fs = h.global("fs");

    let result = call_method(
        &mut h,
        &fs,
        "write",
        &[Value::from(1), view, Value::from(0), Value::from(5), Value::Null, wrapper],
    );

    assert_eq!(result, Value::Null);
    assert_eq!(h.sys.written(1), b"hello");
    assert!(h.sys.positioned_writes().is_empty());

    let heap = h.ctx.heap();
    let record = h.ctx.pending_event().unwrap().as_object("test").unwrap();
    assert_eq!(heap.get(record, "id").unwrap(), Value::Number(42.0));
    assert_eq!(heap.get(record, "this").unwrap(), Value::Null);
    let args = heap.get(record, "args").unwrap().as_object("test").unwrap();
    assert_eq!(heap.length(args).unwrap(), 2);
    assert_eq!(heap.index(args, 0).unwrap(), Value::Null);
    assert_eq!(heap.index(args, 1).unwrap(), Value::Number(5.0));
}

#[test]
fn test_fs_write_sub_range_at_position() {
    let mut h = Harness::new();
    let view = uint8_view(&mut h, 3000, b"xxhello");
    let wrapper = callback(&mut h, 1);
    let fs = h.global("fs");

    call_method(
        &mut h,
        &fs,
        "write",
        &[Value::from(9), view, Value::from(2), Value::from(3), Value::from(7), wrapper],
    );

    let writes = h.sys.positioned_writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].fd, 9);
    assert_eq!(writes[0].offset, 7);
    assert_eq!(writes[0].bytes, b"hel");
    assert!(h.sys.written(9).is_empty());
}

#[test]
fn test_fs_write_past_view_end() {
    let mut h = Harness::new();
    let view = uint8_view(&mut h, 3000, b"abc");
    let wrapper = callback(&mut h, 1);
    let fs = h.global("fs");

    h.put_value(8, &fs);
    h.put_string(16, NAME, "write");
    h.put_values(
        32,
        ARGS,
        &[Value::from(1), view, Value::from(2), Value::from(5), Value::Null, wrapper],
    );
    let err = h.call("syscall/js.valueCall").unwrap_err();
    assert!(matches!(err, HostError::IndexOutOfBounds { .. }));
    assert_eq!(h.ctx.pending_event().unwrap(), Value::Null);
}

#[test]
fn test_value_length_and_index() {
    let mut h = Harness::new();
    let view = uint8_view(&mut h, 3000, b"abcd");
    h.put_value(8, &view);
    h.call("syscall/js.valueLength").unwrap();
    assert_eq!(h.get_i64(16), 4);

    let array = h
        .ctx
        .heap_mut()
        .alloc_array(vec![Value::from("a"), Value::from(true)]);
    h.put_value(8, &array);
    h.put_i64(16, 1);
    h.call("syscall/js.valueIndex").unwrap();
    assert_eq!(h.value(24), Value::Boolean(true));

    h.put_value(24, &Value::from("b"));
    h.call("syscall/js.valueSetIndex").unwrap();
    h.put_value(24, &Value::Undefined);
    h.call("syscall/js.valueIndex").unwrap();
    assert_eq!(h.value(24), Value::from("b"));

    h.put_i64(16, 2);
    let err = h.call("syscall/js.valueIndex").unwrap_err();
    assert!(matches!(err, HostError::IndexOutOfBounds { index: 2, length: 2 }));
}

#[test]
fn test_prepare_and_load_string() {
    let mut h = Harness::new();
    h.put_value(8, &Value::from(1234.5));
    h.call("syscall/js.valuePrepareString").unwrap();
    let prepared = h.value(16);
    assert_eq!(prepared, Value::from("1234.5"));
    assert_eq!(h.get_i64(24), 6);

    h.put_value(8, &prepared);
    h.put_i64(16, 3000);
    h.put_i64(24, 4);
    h.call("syscall/js.valueLoadString").unwrap();
    let memory = h.memory();
    assert_eq!(memory.bytes(3000, 5).unwrap(), b"1234\0");
}

#[test]
fn test_prepare_string_conversions() {
    let mut h = Harness::new();
    let process = h.global("process");
    let array = h
        .ctx
        .heap_mut()
        .alloc_array(vec![Value::from(1), Value::Null, Value::from(2.5e-8)]);
    let cases = [
        (Value::from(1e21), "1e+21"),
        (Value::from(1e-7), "1e-7"),
        (Value::from(5e-324), "5e-324"),
        (Value::from(123e18), "123000000000000000000"),
        (Value::Undefined, "undefined"),
        (Value::Null, "null"),
        (Value::from(true), "true"),
        (process, "[object Object]"),
        (array, "1,,2.5e-8"),
    ];
    for (value, expected) in cases {
        h.put_value(8, &value);
        h.call("syscall/js.valuePrepareString").unwrap();
        assert_eq!(h.value(16), Value::from(expected));
        assert_eq!(h.get_i64(24), expected.len() as i64, "{}", expected);
    }
}

#[test]
fn test_load_string_converts_numbers() {
    let mut h = Harness::new();
    h.put_value(8, &Value::from(1e21));
    h.put_i64(16, 3000);
    h.put_i64(24, 16);
    h.call("syscall/js.valueLoadString").unwrap();
    let memory = h.memory();
    assert_eq!(memory.bytes(3000, 6).unwrap(), b"1e+21\0");
}

#[test]
fn test_frame_past_memory_end() {
    let mut h = Harness::new();
    let mut memory = linear_memory::LinearMemory::new(&mut h.bytes[..SP as usize + 4]);
    let import = abi_bridge::ImportTable::standard("go")
        .resolve("go", "runtime.wasmExit")
        .unwrap();
    let err = import.call(&mut h.ctx, &mut memory, SP).unwrap_err();
    assert!(matches!(err, HostError::OutOfBounds { .. }));
    assert!(!h.ctx.exited());
}
