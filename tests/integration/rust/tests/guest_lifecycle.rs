//! Guest Lifecycle Integration Tests
//!
//! run/resume/exit through wasmtime, with writes captured in memory.

use abi_bridge::{BufferedSys, Guest, HostConfig};
use core_types::{ErrorKind, HostError};
use integration_tests::run_guest;
use wasm_host::{CliError, Runtime};

const HELLO_THEN_EXIT: &str = r#"
(module
  (import "go" "runtime.wasmWrite" (func $write (param i32)))
  (import "go" "runtime.wasmExit" (func $exit (param i32)))
  (memory (export "mem") 1)
  (data (i32.const 2048) "hello")
  (func (export "run") (param i32 i32)
    (i64.store (i32.const 1032) (i64.const 1))
    (i64.store (i32.const 1040) (i64.const 2048))
    (i32.store (i32.const 1048) (i32.const 5))
    (call $write (i32.const 1024))
    (i32.store (i32.const 1032) (i32.const 42))
    (call $exit (i32.const 1024)))
  (func (export "resume") unreachable))
"#;

#[test]
fn test_write_then_exit() {
    let (guest, outcome, sys) = run_guest(HELLO_THEN_EXIT);
    assert_eq!(outcome.unwrap(), 42);
    assert_eq!(sys.written(1), b"hello");
    assert_eq!(guest.unwrap().context().exit_code(), Some(42));
}

#[test]
fn test_runtime_with_capture() {
    let sys = BufferedSys::new();
    let code = Runtime::new(HostConfig::default())
        .with_sys(Box::new(sys.clone()))
        .execute_bytes(HELLO_THEN_EXIT.as_bytes())
        .unwrap();
    assert_eq!(code, 42);
    assert_eq!(sys.written(1), b"hello");
}

/// Exits from the third resume with the number of nanotime ticks it saw.
const COUNTING_RESUMES: &str = r#"
(module
  (import "go" "runtime.nanotime" (func $nanotime (param i32)))
  (import "go" "runtime.wasmExit" (func $exit (param i32)))
  (memory (export "mem") 1)
  (global $resumed (mut i32) (i32.const 0))
  (func (export "run") (param i32 i32))
  (func (export "resume")
    (global.set $resumed (i32.add (global.get $resumed) (i32.const 1)))
    (if (i32.eq (global.get $resumed) (i32.const 3))
      (then
        (call $nanotime (i32.const 1024))
        (i32.store (i32.const 1032)
          (i32.wrap_i64 (i64.div_u (i64.load (i32.const 1032)) (i64.const 1000))))
        (call $exit (i32.const 1024))))))
"#;

#[test]
fn test_resume_until_exit() {
    let (_, outcome, _) = run_guest(COUNTING_RESUMES);
    assert_eq!(outcome.unwrap(), 1);
}

#[test]
fn test_placeholder_import_is_unimplemented() {
    for import in [
        "runtime.walltime",
        "runtime.scheduleTimeoutEvent",
        "runtime.clearTimeoutEvent",
        "syscall/js.valueInvoke",
    ] {
        let wat = format!(
            r#"(module
                 (import "go" "{import}" (func $f (param i32)))
                 (memory (export "mem") 1)
                 (func (export "run") (param i32 i32) (call $f (i32.const 1024)))
                 (func (export "resume") unreachable))"#
        );
        let (guest, outcome, _) = run_guest(&wat);
        match outcome {
            Err(CliError::Host(err)) => {
                assert_eq!(err.kind(), ErrorKind::Unimplemented);
                assert!(matches!(&err, HostError::Unimplemented(name) if name == import));
            }
            other => panic!("{} finished with {:?}", import, other),
        }
        assert!(!guest.unwrap().context().exited());
    }
}

#[test]
fn test_missing_memory_export() {
    let (guest, outcome, _) = run_guest(
        r#"(module
             (memory 1)
             (func (export "run") (param i32 i32))
             (func (export "resume")))"#,
    );
    assert!(guest.is_none());
    assert!(matches!(
        outcome,
        Err(CliError::Host(HostError::MissingExport(name))) if name == "mem"
    ));
}
