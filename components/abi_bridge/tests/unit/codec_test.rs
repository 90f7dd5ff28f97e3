use abi_bridge::codec::{self, boxed, TypeFlag, NAN_HEAD};
use abi_bridge::reference_table::{self, ReferenceTable};
use core_types::{ErrorKind, HostError, ObjectId, Value};

fn table() -> ReferenceTable {
    ReferenceTable::with_bootstrap(
        ObjectId::from_raw(100),
        ObjectId::from_raw(101),
        ObjectId::from_raw(102),
    )
}

#[test]
fn test_numbers_round_trip_bit_exact() {
    let mut table = table();
    let samples = [
        1.0,
        -1.5,
        -0.0,
        f64::MIN_POSITIVE / 4.0,
        f64::MAX,
        f64::MIN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        9007199254740993.0,
    ];
    for n in samples {
        let bits = codec::encode(&Value::Number(n), &mut table);
        assert_eq!(bits, n.to_bits(), "{} must be stored inline", n);
        match codec::decode(bits, &table).unwrap() {
            Value::Number(back) => assert_eq!(back.to_bits(), n.to_bits()),
            other => panic!("decoded {:?}", other),
        }
    }
    assert_eq!(table.len(), 8);
}

#[test]
fn test_zero_and_nan_use_bootstrap_handles() {
    let mut table = table();
    let zero = codec::encode(&Value::Number(0.0), &mut table);
    assert_eq!(zero, (u64::from(NAN_HEAD) << 32) | 1);
    assert_eq!(codec::decode(zero, &table).unwrap(), Value::Number(0.0));

    let nan = codec::encode(&Value::Number(f64::NAN), &mut table);
    assert_eq!(nan, u64::from(NAN_HEAD) << 32);
    match codec::decode(nan, &table).unwrap() {
        Value::Number(n) => assert!(n.is_nan()),
        other => panic!("decoded {:?}", other),
    }
}

#[test]
fn test_zero_bits_are_undefined() {
    let mut table = table();
    assert_eq!(codec::encode(&Value::Undefined, &mut table), 0);
    assert_eq!(codec::decode(0, &table).unwrap(), Value::Undefined);
}

#[test]
fn test_singletons_are_stable_in_any_order() {
    let mut table = table();
    let before = table.len();
    let singletons = [
        Value::Boolean(false),
        Value::Null,
        Value::Number(f64::NAN),
        Value::Boolean(true),
        Value::Number(0.0),
        Value::Null,
    ];
    for value in singletons.iter().chain(singletons.iter().rev()) {
        codec::encode(value, &mut table);
    }
    assert_eq!(table.len(), before);
    assert_eq!(
        codec::encode(&Value::Null, &mut table),
        boxed(reference_table::NULL, TypeFlag::Object)
    );
    assert_eq!(
        codec::encode(&Value::Boolean(true), &mut table),
        boxed(reference_table::TRUE, TypeFlag::Object)
    );
    assert_eq!(
        codec::encode(&Value::Boolean(false), &mut table),
        boxed(reference_table::FALSE, TypeFlag::Object)
    );
}

#[test]
fn test_objects_round_trip_by_identity() {
    let mut table = table();
    let a = Value::Object(ObjectId::from_raw(7));
    let b = Value::Object(ObjectId::from_raw(8));

    let first = codec::encode(&a, &mut table);
    let second = codec::encode(&a, &mut table);
    let other = codec::encode(&b, &mut table);

    assert_eq!(first, second);
    assert_ne!(first, other);
    assert_eq!(codec::decode(first, &table).unwrap(), a);
    assert_eq!(codec::decode(other, &table).unwrap(), b);
}

#[test]
fn test_bootstrap_objects_keep_fixed_handles() {
    let mut table = table();
    let global = codec::encode(&Value::Object(ObjectId::from_raw(100)), &mut table);
    assert_eq!(global, boxed(reference_table::GLOBAL, TypeFlag::Object));
    let env = codec::encode(&Value::Object(ObjectId::from_raw(102)), &mut table);
    assert_eq!(env, boxed(reference_table::ENVIRONMENT, TypeFlag::Object));
}

#[test]
fn test_equal_strings_share_a_handle() {
    let mut table = table();
    let a = codec::encode(&Value::from("fs"), &mut table);
    let b = codec::encode(&Value::String("fs".to_string()), &mut table);
    assert_eq!(a, b);
    assert_eq!((a >> 32) as u32, NAN_HEAD | TypeFlag::String as u32);
}

#[test]
fn test_functions_carry_function_flag() {
    let mut table = table();
    let f = Value::Function(ObjectId::from_raw(9));
    let bits = codec::encode(&f, &mut table);
    assert_eq!((bits >> 32) as u32, NAN_HEAD | 3);
    assert_eq!(codec::decode(bits, &table).unwrap(), f);
}

#[test]
fn test_unknown_handle_is_protocol_violation() {
    let table = table();
    let err = codec::decode(boxed(4096, TypeFlag::Object), &table).unwrap_err();
    assert!(matches!(err, HostError::InvalidHandle(4096)));
    assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
}
