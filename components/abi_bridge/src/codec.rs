//! Value Codec: the NaN-boxed wire format.
//!
//! Every value slot in a call frame is 8 bytes interpreted as an IEEE-754
//! double:
//!
//! - `0x0000_0000_0000_0000` is `undefined`;
//! - any other non-NaN pattern is that number (`-0`, subnormals and
//!   infinities included);
//! - a NaN pattern carries a reference-table handle in its low word and
//!   `NAN_HEAD | type flag` in its high word.
//!
//! NaN itself and `+0` travel as the bootstrap handles
//! [`NAN`](crate::reference_table::NAN) and [`ZERO`](crate::reference_table::ZERO);
//! `+0` cannot use its own bit pattern because that is `undefined`.

use crate::reference_table::ReferenceTable;
use core_types::{HostResult, Value};
use linear_memory::LinearMemory;

/// High word of every boxed reference.
pub const NAN_HEAD: u32 = 0x7FF8_0000;

/// Type flag stored in the low bits of the high word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum TypeFlag {
    /// Objects and the singletons
    Object = 0,
    /// Strings
    String = 1,
    /// Symbols; reserved, the host never creates them
    Symbol = 2,
    /// Callable objects
    Function = 3,
}

impl TypeFlag {
    /// Flag the guest expects for `value`.
    pub fn of(value: &Value) -> TypeFlag {
        match value {
            Value::String(_) => TypeFlag::String,
            Value::Function(_) => TypeFlag::Function,
            _ => TypeFlag::Object,
        }
    }
}

/// Builds the boxed bit pattern for `handle`.
pub fn boxed(handle: u32, flag: TypeFlag) -> u64 {
    (u64::from(NAN_HEAD | flag as u32) << 32) | u64::from(handle)
}

/// Decodes one 8-byte slot.
///
/// # Errors
///
/// `HostError::InvalidHandle` if a boxed handle is not in `table`.
pub fn decode(bits: u64, table: &ReferenceTable) -> HostResult<Value> {
    if bits == 0 {
        return Ok(Value::Undefined);
    }
    let number = f64::from_bits(bits);
    if !number.is_nan() {
        return Ok(Value::Number(number));
    }
    table.get(bits as u32).cloned()
}

/// Encodes `value`, interning reference values in `table`.
pub fn encode(value: &Value, table: &mut ReferenceTable) -> u64 {
    match value {
        Value::Number(n) if !n.is_nan() && n.to_bits() != 0 => n.to_bits(),
        _ => match table.intern(value) {
            Some(handle) => {
                tracing::trace!(handle, kind = value.type_of(), "boxed reference");
                boxed(handle, TypeFlag::of(value))
            }
            None => 0,
        },
    }
}

/// Reads and decodes the slot at `addr`.
pub fn load_value(
    memory: &LinearMemory<'_>,
    addr: u64,
    table: &ReferenceTable,
) -> HostResult<Value> {
    decode(memory.get_u64(addr)?, table)
}

/// Encodes `value` into the slot at `addr`.
pub fn store_value(
    memory: &mut LinearMemory<'_>,
    addr: u64,
    value: &Value,
    table: &mut ReferenceTable,
) -> HostResult<()> {
    memory.set_u64(addr, encode(value, table))
}

/// Decodes the `[]ref` slice whose header sits at `addr`.
pub fn load_values(
    memory: &LinearMemory<'_>,
    addr: u64,
    table: &ReferenceTable,
) -> HostResult<Vec<Value>> {
    let (ptr, len) = memory.get_slice_header(addr)?;
    // Bounds-check the whole array before decoding any element.
    memory.range(ptr, len.saturating_mul(8))?;
    (0..len)
        .map(|i| load_value(memory, ptr + i * 8, table))
        .collect()
}
