//! Typed buffer views over linear memory.
//!
//! A view records where it points, never what it contains: the bytes are
//! borrowed from linear memory at the moment they are used, so guest writes
//! are always visible through the view.

use core_types::{HostResult, ObjectId};
use linear_memory::LinearMemory;

/// TypedArray element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedArrayKind {
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 8-bit unsigned integer
    Uint8,
    /// 16-bit unsigned integer
    Uint16,
    /// 32-bit unsigned integer
    Uint32,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
}

impl TypedArrayKind {
    /// Every kind the global scope exposes a constructor for.
    pub const ALL: [TypedArrayKind; 8] = [
        TypedArrayKind::Int8,
        TypedArrayKind::Int16,
        TypedArrayKind::Int32,
        TypedArrayKind::Uint8,
        TypedArrayKind::Uint16,
        TypedArrayKind::Uint32,
        TypedArrayKind::Float32,
        TypedArrayKind::Float64,
    ];

    /// Get the byte size of each element for this kind
    pub fn bytes_per_element(&self) -> u64 {
        match self {
            TypedArrayKind::Int8 | TypedArrayKind::Uint8 => 1,
            TypedArrayKind::Int16 | TypedArrayKind::Uint16 => 2,
            TypedArrayKind::Int32 | TypedArrayKind::Uint32 | TypedArrayKind::Float32 => 4,
            TypedArrayKind::Float64 => 8,
        }
    }

    /// Get the constructor name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
        }
    }
}

/// An `(buffer, offset, length)` window onto linear memory.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedArrayView {
    /// Array buffer object the view was constructed over
    pub buffer: ObjectId,
    /// Element kind
    pub kind: TypedArrayKind,
    /// Byte offset into linear memory
    pub byte_offset: u64,
    /// Number of elements
    pub length: u64,
}

impl TypedArrayView {
    /// Length of the view in bytes.
    pub fn byte_length(&self) -> u64 {
        self.length.saturating_mul(self.kind.bytes_per_element())
    }

    /// Borrows the view's bytes from linear memory.
    pub fn contents<'m>(&self, memory: &'m LinearMemory<'_>) -> HostResult<&'m [u8]> {
        memory.bytes(self.byte_offset, self.byte_length())
    }

    /// Mutably borrows the view's bytes from linear memory.
    pub fn contents_mut<'m>(&self, memory: &'m mut LinearMemory<'_>) -> HostResult<&'m mut [u8]> {
        memory.bytes_mut(self.byte_offset, self.byte_length())
    }
}
