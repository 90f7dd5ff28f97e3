//! Linear Memory Accessor
//!
//! Typed, bounds-checked access to the guest's contiguous byte buffer. The
//! buffer is borrowed from the interpreter for the duration of one import
//! call; nothing here copies or owns guest memory.
//!
//! All multi-byte values are little-endian. Addresses are `u64` because the
//! guest ABI passes pointers in 8-byte slots; any access that does not fit in
//! the buffer yields [`HostError::OutOfBounds`].
//!
//! # Example
//!
//! ```
//! use linear_memory::LinearMemory;
//!
//! let mut bytes = vec![0u8; 64];
//! let mut memory = LinearMemory::new(&mut bytes);
//!
//! memory.set_i64(8, -2).unwrap();
//! assert_eq!(memory.get_i64(8).unwrap(), -2);
//! assert!(memory.get_u64(60).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

use core_types::{HostError, HostResult};
use std::ops::Range;

/// Borrowed view of a guest's linear memory.
#[derive(Debug)]
pub struct LinearMemory<'a> {
    data: &'a mut [u8],
}

impl<'a> LinearMemory<'a> {
    /// Wraps the interpreter's raw memory buffer.
    pub fn new(data: &'a mut [u8]) -> Self {
        LinearMemory { data }
    }

    /// Current size of linear memory in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true when the guest has no memory at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resolves `len` bytes at `addr` to a range inside the buffer.
    ///
    /// # Errors
    ///
    /// Returns `HostError::OutOfBounds` if the range overflows or does not
    /// fit in the buffer.
    pub fn range(&self, addr: u64, len: u64) -> HostResult<Range<usize>> {
        let out_of_bounds = || HostError::OutOfBounds {
            addr,
            len,
            size: self.data.len(),
        };
        let start = usize::try_from(addr).map_err(|_| out_of_bounds())?;
        let count = usize::try_from(len).map_err(|_| out_of_bounds())?;
        let end = start.checked_add(count).ok_or_else(out_of_bounds)?;
        if end > self.data.len() {
            return Err(out_of_bounds());
        }
        Ok(start..end)
    }

    fn read_array<const N: usize>(&self, addr: u64) -> HostResult<[u8; N]> {
        let range = self.range(addr, N as u64)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[range]);
        Ok(bytes)
    }

    fn write_array<const N: usize>(&mut self, addr: u64, bytes: [u8; N]) -> HostResult<()> {
        let range = self.range(addr, N as u64)?;
        self.data[range].copy_from_slice(&bytes);
        Ok(())
    }

    /// Reads one byte.
    pub fn get_u8(&self, addr: u64) -> HostResult<u8> {
        Ok(self.read_array::<1>(addr)?[0])
    }

    /// Writes one byte.
    pub fn set_u8(&mut self, addr: u64, value: u8) -> HostResult<()> {
        self.write_array(addr, [value])
    }

    /// Reads a little-endian `u32`.
    pub fn get_u32(&self, addr: u64) -> HostResult<u32> {
        self.read_array(addr).map(u32::from_le_bytes)
    }

    /// Reads a little-endian `i32`.
    pub fn get_i32(&self, addr: u64) -> HostResult<i32> {
        self.read_array(addr).map(i32::from_le_bytes)
    }

    /// Writes a little-endian `u32`.
    pub fn set_u32(&mut self, addr: u64, value: u32) -> HostResult<()> {
        self.write_array(addr, value.to_le_bytes())
    }

    /// Writes a little-endian `i32`.
    pub fn set_i32(&mut self, addr: u64, value: i32) -> HostResult<()> {
        self.write_array(addr, value.to_le_bytes())
    }

    /// Reads a little-endian `u64`.
    pub fn get_u64(&self, addr: u64) -> HostResult<u64> {
        self.read_array(addr).map(u64::from_le_bytes)
    }

    /// Reads a little-endian `i64`.
    pub fn get_i64(&self, addr: u64) -> HostResult<i64> {
        self.read_array(addr).map(i64::from_le_bytes)
    }

    /// Writes a little-endian `u64`.
    pub fn set_u64(&mut self, addr: u64, value: u64) -> HostResult<()> {
        self.write_array(addr, value.to_le_bytes())
    }

    /// Writes a little-endian `i64`.
    pub fn set_i64(&mut self, addr: u64, value: i64) -> HostResult<()> {
        self.write_array(addr, value.to_le_bytes())
    }

    /// Reads an IEEE-754 double.
    pub fn get_f64(&self, addr: u64) -> HostResult<f64> {
        self.get_u64(addr).map(f64::from_bits)
    }

    /// Writes an IEEE-754 double, preserving its exact bit pattern.
    pub fn set_f64(&mut self, addr: u64, value: f64) -> HostResult<()> {
        self.set_u64(addr, value.to_bits())
    }

    /// Borrows `len` bytes at `addr`.
    pub fn bytes(&self, addr: u64, len: u64) -> HostResult<&[u8]> {
        let range = self.range(addr, len)?;
        Ok(&self.data[range])
    }

    /// Mutably borrows `len` bytes at `addr`.
    pub fn bytes_mut(&mut self, addr: u64, len: u64) -> HostResult<&mut [u8]> {
        let range = self.range(addr, len)?;
        Ok(&mut self.data[range])
    }

    /// Reads a `(ptr: i64, len: i64)` header stored at `addr`.
    ///
    /// Go strings and slices share this layout; slices carry a trailing
    /// capacity word which the host never needs.
    pub fn get_slice_header(&self, addr: u64) -> HostResult<(u64, u64)> {
        let ptr = self.get_u64(addr)?;
        let len = self.get_u64(addr.wrapping_add(8))?;
        Ok((ptr, len))
    }

    /// Borrows the bytes described by the slice header at `addr`.
    pub fn load_slice(&self, addr: u64) -> HostResult<&[u8]> {
        let (ptr, len) = self.get_slice_header(addr)?;
        self.bytes(ptr, len)
    }

    /// Mutably borrows the bytes described by the slice header at `addr`.
    pub fn load_slice_mut(&mut self, addr: u64) -> HostResult<&mut [u8]> {
        let (ptr, len) = self.get_slice_header(addr)?;
        self.bytes_mut(ptr, len)
    }

    /// Reads the UTF-8 string described by the header at `addr`.
    ///
    /// # Errors
    ///
    /// `HostError::InvalidUtf8` if the bytes are not UTF-8, and
    /// `HostError::OutOfBounds` if the header points outside memory.
    pub fn load_string(&self, addr: u64) -> HostResult<String> {
        let (ptr, len) = self.get_slice_header(addr)?;
        let bytes = self.bytes(ptr, len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| HostError::InvalidUtf8 { addr: ptr })
    }
}
