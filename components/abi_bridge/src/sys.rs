//! Raw syscall surface used by the import handlers.
//!
//! Handlers never call the operating system directly; they go through
//! [`HostSys`] so the same bridge can run against the real process
//! ([`NativeSys`]) or against an in-memory capture ([`BufferedSys`]).

use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::Instant;

/// Syscalls reachable from the guest.
pub trait HostSys: Send {
    /// Writes all of `bytes` to descriptor `fd`.
    fn write(&mut self, fd: i32, bytes: &[u8]) -> io::Result<usize>;

    /// Writes all of `bytes` to descriptor `fd` at file offset `offset`.
    fn pwrite(&mut self, fd: i32, bytes: &[u8], offset: i64) -> io::Result<usize>;

    /// Nanoseconds on a monotonic clock.
    fn monotonic_nanos(&self) -> i64;

    /// Fills `buf` with cryptographically secure random bytes.
    fn fill_random(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

/// The real process: libc descriptors, `Instant`, and the OS RNG.
#[derive(Debug)]
pub struct NativeSys {
    started: Instant,
}

impl NativeSys {
    /// Starts the monotonic clock at zero.
    pub fn new() -> Self {
        NativeSys {
            started: Instant::now(),
        }
    }
}

impl Default for NativeSys {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(unsafe_code)]
fn raw_write(fd: i32, bytes: &[u8], offset: Option<i64>) -> io::Result<usize> {
    let mut written = 0usize;
    while written < bytes.len() {
        let rest = &bytes[written..];
        // SAFETY: `rest` is a live, initialised buffer of `rest.len()` bytes
        // for the duration of the call; the kernel only reads from it.
        let n = unsafe {
            match offset {
                Some(base) => libc::pwrite(
                    fd,
                    rest.as_ptr().cast(),
                    rest.len(),
                    (base + written as i64) as libc::off_t,
                ),
                None => libc::write(fd, rest.as_ptr().cast(), rest.len()),
            }
        };
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if n == 0 {
            return Err(io::Error::from(io::ErrorKind::WriteZero));
        }
        written += n as usize;
    }
    Ok(written)
}

impl HostSys for NativeSys {
    fn write(&mut self, fd: i32, bytes: &[u8]) -> io::Result<usize> {
        raw_write(fd, bytes, None)
    }

    fn pwrite(&mut self, fd: i32, bytes: &[u8], offset: i64) -> io::Result<usize> {
        raw_write(fd, bytes, Some(offset))
    }

    fn monotonic_nanos(&self) -> i64 {
        i64::try_from(self.started.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }

    fn fill_random(&mut self, buf: &mut [u8]) -> io::Result<()> {
        OsRng.try_fill_bytes(buf).map_err(io::Error::other)
    }
}

/// A positioned write recorded by [`BufferedSys`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedWrite {
    /// Descriptor
    pub fd: i32,
    /// File offset
    pub offset: i64,
    /// Bytes written
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct Captured {
    streams: HashMap<i32, Vec<u8>>,
    positioned: Vec<PositionedWrite>,
    clock: i64,
    random_calls: u64,
}

/// In-memory backend capturing every write.
///
/// Clones share the same capture, so a clone kept outside the host context
/// can inspect what the guest wrote. The clock advances by
/// [`BufferedSys::TICK`] per reading; random bytes are a fixed,
/// non-zero pattern.
#[derive(Debug, Clone, Default)]
pub struct BufferedSys {
    inner: Arc<Mutex<Captured>>,
}

impl BufferedSys {
    /// Nanoseconds the capture clock advances per reading.
    pub const TICK: i64 = 1_000;

    /// Creates an empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to `fd` through plain writes.
    pub fn written(&self, fd: i32) -> Vec<u8> {
        self.inner
            .lock()
            .streams
            .get(&fd)
            .cloned()
            .unwrap_or_default()
    }

    /// Every positioned write, in order.
    pub fn positioned_writes(&self) -> Vec<PositionedWrite> {
        self.inner.lock().positioned.clone()
    }
}

impl HostSys for BufferedSys {
    fn write(&mut self, fd: i32, bytes: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .streams
            .entry(fd)
            .or_default()
            .extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn pwrite(&mut self, fd: i32, bytes: &[u8], offset: i64) -> io::Result<usize> {
        self.inner.lock().positioned.push(PositionedWrite {
            fd,
            offset,
            bytes: bytes.to_vec(),
        });
        Ok(bytes.len())
    }

    fn monotonic_nanos(&self) -> i64 {
        let mut captured = self.inner.lock();
        captured.clock += Self::TICK;
        captured.clock
    }

    fn fill_random(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let mut captured = self.inner.lock();
        captured.random_calls += 1;
        let seed = captured.random_calls as u8;
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = seed.wrapping_mul(31).wrapping_add(i as u8) | 1;
        }
        Ok(())
    }
}
