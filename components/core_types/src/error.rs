//! Host error types.
//!
//! The bridge is fail-fast: every error here ends the guest. [`ErrorKind`]
//! only tells the reporting layer which class of failure it is looking at.

use thiserror::Error;

/// Classification of a [`HostError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The guest and host disagree about the ABI contract (missing property,
    /// bad handle, out-of-range memory access, missing import or export)
    ProtocolViolation,
    /// A recognised call that this host deliberately does not support
    Unimplemented,
    /// The operating system refused a raw syscall
    System,
}

/// Every failure a bridge operation can report.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, HostError};
///
/// let error = HostError::Unimplemented("runtime.walltime".to_string());
/// assert_eq!(error.kind(), ErrorKind::Unimplemented);
/// assert_eq!(error.to_string(), "not implemented: runtime.walltime");
/// ```
#[derive(Debug, Error)]
pub enum HostError {
    /// Linear memory access outside the buffer
    #[error("memory access out of bounds: {len} bytes at {addr:#x} (memory size {size})")]
    OutOfBounds {
        /// First byte address requested
        addr: u64,
        /// Number of bytes requested
        len: u64,
        /// Current size of linear memory
        size: usize,
    },

    /// Property lookup on an object that lacks it
    #[error("missing property: {0}")]
    MissingProperty(String),

    /// Method call on an object that lacks the method
    #[error("missing method: {0}")]
    MissingMethod(String),

    /// Indexed access past the end of a sequence
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds {
        /// Requested index
        index: i64,
        /// Length of the sequence
        length: usize,
    },

    /// A value of the wrong shape reached an operation
    #[error("{context}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Operation that rejected the value
        context: &'static str,
        /// What the operation accepts
        expected: &'static str,
        /// Description of what it received
        found: String,
    },

    /// `new` on an object without a constructor capability
    #[error("value is not a constructor: {0}")]
    NotConstructor(String),

    /// Recognised but deliberately unsupported host call
    #[error("not implemented: {0}")]
    Unimplemented(String),

    /// Reference handle that was never handed out
    #[error("invalid reference handle: {0}")]
    InvalidHandle(u32),

    /// Object identity unknown to the heap
    #[error("unknown object: {0}")]
    UnknownObject(u32),

    /// Guest string bytes that are not UTF-8
    #[error("invalid UTF-8 in guest string at {addr:#x}")]
    InvalidUtf8 {
        /// Address of the string data
        addr: u64,
    },

    /// Import requested from a module this host does not provide
    #[error("module not found: {0}")]
    MissingImportModule(String),

    /// Import requested that this host does not provide
    #[error("function not found: {module}.{name}")]
    MissingImport {
        /// Import module name
        module: String,
        /// Import field name
        name: String,
    },

    /// Export the host needs but the guest does not provide
    #[error("export not found: {0}")]
    MissingExport(String),

    /// Raw syscall failure
    #[error("{op} failed: {source}")]
    Io {
        /// Operation that failed
        op: &'static str,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}

impl HostError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HostError::Unimplemented(_) => ErrorKind::Unimplemented,
            HostError::Io { .. } => ErrorKind::System,
            _ => ErrorKind::ProtocolViolation,
        }
    }

    /// Shorthand for [`HostError::TypeMismatch`].
    pub fn type_mismatch(
        context: &'static str,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        HostError::TypeMismatch {
            context,
            expected,
            found: found.into(),
        }
    }

    /// Wraps an OS error with the name of the failing operation.
    pub fn io(op: &'static str, source: std::io::Error) -> Self {
        HostError::Io { op, source }
    }
}

/// Result type for bridge operations
pub type HostResult<T> = Result<T, HostError>;
