//! Core dynamic value types and host error handling.
//!
//! This crate provides the foundational types shared by every layer of the
//! Go/WebAssembly host: the closed value union that crosses the guest
//! boundary, the identity type for host objects, and the error type every
//! bridge operation reports through.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of dynamic host values
//! - [`ObjectId`] - Stable identity of a host object, assigned at construction
//! - [`HostError`] - Every failure the bridge can report
//! - [`ErrorKind`] - Protocol violation, unimplemented surface, or system failure
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, HostError, Value};
//!
//! let num = Value::Number(42.0);
//! assert_eq!(num.type_of(), "number");
//!
//! let error = HostError::MissingProperty("fs".to_string());
//! assert_eq!(error.kind(), ErrorKind::ProtocolViolation);
//! assert_eq!(error.to_string(), "missing property: fs");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod value;

pub use error::{ErrorKind, HostError, HostResult};
pub use value::{ObjectId, Value};
