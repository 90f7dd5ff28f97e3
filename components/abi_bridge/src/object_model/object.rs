//! Host object representation
//!
//! A host object is a property map plus a kind describing any internal
//! state (array elements, a typed view, a native callable) and an optional
//! constructor capability.

use super::typed_array::{TypedArrayKind, TypedArrayView};
use crate::context::HostContext;
use core_types::{HostResult, Value};
use linear_memory::LinearMemory;
use std::collections::HashMap;
use std::fmt;

/// Native callable: `(context, memory, receiver, args) -> result`.
///
/// For constructors the receiver is the constructor object itself.
pub type NativeFn =
    fn(&mut HostContext, &mut LinearMemory<'_>, &Value, Vec<Value>) -> HostResult<Value>;

/// Internal state of a host object.
#[derive(Clone)]
pub enum ObjectKind {
    /// Ordinary property bag
    Plain,
    /// Ordered sequence addressed by index
    Array(Vec<Value>),
    /// Buffer aliasing the whole of linear memory
    ArrayBuffer,
    /// Typed window onto an array buffer
    TypedArray(TypedArrayView),
    /// Constructor object for one typed array kind
    TypedArrayClass(TypedArrayKind),
    /// Native function
    Function {
        /// Name used in diagnostics
        name: &'static str,
        /// Implementation
        call: NativeFn,
    },
    /// Guest callback handle returned by `_makeFuncWrapper`
    FuncWrapper {
        /// Callback id chosen by the guest
        id: Value,
    },
}

impl fmt::Debug for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Plain => write!(f, "Plain"),
            ObjectKind::Array(items) => f.debug_tuple("Array").field(&items.len()).finish(),
            ObjectKind::ArrayBuffer => write!(f, "ArrayBuffer"),
            ObjectKind::TypedArray(view) => f.debug_tuple("TypedArray").field(view).finish(),
            ObjectKind::TypedArrayClass(kind) => {
                f.debug_tuple("TypedArrayClass").field(kind).finish()
            }
            ObjectKind::Function { name, .. } => f.debug_tuple("Function").field(name).finish(),
            ObjectKind::FuncWrapper { id } => f.debug_struct("FuncWrapper").field("id", id).finish(),
        }
    }
}

/// A host object stored in the heap.
#[derive(Clone)]
pub struct HostObject {
    /// Own properties
    pub properties: HashMap<String, Value>,
    /// Internal state
    pub kind: ObjectKind,
    /// Constructor capability used by `new`
    pub constructor: Option<NativeFn>,
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostObject")
            .field("properties", &self.properties)
            .field("kind", &self.kind)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

impl HostObject {
    /// Empty plain object.
    pub fn plain() -> Self {
        HostObject::with_kind(ObjectKind::Plain)
    }

    /// Object of the given kind with no properties.
    pub fn with_kind(kind: ObjectKind) -> Self {
        HostObject {
            properties: HashMap::new(),
            kind,
            constructor: None,
        }
    }

    /// Plain object holding `properties`.
    pub fn from_properties<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut object = HostObject::plain();
        object
            .properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v)));
        object
    }

    /// Attaches a constructor capability.
    pub fn with_constructor(mut self, constructor: NativeFn) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Whether values referring to this object should be tagged callable.
    pub fn is_callable(&self) -> bool {
        matches!(self.kind, ObjectKind::Function { .. })
    }
}
