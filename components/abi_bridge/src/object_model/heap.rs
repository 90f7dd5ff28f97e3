//! Object heap and the property model.
//!
//! Objects live in an append-only arena; an [`ObjectId`] is the object's slot
//! and doubles as its identity for the reference table.

use super::object::{HostObject, NativeFn, ObjectKind};
use core_types::{HostError, HostResult, ObjectId, Value};

/// Arena of host objects.
#[derive(Debug, Default)]
pub struct Heap {
    objects: Vec<HostObject>,
}

impl Heap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `object` and returns a value referring to it.
    ///
    /// Native functions come back as `Value::Function`, everything else as
    /// `Value::Object`.
    pub fn alloc(&mut self, object: HostObject) -> Value {
        let callable = object.is_callable();
        let id = self.insert(object);
        if callable {
            Value::Function(id)
        } else {
            Value::Object(id)
        }
    }

    /// Stores `object` and returns its identity.
    pub fn insert(&mut self, object: HostObject) -> ObjectId {
        let id = ObjectId::from_raw(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    /// Allocates a native function object.
    pub fn alloc_function(&mut self, name: &'static str, call: NativeFn) -> Value {
        self.alloc(HostObject::with_kind(ObjectKind::Function { name, call }))
    }

    /// Allocates an array holding `items`.
    pub fn alloc_array(&mut self, items: Vec<Value>) -> Value {
        self.alloc(HostObject::with_kind(ObjectKind::Array(items)))
    }

    /// Number of objects ever allocated.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True before the bootstrap graph is built.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Borrows the object behind `id`.
    pub fn object(&self, id: ObjectId) -> HostResult<&HostObject> {
        self.objects
            .get(id.raw() as usize)
            .ok_or(HostError::UnknownObject(id.raw()))
    }

    /// Mutably borrows the object behind `id`.
    pub fn object_mut(&mut self, id: ObjectId) -> HostResult<&mut HostObject> {
        self.objects
            .get_mut(id.raw() as usize)
            .ok_or(HostError::UnknownObject(id.raw()))
    }

    /// Reads property `name`.
    ///
    /// # Errors
    ///
    /// `HostError::MissingProperty` if the object has no such property.
    pub fn get(&self, id: ObjectId, name: &str) -> HostResult<Value> {
        self.object(id)?
            .properties
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::MissingProperty(name.to_string()))
    }

    /// Writes property `name`, creating it if absent.
    pub fn set(&mut self, id: ObjectId, name: &str, value: Value) -> HostResult<()> {
        self.object_mut(id)?
            .properties
            .insert(name.to_string(), value);
        Ok(())
    }

    /// Reads element `index` of an array.
    pub fn index(&self, id: ObjectId, index: i64) -> HostResult<Value> {
        let items = self.elements(id, "valueIndex")?;
        let slot = checked_index(index, items.len())?;
        Ok(items[slot].clone())
    }

    /// Overwrites element `index` of an array.
    pub fn set_index(&mut self, id: ObjectId, index: i64, value: Value) -> HostResult<()> {
        let items = match &mut self.object_mut(id)?.kind {
            ObjectKind::Array(items) => items,
            other => {
                return Err(HostError::type_mismatch(
                    "valueSetIndex",
                    "array",
                    format!("{:?} {}", other, id),
                ))
            }
        };
        let slot = checked_index(index, items.len())?;
        items[slot] = value;
        Ok(())
    }

    /// Element count of an array or typed view.
    pub fn length(&self, id: ObjectId) -> HostResult<usize> {
        match &self.object(id)?.kind {
            ObjectKind::Array(items) => Ok(items.len()),
            ObjectKind::TypedArray(view) => Ok(view.length as usize),
            other => Err(HostError::type_mismatch(
                "valueLength",
                "sequence",
                format!("{:?} {}", other, id),
            )),
        }
    }

    /// String conversion of `value`.
    ///
    /// Arrays join their elements with `,`, writing `null` and `undefined`
    /// elements as empty and an array nested inside itself as empty. Typed
    /// views and every other object convert to `[object Object]`.
    pub fn stringify(&self, value: &Value) -> String {
        self.stringify_nested(value, &mut Vec::new())
    }

    fn stringify_nested(&self, value: &Value, visiting: &mut Vec<ObjectId>) -> String {
        let (id, items) = match value {
            Value::String(s) => return s.clone(),
            Value::Object(id) => match self.object(*id).map(|object| &object.kind) {
                Ok(ObjectKind::Array(items)) => (*id, items),
                _ => return value.to_string(),
            },
            other => return other.to_string(),
        };
        if visiting.contains(&id) {
            return String::new();
        }

        visiting.push(id);
        let joined = items
            .iter()
            .map(|item| match item {
                Value::Undefined | Value::Null => String::new(),
                item => self.stringify_nested(item, visiting),
            })
            .collect::<Vec<_>>()
            .join(",");
        visiting.pop();
        joined
    }

    fn elements(&self, id: ObjectId, context: &'static str) -> HostResult<&[Value]> {
        match &self.object(id)?.kind {
            ObjectKind::Array(items) => Ok(items),
            other => Err(HostError::type_mismatch(
                context,
                "array",
                format!("{:?} {}", other, id),
            )),
        }
    }
}

fn checked_index(index: i64, length: usize) -> HostResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|slot| *slot < length)
        .ok_or(HostError::IndexOutOfBounds { index, length })
}
