//! Runtime value model
//!
//! A closed set of value kinds stands in for runtime reflection. Compound
//! values that may be shared (sequence elements, mapping entries, reference
//! targets) live in [`Shared`] storage, which gives them a stable identity
//! and makes cyclic graphs expressible.

pub mod compound;
pub mod map_key;
pub mod render;
pub mod types;

pub use compound::{Array, Callable, Dynamic, Field, Mapping, Record, Reference, Sequence};
pub use map_key::MapKey;
pub use types::{Kind, Type};

use std::cell::RefCell;
use std::rc::Rc;

/// Shared, interior-mutable storage backing sequences, mappings and references
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap a value in fresh shared storage
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// An opaque runtime value
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value (untyped nil)
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Array(Array),
    Sequence(Sequence),
    Record(Record),
    Mapping(Mapping),
    Reference(Reference),
    Dynamic(Dynamic),
    Callable(Callable),
}

impl Value {
    /// Structural category of this value
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Array(_) => Kind::Array,
            Value::Sequence(_) => Kind::Sequence,
            Value::Record(_) => Kind::Record,
            Value::Mapping(_) => Kind::Mapping,
            Value::Reference(_) => Kind::Reference,
            Value::Dynamic(_) => Kind::Dynamic,
            Value::Callable(_) => Kind::Callable,
        }
    }

    /// Type of this value, or `None` for an absent value
    pub fn type_of(&self) -> Option<Type> {
        let ty = match self {
            Value::Nil => return None,
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Uint(_) => Type::Uint,
            Value::Float(_) => Type::Float,
            Value::Str(_) => Type::Str,
            Value::Array(a) => a.type_of(),
            Value::Sequence(s) => s.type_of(),
            Value::Record(r) => r.type_of(),
            Value::Mapping(m) => m.type_of(),
            Value::Reference(r) => r.type_of(),
            Value::Dynamic(d) => d.type_of(),
            Value::Callable(c) => c.type_of(),
        };
        Some(ty)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// True for a float holding NaN
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Float(f) if f.is_nan())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Uint(u64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Sequence> for Value {
    fn from(s: Sequence) -> Self {
        Value::Sequence(s)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl From<Reference> for Value {
    fn from(r: Reference) -> Self {
        Value::Reference(r)
    }
}

impl From<Dynamic> for Value {
    fn from(d: Dynamic) -> Self {
        Value::Dynamic(d)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}
