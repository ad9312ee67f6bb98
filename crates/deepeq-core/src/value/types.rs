use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant describing a value's structural category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Nil,
    Bool,
    Int,
    Uint,
    Float,
    Str,
    Array,
    Sequence,
    Record,
    Mapping,
    Reference,
    Dynamic,
    Callable,
}

impl Kind {
    /// Compound kinds that can participate in a cycle when they live in shared storage.
    ///
    /// These are the kinds the cycle detector guards before descending.
    pub fn is_addressable_compound(self) -> bool {
        matches!(
            self,
            Kind::Array | Kind::Sequence | Kind::Record | Kind::Mapping
        )
    }
}

/// Structural type descriptor of a value
///
/// Two values can only be compared element by element when their types are
/// equal. Records are nominal (identified by name); every other compound type
/// is structural. `Type` is part of the cycle detector's key, so it is
/// `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Bool,
    Int,
    Uint,
    Float,
    Str,
    /// Fixed-length sequence; the length is part of the type
    Array { elem: Box<Type>, len: usize },
    /// Dynamic-length sequence backed by shared storage
    Sequence(Box<Type>),
    /// Named record
    Record(String),
    Mapping { key: Box<Type>, value: Box<Type> },
    /// Single-target pointer
    Reference(Box<Type>),
    /// Type-erased wrapper; empty name renders as `interface {}`
    Dynamic(String),
    /// Function value, identified by its signature
    Callable(String),
}

impl Type {
    pub fn array(elem: Type, len: usize) -> Self {
        Type::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn sequence(elem: Type) -> Self {
        Type::Sequence(Box::new(elem))
    }

    pub fn record(name: impl Into<String>) -> Self {
        Type::Record(name.into())
    }

    pub fn mapping(key: Type, value: Type) -> Self {
        Type::Mapping {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn reference(elem: Type) -> Self {
        Type::Reference(Box::new(elem))
    }

    /// The anonymous dynamic wrapper (`interface {}`)
    pub fn any() -> Self {
        Type::Dynamic(String::new())
    }

    pub fn callable(signature: impl Into<String>) -> Self {
        Type::Callable(signature.into())
    }

    /// Kind of the values carrying this type
    pub fn kind(&self) -> Kind {
        match self {
            Type::Bool => Kind::Bool,
            Type::Int => Kind::Int,
            Type::Uint => Kind::Uint,
            Type::Float => Kind::Float,
            Type::Str => Kind::Str,
            Type::Array { .. } => Kind::Array,
            Type::Sequence(_) => Kind::Sequence,
            Type::Record(_) => Kind::Record,
            Type::Mapping { .. } => Kind::Mapping,
            Type::Reference(_) => Kind::Reference,
            Type::Dynamic(_) => Kind::Dynamic,
            Type::Callable(_) => Kind::Callable,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::Int => f.write_str("int"),
            Type::Uint => f.write_str("uint"),
            Type::Float => f.write_str("float64"),
            Type::Str => f.write_str("string"),
            Type::Array { elem, len } => write!(f, "[{len}]{elem}"),
            Type::Sequence(elem) => write!(f, "[]{elem}"),
            Type::Record(name) => f.write_str(name),
            Type::Mapping { key, value } => write!(f, "map[{key}]{value}"),
            Type::Reference(elem) => write!(f, "*{elem}"),
            Type::Dynamic(name) if name.is_empty() => f.write_str("interface {}"),
            Type::Dynamic(name) => f.write_str(name),
            Type::Callable(signature) => write!(f, "func{signature}"),
        }
    }
}
