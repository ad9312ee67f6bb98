//! Per-type reflection capability
//!
//! [`Reflect`] converts native Rust data into a [`Value`] so it can be
//! compared structurally. Owned collections are copied into fresh storage;
//! `Option` and `Box` become references.

use crate::value::{Array, MapKey, Mapping, Reference, Sequence, Type, Value};
use std::collections::{BTreeMap, HashMap};

/// Conversion of a Rust value into the comparable value model
pub trait Reflect {
    /// The value form of `self`
    fn reflect(&self) -> Value;
}

/// The static type of a reflectable type, used where no instance is at
/// hand (e.g. the element type of an empty `Vec`)
pub trait ReflectType {
    fn reflect_type() -> Type;
}

/// Types usable as mapping keys
pub trait ReflectKey: Reflect + ReflectType {
    fn map_key(&self) -> MapKey;
}

/// A `Value` reflects as itself; cloning keeps shared storage shared.
impl Reflect for Value {
    fn reflect(&self) -> Value {
        self.clone()
    }
}

impl ReflectType for Value {
    fn reflect_type() -> Type {
        Type::any()
    }
}

impl Reflect for bool {
    fn reflect(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ReflectType for bool {
    fn reflect_type() -> Type {
        Type::Bool
    }
}

impl ReflectKey for bool {
    fn map_key(&self) -> MapKey {
        MapKey::Bool(*self)
    }
}

macro_rules! reflect_signed {
    ($($t:ty),*) => {$(
        impl Reflect for $t {
            fn reflect(&self) -> Value {
                Value::Int(i64::from(*self))
            }
        }

        impl ReflectType for $t {
            fn reflect_type() -> Type {
                Type::Int
            }
        }

        impl ReflectKey for $t {
            fn map_key(&self) -> MapKey {
                MapKey::Int(i64::from(*self))
            }
        }
    )*};
}

macro_rules! reflect_unsigned {
    ($($t:ty),*) => {$(
        impl Reflect for $t {
            fn reflect(&self) -> Value {
                Value::Uint(u64::from(*self))
            }
        }

        impl ReflectType for $t {
            fn reflect_type() -> Type {
                Type::Uint
            }
        }

        impl ReflectKey for $t {
            fn map_key(&self) -> MapKey {
                MapKey::Uint(u64::from(*self))
            }
        }
    )*};
}

reflect_signed!(i8, i16, i32, i64);
reflect_unsigned!(u8, u16, u32, u64);

impl Reflect for f32 {
    /// Widens through the shortest `f32` decimal, so `0.1f32` becomes `0.1`
    /// rather than `0.10000000149011612`.
    fn reflect(&self) -> Value {
        Value::Float(self.to_string().parse().unwrap_or_else(|_| f64::from(*self)))
    }
}

impl ReflectType for f32 {
    fn reflect_type() -> Type {
        Type::Float
    }
}

impl Reflect for f64 {
    fn reflect(&self) -> Value {
        Value::Float(*self)
    }
}

impl ReflectType for f64 {
    fn reflect_type() -> Type {
        Type::Float
    }
}

impl Reflect for str {
    fn reflect(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl Reflect for String {
    fn reflect(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ReflectType for String {
    fn reflect_type() -> Type {
        Type::Str
    }
}

impl ReflectKey for String {
    fn map_key(&self) -> MapKey {
        MapKey::Str(self.clone())
    }
}

impl<T: Reflect + ReflectType> Reflect for Vec<T> {
    fn reflect(&self) -> Value {
        Value::Sequence(Sequence::new(
            T::reflect_type(),
            self.iter().map(Reflect::reflect).collect(),
        ))
    }
}

impl<T: Reflect + ReflectType> ReflectType for Vec<T> {
    fn reflect_type() -> Type {
        Type::sequence(T::reflect_type())
    }
}

impl<T: Reflect + ReflectType, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Value {
        Value::Array(Array::new(
            T::reflect_type(),
            self.iter().map(Reflect::reflect).collect(),
        ))
    }
}

impl<T: Reflect + ReflectType, const N: usize> ReflectType for [T; N] {
    fn reflect_type() -> Type {
        Type::array(T::reflect_type(), N)
    }
}

impl<T: Reflect + ReflectType> Reflect for Option<T> {
    fn reflect(&self) -> Value {
        let reference = match self {
            Some(inner) => Reference::new_target(T::reflect_type(), inner.reflect()),
            None => Reference::nil(T::reflect_type()),
        };
        Value::Reference(reference)
    }
}

impl<T: Reflect + ReflectType> ReflectType for Option<T> {
    fn reflect_type() -> Type {
        Type::reference(T::reflect_type())
    }
}

impl<T: Reflect + ReflectType> Reflect for Box<T> {
    fn reflect(&self) -> Value {
        Value::Reference(Reference::new_target(
            T::reflect_type(),
            self.as_ref().reflect(),
        ))
    }
}

impl<T: Reflect + ReflectType> ReflectType for Box<T> {
    fn reflect_type() -> Type {
        Type::reference(T::reflect_type())
    }
}

impl<K: ReflectKey, V: Reflect + ReflectType> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Value {
        Value::Mapping(Mapping::from_entries(
            K::reflect_type(),
            V::reflect_type(),
            self.iter().map(|(k, v)| (k.map_key(), v.reflect())),
        ))
    }
}

impl<K: ReflectKey, V: Reflect + ReflectType> ReflectType for BTreeMap<K, V> {
    fn reflect_type() -> Type {
        Type::mapping(K::reflect_type(), V::reflect_type())
    }
}

impl<K: ReflectKey, V: Reflect + ReflectType, S> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Value {
        Value::Mapping(Mapping::from_entries(
            K::reflect_type(),
            V::reflect_type(),
            self.iter().map(|(k, v)| (k.map_key(), v.reflect())),
        ))
    }
}

impl<K: ReflectKey, V: Reflect + ReflectType, S> ReflectType for HashMap<K, V, S> {
    fn reflect_type() -> Type {
        Type::mapping(K::reflect_type(), V::reflect_type())
    }
}
