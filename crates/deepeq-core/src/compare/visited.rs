//! Cycle detector
//!
//! A per-call set of value pairs already entered. A pair is recorded before
//! its children are walked, so a structure that reaches itself through its
//! own children terminates. Revisiting a recorded pair is treated as equal
//! without re-checking it.

use crate::value::{Type, Value};
use std::collections::HashSet;
use std::rc::Rc;

/// Order-independent identity of a compared pair plus its type
///
/// The type is part of the key because a record and its first field can
/// share an address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisitedKey {
    lo: usize,
    hi: usize,
    ty: Type,
}

impl VisitedKey {
    /// Canonicalize two identities so that `(a, b)` and `(b, a)` collapse
    pub fn new(a: usize, b: usize, ty: Type) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self { lo, hi, ty }
    }

    /// Key for a pair of values, if both have a stable identity
    ///
    /// Sequences and mappings are identified by their storage. Arrays and
    /// records only have an identity when they are addressable, i.e. reached
    /// through a reference target or a sequence element.
    pub fn for_pair(x: &Value, y: &Value, ty: &Type, addressable: bool) -> Option<Self> {
        let a = identity(x, addressable)?;
        let b = identity(y, addressable)?;
        Some(Self::new(a, b, ty.clone()))
    }
}

fn identity(value: &Value, addressable: bool) -> Option<usize> {
    match value {
        Value::Sequence(s) => s.storage().map(|st| Rc::as_ptr(st) as usize),
        Value::Mapping(m) => m.entries().map(|e| Rc::as_ptr(e) as usize),
        Value::Array(_) | Value::Record(_) if addressable => {
            Some(std::ptr::from_ref(value) as usize)
        }
        _ => None,
    }
}

/// The set of pairs entered during one comparison call
#[derive(Debug, Default)]
pub struct Visited {
    seen: HashSet<VisitedKey>,
}

impl Visited {
    /// Record `key`; returns `false` if it was already present
    pub fn enter(&mut self, key: VisitedKey) -> bool {
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }
}
