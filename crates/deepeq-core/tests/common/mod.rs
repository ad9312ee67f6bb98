use deepeq_core::{
    shared, Array, Dynamic, MapKey, Mapping, Record, Reference, Sequence, Shared, Type, Value,
};
use std::collections::BTreeMap;

/// Integers as a list of values
#[allow(dead_code)]
pub fn ints(items: &[i64]) -> Vec<Value> {
    items.iter().map(|&n| Value::Int(n)).collect()
}

/// `[N]int` array
#[allow(dead_code)]
pub fn int_array(items: &[i64]) -> Value {
    Array::new(Type::Int, ints(items)).into()
}

/// `[]int` sequence over fresh storage
#[allow(dead_code)]
pub fn int_seq(items: &[i64]) -> Value {
    Sequence::new(Type::Int, ints(items)).into()
}

/// `Pair { A, B }`
#[allow(dead_code)]
pub fn pair(a: i64, b: i64) -> Value {
    Record::new("Pair").field("A", a).field("B", b).into()
}

/// `map[string]int` over fresh storage
#[allow(dead_code)]
pub fn str_int_map(entries: &[(&str, i64)]) -> Value {
    Mapping::from_entries(Type::Str, Type::Int, entries.iter().copied()).into()
}

#[allow(dead_code)]
fn node_type() -> Type {
    Type::record("Node")
}

/// A pointer to `Node { Value: v, Next: <itself> }`
#[allow(dead_code)]
pub fn self_loop(v: i64) -> Value {
    ring(&[v])
}

/// A pointer to the first node of a ring `n0 -> n1 -> ... -> n0`
///
/// # Panics
///
/// Panics on an empty slice.
#[allow(dead_code)]
pub fn ring(values: &[i64]) -> Value {
    assert!(!values.is_empty(), "a ring needs at least one node");
    let cells: Vec<Shared<Value>> = values.iter().map(|_| shared(Value::Nil)).collect();
    for (i, &v) in values.iter().enumerate() {
        let next = cells[(i + 1) % cells.len()].clone();
        let node = Record::new("Node")
            .field("Value", v)
            .field("Next", Reference::to(node_type(), next));
        *cells[i].borrow_mut() = node.into();
    }
    Reference::to(node_type(), cells[0].clone()).into()
}

/// A `[]interface {}` sequence whose only element is itself
#[allow(dead_code)]
pub fn self_containing_seq() -> Value {
    let storage = shared(Vec::new());
    let seq = Sequence::from_shared(Type::any(), storage.clone());
    storage
        .borrow_mut()
        .push(Dynamic::new(seq.clone()).into());
    seq.into()
}

/// A `map[string]interface {}` whose `"self"` entry is the map itself
#[allow(dead_code)]
pub fn self_containing_map(tag: i64) -> Value {
    let entries: Shared<BTreeMap<MapKey, Value>> = shared(BTreeMap::new());
    let map = Mapping::from_shared(Type::Str, Type::any(), entries.clone());
    entries
        .borrow_mut()
        .insert(MapKey::from("self"), Dynamic::new(map.clone()).into());
    entries
        .borrow_mut()
        .insert(MapKey::from("tag"), Dynamic::new(tag).into());
    map.into()
}

/// Structural copy of an acyclic value into fresh storage
#[allow(dead_code)]
pub fn deep_copy(value: &Value) -> Value {
    match value {
        Value::Array(a) => Value::Array(Array::new(
            element_type(&a.type_of()),
            a.items().iter().map(deep_copy).collect(),
        )),
        Value::Sequence(s) => {
            let elem = element_type(&s.type_of());
            match s.storage() {
                Some(items) => Value::Sequence(Sequence::new(
                    elem,
                    items.borrow().iter().map(deep_copy).collect(),
                )),
                None => Value::Sequence(Sequence::nil(elem)),
            }
        }
        Value::Record(r) => {
            let copy = r
                .fields()
                .iter()
                .fold(Record::new(r.name()), |rec, f| {
                    rec.field(f.name.clone(), deep_copy(&f.value))
                });
            Value::Record(copy)
        }
        Value::Mapping(m) => {
            let Type::Mapping { key, value: vt } = m.type_of() else {
                unreachable!("mapping type");
            };
            match m.entries() {
                Some(entries) => Value::Mapping(Mapping::from_entries(
                    *key,
                    *vt,
                    entries
                        .borrow()
                        .iter()
                        .map(|(k, v)| (k.clone(), deep_copy(v)))
                        .collect::<Vec<_>>(),
                )),
                None => Value::Mapping(Mapping::nil(*key, *vt)),
            }
        }
        Value::Reference(r) => {
            let elem = element_type(&r.type_of());
            match r.target() {
                Some(target) => {
                    Value::Reference(Reference::new_target(elem, deep_copy(&target.borrow())))
                }
                None => Value::Reference(Reference::nil(elem)),
            }
        }
        Value::Dynamic(d) => match d.inner() {
            Some(inner) => Value::Dynamic(Dynamic::named(d.name(), deep_copy(inner))),
            None => Value::Dynamic(Dynamic::nil(d.name())),
        },
        other => other.clone(),
    }
}

#[allow(dead_code)]
fn element_type(ty: &Type) -> Type {
    match ty {
        Type::Array { elem, .. } | Type::Sequence(elem) | Type::Reference(elem) => {
            (**elem).clone()
        }
        other => other.clone(),
    }
}
