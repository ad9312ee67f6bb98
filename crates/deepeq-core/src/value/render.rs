//! Canonical textual rendering of values
//!
//! The rendering is what leaf comparison compares and what divergence
//! messages show. Sequences and mappings can be cyclic, so the renderer
//! tracks the storage it is currently inside and prints `[...]` /
//! `map[...]` on re-entry. References render as the address of their
//! target and are never followed.

use super::{Array, Callable, Dynamic, MapKey, Mapping, Record, Reference, Sequence, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Renderer {
    active: Vec<usize>,
}

impl Renderer {
    fn value(&mut self, value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match value {
            Value::Nil => f.write_str("<nil>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            Value::Float(x) => float(*x, f),
            Value::Str(s) => f.write_str(s),
            Value::Array(a) => self.array(a, f),
            Value::Sequence(s) => self.sequence(s, f),
            Value::Record(r) => self.record(r, f),
            Value::Mapping(m) => self.mapping(m, f),
            Value::Reference(r) => reference(r, f),
            Value::Dynamic(d) => self.dynamic(d, f),
            Value::Callable(c) => callable(c, f),
        }
    }

    fn list(&mut self, items: &[Value], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            self.value(item, f)?;
        }
        f.write_str("]")
    }

    fn array(&mut self, array: &Array, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.list(array.items(), f)
    }

    fn sequence(&mut self, seq: &Sequence, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(storage) = seq.storage() else {
            return f.write_str("[]");
        };
        let id = Rc::as_ptr(storage) as usize;
        if self.active.contains(&id) {
            return f.write_str("[...]");
        }
        let Ok(items) = storage.try_borrow() else {
            return f.write_str("[<borrowed>]");
        };
        self.active.push(id);
        let res = self.list(&items, f);
        self.active.pop();
        res
    }

    fn record(&mut self, record: &Record, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, field) in record.fields().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            self.value(&field.value, f)?;
        }
        f.write_str("}")
    }

    fn mapping(&mut self, mapping: &Mapping, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(entries) = mapping.entries() else {
            return f.write_str("map[]");
        };
        let id = Rc::as_ptr(entries) as usize;
        if self.active.contains(&id) {
            return f.write_str("map[...]");
        }
        let Ok(entries) = entries.try_borrow() else {
            return f.write_str("map[<borrowed>]");
        };
        self.active.push(id);
        let res = self.entries(&entries, f);
        self.active.pop();
        res
    }

    fn entries(
        &mut self,
        entries: &BTreeMap<MapKey, Value>,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("map[")?;
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}:")?;
            self.value(value, f)?;
        }
        f.write_str("]")
    }

    fn dynamic(&mut self, dynamic: &Dynamic, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match dynamic.inner() {
            Some(inner) => self.value(inner, f),
            None => f.write_str("<nil>"),
        }
    }
}

/// Shortest round-trip digits; exponent form when the decimal exponent is
/// below -4 or at least 6, with a signed two-digit exponent (`1e+21`).
fn float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "+Inf" } else { "-Inf" });
    }
    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return f.write_str(&sci);
    };
    let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
    if (-4..6).contains(&exp) {
        write!(f, "{x}")
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}

fn reference(reference: &Reference, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match reference.target() {
        Some(target) => write!(f, "{:#x}", Rc::as_ptr(target) as usize),
        None => f.write_str("<nil>"),
    }
}

fn callable(callable: &Callable, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match callable.addr() {
        Some(addr) => write!(f, "{addr:#x}"),
        None => f.write_str("<nil>"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Renderer::default().value(self, f)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            return f.write_str("Nil");
        }
        write!(f, "{:?}(", self.kind())?;
        Renderer::default().value(self, f)?;
        f.write_str(")")
    }
}

macro_rules! debug_via_renderer {
    ($ty:ident, $render:expr) => {
        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}<{}>(", stringify!($ty), self.type_of())?;
                $render(&mut Renderer::default(), self, f)?;
                f.write_str(")")
            }
        }
    };
}

debug_via_renderer!(Array, Renderer::array);
debug_via_renderer!(Sequence, Renderer::sequence);
debug_via_renderer!(Record, Renderer::record);
debug_via_renderer!(Mapping, Renderer::mapping);
debug_via_renderer!(Dynamic, Renderer::dynamic);
debug_via_renderer!(Reference, |_: &mut Renderer, r, f| reference(r, f));
debug_via_renderer!(Callable, |_: &mut Renderer, c, f| callable(c, f));

#[cfg(test)]
mod tests {
    use crate::value::{shared, Array, Mapping, Record, Sequence, Type, Value};

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(Value::Nil.to_string(), "<nil>");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-Inf");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }

    #[test]
    fn test_float_exponent_form() {
        assert_eq!(Value::Float(1e21).to_string(), "1e+21");
        assert_eq!(Value::Float(1234567.0).to_string(), "1.234567e+06");
        assert_eq!(Value::Float(123456.0).to_string(), "123456");
        assert_eq!(Value::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Value::Float(0.00001).to_string(), "1e-05");
        assert_eq!(Value::Float(-2.5e-300).to_string(), "-2.5e-300");
        assert_eq!(Value::Float(-0.0).to_string(), "-0");
        assert_eq!(Value::Float(0.0).to_string(), "0");
    }

    #[test]
    fn test_compound_rendering() {
        let arr = Array::new(Type::Int, vec![1.into(), 2.into(), 3.into()]);
        assert_eq!(Value::from(arr).to_string(), "[1 2 3]");

        let rec = Record::new("Pair").field("A", 1).field("B", "x");
        assert_eq!(Value::from(rec).to_string(), "{1 x}");

        let map = Mapping::from_entries(Type::Str, Type::Int, [("b", 2), ("a", 1)]);
        assert_eq!(Value::from(map).to_string(), "map[a:1 b:2]");

        assert_eq!(Value::from(Sequence::nil(Type::Int)).to_string(), "[]");
    }

    #[test]
    fn test_cyclic_sequence_rendering_terminates() {
        let storage = shared(Vec::new());
        let seq = Sequence::from_shared(Type::sequence(Type::any()), storage.clone());
        storage.borrow_mut().push(Value::Sequence(seq.clone()));
        assert_eq!(Value::from(seq).to_string(), "[[...]]");
    }

    #[test]
    fn test_debug_includes_kind() {
        assert_eq!(format!("{:?}", Value::Int(7)), "Int(7)");
        assert_eq!(format!("{:?}", Value::Nil), "Nil");
        let arr = Array::new(Type::Int, vec![1.into()]);
        assert_eq!(format!("{arr:?}"), "Array<[1]int>([1])");
    }
}
