//! Compound value kinds
//!
//! Builders follow a consuming style (`Record::new("Node").field("A", 1)`).
//! Anything that may be shared is held in [`Shared`] storage; cloning a
//! `Sequence`, `Mapping` or `Reference` clones the handle, not the contents.

use super::{shared, MapKey, Shared, Type, Value};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Fixed-length sequence stored inline
#[derive(Clone)]
pub struct Array {
    elem: Type,
    items: Vec<Value>,
}

impl Array {
    pub fn new(elem: Type, items: Vec<Value>) -> Self {
        Self { elem, items }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn type_of(&self) -> Type {
        Type::array(self.elem.clone(), self.items.len())
    }
}

/// Dynamic-length sequence over shared storage
///
/// A nil sequence has no storage at all, which is distinct from an empty one.
#[derive(Clone)]
pub struct Sequence {
    elem: Type,
    storage: Option<Shared<Vec<Value>>>,
}

impl Sequence {
    /// A populated sequence over fresh storage
    pub fn new(elem: Type, items: Vec<Value>) -> Self {
        Self {
            elem,
            storage: Some(shared(items)),
        }
    }

    /// The nil sequence of the given element type
    pub fn nil(elem: Type) -> Self {
        Self {
            elem,
            storage: None,
        }
    }

    /// A sequence viewing existing storage
    pub fn from_shared(elem: Type, storage: Shared<Vec<Value>>) -> Self {
        Self {
            elem,
            storage: Some(storage),
        }
    }

    pub fn storage(&self) -> Option<&Shared<Vec<Value>>> {
        self.storage.as_ref()
    }

    pub fn is_nil(&self) -> bool {
        self.storage.is_none()
    }

    /// Number of elements; zero for a nil sequence
    ///
    /// # Panics
    ///
    /// Panics if the storage is currently mutably borrowed.
    pub fn len(&self) -> usize {
        self.storage.as_ref().map_or(0, |s| s.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when both sequences view the same underlying storage
    pub fn same_storage(&self, other: &Sequence) -> bool {
        match (&self.storage, &other.storage) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn type_of(&self) -> Type {
        Type::sequence(self.elem.clone())
    }
}

/// One named field of a record
#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

/// Record with named fields in declaration order
#[derive(Clone)]
pub struct Record {
    name: String,
    fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, keeping declaration order
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look a field up by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    pub fn type_of(&self) -> Type {
        Type::record(self.name.clone())
    }
}

/// Key to value mapping over shared storage
///
/// Entries are kept in a `BTreeMap`, so iteration order is deterministic.
#[derive(Clone)]
pub struct Mapping {
    key: Type,
    value: Type,
    entries: Option<Shared<BTreeMap<MapKey, Value>>>,
}

impl Mapping {
    /// An empty, non-nil mapping
    pub fn new(key: Type, value: Type) -> Self {
        Self::from_entries::<MapKey, Value>(key, value, [])
    }

    /// A populated mapping over fresh storage
    pub fn from_entries<K, V>(
        key: Type,
        value: Type,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<MapKey>,
        V: Into<Value>,
    {
        let entries: BTreeMap<MapKey, Value> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            key,
            value,
            entries: Some(shared(entries)),
        }
    }

    /// The nil mapping of the given key and value types
    pub fn nil(key: Type, value: Type) -> Self {
        Self {
            key,
            value,
            entries: None,
        }
    }

    /// A mapping viewing existing storage
    pub fn from_shared(key: Type, value: Type, entries: Shared<BTreeMap<MapKey, Value>>) -> Self {
        Self {
            key,
            value,
            entries: Some(entries),
        }
    }

    pub fn entries(&self) -> Option<&Shared<BTreeMap<MapKey, Value>>> {
        self.entries.as_ref()
    }

    pub fn is_nil(&self) -> bool {
        self.entries.is_none()
    }

    /// Number of entries; zero for a nil mapping
    ///
    /// # Panics
    ///
    /// Panics if the storage is currently mutably borrowed.
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |e| e.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when both mappings view the same underlying storage
    pub fn same_storage(&self, other: &Mapping) -> bool {
        match (&self.entries, &other.entries) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn type_of(&self) -> Type {
        Type::mapping(self.key.clone(), self.value.clone())
    }
}

/// Single-target pointer
#[derive(Clone)]
pub struct Reference {
    elem: Type,
    target: Option<Shared<Value>>,
}

impl Reference {
    /// Point at existing storage
    pub fn to(elem: Type, target: Shared<Value>) -> Self {
        Self {
            elem,
            target: Some(target),
        }
    }

    /// Point at a freshly allocated copy of `value`
    pub fn new_target(elem: Type, value: impl Into<Value>) -> Self {
        Self::to(elem, shared(value.into()))
    }

    pub fn nil(elem: Type) -> Self {
        Self { elem, target: None }
    }

    pub fn target(&self) -> Option<&Shared<Value>> {
        self.target.as_ref()
    }

    pub fn is_nil(&self) -> bool {
        self.target.is_none()
    }

    /// True when both references point at the same target; two nil
    /// references share the null target.
    pub fn same_target(&self, other: &Reference) -> bool {
        match (&self.target, &other.target) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn type_of(&self) -> Type {
        Type::reference(self.elem.clone())
    }
}

/// Type-erased wrapper around a concrete value
#[derive(Clone)]
pub struct Dynamic {
    name: String,
    inner: Option<Box<Value>>,
}

impl Dynamic {
    /// Wrap `value` in the anonymous wrapper type; wrapping `Nil` yields an
    /// empty wrapper.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::named("", value)
    }

    /// Wrap `value` in a named wrapper type
    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            inner: (!value.is_nil()).then(|| Box::new(value)),
        }
    }

    /// The empty wrapper of the given wrapper type; `""` is `interface {}`
    pub fn nil(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: None,
        }
    }

    /// Wrapper type name; empty for the anonymous wrapper
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The concrete value behind the wrapper
    pub fn inner(&self) -> Option<&Value> {
        self.inner.as_deref()
    }

    pub fn is_nil(&self) -> bool {
        self.inner.is_none()
    }

    pub fn type_of(&self) -> Type {
        Type::Dynamic(self.name.clone())
    }
}

type Func = Rc<dyn Fn(&[Value]) -> Value>;

/// Function value
#[derive(Clone)]
pub struct Callable {
    signature: String,
    func: Option<Func>,
}

impl Callable {
    pub fn new(signature: impl Into<String>, func: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self {
            signature: signature.into(),
            func: Some(Rc::new(func)),
        }
    }

    pub fn nil(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            func: None,
        }
    }

    pub fn is_nil(&self) -> bool {
        self.func.is_none()
    }

    /// Invoke the function; `None` when unset
    pub fn call(&self, args: &[Value]) -> Option<Value> {
        self.func.as_ref().map(|f| f(args))
    }

    /// Address of the function object, used only for rendering
    pub(crate) fn addr(&self) -> Option<usize> {
        self.func
            .as_ref()
            .map(|f| Rc::as_ptr(f).cast::<()>() as usize)
    }

    pub fn type_of(&self) -> Type {
        Type::callable(self.signature.clone())
    }
}
