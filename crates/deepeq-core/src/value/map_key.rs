use serde::{Deserialize, Serialize};
use std::fmt;

/// Hashable, ordered key of a mapping entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Str(String),
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Bool(b) => write!(f, "{b}"),
            MapKey::Int(n) => write!(f, "{n}"),
            MapKey::Uint(n) => write!(f, "{n}"),
            MapKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for MapKey {
    fn from(b: bool) -> Self {
        MapKey::Bool(b)
    }
}

impl From<i64> for MapKey {
    fn from(n: i64) -> Self {
        MapKey::Int(n)
    }
}

impl From<i32> for MapKey {
    fn from(n: i32) -> Self {
        MapKey::Int(i64::from(n))
    }
}

impl From<u64> for MapKey {
    fn from(n: u64) -> Self {
        MapKey::Uint(n)
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::Str(s.to_string())
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::Str(s)
    }
}
