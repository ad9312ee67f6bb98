//! Divergence path segments
//!
//! Each recursion frame that sees a child divergence contributes one
//! [`Segment`]; segments concatenate outermost-first into the rendered path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which argument of the comparison a statement is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// First argument
    X,
    /// Second argument
    Y,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::X => Side::Y,
            Side::Y => Side::X,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::X => "x",
            Side::Y => "y",
        })
    }
}

/// One locator in a divergence path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Record field, rendered `.Name`
    Field(String),
    /// Array or sequence index, rendered `[i]`
    Index(usize),
    /// Mapping key (already rendered), rendered `[key]`
    Key(String),
    /// Reference dereference, rendered `(Pointer)`
    Pointer,
    /// Dynamic unwrap, rendered `(Interface)`
    Interface,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, ".{name}"),
            Segment::Index(i) => write!(f, "[{i}]"),
            Segment::Key(key) => write!(f, "[{key}]"),
            Segment::Pointer => f.write_str("(Pointer)"),
            Segment::Interface => f.write_str("(Interface)"),
        }
    }
}

/// Concatenate segments into a path string
pub fn render_path<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> String {
    segments.into_iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_rendering() {
        assert_eq!(Segment::Field("Name".into()).to_string(), ".Name");
        assert_eq!(Segment::Index(3).to_string(), "[3]");
        assert_eq!(Segment::Key("k".into()).to_string(), "[k]");
        assert_eq!(Segment::Pointer.to_string(), "(Pointer)");
        assert_eq!(Segment::Interface.to_string(), "(Interface)");
    }

    #[test]
    fn test_render_path_concatenates_in_order() {
        let path = [
            Segment::Field("Items".into()),
            Segment::Index(0),
            Segment::Pointer,
            Segment::Key("id".into()),
        ];
        assert_eq!(render_path(&path), ".Items[0](Pointer)[id]");
        assert_eq!(render_path(Vec::<Segment>::new().iter()), "");
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::X.other(), Side::Y);
        assert_eq!(Side::Y.other(), Side::X);
        assert_eq!(Side::X.to_string(), "x");
    }
}
