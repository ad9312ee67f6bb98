use crate::trace::{render_path, Segment, Side};
use deepeq_core_types::schema::ROOT_LABEL;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Result type alias: `Ok(())` means equal, `Err` carries the first divergence
pub type Result<T> = std::result::Result<T, Divergence>;

// ========== Divergence Facility ==========

/// Canonical divergence kind taxonomy
///
/// Each kind maps to a stable code usable for programmatic handling and
/// machine-readable test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DivergenceKind {
    /// Types differ, at the top level or behind a dynamic wrapper
    TypeMismatch,
    /// One side absent, the other populated
    AbsenceMismatch,
    /// Sequence or mapping sizes differ
    LengthMismatch,
    /// Mapping entry or record field present on one side only
    KeyMissing,
    /// Leaf renderings differ
    ValueMismatch,
    /// A leaf is NaN
    NaN,
    /// Two populated callables
    CallableDivergence,
}

impl DivergenceKind {
    /// Get the stable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DivergenceKind::TypeMismatch => "DIV_TYPE_MISMATCH",
            DivergenceKind::AbsenceMismatch => "DIV_ABSENCE_MISMATCH",
            DivergenceKind::LengthMismatch => "DIV_LENGTH_MISMATCH",
            DivergenceKind::KeyMissing => "DIV_KEY_MISSING",
            DivergenceKind::ValueMismatch => "DIV_VALUE_MISMATCH",
            DivergenceKind::NaN => "DIV_NAN",
            DivergenceKind::CallableDivergence => "DIV_CALLABLE",
        }
    }
}

/// Why two values diverge at the end of a path
///
/// The messages are clauses completing `"values<path> "`; `x` is the first
/// argument and `y` the second.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    #[error("have different types, where in x is {x} but in y is {y}")]
    TypeMismatch { x: String, y: String },

    #[error("in {absent} is nil but in {} is not", .absent.other())]
    AbsenceMismatch { absent: Side },

    #[error("do not have the same length, where in x is {x} but in y is {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("is missing in {missing_in}")]
    KeyMissing { missing_in: Side },

    #[error("are not equal, where in x is {x} but in y is {y}")]
    ValueMismatch { x: String, y: String },

    #[error("in {side} is NaN float")]
    NaN { side: Side },

    #[error("have different funcs")]
    CallableDivergence,
}

impl Reason {
    pub fn kind(&self) -> DivergenceKind {
        match self {
            Reason::TypeMismatch { .. } => DivergenceKind::TypeMismatch,
            Reason::AbsenceMismatch { .. } => DivergenceKind::AbsenceMismatch,
            Reason::LengthMismatch { .. } => DivergenceKind::LengthMismatch,
            Reason::KeyMissing { .. } => DivergenceKind::KeyMissing,
            Reason::ValueMismatch { .. } => DivergenceKind::ValueMismatch,
            Reason::NaN { .. } => DivergenceKind::NaN,
            Reason::CallableDivergence => DivergenceKind::CallableDivergence,
        }
    }
}

/// The first structural difference found between two values
///
/// Built at the leaf where the difference is detected; every enclosing
/// frame then prepends its own [`Segment`] via [`Divergence::within`] while
/// the recursion unwinds.
#[derive(Debug, Clone, PartialEq)]
pub struct Divergence {
    path: VecDeque<Segment>,
    reason: Reason,
    depth: usize,
}

impl Divergence {
    /// Create a divergence with an empty path
    pub fn new(reason: Reason) -> Self {
        Self {
            path: VecDeque::new(),
            reason,
            depth: 0,
        }
    }

    /// Record the recursion depth at which the divergence was found
    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Prepend an enclosing segment
    pub fn within(mut self, segment: Segment) -> Self {
        self.path.push_front(segment);
        self
    }

    /// Path segments, outermost first
    pub fn path(&self) -> impl Iterator<Item = &Segment> {
        self.path.iter()
    }

    /// Rendered path, e.g. `.Items[2](Pointer).Name`
    pub fn path_string(&self) -> String {
        render_path(&self.path)
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    pub fn kind(&self) -> DivergenceKind {
        self.reason.kind()
    }

    /// Get the stable code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Machine-readable form of this divergence
    pub fn to_record(&self) -> DivergenceRecord {
        DivergenceRecord {
            code: self.code().to_string(),
            kind: self.kind(),
            path: self.path.iter().map(ToString::to_string).collect(),
            depth: self.depth,
            reason: self.reason.clone(),
            message: self.to_string(),
        }
    }
}

impl std::fmt::Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{ROOT_LABEL}")?;
        for segment in &self.path {
            write!(f, "{segment}")?;
        }
        write!(f, " {}", self.reason)
    }
}

impl std::error::Error for Divergence {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

// ========== End Divergence Facility ==========

/// Serializable divergence record
///
/// All fields are populated so downstream tooling can match on `code` or
/// `path` without parsing `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivergenceRecord {
    /// Stable code, e.g. `DIV_VALUE_MISMATCH`
    pub code: String,
    pub kind: DivergenceKind,
    /// Rendered path segments, outermost first
    pub path: Vec<String>,
    /// Recursion depth of the leaf divergence
    pub depth: usize,
    pub reason: Reason,
    /// The human-readable sentence
    pub message: String,
}

impl DivergenceRecord {
    /// Serialize to a JSON string
    ///
    /// # Errors
    ///
    /// Returns the serializer error if encoding fails.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_unique() {
        let kinds = [
            DivergenceKind::TypeMismatch,
            DivergenceKind::AbsenceMismatch,
            DivergenceKind::LengthMismatch,
            DivergenceKind::KeyMissing,
            DivergenceKind::ValueMismatch,
            DivergenceKind::NaN,
            DivergenceKind::CallableDivergence,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_within_prepends() {
        let div = Divergence::new(Reason::ValueMismatch {
            x: "2".into(),
            y: "3".into(),
        })
        .within(Segment::Field("B".into()))
        .within(Segment::Index(1));
        assert_eq!(div.path_string(), "[1].B");
        assert_eq!(
            div.to_string(),
            "values[1].B are not equal, where in x is 2 but in y is 3"
        );
    }

    #[test]
    fn test_absence_message_names_both_sides() {
        let div = Divergence::new(Reason::AbsenceMismatch { absent: Side::Y });
        assert_eq!(div.to_string(), "values in y is nil but in x is not");
    }

    #[test]
    fn test_source_is_reason() {
        use std::error::Error as _;
        let div = Divergence::new(Reason::CallableDivergence);
        let source = div.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("have different funcs"));
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let div = Divergence::new(Reason::NaN { side: Side::X })
            .at_depth(2)
            .within(Segment::Key("k".into()));
        let record = div.to_record();
        let json = record.to_json().unwrap();
        let back: DivergenceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.code, "DIV_NAN");
        assert_eq!(back.path, vec!["[k]".to_string()]);
        assert_eq!(back.depth, 2);
    }
}
