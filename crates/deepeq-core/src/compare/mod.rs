//! Structural comparator
//!
//! ## Entry points
//!
//! ```
//! use deepeq_core::{deep_equal, Record, Value};
//!
//! let a = Value::from(Record::new("P").field("A", 1).field("B", 2));
//! let b = Value::from(Record::new("P").field("A", 1).field("B", 3));
//!
//! let err = deep_equal(&a, &b).unwrap_err();
//! assert_eq!(err.to_string(), "values.B are not equal, where in x is 2 but in y is 3");
//! ```
//!
//! ## Guarantees
//!
//! - **First divergence only**: the walk is depth-first in index, declaration
//!   and key order and stops at the first difference.
//! - **Termination on cycles**: every sequence/mapping pair, and every
//!   addressable array/record pair, is recorded before it is entered; a
//!   recorded pair met again is treated as equal.
//! - **Per-call state**: a [`Comparator`] is consumed by [`Comparator::compare`],
//!   so the visited set never outlives a single call.

mod visited;
mod walker;

use crate::errors::{Divergence, Reason, Result};
use crate::reflect::Reflect;
use crate::trace::Side;
use crate::value::Value;
use crate::{log_op_end, log_op_error, log_op_start};
use deepeq_core_types::CallId;
use serde::{Deserialize, Serialize};
use visited::Visited;

/// Counters collected during one comparison call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareStats {
    /// Distinct pairs recorded by the cycle detector
    pub visited_pairs: usize,
    /// Sequences, mappings or references found to share storage
    pub identity_shortcuts: usize,
    /// Descents skipped because the pair was already recorded
    pub cycle_shortcuts: usize,
    /// Deepest recursion level reached
    pub max_depth: usize,
}

/// State of a single comparison call
#[derive(Debug, Default)]
pub struct Comparator {
    visited: Visited,
    stats: CompareStats,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `x` (first) against `y` (second).
    ///
    /// Absence and top-level type compatibility are checked before any
    /// recursion.
    ///
    /// # Errors
    ///
    /// Returns the first [`Divergence`] found.
    ///
    /// # Panics
    ///
    /// Panics if shared storage reachable from either value is mutably
    /// borrowed for the duration of the call.
    pub fn compare(mut self, x: &Value, y: &Value) -> Result<CompareStats> {
        let (tx, ty) = match (x.type_of(), y.type_of()) {
            (None, None) => return Ok(self.stats),
            (None, Some(_)) => {
                return Err(Divergence::new(Reason::AbsenceMismatch { absent: Side::X }))
            }
            (Some(_), None) => {
                return Err(Divergence::new(Reason::AbsenceMismatch { absent: Side::Y }))
            }
            (Some(tx), Some(ty)) => (tx, ty),
        };
        if tx != ty {
            return Err(Divergence::new(Reason::TypeMismatch {
                x: tx.to_string(),
                y: ty.to_string(),
            }));
        }

        self.walk(x, y, false, 0)?;
        self.stats.visited_pairs = self.visited.len();
        Ok(self.stats)
    }
}

/// Check two values for structural equality, explaining the first divergence.
///
/// Emits `start`/`end`/`end_error` events for the `deep_equal` operation.
///
/// # Errors
///
/// Returns the first [`Divergence`] found; its `Display` is the sentence
/// `values<path> <reason>`.
pub fn deep_equal(x: &Value, y: &Value) -> Result<()> {
    let call_id = CallId::new();
    log_op_start!("deep_equal", call_id = %call_id);
    let start = std::time::Instant::now();

    match Comparator::new().compare(x, y) {
        Ok(stats) => {
            log_op_end!(
                "deep_equal",
                duration_ms = start.elapsed().as_millis() as u64,
                call_id = %call_id,
                visited_pairs = stats.visited_pairs,
                identity_shortcuts = stats.identity_shortcuts,
                cycle_shortcuts = stats.cycle_shortcuts,
                max_depth = stats.max_depth
            );
            Ok(())
        }
        Err(divergence) => {
            log_op_error!(
                "deep_equal",
                divergence,
                duration_ms = start.elapsed().as_millis() as u64,
                call_id = %call_id,
                path = %divergence.path_string()
            );
            Err(divergence)
        }
    }
}

/// [`deep_equal`] for any type with a [`Reflect`] capability
///
/// # Errors
///
/// Returns the first [`Divergence`] between the reflected values.
pub fn deep_equal_of<T: Reflect + ?Sized>(x: &T, y: &T) -> Result<()> {
    deep_equal(&x.reflect(), &y.reflect())
}

/// Boolean form of [`deep_equal`]
pub fn is_deep_equal(x: &Value, y: &Value) -> bool {
    deep_equal(x, y).is_ok()
}
