//! deepeq Core - structural equality with explanations
//!
//! This crate compares two runtime values structurally and, when they
//! differ, reports *where* and *why* as a path plus a reason:
//!
//! ```text
//! values.Items[2](Pointer).Name are not equal, where in x is a but in y is b
//! ```
//!
//! It provides:
//! - A closed value model (`value`) with shared storage for identity and cycles
//! - The recursive comparator (`compare`) with a per-call cycle detector
//! - Structured divergence records with stable codes (`errors`, `trace`)
//! - A `Reflect` capability for comparing native Rust data
//! - A structured logging facility built on `tracing`

pub mod compare;
pub mod errors;
pub mod logging_facility;
pub mod reflect;
pub mod trace;
pub mod value;

pub use deepeq_core_types as core_types;

// Re-export commonly used types
pub use compare::{deep_equal, deep_equal_of, is_deep_equal, CompareStats, Comparator};
pub use errors::{Divergence, DivergenceKind, DivergenceRecord, Reason, Result};
pub use reflect::{Reflect, ReflectKey, ReflectType};
pub use trace::{Segment, Side};
pub use value::{
    shared, Array, Callable, Dynamic, Kind, MapKey, Mapping, Record, Reference, Sequence, Shared,
    Type, Value,
};

/// Assert that two values are structurally equal
///
/// Accepts any pair of the same [`Reflect`] type, including [`Value`].
/// On failure the panic message is the divergence sentence.
///
/// # Example
///
/// ```
/// use deepeq_core::assert_deep_eq;
///
/// assert_deep_eq!(vec![1i64, 2, 3], vec![1i64, 2, 3]);
/// ```
#[macro_export]
macro_rules! assert_deep_eq {
    ($x:expr, $y:expr $(,)?) => {
        if let ::std::result::Result::Err(divergence) = $crate::deep_equal_of(&$x, &$y) {
            ::std::panic!("deep equality assertion failed: {}", divergence);
        }
    };
    ($x:expr, $y:expr, $($arg:tt)+) => {
        if let ::std::result::Result::Err(divergence) = $crate::deep_equal_of(&$x, &$y) {
            ::std::panic!(
                "deep equality assertion failed: {}: {}",
                ::std::format_args!($($arg)+),
                divergence
            );
        }
    };
}
