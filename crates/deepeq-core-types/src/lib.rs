//! Core types shared across deepeq facilities
//!
//! This crate provides foundational types used by the comparator and its
//! logging facility:
//!
//! - **Correlation types**: CallId, tagging the events of one top-level comparison
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::CallId;
