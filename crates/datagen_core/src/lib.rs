//! datagen_core: host-agnostic core for periodic value generators.
//!
//! Design goals:
//! - Pure, testable logic (no threads spawned, no host deps).
//! - Explicit types; no macro wizardry.
//! - Small, stable public API surface.

pub mod error;

/// Generator settings (period, kind, event capacity).
pub mod config;

/// Generator lifecycle state machine + exit latch.
pub mod lifecycle;

/// Generator models derived from data types and data services.
pub mod model;

/// Value sets and the single-slot value store.
pub mod values;
