//! GOP — Progress context.
//!
//! Owns the single `Progress` record every section consults: its data model,
//! the idempotent beacon collector, and the fail-open `ProgressStore` that
//! persists it through a `KeyValueStore`.

pub mod application;
pub mod domain;
