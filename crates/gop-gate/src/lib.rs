//! GOP — Gate context.
//!
//! The gate is the entry to the quarantine zone. It appears as soon as any
//! beacon is collected, and it is where the write-once ending is chosen.

pub mod application;
pub mod domain;
