//! GOP — Trials context.
//!
//! The three gating trials (visual, data, logic), the quarantine stage
//! machine that strings them together, and the gospel page's zoom-reveal
//! puzzle with its binary-encoded payload.

pub mod application;
pub mod domain;
