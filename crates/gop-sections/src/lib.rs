//! GOP — Sections.
//!
//! The three pages of the experience (index, gospel, quarantine) as
//! controllers over an injected `ProgressStore`. Each controller owns a
//! `SectionScope` so its timers die with it, and renders through a
//! `Presenter`.

pub mod config;
pub mod context;
pub mod error;
pub mod inspect;
pub mod presenter;
pub mod scope;
pub mod sections;
pub mod telemetry;
