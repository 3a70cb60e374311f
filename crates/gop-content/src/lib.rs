//! GOP — Content context.
//!
//! Static documents the sections read: the scriptures (status messages,
//! logic puzzle items, gospel manuscripts) and the game config. Loading is
//! the only asynchronous boundary in the workspace, and it never fails
//! outward; a missing document leaves the library on its fallbacks.

pub mod application;
pub mod domain;
mod error;

pub use error::ContentError;
