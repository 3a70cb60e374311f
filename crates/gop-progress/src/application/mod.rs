//! Application services for the Progress context.

pub mod command_handlers;
pub mod progress_store;
