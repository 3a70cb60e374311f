//! Application services for the Trials context.

pub mod command_handlers;
pub mod query_handlers;
