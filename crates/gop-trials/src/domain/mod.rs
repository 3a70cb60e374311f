//! Domain model for the Trials context.

pub mod binary;
pub mod data;
pub mod flow;
pub mod logic;
pub mod outcome;
pub mod reveal;
pub mod visual;
