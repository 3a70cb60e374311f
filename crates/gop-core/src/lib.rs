//! GOP Core — shared abstractions.
//!
//! This crate defines the traits and error types every other crate depends
//! on: time, randomness and key-value persistence. It contains no
//! infrastructure code.

pub mod clock;
pub mod error;
pub mod rng;
pub mod storage;
