//! Domain model for the Progress context.

pub mod beacons;
pub mod progress;
