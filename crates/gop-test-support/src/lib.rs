//! Shared test doubles for the GOP workspace.

mod clock;
mod rng;
mod storage;

pub use clock::{FixedClock, fixed_instant};
pub use rng::{MockRng, SequenceRng};
pub use storage::{ReadOnlyStore, UnavailableStore};
