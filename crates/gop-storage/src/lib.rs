//! GOP Storage — `KeyValueStore` backends.
//!
//! `MemoryStore` backs a single section view (and tests); `FileStore`
//! persists each key as a file under a data directory so progress survives
//! restarts. `DisabledStore` stands in when neither is available.

pub mod disabled_store;
pub mod file_store;
pub mod memory_store;

pub use disabled_store::DisabledStore;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
