pub mod config;
pub mod scriptures;
