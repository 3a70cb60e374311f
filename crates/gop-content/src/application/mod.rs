pub mod library;
pub mod source;
