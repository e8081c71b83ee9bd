//! Core data structures: terms, the store that owns them, and choice points

pub mod choice;
pub mod store;
pub mod structure;
pub mod term;
pub mod value;
