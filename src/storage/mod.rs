//! Storage implementations for local development and tests

pub mod in_memory;

pub use in_memory::InMemoryNewsSource;
