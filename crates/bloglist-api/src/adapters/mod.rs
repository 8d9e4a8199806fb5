//! Adapters for the Blog List API.
//!
//! Infrastructure implementations of the ports plus error conversions.

pub mod error_conversions;
pub mod memory;

pub use memory::InMemoryStore;
