//! Ports (hexagonal seams) for the Blog List API.

pub mod outbound;

pub use outbound::{BlogRepository, StoreError, SystemTimeSource, TimeSource, UserRepository};
