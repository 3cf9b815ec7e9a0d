//! Store backend implementations.

pub mod memory;
