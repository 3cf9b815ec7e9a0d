//! Infrastructure adapters for team and task stores.

pub mod store;

pub use store::memory::InMemoryWorkspace;
