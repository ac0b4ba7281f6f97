//! Team and tap stores - in-memory fallback when no database is configured.

mod memory;

pub use memory::InMemoryTapStore;
