//! Process-local adapters used when no database is configured.

mod store;

pub use store::MemoryStore;
