//! In-memory store adapters for testing.

mod projects;
mod time_entries;

pub use projects::MemoryProjectRepository;
pub use time_entries::MemoryTimeEntryRepository;
