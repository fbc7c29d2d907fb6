mod projects;
mod time_entries;

pub use projects::*;
pub use time_entries::*;
