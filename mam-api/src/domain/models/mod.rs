mod budget;
mod date_range;
mod ids;
mod project;
mod summary;
mod time_entry;

pub use budget::*;
pub use date_range::*;
pub use ids::*;
pub use project::*;
pub use summary::*;
pub use time_entry::*;
