mod projects;
mod time_entries;

pub use projects::PostgresProjectRepository;
pub use time_entries::PostgresTimeEntryRepository;

use crate::domain::HoursError;

fn storage_error(err: sqlx::Error) -> HoursError {
    tracing::error!("Database error: {:?}", err);
    HoursError::storage(err.to_string())
}
