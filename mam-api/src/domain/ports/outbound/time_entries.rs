//! Time entry store port (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{DateRange, NewTimeEntry, ProjectId, TimeEntry, TimeEntryId, UserId},
    HoursError,
};

/// Outbound port for time entry persistence.
#[async_trait]
pub trait TimeEntryRepository: Send + Sync + 'static {
    /// Store a new draft entry and return it with its assigned id.
    async fn insert(&self, entry: &NewTimeEntry) -> Result<TimeEntry, HoursError>;

    async fn get(&self, id: TimeEntryId) -> Result<Option<TimeEntry>, HoursError>;

    /// All entries of `user_id` whose date lies inside `range` (inclusive),
    /// newest first. No match is an empty list.
    async fn list_in_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<Vec<TimeEntry>, HoursError>;

    /// All entries logged against a project, regardless of status.
    async fn list_for_project(&self, project_id: ProjectId) -> Result<Vec<TimeEntry>, HoursError>;

    /// Persist every mutable field of an existing entry.
    async fn update(&self, entry: &TimeEntry) -> Result<(), HoursError>;

    /// Returns `false` when no entry had that id.
    async fn delete(&self, id: TimeEntryId) -> Result<bool, HoursError>;
}
