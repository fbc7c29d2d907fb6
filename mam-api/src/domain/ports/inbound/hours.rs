use async_trait::async_trait;
use time::Date;

use crate::domain::{
    models::{
        DateRange, NewProject, NewTimeEntry, Project, ProjectBudget, ProjectId, ProjectUpdate,
        StatusChange, TimeEntry, TimeEntryId, TimeEntryUpdate, UserId, WeeklySummary,
    },
    HoursError,
};

/// Inbound port for hours tracking.
///
/// This trait defines the use cases that HTTP handlers can invoke.
/// It orchestrates the time entry and project stores and the pure
/// aggregation/budget calculations.
#[async_trait]
pub trait HoursService: Send + Sync + 'static {
    // ========================================================================
    // Time Entries
    // ========================================================================

    /// Entries of a user inside an inclusive range, newest first.
    async fn list_time_entries(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<Vec<TimeEntry>, HoursError>;

    async fn get_time_entry(&self, id: TimeEntryId) -> Result<TimeEntry, HoursError>;

    /// Log a new draft entry against an existing project.
    async fn create_time_entry(&self, entry: NewTimeEntry) -> Result<TimeEntry, HoursError>;

    async fn update_time_entry(
        &self,
        id: TimeEntryId,
        update: TimeEntryUpdate,
    ) -> Result<TimeEntry, HoursError>;

    async fn delete_time_entry(&self, id: TimeEntryId) -> Result<(), HoursError>;

    /// Move an entry through the approval workflow.
    async fn change_status(
        &self,
        id: TimeEntryId,
        change: StatusChange,
    ) -> Result<TimeEntry, HoursError>;

    // ========================================================================
    // Aggregation
    // ========================================================================

    /// Summary of the Sunday–Saturday week containing `week_of`, or the
    /// current week in server time when `None`.
    async fn weekly_summary(
        &self,
        user_id: &UserId,
        week_of: Option<Date>,
    ) -> Result<WeeklySummary, HoursError>;

    async fn project_budget(&self, id: ProjectId) -> Result<ProjectBudget, HoursError>;

    /// Re-derive a project's logged minutes from its non-rejected entries.
    async fn recompute_project_hours(&self, id: ProjectId) -> Result<Project, HoursError>;

    // ========================================================================
    // Projects
    // ========================================================================

    async fn list_projects(&self) -> Result<Vec<Project>, HoursError>;

    async fn get_project(&self, id: ProjectId) -> Result<Project, HoursError>;

    async fn create_project(&self, project: NewProject) -> Result<Project, HoursError>;

    async fn update_project(
        &self,
        id: ProjectId,
        update: ProjectUpdate,
    ) -> Result<Project, HoursError>;

    async fn delete_project(&self, id: ProjectId) -> Result<(), HoursError>;
}
