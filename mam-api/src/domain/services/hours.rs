use std::sync::Arc;

use async_trait::async_trait;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::domain::{
    models::{
        total_minutes, DateRange, NewProject, NewTimeEntry, Project, ProjectBudget, ProjectId,
        ProjectUpdate, StatusChange, TimeEntry, TimeEntryId, TimeEntryUpdate, UserId,
        WeeklySummary,
    },
    ports::{
        inbound::HoursService,
        outbound::{ProjectRepository, TimeEntryRepository},
    },
    HoursError,
};

/// Implementation of the HoursService inbound port.
///
/// Week boundaries are computed in `offset`, the server's local offset
/// captured at startup.
pub struct HoursServiceImpl<E, P> {
    entries: Arc<E>,
    projects: Arc<P>,
    offset: UtcOffset,
}

impl<E, P> HoursServiceImpl<E, P> {
    pub fn new(entries: Arc<E>, projects: Arc<P>, offset: UtcOffset) -> Self {
        Self {
            entries,
            projects,
            offset,
        }
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

impl<E: TimeEntryRepository, P: ProjectRepository> HoursServiceImpl<E, P> {
    async fn require_entry(&self, id: TimeEntryId) -> Result<TimeEntry, HoursError> {
        self.entries
            .get(id)
            .await?
            .ok_or(HoursError::TimeEntryNotFound(id))
    }

    async fn require_project(&self, id: ProjectId) -> Result<Project, HoursError> {
        self.projects
            .get(id)
            .await?
            .ok_or(HoursError::ProjectNotFound(id))
    }

    async fn recompute(&self, id: ProjectId) -> Result<i32, HoursError> {
        let entries = self.entries.list_for_project(id).await?;
        let minutes = i32::try_from(total_minutes(id, &entries))
            .map_err(|_| HoursError::storage(format!("total hours of project {id} overflow")))?;

        self.projects.set_total_minutes(id, minutes).await?;
        tracing::debug!(project_id = %id, minutes, "recomputed project hours");

        Ok(minutes)
    }

    /// Refresh project totals after an entry mutation. The mutation itself
    /// already succeeded, so failures are only logged.
    async fn refresh_totals(&self, ids: &[ProjectId]) {
        for id in ids {
            if let Err(e) = self.recompute(*id).await {
                tracing::error!(project_id = %id, "Failed to recompute project hours: {:?}", e);
            }
        }
    }
}

#[async_trait]
impl<E: TimeEntryRepository, P: ProjectRepository> HoursService for HoursServiceImpl<E, P> {
    async fn list_time_entries(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<Vec<TimeEntry>, HoursError> {
        self.entries.list_in_range(user_id, range).await
    }

    async fn get_time_entry(&self, id: TimeEntryId) -> Result<TimeEntry, HoursError> {
        self.require_entry(id).await
    }

    async fn create_time_entry(&self, entry: NewTimeEntry) -> Result<TimeEntry, HoursError> {
        entry.validate()?;
        self.require_project(entry.project_id).await?;

        let created = self.entries.insert(&entry).await?;
        tracing::info!(entry_id = %created.id, user_id = %created.user_id, "time entry created");

        self.refresh_totals(&[created.project_id]).await;
        Ok(created)
    }

    async fn update_time_entry(
        &self,
        id: TimeEntryId,
        update: TimeEntryUpdate,
    ) -> Result<TimeEntry, HoursError> {
        let mut entry = self.require_entry(id).await?;
        let previous_project = entry.project_id;

        entry.apply(update, self.now())?;
        if entry.project_id != previous_project {
            self.require_project(entry.project_id).await?;
        }
        self.entries.update(&entry).await?;

        if entry.project_id == previous_project {
            self.refresh_totals(&[entry.project_id]).await;
        } else {
            self.refresh_totals(&[previous_project, entry.project_id])
                .await;
        }

        Ok(entry)
    }

    async fn delete_time_entry(&self, id: TimeEntryId) -> Result<(), HoursError> {
        let entry = self.require_entry(id).await?;

        if !self.entries.delete(id).await? {
            return Err(HoursError::TimeEntryNotFound(id));
        }
        tracing::info!(entry_id = %id, "time entry deleted");

        self.refresh_totals(&[entry.project_id]).await;
        Ok(())
    }

    async fn change_status(
        &self,
        id: TimeEntryId,
        change: StatusChange,
    ) -> Result<TimeEntry, HoursError> {
        let mut entry = self.require_entry(id).await?;
        let from = entry.status;

        entry.transition(change, self.now())?;
        self.entries.update(&entry).await?;
        tracing::info!(entry_id = %id, %from, to = %entry.status, "time entry status changed");

        self.refresh_totals(&[entry.project_id]).await;
        Ok(entry)
    }

    async fn weekly_summary(
        &self,
        user_id: &UserId,
        week_of: Option<Date>,
    ) -> Result<WeeklySummary, HoursError> {
        let range = match week_of {
            Some(date) => DateRange::week_of(date, self.offset)?,
            None => DateRange::week_containing(self.now())?,
        };

        let entries = self.entries.list_in_range(user_id, &range).await?;
        let summary = WeeklySummary::from_entries(&entries);
        tracing::debug!(
            %user_id,
            week_start = %range.start(),
            entries = entries.len(),
            total_hours = summary.total_hours,
            "computed weekly summary"
        );

        Ok(summary)
    }

    async fn project_budget(&self, id: ProjectId) -> Result<ProjectBudget, HoursError> {
        let project = self.require_project(id).await?;
        Ok(ProjectBudget::for_project(&project))
    }

    async fn recompute_project_hours(&self, id: ProjectId) -> Result<Project, HoursError> {
        self.require_project(id).await?;
        self.recompute(id).await?;
        self.require_project(id).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, HoursError> {
        self.projects.list().await
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, HoursError> {
        self.require_project(id).await
    }

    async fn create_project(&self, project: NewProject) -> Result<Project, HoursError> {
        project.validate()?;

        let created = self.projects.insert(&project).await?;
        tracing::info!(project_id = %created.id, name = %created.name, "project created");

        Ok(created)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        update: ProjectUpdate,
    ) -> Result<Project, HoursError> {
        let mut project = self.require_project(id).await?;
        project.apply(update, self.now())?;
        self.projects.update(&project).await?;

        Ok(project)
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), HoursError> {
        if !self.projects.delete(id).await? {
            return Err(HoursError::ProjectNotFound(id));
        }
        tracing::info!(project_id = %id, "project deleted");

        Ok(())
    }
}
