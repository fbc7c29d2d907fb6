use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use super::{CompanyId, ProjectId, TimeEntry};
use crate::domain::HoursError;

/// Lifecycle state of a project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Paused,
    Cancelled,
}

/// A billing/budget container that time entries accrue against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client_name: Option<String>,
    pub company_id: Option<CompanyId>,
    /// Hourly rate in cents.
    pub hourly_rate: Option<i32>,
    /// Budget ceiling in hours.
    pub budget_hours: Option<i32>,
    /// Logged time in minutes. Derived from the project's entries, see
    /// [`total_minutes`].
    pub total_minutes: i32,
    pub status: ProjectStatus,
    pub start_date: Option<OffsetDateTime>,
    pub end_date: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Project {
    pub fn from_new(id: ProjectId, new: NewProject, now: OffsetDateTime) -> Self {
        Self {
            id,
            name: new.name,
            client_name: new.client_name,
            company_id: new.company_id,
            hourly_rate: new.hourly_rate,
            budget_hours: new.budget_hours,
            total_minutes: 0,
            status: ProjectStatus::Active,
            start_date: new.start_date,
            end_date: new.end_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: ProjectUpdate, now: OffsetDateTime) -> Result<(), HoursError> {
        update.validate()?;

        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(client_name) = update.client_name {
            next.client_name = Some(client_name);
        }
        if let Some(company_id) = update.company_id {
            next.company_id = Some(company_id);
        }
        if let Some(rate) = update.hourly_rate {
            next.hourly_rate = Some(rate);
        }
        if let Some(budget) = update.budget_hours {
            next.budget_hours = Some(budget);
        }
        if let Some(status) = update.status {
            next.status = status;
        }
        if let Some(start) = update.start_date {
            next.start_date = Some(start);
        }
        if let Some(end) = update.end_date {
            next.end_date = Some(end);
        }
        check_dates(next.start_date, next.end_date)?;
        next.updated_at = now;
        *self = next;

        Ok(())
    }
}

/// Sum of minutes of the entries that count towards `project`.
///
/// Rejected entries are left out; entries of other projects are ignored.
pub fn total_minutes<'a>(
    project: ProjectId,
    entries: impl IntoIterator<Item = &'a TimeEntry>,
) -> i64 {
    entries
        .into_iter()
        .filter(|e| e.project_id == project && e.status.counts_towards_project())
        .map(|e| i64::from(e.minutes))
        .sum()
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub client_name: Option<String>,
    pub company_id: Option<CompanyId>,
    pub hourly_rate: Option<i32>,
    pub budget_hours: Option<i32>,
    pub start_date: Option<OffsetDateTime>,
    pub end_date: Option<OffsetDateTime>,
}

impl NewProject {
    pub fn validate(&self) -> Result<(), HoursError> {
        validate_name(&self.name)?;
        validate_non_negative("hourlyRate", self.hourly_rate)?;
        validate_non_negative("budgetHours", self.budget_hours)?;
        check_dates(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub client_name: Option<String>,
    pub company_id: Option<CompanyId>,
    pub hourly_rate: Option<i32>,
    pub budget_hours: Option<i32>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<OffsetDateTime>,
    pub end_date: Option<OffsetDateTime>,
}

impl ProjectUpdate {
    fn validate(&self) -> Result<(), HoursError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_non_negative("hourlyRate", self.hourly_rate)?;
        validate_non_negative("budgetHours", self.budget_hours)
    }
}

fn validate_name(name: &str) -> Result<(), HoursError> {
    if name.trim().is_empty() {
        return Err(HoursError::validation("name must not be empty"));
    }
    Ok(())
}

fn validate_non_negative(field: &str, value: Option<i32>) -> Result<(), HoursError> {
    match value {
        Some(v) if v < 0 => Err(HoursError::validation(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}

fn check_dates(start: Option<OffsetDateTime>, end: Option<OffsetDateTime>) -> Result<(), HoursError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(HoursError::InvalidDateRange),
        _ => Ok(()),
    }
}
