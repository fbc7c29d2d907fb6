use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use super::{CompanyId, ProjectId, TimeEntryId, UserId};
use crate::domain::HoursError;

/// What kind of work a time entry covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimeEntryCategory {
    LegalSupport,
    Research,
    Documentation,
    Meetings,
    Administration,
    Other,
}

/// Approval state of a time entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimeEntryStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl TimeEntryStatus {
    /// Whether the approval workflow allows moving from `self` to `next`.
    ///
    /// Approved entries are final; everything else can be sent back to
    /// draft or resubmitted.
    pub fn can_transition_to(self, next: TimeEntryStatus) -> bool {
        use TimeEntryStatus::*;

        matches!(
            (self, next),
            (Draft, Submitted)
                | (Submitted, Approved)
                | (Submitted, Rejected)
                | (Submitted, Draft)
                | (Rejected, Draft)
                | (Rejected, Submitted)
        )
    }

    /// Rejected entries do not count towards a project's logged hours.
    pub fn counts_towards_project(self) -> bool {
        self != TimeEntryStatus::Rejected
    }
}

/// A single logged work interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    pub id: TimeEntryId,
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub company_id: Option<CompanyId>,
    pub task_description: String,
    /// Logged duration in minutes.
    pub minutes: i32,
    /// Calendar timestamp the work belongs to.
    pub date: OffsetDateTime,
    pub category: TimeEntryCategory,
    pub notes: Option<String>,
    pub billable_rate: Option<i32>,
    pub status: TimeEntryStatus,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TimeEntry {
    /// Build a freshly created draft entry from a validated request.
    pub fn from_new(id: TimeEntryId, new: NewTimeEntry, now: OffsetDateTime) -> Self {
        Self {
            id,
            user_id: new.user_id,
            project_id: new.project_id,
            company_id: new.company_id,
            task_description: new.task_description,
            minutes: new.minutes,
            date: new.date,
            category: new.category,
            notes: new.notes,
            billable_rate: new.billable_rate,
            status: TimeEntryStatus::Draft,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial edit. Returns the validation error if the edit would
    /// break an invariant; the entry is left untouched in that case.
    /// Approved entries are frozen.
    pub fn apply(&mut self, update: TimeEntryUpdate, now: OffsetDateTime) -> Result<(), HoursError> {
        if self.status == TimeEntryStatus::Approved {
            return Err(HoursError::EntryApproved(self.id));
        }
        update.validate()?;

        if let Some(project_id) = update.project_id {
            self.project_id = project_id;
        }
        if let Some(company_id) = update.company_id {
            self.company_id = Some(company_id);
        }
        if let Some(description) = update.task_description {
            self.task_description = description;
        }
        if let Some(minutes) = update.minutes {
            self.minutes = minutes;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        if let Some(rate) = update.billable_rate {
            self.billable_rate = Some(rate);
        }
        self.updated_at = now;

        Ok(())
    }

    /// Move the entry through the approval workflow.
    pub fn transition(&mut self, change: StatusChange, now: OffsetDateTime) -> Result<(), HoursError> {
        if !self.status.can_transition_to(change.status) {
            return Err(HoursError::InvalidStatusTransition {
                from: self.status,
                to: change.status,
            });
        }

        if change.status == TimeEntryStatus::Approved {
            let approver = change
                .approved_by
                .ok_or_else(|| HoursError::validation("approvedBy is required to approve"))?;
            self.approved_by = Some(approver);
            self.approved_at = Some(now);
        }

        self.status = change.status;
        self.updated_at = now;

        Ok(())
    }
}

/// Data for logging a new time entry (manual entry or stopped timer).
#[derive(Debug, Clone)]
pub struct NewTimeEntry {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub company_id: Option<CompanyId>,
    pub task_description: String,
    pub minutes: i32,
    pub date: OffsetDateTime,
    pub category: TimeEntryCategory,
    pub notes: Option<String>,
    pub billable_rate: Option<i32>,
}

impl NewTimeEntry {
    pub fn validate(&self) -> Result<(), HoursError> {
        validate_description(&self.task_description)?;
        validate_minutes(self.minutes)?;
        validate_rate(self.billable_rate)
    }
}

/// Partial edit of a time entry; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TimeEntryUpdate {
    pub project_id: Option<ProjectId>,
    pub company_id: Option<CompanyId>,
    pub task_description: Option<String>,
    pub minutes: Option<i32>,
    pub date: Option<OffsetDateTime>,
    pub category: Option<TimeEntryCategory>,
    pub notes: Option<String>,
    pub billable_rate: Option<i32>,
}

impl TimeEntryUpdate {
    pub fn validate(&self) -> Result<(), HoursError> {
        if let Some(description) = &self.task_description {
            validate_description(description)?;
        }
        if let Some(minutes) = self.minutes {
            validate_minutes(minutes)?;
        }
        validate_rate(self.billable_rate)
    }
}

/// Requested approval state change.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: TimeEntryStatus,
    pub approved_by: Option<UserId>,
}

fn validate_description(description: &str) -> Result<(), HoursError> {
    if description.trim().is_empty() {
        return Err(HoursError::validation("taskDescription must not be empty"));
    }
    Ok(())
}

fn validate_minutes(minutes: i32) -> Result<(), HoursError> {
    if minutes < 0 {
        return Err(HoursError::validation("hours must not be negative"));
    }
    Ok(())
}

fn validate_rate(rate: Option<i32>) -> Result<(), HoursError> {
    match rate {
        Some(rate) if rate < 0 => Err(HoursError::validation("billableRate must not be negative")),
        _ => Ok(()),
    }
}
