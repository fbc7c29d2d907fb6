use thiserror::Error;

use super::models::{ProjectId, TimeEntryId, TimeEntryStatus};

/// Errors that can occur during hours tracking operations.
#[derive(Debug, Error)]
pub enum HoursError {
    #[error("user id must not be empty")]
    InvalidUserId,
    #[error("invalid date range")]
    InvalidDateRange,
    #[error("{0}")]
    Validation(String),
    #[error("time entry not found: {0}")]
    TimeEntryNotFound(TimeEntryId),
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    #[error("cannot move time entry from {from} to {to}")]
    InvalidStatusTransition {
        from: TimeEntryStatus,
        to: TimeEntryStatus,
    },
    #[error("time entry {0} is approved and can no longer be edited")]
    EntryApproved(TimeEntryId),
    #[error("storage error: {0}")]
    Storage(String),
}

impl HoursError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
