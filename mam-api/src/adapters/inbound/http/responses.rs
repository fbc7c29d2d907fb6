//! HTTP response types for hours endpoints.
//!
//! These types serialize to the JSON format expected by the dashboard.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::models::{
    Project, ProjectBudget, ProjectStatus, TimeEntry, TimeEntryCategory, TimeEntryStatus,
    WeeklySummary,
};

/// Aggregated hours of the requested week.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummaryResponse {
    pub total_hours: f64,
    pub billable_hours: f64,
    pub projects: usize,
    pub average_daily: f64,
}

impl From<WeeklySummary> for WeeklySummaryResponse {
    fn from(summary: WeeklySummary) -> Self {
        Self {
            total_hours: summary.total_hours,
            billable_hours: summary.billable_hours,
            projects: summary.projects,
            average_daily: summary.average_daily,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryResponse {
    pub id: i32,
    pub user_id: String,
    pub project_id: i32,
    pub company_id: Option<i32>,
    pub task_description: String,
    /// Logged duration in minutes.
    pub hours: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub category: TimeEntryCategory,
    pub notes: Option<String>,
    pub billable_rate: Option<i32>,
    pub status: TimeEntryStatus,
    pub approved_by: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub approved_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<TimeEntry> for TimeEntryResponse {
    fn from(entry: TimeEntry) -> Self {
        Self {
            id: entry.id.as_i32(),
            user_id: entry.user_id.to_string(),
            project_id: entry.project_id.as_i32(),
            company_id: entry.company_id.map(|c| c.as_i32()),
            task_description: entry.task_description,
            hours: entry.minutes,
            date: entry.date,
            category: entry.category,
            notes: entry.notes,
            billable_rate: entry.billable_rate,
            status: entry.status,
            approved_by: entry.approved_by.map(|u| u.to_string()),
            approved_at: entry.approved_at,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
    pub client_name: Option<String>,
    pub company_id: Option<i32>,
    /// Cents per hour.
    pub hourly_rate: Option<i32>,
    pub budget_hours: Option<i32>,
    /// Logged minutes.
    pub total_hours: i32,
    pub status: ProjectStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.as_i32(),
            name: project.name,
            client_name: project.client_name,
            company_id: project.company_id.map(|c| c.as_i32()),
            hourly_rate: project.hourly_rate,
            budget_hours: project.budget_hours,
            total_hours: project.total_minutes,
            status: project.status,
            start_date: project.start_date,
            end_date: project.end_date,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// Budget utilization of a project.
///
/// `budgetHours`, `utilizationPct` and `remainingHours` are `null` when the
/// project has no budget set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBudgetResponse {
    pub project_id: i32,
    pub spent_hours: f64,
    pub budget_hours: Option<i32>,
    pub utilization_pct: Option<i64>,
    pub remaining_hours: Option<f64>,
    pub near_budget: bool,
}

impl From<ProjectBudget> for ProjectBudgetResponse {
    fn from(budget: ProjectBudget) -> Self {
        let near_budget = budget.is_near_budget();
        Self {
            project_id: budget.project_id.as_i32(),
            spent_hours: budget.spent_hours,
            budget_hours: budget.utilization.map(|u| u.budget_hours),
            utilization_pct: budget.utilization.map(|u| u.utilization_pct),
            remaining_hours: budget.utilization.map(|u| u.remaining_hours),
            near_budget,
        }
    }
}
