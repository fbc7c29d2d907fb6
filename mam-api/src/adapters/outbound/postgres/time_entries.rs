//! PostgreSQL implementation of the TimeEntryRepository port.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::storage_error;
use crate::domain::{
    models::{
        CompanyId, DateRange, NewTimeEntry, ProjectId, TimeEntry, TimeEntryCategory,
        TimeEntryId, TimeEntryStatus, UserId,
    },
    ports::outbound::TimeEntryRepository,
    HoursError,
};

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, project_id, company_id, task_description, hours, date, category,
           notes, billable_rate, status, approved_by, approved_at, created_at, updated_at
    FROM time_entries
"#;

/// Adapter that implements TimeEntryRepository using PostgreSQL.
pub struct PostgresTimeEntryRepository {
    pool: PgPool,
}

impl PostgresTimeEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TimeEntryRow {
    id: i32,
    user_id: String,
    project_id: i32,
    company_id: Option<i32>,
    task_description: String,
    hours: i32,
    date: OffsetDateTime,
    category: String,
    notes: Option<String>,
    billable_rate: Option<i32>,
    status: String,
    approved_by: Option<String>,
    approved_at: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<TimeEntryRow> for TimeEntry {
    type Error = HoursError;

    fn try_from(row: TimeEntryRow) -> Result<Self, Self::Error> {
        let category = TimeEntryCategory::from_str(&row.category).map_err(|_| {
            HoursError::storage(format!("unknown category '{}' on entry {}", row.category, row.id))
        })?;
        let status = TimeEntryStatus::from_str(&row.status).map_err(|_| {
            HoursError::storage(format!("unknown status '{}' on entry {}", row.status, row.id))
        })?;

        Ok(TimeEntry {
            id: TimeEntryId::new(row.id),
            user_id: UserId::parse(row.user_id)?,
            project_id: ProjectId::new(row.project_id),
            company_id: row.company_id.map(CompanyId::new),
            task_description: row.task_description,
            minutes: row.hours,
            date: row.date,
            category,
            notes: row.notes,
            billable_rate: row.billable_rate,
            status,
            approved_by: row.approved_by.map(UserId::parse).transpose()?,
            approved_at: row.approved_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_entries(rows: Vec<TimeEntryRow>) -> Result<Vec<TimeEntry>, HoursError> {
    rows.into_iter().map(TimeEntry::try_from).collect()
}

#[async_trait]
impl TimeEntryRepository for PostgresTimeEntryRepository {
    async fn insert(&self, entry: &NewTimeEntry) -> Result<TimeEntry, HoursError> {
        let row = sqlx::query_as::<_, TimeEntryRow>(
            r#"
            INSERT INTO time_entries (
                user_id, project_id, company_id, task_description, hours, date, category, notes, billable_rate
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, project_id, company_id, task_description, hours, date, category,
                      notes, billable_rate, status, approved_by, approved_at, created_at, updated_at
            "#,
        )
        .bind(entry.user_id.as_str())
        .bind(entry.project_id.as_i32())
        .bind(entry.company_id.map(|c| c.as_i32()))
        .bind(&entry.task_description)
        .bind(entry.minutes)
        .bind(entry.date)
        .bind(entry.category.to_string())
        .bind(&entry.notes)
        .bind(entry.billable_rate)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        row.try_into()
    }

    async fn get(&self, id: TimeEntryId) -> Result<Option<TimeEntry>, HoursError> {
        let row = sqlx::query_as::<_, TimeEntryRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.map(TimeEntry::try_from).transpose()
    }

    async fn list_in_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<Vec<TimeEntry>, HoursError> {
        let rows = sqlx::query_as::<_, TimeEntryRow>(&format!(
            "{SELECT_COLUMNS} WHERE user_id = $1 AND date >= $2 AND date <= $3 ORDER BY date DESC, id DESC"
        ))
        .bind(user_id.as_str())
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        into_entries(rows)
    }

    async fn list_for_project(&self, project_id: ProjectId) -> Result<Vec<TimeEntry>, HoursError> {
        let rows = sqlx::query_as::<_, TimeEntryRow>(&format!(
            "{SELECT_COLUMNS} WHERE project_id = $1"
        ))
        .bind(project_id.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        into_entries(rows)
    }

    async fn update(&self, entry: &TimeEntry) -> Result<(), HoursError> {
        let query_result = sqlx::query(
            r#"
            UPDATE time_entries
            SET project_id = $2, company_id = $3, task_description = $4, hours = $5, date = $6,
                category = $7, notes = $8, billable_rate = $9, status = $10, approved_by = $11,
                approved_at = $12, updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(entry.id.as_i32())
        .bind(entry.project_id.as_i32())
        .bind(entry.company_id.map(|c| c.as_i32()))
        .bind(&entry.task_description)
        .bind(entry.minutes)
        .bind(entry.date)
        .bind(entry.category.to_string())
        .bind(&entry.notes)
        .bind(entry.billable_rate)
        .bind(entry.status.to_string())
        .bind(entry.approved_by.as_ref().map(UserId::as_str))
        .bind(entry.approved_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if query_result.rows_affected() == 0 {
            return Err(HoursError::TimeEntryNotFound(entry.id));
        }

        Ok(())
    }

    async fn delete(&self, id: TimeEntryId) -> Result<bool, HoursError> {
        let query_result = sqlx::query("DELETE FROM time_entries WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(query_result.rows_affected() > 0)
    }
}
