//! PostgreSQL implementation of the ProjectRepository port.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::storage_error;
use crate::domain::{
    models::{CompanyId, NewProject, Project, ProjectId, ProjectStatus},
    ports::outbound::ProjectRepository,
    HoursError,
};

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, client_name, company_id, hourly_rate, budget_hours, total_hours, status,
           start_date, end_date, created_at, updated_at
    FROM projects
"#;

/// Adapter that implements ProjectRepository using PostgreSQL.
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: i32,
    name: String,
    client_name: Option<String>,
    company_id: Option<i32>,
    hourly_rate: Option<i32>,
    budget_hours: Option<i32>,
    total_hours: i32,
    status: String,
    start_date: Option<OffsetDateTime>,
    end_date: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<ProjectRow> for Project {
    type Error = HoursError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = ProjectStatus::from_str(&row.status).map_err(|_| {
            HoursError::storage(format!("unknown status '{}' on project {}", row.status, row.id))
        })?;

        Ok(Project {
            id: ProjectId::new(row.id),
            name: row.name,
            client_name: row.client_name,
            company_id: row.company_id.map(CompanyId::new),
            hourly_rate: row.hourly_rate,
            budget_hours: row.budget_hours,
            total_minutes: row.total_hours,
            status,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn insert(&self, project: &NewProject) -> Result<Project, HoursError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (name, client_name, company_id, hourly_rate, budget_hours, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, client_name, company_id, hourly_rate, budget_hours, total_hours, status,
                      start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(&project.name)
        .bind(&project.client_name)
        .bind(project.company_id.map(|c| c.as_i32()))
        .bind(project.hourly_rate)
        .bind(project.budget_hours)
        .bind(project.start_date)
        .bind(project.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        row.try_into()
    }

    async fn get(&self, id: ProjectId) -> Result<Option<Project>, HoursError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.map(Project::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Project>, HoursError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(Project::try_from).collect()
    }

    async fn update(&self, project: &Project) -> Result<(), HoursError> {
        let query_result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $2, client_name = $3, company_id = $4, hourly_rate = $5, budget_hours = $6,
                status = $7, start_date = $8, end_date = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(project.id.as_i32())
        .bind(&project.name)
        .bind(&project.client_name)
        .bind(project.company_id.map(|c| c.as_i32()))
        .bind(project.hourly_rate)
        .bind(project.budget_hours)
        .bind(project.status.to_string())
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if query_result.rows_affected() == 0 {
            return Err(HoursError::ProjectNotFound(project.id));
        }

        Ok(())
    }

    async fn set_total_minutes(&self, id: ProjectId, minutes: i32) -> Result<(), HoursError> {
        let query_result = sqlx::query(
            "UPDATE projects SET total_hours = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(minutes)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if query_result.rows_affected() == 0 {
            return Err(HoursError::ProjectNotFound(id));
        }

        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> Result<bool, HoursError> {
        let query_result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(query_result.rows_affected() > 0)
    }
}
