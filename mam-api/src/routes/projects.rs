use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{ProjectBudgetResponse, ProjectResponse},
    app_state::AppState,
    domain::models::{CompanyId, NewProject, ProjectId, ProjectStatus, ProjectUpdate},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/:id/budget", get(project_budget))
        .route("/:id/recompute-hours", post(recompute_hours))
}

#[instrument(name = "list_projects", skip(app_state))]
async fn list_projects(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = app_state.hours_service.list_projects().await?;

    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

#[instrument(name = "get_project", skip(app_state))]
async fn get_project(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = app_state.hours_service.get_project(ProjectId::new(id)).await?;

    Ok(Json(project.into()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    name: String,
    client_name: Option<String>,
    company_id: Option<i32>,
    hourly_rate: Option<i32>,
    budget_hours: Option<i32>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    end_date: Option<OffsetDateTime>,
}

#[instrument(name = "create_project", skip(app_state))]
async fn create_project(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateProjectPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let Json(payload) = payload?;

    let new_project = NewProject {
        name: payload.name,
        client_name: payload.client_name,
        company_id: payload.company_id.map(CompanyId::new),
        hourly_rate: payload.hourly_rate,
        budget_hours: payload.budget_hours,
        start_date: payload.start_date,
        end_date: payload.end_date,
    };

    let project = app_state.hours_service.create_project(new_project).await?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProjectPayload {
    name: Option<String>,
    client_name: Option<String>,
    company_id: Option<i32>,
    hourly_rate: Option<i32>,
    budget_hours: Option<i32>,
    status: Option<ProjectStatus>,
    #[serde(with = "time::serde::rfc3339::option")]
    start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    end_date: Option<OffsetDateTime>,
}

#[instrument(name = "update_project", skip(app_state))]
async fn update_project(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
    payload: Result<Json<UpdateProjectPayload>, JsonRejection>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let Json(payload) = payload?;

    let update = ProjectUpdate {
        name: payload.name,
        client_name: payload.client_name,
        company_id: payload.company_id.map(CompanyId::new),
        hourly_rate: payload.hourly_rate,
        budget_hours: payload.budget_hours,
        status: payload.status,
        start_date: payload.start_date,
        end_date: payload.end_date,
    };

    let project = app_state
        .hours_service
        .update_project(ProjectId::new(id), update)
        .await?;

    Ok(Json(project.into()))
}

#[instrument(name = "delete_project", skip(app_state))]
async fn delete_project(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    app_state
        .hours_service
        .delete_project(ProjectId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "project_budget", skip(app_state))]
async fn project_budget(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<Json<ProjectBudgetResponse>, ApiError> {
    let budget = app_state
        .hours_service
        .project_budget(ProjectId::new(id))
        .await?;

    Ok(Json(budget.into()))
}

#[instrument(name = "recompute_project_hours", skip(app_state))]
async fn recompute_hours(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = app_state
        .hours_service
        .recompute_project_hours(ProjectId::new(id))
        .await?;

    Ok(Json(project.into()))
}
