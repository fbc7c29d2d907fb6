use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::instrument;

use super::{parse_date, parse_timestamp, ApiError};
use crate::{
    adapters::inbound::http::{TimeEntryResponse, WeeklySummaryResponse},
    app_state::AppState,
    domain::models::{
        CompanyId, DateRange, NewTimeEntry, ProjectId, StatusChange, TimeEntryCategory,
        TimeEntryId, TimeEntryStatus, TimeEntryUpdate, UserId,
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_time_entries).post(create_time_entry))
        .route("/weekly-summary", get(weekly_summary))
        .route(
            "/:id",
            get(get_time_entry)
                .put(update_time_entry)
                .delete(delete_time_entry),
        )
        .route("/:id/status", put(change_status))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    user_id: String,
    from: String,
    to: String,
}

#[instrument(name = "list_time_entries", skip(app_state))]
async fn list_time_entries(
    State(app_state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<TimeEntryResponse>>, ApiError> {
    let Query(query) = query?;
    let user_id = UserId::parse(query.user_id)?;
    let range = DateRange::new(parse_timestamp(&query.from)?, parse_timestamp(&query.to)?)?;

    let entries = app_state
        .hours_service
        .list_time_entries(&user_id, &range)
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummaryQuery {
    user_id: String,
    /// Any day of the requested week (YYYY-MM-DD). Defaults to today.
    date: Option<String>,
}

#[instrument(name = "weekly_summary", skip(app_state))]
async fn weekly_summary(
    State(app_state): State<AppState>,
    query: Result<Query<WeeklySummaryQuery>, QueryRejection>,
) -> Result<Json<WeeklySummaryResponse>, ApiError> {
    let Query(query) = query?;
    let user_id = UserId::parse(query.user_id)?;
    let week_of = query.date.as_deref().map(parse_date).transpose()?;

    let summary = app_state
        .hours_service
        .weekly_summary(&user_id, week_of)
        .await?;

    Ok(Json(summary.into()))
}

#[instrument(name = "get_time_entry", skip(app_state))]
async fn get_time_entry(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<Json<TimeEntryResponse>, ApiError> {
    let entry = app_state
        .hours_service
        .get_time_entry(TimeEntryId::new(id))
        .await?;

    Ok(Json(entry.into()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeEntryPayload {
    user_id: String,
    project_id: i32,
    company_id: Option<i32>,
    task_description: String,
    /// Duration in minutes.
    hours: i32,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    category: TimeEntryCategory,
    notes: Option<String>,
    billable_rate: Option<i32>,
}

#[instrument(name = "create_time_entry", skip(app_state))]
async fn create_time_entry(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateTimeEntryPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<TimeEntryResponse>), ApiError> {
    let Json(payload) = payload?;

    let new_entry = NewTimeEntry {
        user_id: UserId::parse(payload.user_id)?,
        project_id: ProjectId::new(payload.project_id),
        company_id: payload.company_id.map(CompanyId::new),
        task_description: payload.task_description,
        minutes: payload.hours,
        date: payload.date,
        category: payload.category,
        notes: payload.notes,
        billable_rate: payload.billable_rate,
    };

    let entry = app_state.hours_service.create_time_entry(new_entry).await?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTimeEntryPayload {
    project_id: Option<i32>,
    company_id: Option<i32>,
    task_description: Option<String>,
    hours: Option<i32>,
    #[serde(with = "time::serde::rfc3339::option")]
    date: Option<OffsetDateTime>,
    category: Option<TimeEntryCategory>,
    notes: Option<String>,
    billable_rate: Option<i32>,
}

#[instrument(name = "update_time_entry", skip(app_state))]
async fn update_time_entry(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
    payload: Result<Json<UpdateTimeEntryPayload>, JsonRejection>,
) -> Result<Json<TimeEntryResponse>, ApiError> {
    let Json(payload) = payload?;

    let update = TimeEntryUpdate {
        project_id: payload.project_id.map(ProjectId::new),
        company_id: payload.company_id.map(CompanyId::new),
        task_description: payload.task_description,
        minutes: payload.hours,
        date: payload.date,
        category: payload.category,
        notes: payload.notes,
        billable_rate: payload.billable_rate,
    };

    let entry = app_state
        .hours_service
        .update_time_entry(TimeEntryId::new(id), update)
        .await?;

    Ok(Json(entry.into()))
}

#[instrument(name = "delete_time_entry", skip(app_state))]
async fn delete_time_entry(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    app_state
        .hours_service
        .delete_time_entry(TimeEntryId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusPayload {
    status: TimeEntryStatus,
    approved_by: Option<String>,
}

#[instrument(name = "change_time_entry_status", skip(app_state))]
async fn change_status(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
    payload: Result<Json<ChangeStatusPayload>, JsonRejection>,
) -> Result<Json<TimeEntryResponse>, ApiError> {
    let Json(payload) = payload?;

    let change = StatusChange {
        status: payload.status,
        approved_by: payload.approved_by.map(UserId::parse).transpose()?,
    };

    let entry = app_state
        .hours_service
        .change_status(TimeEntryId::new(id), change)
        .await?;

    Ok(Json(entry.into()))
}
