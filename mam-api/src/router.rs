use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::ApplicationSettings, routes};

pub fn create(app_state: AppState, config: &ApplicationSettings) -> Router<()> {
    let app_url = config.app_url.clone();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == app_url
        }));

    Router::new()
        .route("/", get(|| async { "Market Access Management hours API" }))
        .nest("/time-entries", routes::time_entries::router())
        .nest("/projects", routes::projects::router())
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use time::UtcOffset;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        adapters::outbound::memory::{MemoryProjectRepository, MemoryTimeEntryRepository},
        domain::services::HoursServiceImpl,
    };

    struct TestApp {
        router: Router,
        entries: MemoryTimeEntryRepository,
    }

    fn app() -> TestApp {
        let entries = MemoryTimeEntryRepository::new();
        let projects = MemoryProjectRepository::new();
        let service = HoursServiceImpl::new(
            Arc::new(entries.clone()),
            Arc::new(projects),
            UtcOffset::UTC,
        );
        let config = ApplicationSettings {
            port: 0,
            host: "127.0.0.1".to_string(),
            app_url: "http://localhost:5173".to_string(),
        };

        TestApp {
            router: create(AppState::with_service(Arc::new(service)), &config),
            entries,
        }
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    async fn create_project(router: &Router, name: &str, budget_hours: Option<i32>) -> i64 {
        let (status, body) = send(
            router,
            "POST",
            "/projects",
            Some(json!({ "name": name, "budgetHours": budget_hours })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    async fn log_minutes(router: &Router, user: &str, project_id: i64, minutes: i32, date: &str) -> Value {
        let (status, body) = send(
            router,
            "POST",
            "/time-entries",
            Some(json!({
                "userId": user,
                "projectId": project_id,
                "taskDescription": "HTA submission",
                "hours": minutes,
                "date": date,
                "category": "legal_support",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }

    #[tokio::test]
    async fn weekly_summary_endpoint_returns_camel_case_summary() {
        let app = app();
        let a = create_project(&app.router, "A", None).await;
        let b = create_project(&app.router, "B", None).await;
        log_minutes(&app.router, "u1", a, 120, "2024-03-11T09:00:00Z").await;
        log_minutes(&app.router, "u1", b, 90, "2024-03-15T14:00:00Z").await;

        let (status, body) = send(
            &app.router,
            "GET",
            "/time-entries/weekly-summary?userId=u1&date=2024-03-13",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "totalHours": 3.5,
                "billableHours": 3.5,
                "projects": 2,
                "averageDaily": 0.5,
            })
        );
    }

    #[tokio::test]
    async fn weekly_summary_for_empty_week_is_zero() {
        let app = app();

        let (status, body) = send(
            &app.router,
            "GET",
            "/time-entries/weekly-summary?userId=u1",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalHours"], json!(0.0));
        assert_eq!(body["projects"], json!(0));
    }

    #[tokio::test]
    async fn blank_user_id_is_a_bad_request() {
        let app = app();

        let (status, body) = send(
            &app.router,
            "GET",
            "/time-entries/weekly-summary?userId=",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_USER_ID"));
    }

    #[tokio::test]
    async fn week_past_the_calendar_edge_is_a_bad_request() {
        let app = app();

        let (status, body) = send(
            &app.router,
            "GET",
            "/time-entries/weekly-summary?userId=u1&date=9999-12-31",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_DATE_RANGE"));
    }

    #[tokio::test]
    async fn range_bounds_accept_unencoded_offsets() {
        let app = app();
        let p = create_project(&app.router, "P", None).await;
        log_minutes(&app.router, "u1", p, 30, "2024-03-12T08:00:00Z").await;

        let (status, body) = send(
            &app.router,
            "GET",
            "/time-entries?userId=u1&from=2024-03-10T00:00:00+02:00&to=2024-03-16T23:59:59+02:00",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn range_listing_filters_and_orders() {
        let app = app();
        let p = create_project(&app.router, "P", None).await;
        log_minutes(&app.router, "u1", p, 30, "2024-03-10T00:00:00Z").await;
        log_minutes(&app.router, "u1", p, 30, "2024-03-12T08:00:00Z").await;
        log_minutes(&app.router, "u1", p, 30, "2024-03-17T00:00:00Z").await;

        let (status, body) = send(
            &app.router,
            "GET",
            "/time-entries?userId=u1&from=2024-03-10T00:00:00Z&to=2024-03-16T23:59:59.999Z",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let dates: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-03-12T08:00:00Z", "2024-03-10T00:00:00Z"]);
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let app = app();

        let (status, body) = send(
            &app.router,
            "GET",
            "/time-entries?userId=u1&from=2024-03-17T00:00:00Z&to=2024-03-10T00:00:00Z",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_DATE_RANGE"));
    }

    #[tokio::test]
    async fn budget_endpoint_reports_utilization() {
        let app = app();
        let p = create_project(&app.router, "Launch", Some(100)).await;
        log_minutes(&app.router, "u1", p, 80 * 60, "2024-03-12T08:00:00Z").await;

        let (status, body) = send(&app.router, "GET", &format!("/projects/{p}/budget"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["spentHours"], json!(80.0));
        assert_eq!(body["utilizationPct"], json!(80));
        assert_eq!(body["remainingHours"], json!(20.0));
        assert_eq!(body["nearBudget"], json!(false));
    }

    #[tokio::test]
    async fn budget_endpoint_without_budget_returns_nulls() {
        let app = app();
        let p = create_project(&app.router, "Open ended", None).await;

        let (status, body) = send(&app.router, "GET", &format!("/projects/{p}/budget"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["utilizationPct"], Value::Null);
        assert_eq!(body["remainingHours"], Value::Null);
        assert_eq!(body["nearBudget"], json!(false));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let app = app();

        let (status, body) = send(&app.router, "GET", "/time-entries/41", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("time entry not found: 41"));

        let (status, _) = send(&app.router, "GET", "/projects/41/budget", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn approval_flow_over_http() {
        let app = app();
        let p = create_project(&app.router, "P", None).await;
        let entry = log_minutes(&app.router, "u1", p, 60, "2024-03-12T08:00:00Z").await;
        let id = entry["id"].as_i64().unwrap();
        assert_eq!(entry["status"], json!("draft"));

        let (status, _) = send(
            &app.router,
            "PUT",
            &format!("/time-entries/{id}/status"),
            Some(json!({ "status": "approved", "approvedBy": "boss" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app.router,
            "PUT",
            &format!("/time-entries/{id}/status"),
            Some(json!({ "status": "submitted" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app.router,
            "PUT",
            &format!("/time-entries/{id}/status"),
            Some(json!({ "status": "approved", "approvedBy": "boss" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("approved"));
        assert_eq!(body["approvedBy"], json!("boss"));
        assert!(body["approvedAt"].is_string());

        let (status, body) = send(
            &app.router,
            "PUT",
            &format!("/time-entries/{id}"),
            Some(json!({ "hours": 600 })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], json!("ENTRY_APPROVED"));
    }

    #[tokio::test]
    async fn edit_and_delete_entry() {
        let app = app();
        let p = create_project(&app.router, "P", None).await;
        let entry = log_minutes(&app.router, "u1", p, 60, "2024-03-12T08:00:00Z").await;
        let id = entry["id"].as_i64().unwrap();

        let (status, body) = send(
            &app.router,
            "PUT",
            &format!("/time-entries/{id}"),
            Some(json!({ "hours": 75, "notes": "incl. follow-up call" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hours"], json!(75));
        assert_eq!(body["taskDescription"], json!("HTA submission"));

        let (status, project) = send(&app.router, "GET", &format!("/projects/{p}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(project["totalHours"], json!(75));

        let (status, _) = send(&app.router, "DELETE", &format!("/time-entries/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(app.entries.len(), 0);
    }

    #[tokio::test]
    async fn negative_duration_is_rejected() {
        let app = app();
        let p = create_project(&app.router, "P", None).await;

        let (status, body) = send(
            &app.router,
            "POST",
            "/time-entries",
            Some(json!({
                "userId": "u1",
                "projectId": p,
                "taskDescription": "oops",
                "hours": -30,
                "date": "2024-03-12T08:00:00Z",
                "category": "other",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("VALIDATION_FAILED"));
    }

    #[tokio::test]
    async fn unknown_category_is_unprocessable() {
        let app = app();
        let p = create_project(&app.router, "P", None).await;

        let (status, _) = send(
            &app.router,
            "POST",
            "/time-entries",
            Some(json!({
                "userId": "u1",
                "projectId": p,
                "taskDescription": "Lunch",
                "hours": 30,
                "date": "2024-03-12T08:00:00Z",
                "category": "gardening",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn storage_outage_is_internal_error() {
        let app = app();
        app.entries.set_unavailable(true);

        let (status, body) = send(
            &app.router,
            "GET",
            "/time-entries/weekly-summary?userId=u1",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], json!("storage unavailable"));
    }

    #[tokio::test]
    async fn project_lifecycle() {
        let app = app();
        let p = create_project(&app.router, "Pricing", Some(20)).await;

        let (status, body) = send(
            &app.router,
            "PUT",
            &format!("/projects/{p}"),
            Some(json!({ "status": "paused" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("paused"));
        assert_eq!(body["budgetHours"], json!(20));

        let (status, body) = send(&app.router, "GET", "/projects", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app.router,
            "POST",
            &format!("/projects/{p}/recompute-hours"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalHours"], json!(0));

        let (status, _) = send(&app.router, "DELETE", &format!("/projects/{p}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app.router, "GET", &format!("/projects/{p}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
