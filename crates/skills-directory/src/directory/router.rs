use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;

use super::filter::FilterRequest;
use super::service::{DirectorySearchService, SearchServiceError};
use super::source::ProfileSource;

/// Routes exposing catalog listing, ranked search and CSV export.
pub fn search_router<S>(service: Arc<DirectorySearchService<S>>) -> Router
where
    S: ProfileSource + 'static,
{
    Router::new()
        .route("/api/v1/skills", get(skills_handler::<S>))
        .route("/api/v1/search", post(search_handler::<S>))
        .route("/api/v1/search/export", post(export_handler::<S>))
        .with_state(service)
}

pub(crate) async fn skills_handler<S>(
    State(service): State<Arc<DirectorySearchService<S>>>,
) -> Response
where
    S: ProfileSource + 'static,
{
    let skills = service.active_skills();
    (StatusCode::OK, axum::Json(json!({ "skills": skills }))).into_response()
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<DirectorySearchService<S>>>,
    axum::Json(request): axum::Json<FilterRequest>,
) -> Response
where
    S: ProfileSource + 'static,
{
    match service.search(request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<S>(
    State(service): State<Arc<DirectorySearchService<S>>>,
    axum::Json(request): axum::Json<FilterRequest>,
) -> Response
where
    S: ProfileSource + 'static,
{
    match service.export_csv(request) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"profiles.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: SearchServiceError) -> Response {
    let status = match error {
        SearchServiceError::Filter(_) | SearchServiceError::Catalog(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SearchServiceError::Source(_) | SearchServiceError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
