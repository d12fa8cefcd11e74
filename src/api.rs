//! REST API for the rostering core.
//!
//! The router is intentionally thin: no job manager, no background solve.
//! `solve` is a synchronous, pure function, so handlers just hop onto a
//! blocking-safe thread via `spawn_blocking` and await it.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::demo_data::{self, DemoSize};
use crate::domain::{SolverInput, SolverResult};
use crate::solve;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/demo-data", get(list_demo_data))
        .route("/demo-data/{id}", get(get_demo_data))
        .route("/solve", axum::routing::post(solve_handler))
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub solver_engine: &'static str,
}

/// GET /info
async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: "roster-core",
        version: env!("CARGO_PKG_VERSION"),
        solver_engine: "selen",
    })
}

/// GET /demo-data
async fn list_demo_data() -> Json<Vec<&'static str>> {
    Json(demo_data::list())
}

/// GET /demo-data/{id}
async fn get_demo_data(Path(id): Path<String>) -> Result<Json<SolverInput>, StatusCode> {
    match id.parse::<DemoSize>() {
        Ok(size) => Ok(Json(demo_data::generate(size))),
        Err(_) => Err(StatusCode::NOT_FOUND),
    }
}

/// POST /solve, the single domain operation this service exposes.
async fn solve_handler(Json(input): Json<SolverInput>) -> Json<SolverResult> {
    let result = tokio::task::spawn_blocking(move || solve::solve(input))
        .await
        .unwrap_or_else(|join_err| {
            tracing::error!(error = %join_err, "solve task panicked");
            SolverResult::empty_shell(
                crate::domain::Status::Error,
                &crate::domain::zero_grid(),
                0,
                Some("internal error while solving".to_string()),
            )
        });
    Json(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_reports_up() {
        let app = router();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_demo_data_id_is_not_found() {
        let app = router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/demo-data/bogus")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
