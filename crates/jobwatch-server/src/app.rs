//! HTTP routes of the status service.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use jobwatch_types::JobState;
use jobwatch_types::wire::{CreateJobPayload, Envelope, StatusPayload};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{JobRecord, JobRegistry, ServerError, SimulationConfig};

#[derive(Debug, Clone)]
struct AppState {
    registry: Arc<dyn JobRegistry>,
    simulation: SimulationConfig,
}

/// Builds the service router over the given registry.
///
/// Routes:
///
/// - `POST /` creates a job
/// - `GET /status/{job_id}` reports its state
///
/// Unknown routes answer `404` with a JSON body.
///
/// # Errors
///
/// Returns [`ServerError::InvalidConfig`] if `simulation` does not validate.
pub fn router(
    registry: Arc<dyn JobRegistry>,
    simulation: SimulationConfig,
) -> Result<Router, ServerError> {
    simulation.validate()?;
    Ok(Router::new()
        .route("/", post(create_job))
        .route("/status/:job_id", get(job_status))
        .fallback(not_found)
        .with_state(AppState {
            registry,
            simulation,
        }))
}

async fn create_job(State(state): State<AppState>) -> Response {
    let job = match JobRecord::schedule(&state.simulation, Utc::now(), &mut rand::rng()) {
        Ok(job) => job,
        Err(err) => {
            error!(error = %err, "failed to create job");
            let body = Envelope::<CreateJobPayload>::message_only(err.to_string());
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };
    info!(job_id = %job.id, complete_at = %job.complete_at, will_fail = job.will_fail, "job created");

    let payload = CreateJobPayload {
        job_id: Some(job.id.clone()),
    };
    state.registry.put(job);
    Json(Envelope::new("Job created successfully", payload)).into_response()
}

async fn job_status(State(state): State<AppState>, Path(job_id): Path<String>) -> Response {
    let Some(job) = state.registry.get(&job_id) else {
        debug!(%job_id, "status requested for unknown job");
        let body = Envelope::<StatusPayload>::message_only(format!(
            "failed to find a job with the given job id: {job_id}"
        ));
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    };

    let job_state = job.state_at(Utc::now());
    let code = match job_state {
        JobState::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        JobState::Pending | JobState::Completed => StatusCode::OK,
    };
    debug!(%job_id, state = %job_state, "status requested");

    let body = Envelope::new(
        "Job status",
        StatusPayload {
            status: job_state.as_str().to_string(),
        },
    );
    (code, Json(body)).into_response()
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"code": "Not found", "message": "Page not found"})),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryRegistry;

    fn simulation(failure_rate: f64) -> SimulationConfig {
        SimulationConfig {
            failure_rate,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_router_rejects_invalid_failure_rate() {
        for failure_rate in [2.0, -1.0, f64::NAN] {
            let result = router(Arc::new(InMemoryRegistry::new()), simulation(failure_rate));
            assert!(matches!(result, Err(ServerError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_router_accepts_valid_simulation() {
        assert!(router(Arc::new(InMemoryRegistry::new()), simulation(0.5)).is_ok());
    }
}
