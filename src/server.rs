// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP surface of the webhook solver.
//!
//! The issuing framework calls two entry points with a JSON challenge:
//! `POST /present` and `POST /cleanup`. Both must tolerate repeated
//! invocation with an identical challenge; a failure response means the
//! framework retries the whole operation later on its own schedule.
//! `GET /healthz` and `GET /metrics` serve liveness and Prometheus
//! exposition.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::metrics::{gather_metrics, record_challenge_error, record_challenge_success};
use crate::solver::{ChallengeRequest, Solver};

/// Shared state of the webhook server.
pub struct AppState {
    /// The solver challenges are dispatched to
    pub solver: Arc<dyn Solver>,
    /// API group this webhook serves
    pub group_name: String,
}

/// Build the webhook router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/present", post(present_handler))
        .route("/cleanup", post(cleanup_handler))
        .route("/healthz", get(healthz_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Dispatch one challenge operation and map the outcome to a response.
async fn handle_challenge(
    state: &AppState,
    operation: &'static str,
    challenge: &ChallengeRequest,
) -> Response {
    let start = Instant::now();

    let result = match operation {
        "present" => state.solver.present(challenge).await,
        _ => state.solver.cleanup(challenge).await,
    };

    match result {
        Ok(()) => {
            record_challenge_success(operation, start.elapsed());
            info!(
                solver = state.solver.name(),
                group = %state.group_name,
                operation = operation,
                fqdn = %challenge.resolved_fqdn,
                "Challenge operation succeeded"
            );
            (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
        }
        Err(e) => {
            record_challenge_error(operation, e.status_reason(), start.elapsed());
            error!(
                solver = state.solver.name(),
                operation = operation,
                fqdn = %challenge.resolved_fqdn,
                reason = e.status_reason(),
                error = %e,
                "Challenge operation failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "reason": e.status_reason(),
                    "message": e.to_string(),
                    "retryable": e.is_transient(),
                })),
            )
                .into_response()
        }
    }
}

/// `POST /present` - make the challenge value resolvable.
pub async fn present_handler(
    State(state): State<Arc<AppState>>,
    Json(challenge): Json<ChallengeRequest>,
) -> Response {
    handle_challenge(&state, "present", &challenge).await
}

/// `POST /cleanup` - retract the challenge value.
pub async fn cleanup_handler(
    State(state): State<Arc<AppState>>,
    Json(challenge): Json<ChallengeRequest>,
) -> Response {
    handle_challenge(&state, "cleanup", &challenge).await
}

/// `GET /healthz` - liveness probe.
pub async fn healthz_handler() -> &'static str {
    "ok"
}

/// `GET /metrics` - Prometheus text exposition.
pub async fn metrics_handler() -> Response {
    match gather_metrics() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to gather metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
