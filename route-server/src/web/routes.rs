//! HTTP route handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::domain::{LegRecord, StationCode};
use crate::planner::{Graph, Planner, SearchError, SearchRequest};
use crate::timetable::TimetableError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/trains", get(list_trains))
        .route("/api/v1/trains/create", post(create_train))
        .route("/api/v1/routes/optimal", post(find_optimal_routes))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every leg in the timetable.
async fn list_trains(State(state): State<AppState>) -> Json<ApiResponse<Vec<LegRecord>>> {
    Json(ApiResponse::ok(state.timetable.records().await))
}

/// Add a leg to the timetable.
async fn create_train(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let record: LegRecord = parse_json(&body)?;
    let leg = state.timetable.insert(&record).await?;

    info!(
        train_id = %leg.train_id,
        from = %leg.origin,
        to = %leg.destination,
        "Added leg"
    );

    let body = ApiResponse::ok(LegRecord::from(&leg)).with_message("Train created successfully");
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// Find and rank every itinerary between two stations.
async fn find_optimal_routes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FindRoutesResponse>, AppError> {
    let req: FindRoutesRequest = parse_json(&body)?;

    let origin = StationCode::parse_normalized(&req.from).map_err(|e| AppError::BadRequest {
        message: format!("Invalid origin station: {e}"),
    })?;
    let destination = StationCode::parse_normalized(&req.to).map_err(|e| AppError::BadRequest {
        message: format!("Invalid destination station: {e}"),
    })?;

    // Abandon the search if the client goes away mid-request.
    let cancel = CancelOnDrop::default();
    let mut request = SearchRequest::new(origin, destination).with_cancel_flag(cancel.flag());
    if let Some(max) = req.max_connections {
        request = request.with_max_connections(max);
    }

    let legs = state.timetable.snapshot().await;
    let config = Arc::clone(&state.config);

    let outcome = tokio::task::spawn_blocking(move || {
        let graph = Graph::build(&legs);
        Planner::new(&graph, &config).search(&request)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("search task failed: {e}"),
    })??;

    Ok(Json(FindRoutesResponse::from_outcome(&outcome)))
}

/// Parse a JSON body, logging the raw body on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "Rejected JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Cancellation flag that trips when dropped.
#[derive(Default)]
struct CancelOnDrop(Arc<AtomicBool>);

impl CancelOnDrop {
    fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Timeout { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(_) | SearchError::InvalidLeg(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            SearchError::Timeout => AppError::Timeout {
                message: e.to_string(),
            },
            SearchError::Cancelled => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<TimetableError> for AppError {
    fn from(e: TimetableError) -> Self {
        match e {
            TimetableError::Invalid(_) | TimetableError::InvalidRecord { .. } => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse {
            success: false,
            message,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::SearchConfig;
    use crate::timetable::Timetable;
    use serde_json::{Value, json};
    use std::time::Duration;

    fn record(id: &str, from: &str, to: &str, dep: &str, arr: &str, risk: &str) -> LegRecord {
        LegRecord {
            train_id: id.into(),
            train_name: format!("Train {id}"),
            from: from.into(),
            to: to.into(),
            departure_time: dep.into(),
            arrival_time: arr.into(),
            availability: "Available".into(),
            risk_factor: risk.into(),
        }
    }

    async fn state_with(records: &[LegRecord]) -> AppState {
        let timetable = Timetable::new();
        for r in records {
            timetable.insert(r).await.unwrap();
        }
        AppState::new(timetable, SearchConfig::default())
    }

    fn body(value: Value) -> Bytes {
        Bytes::from(serde_json::to_vec(&value).unwrap())
    }

    async fn json_of(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn router_builds() {
        let state = state_with(&[]).await;
        let _router = create_router(state);
    }

    #[tokio::test]
    async fn create_then_list() {
        let state = state_with(&[]).await;

        let response = create_train(
            State(state.clone()),
            body(json!({
                "trainNo": "12259",
                "trainName": "Duronto",
                "from": "sdah",
                "to": "NDLS",
                "departureTime": "18:30",
                "arrivalTime": "11:00",
                "availability": "Available",
                "riskFactor": "High"
            })),
        )
        .await
        .unwrap();

        let (status, value) = json_of(response).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Train created successfully");
        assert_eq!(value["data"]["from"], "SDAH");

        let Json(list) = list_trains(State(state)).await;
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].train_id, "12259");
    }

    #[tokio::test]
    async fn create_rejects_bad_time() {
        let state = state_with(&[]).await;
        let mut bad = serde_json::to_value(record("1", "A", "B", "08:00", "09:00", "Low")).unwrap();
        bad["departureTime"] = json!("8 o'clock");

        let err = create_train(State(state.clone()), body(bad)).await.unwrap_err();
        let (status, value) = json_of(err.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["success"], false);
        assert!(state.timetable.is_empty().await);
    }

    #[tokio::test]
    async fn create_rejects_malformed_json() {
        let state = state_with(&[]).await;
        let err = create_train(State(state), Bytes::from_static(b"{"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn finds_ranked_routes() {
        let state = state_with(&[
            record("D", "A", "B", "09:00", "11:00", "High"),
            record("X", "A", "C", "09:00", "10:00", "Low"),
            record("Y", "C", "B", "10:10", "11:00", "Low"),
        ])
        .await;

        let Json(response) =
            find_optimal_routes(State(state), body(json!({"from": "a", "to": "B"})))
                .await
                .unwrap();

        assert!(response.success);
        assert!(!response.truncated);
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].cumulative_risk, 2);
        assert_eq!(response.data[0].path.len(), 3);
        assert_eq!(response.data[1].cumulative_risk, 3);
        assert_eq!(response.data[1].legs[0].train_id, "D");
    }

    #[tokio::test]
    async fn respects_max_connections() {
        let state = state_with(&[
            record("1", "A", "B", "08:00", "09:00", "Low"),
            record("2", "B", "C", "09:30", "10:00", "Low"),
        ])
        .await;

        let Json(response) = find_optimal_routes(
            State(state),
            body(json!({"from": "A", "to": "C", "maxConnections": 1})),
        )
        .await
        .unwrap();
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn unreachable_is_empty_list() {
        let state = state_with(&[record("1", "A", "B", "08:00", "09:00", "Low")]).await;
        let Json(response) =
            find_optimal_routes(State(state), body(json!({"from": "A", "to": "Z"})))
                .await
                .unwrap();
        assert!(response.success);
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn invalid_requests_are_bad_request() {
        let state = state_with(&[]).await;

        let err = find_optimal_routes(
            State(state.clone()),
            body(json!({"from": "A", "to": "B", "maxConnections": 0})),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let err = find_optimal_routes(State(state.clone()), body(json!({"from": "", "to": "B"})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let err = find_optimal_routes(State(state), body(json!({"from": "A"})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn exhausted_budget_is_gateway_timeout() {
        let timetable = Timetable::new();
        timetable
            .insert(&record("1", "A", "B", "08:00", "09:00", "Low"))
            .await
            .unwrap();
        let config = SearchConfig::default().with_time_budget(Duration::ZERO);
        let state = AppState::new(timetable, config);

        let err = find_optimal_routes(State(state), body(json!({"from": "A", "to": "B"})))
            .await
            .unwrap_err();
        let (status, value) = json_of(err.into_response()).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(value["message"], "search timed out");
    }

    #[test]
    fn cancel_on_drop_trips_flag() {
        let guard = CancelOnDrop::default();
        let flag = guard.flag();
        assert!(!flag.load(Ordering::Relaxed));
        drop(guard);
        assert!(flag.load(Ordering::Relaxed));
    }
}
