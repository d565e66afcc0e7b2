//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ClockTime, StationCode, TravelDuration};
use crate::planner::{Edge, RouteResult, SearchOutcome};

/// Request to find routes between two stations.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindRoutesRequest {
    /// Origin station code
    pub from: String,

    /// Destination station code
    pub to: String,

    /// Maximum legs per itinerary (defaults to the server setting)
    pub max_connections: Option<usize>,
}

/// Response envelope for successful requests.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Response for route search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindRoutesResponse {
    pub success: bool,

    /// Found routes, best first
    pub data: Vec<RouteView>,

    /// Number of partial itineraries expanded
    pub nodes_expanded: usize,

    /// Whether the search stopped early at its expansion limit
    pub truncated: bool,
}

/// A complete itinerary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteView {
    pub path: Vec<StationCode>,
    pub total_duration: TravelDuration,
    pub cumulative_risk: u32,
    pub legs: Vec<RouteLegView>,
}

/// One leg of an itinerary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLegView {
    pub train_id: String,
    pub train_name: String,
    pub from: StationCode,
    pub to: StationCode,
    pub departure_time: ClockTime,
    pub arrival_time: ClockTime,
    pub duration: TravelDuration,
    pub risk: u32,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,

    /// Error message
    pub message: String,
}

// Conversion implementations

impl FindRoutesResponse {
    /// Create from a finished search.
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        Self {
            success: true,
            data: outcome.routes.iter().map(RouteView::from_route).collect(),
            nodes_expanded: outcome.nodes_expanded,
            truncated: outcome.truncated,
        }
    }
}

impl RouteView {
    pub fn from_route(route: &RouteResult) -> Self {
        Self {
            path: route.path.clone(),
            total_duration: route.total_duration,
            cumulative_risk: route.cumulative_risk,
            legs: route.legs.iter().map(|e| RouteLegView::from_edge(e)).collect(),
        }
    }
}

impl RouteLegView {
    pub fn from_edge(edge: &Edge) -> Self {
        let leg = &edge.leg;
        Self {
            train_id: leg.train_id.clone(),
            train_name: leg.train_name.clone(),
            from: leg.origin.clone(),
            to: leg.destination.clone(),
            departure_time: leg.departure,
            arrival_time: leg.arrival,
            duration: edge.duration,
            risk: edge.risk,
        }
    }
}
