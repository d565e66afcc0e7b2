//! Multi-path route search.
//!
//! Expands partial itineraries in order of cumulative cost (minutes of
//! travel plus risk weight) until the queue drains. Unlike single-target
//! Dijkstra it does not stop at the first arrival: every loop-free,
//! buffer-respecting itinerary within the hop limit that reaches the
//! destination is collected, then the whole set is ranked.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::domain::{ClockTime, DomainError, Leg, LegRecord, StationCode, TravelDuration};

use super::config::SearchConfig;
use super::graph::{Edge, Graph};
use super::queue::{RouteQueue, Weighted};
use super::rank::rank_routes;
use super::route::RouteResult;

/// Error from route search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// A leg record could not be validated
    #[error("invalid leg record: {0}")]
    InvalidLeg(#[from] DomainError),

    /// Search ran past its deadline
    #[error("search timed out")]
    Timeout,

    /// Caller asked the search to stop
    #[error("search cancelled")]
    Cancelled,
}

/// Request for route search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub origin: StationCode,
    pub destination: StationCode,

    /// Overrides [`SearchConfig::max_connections`] when set.
    pub max_connections: Option<usize>,

    /// Absolute deadline, checked between queue iterations.
    pub deadline: Option<Instant>,

    /// Set to `true` from elsewhere to abandon the search.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(origin: StationCode, destination: StationCode) -> Self {
        Self {
            origin,
            destination,
            max_connections: None,
            deadline: None,
            cancel: None,
        }
    }

    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = Some(max_connections);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Validate the request and resolve the hop limit.
    pub fn validate(&self, config: &SearchConfig) -> Result<usize, SearchError> {
        let max_connections = self.max_connections.unwrap_or(config.max_connections);
        if max_connections < 1 {
            return Err(SearchError::InvalidRequest(
                "maxConnections must be at least 1".to_string(),
            ));
        }

        if self.origin == self.destination {
            return Err(SearchError::InvalidRequest(
                "origin and destination must differ".to_string(),
            ));
        }

        Ok(max_connections)
    }
}

/// Result of route search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Found routes, ranked best-first.
    pub routes: Vec<RouteResult>,

    /// Number of queue entries taken off the heap.
    pub nodes_expanded: usize,

    /// True if the expansion cap stopped the search early.
    pub truncated: bool,
}

/// A partial itinerary waiting in the queue.
///
/// Nodes are never modified once queued. Children copy and extend the
/// parent's path and legs.
#[derive(Debug, Clone)]
struct SearchNode {
    station: StationCode,
    path: Vec<StationCode>,
    cumulative_risk: u32,
    duration_mins: u32,
    arrival: ClockTime,
    legs: Vec<Arc<Edge>>,
}

impl Weighted for SearchNode {
    fn weight(&self) -> u32 {
        self.duration_mins + self.cumulative_risk
    }
}

impl SearchNode {
    /// A one-leg itinerary boarding at the origin. No connection wait.
    fn seed(origin: &StationCode, edge: &Arc<Edge>) -> Self {
        Self {
            station: edge.destination().clone(),
            path: vec![origin.clone(), edge.destination().clone()],
            cumulative_risk: edge.risk,
            duration_mins: edge.duration_mins(),
            arrival: edge.leg.arrival,
            legs: vec![Arc::clone(edge)],
        }
    }

    fn hop_count(&self) -> usize {
        self.path.len() - 1
    }

    fn visits(&self, station: &StationCode) -> bool {
        self.path.contains(station)
    }

    /// Child node after waiting `gap` minutes and riding `edge`.
    fn extend(&self, edge: &Arc<Edge>, gap: u32) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(edge.destination().clone());

        let mut legs = Vec::with_capacity(self.legs.len() + 1);
        legs.extend_from_slice(&self.legs);
        legs.push(Arc::clone(edge));

        Self {
            station: edge.destination().clone(),
            path,
            cumulative_risk: self.cumulative_risk + edge.risk,
            duration_mins: self.duration_mins + gap + edge.duration_mins(),
            arrival: edge.leg.arrival,
            legs,
        }
    }

    fn into_route(self) -> RouteResult {
        RouteResult {
            path: self.path,
            total_duration: TravelDuration::from_minutes(self.duration_mins),
            cumulative_risk: self.cumulative_risk,
            legs: self.legs,
        }
    }
}

/// Route planner over a prebuilt graph.
pub struct Planner<'a> {
    graph: &'a Graph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a Graph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Search for every itinerary from origin to destination.
    ///
    /// An origin with no departures, or a destination out of reach within
    /// the hop limit, gives an empty route list rather than an error.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let max_connections = request.validate(self.config)?;
        let deadline = self.deadline(request);

        let mut queue = RouteQueue::new();
        for edge in self.graph.edges_from(&request.origin) {
            if edge.leg.is_full() || edge.leg.is_loop() {
                continue;
            }
            queue.enqueue(SearchNode::seed(&request.origin, edge));
        }

        let mut routes = Vec::new();
        let mut nodes_expanded = 0;
        let mut truncated = false;

        loop {
            check_interrupt(request, deadline)?;

            let Some(node) = queue.dequeue() else {
                break;
            };

            if nodes_expanded >= self.config.max_expansions {
                warn!(
                    origin = %request.origin,
                    destination = %request.destination,
                    nodes_expanded,
                    routes = routes.len(),
                    "Expansion limit reached, returning partial results"
                );
                truncated = true;
                break;
            }
            nodes_expanded += 1;

            trace!(
                station = %node.station,
                hops = node.hop_count(),
                weight = node.weight(),
                "Expanding node"
            );

            if node.station == request.destination {
                routes.push(node.into_route());
                continue;
            }

            if node.hop_count() >= max_connections {
                continue;
            }

            self.expand(&node, &mut queue);
        }

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            routes = routes.len(),
            nodes_expanded,
            truncated,
            "Route search complete"
        );

        Ok(SearchOutcome {
            routes: rank_routes(routes),
            nodes_expanded,
            truncated,
        })
    }

    /// Queue a child for every usable departure from the node's station.
    fn expand(&self, node: &SearchNode, queue: &mut RouteQueue<SearchNode>) {
        for edge in self.graph.edges_from(&node.station) {
            if edge.leg.is_full() {
                continue;
            }

            if node.visits(edge.destination()) {
                continue;
            }

            let gap = node.arrival.connection_gap(edge.leg.departure);
            if gap < self.config.min_connection_mins {
                continue;
            }

            queue.enqueue(node.extend(edge, gap));
        }
    }

    /// The earlier of the request deadline and the configured budget.
    fn deadline(&self, request: &SearchRequest) -> Option<Instant> {
        let budget = self.config.time_budget.map(|b| Instant::now() + b);
        match (request.deadline, budget) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

fn check_interrupt(request: &SearchRequest, deadline: Option<Instant>) -> Result<(), SearchError> {
    if request
        .cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
    {
        return Err(SearchError::Cancelled);
    }
    if deadline.is_some_and(|d| Instant::now() >= d) {
        return Err(SearchError::Timeout);
    }
    Ok(())
}

/// One-shot search over raw leg records.
///
/// Validates every record, builds a fresh graph, searches with the default
/// configuration and returns the ranked routes. `max_connections` defaults
/// to 3.
///
/// # Errors
///
/// Fails on the first malformed record, on malformed station codes, and on
/// a hop limit below 1.
pub fn find_routes(
    records: &[LegRecord],
    origin: &str,
    destination: &str,
    max_connections: Option<usize>,
) -> Result<Vec<RouteResult>, SearchError> {
    let legs = records
        .iter()
        .map(Leg::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let graph = Graph::from_iter(legs);

    let parse = |label: &str, value: &str| {
        StationCode::parse_normalized(value)
            .map_err(|e| SearchError::InvalidRequest(format!("{label}: {e}")))
    };
    let mut request = SearchRequest::new(parse("from", origin)?, parse("to", destination)?);
    if let Some(max) = max_connections {
        request = request.with_max_connections(max);
    }

    let config = SearchConfig::default();
    Planner::new(&graph, &config)
        .search(&request)
        .map(|outcome| outcome.routes)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
