//! Completed itineraries.

use std::sync::Arc;

use crate::domain::{StationCode, TravelDuration};

use super::graph::Edge;

/// An itinerary that reached the destination.
///
/// # Invariants
///
/// - `path` has no repeated station and `path.len() == legs.len() + 1`
/// - consecutive legs leave at least the configured buffer between them
/// - `cumulative_risk` is the sum of the legs' risk weights
/// - `total_duration` covers every leg plus every wait between legs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResult {
    pub path: Vec<StationCode>,
    pub total_duration: TravelDuration,
    pub cumulative_risk: u32,
    pub legs: Vec<Arc<Edge>>,
}

impl RouteResult {
    /// Number of legs taken.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn origin(&self) -> Option<&StationCode> {
        self.path.first()
    }

    pub fn destination(&self) -> Option<&StationCode> {
        self.path.last()
    }

    /// Waiting time at each interchange, in order.
    pub fn connection_gaps(&self) -> Vec<u32> {
        self.legs
            .windows(2)
            .map(|pair| pair[0].leg.arrival.connection_gap(pair[1].leg.departure))
            .collect()
    }

    /// Key used for final ordering: duration, then risk.
    pub fn rank_key(&self) -> (u32, u32, u32) {
        (
            self.total_duration.hrs,
            self.total_duration.min,
            self.cumulative_risk,
        )
    }
}
