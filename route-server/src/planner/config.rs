//! Search configuration for the route planner.

use std::time::Duration;

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of legs in an itinerary, used when a request does
    /// not specify its own.
    pub max_connections: usize,

    /// Minimum time between arriving on one leg and departing on the next
    /// (minutes). Tighter connections are rejected.
    pub min_connection_mins: u32,

    /// Maximum number of queue entries to expand before giving up and
    /// returning what has been found so far.
    pub max_expansions: usize,

    /// Wall-clock budget for a single search. `None` means unbounded.
    pub time_budget: Option<Duration>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_connections: usize,
        min_connection_mins: u32,
        max_expansions: usize,
        time_budget: Option<Duration>,
    ) -> Self {
        Self {
            max_connections,
            min_connection_mins,
            max_expansions,
            time_budget,
        }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_connections: 3,
            min_connection_mins: 10,
            max_expansions: 100_000,
            time_budget: None,
        }
    }
}
