//! Multi-leg route finder.
//!
//! This module implements the core planning algorithm: given scheduled
//! legs, an origin and a destination, enumerate every feasible itinerary
//! within a hop limit and rank them by travel time and risk.
//!
//! The pipeline is: legs → [`Graph`] → [`Planner::search`] (cost-ordered
//! expansion over a [`RouteQueue`]) → [`rank_routes`].

mod config;
mod graph;
mod queue;
mod rank;
mod route;
mod search;

pub use config::SearchConfig;
pub use graph::{Edge, Graph};
pub use queue::{RouteQueue, Weighted};
pub use rank::rank_routes;
pub use route::RouteResult;
pub use search::{Planner, SearchError, SearchOutcome, SearchRequest, find_routes};
