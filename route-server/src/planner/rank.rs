//! Final ordering of search results.

use super::route::RouteResult;

/// Rank routes by preference.
///
/// Routes are ranked by:
/// 1. Total duration hours
/// 2. Remaining minutes
/// 3. Cumulative risk (lower is better)
///
/// Routes with equal keys keep no particular order. Nothing is removed:
/// a route that is both slower and riskier than another still appears.
pub fn rank_routes(mut routes: Vec<RouteResult>) -> Vec<RouteResult> {
    routes.sort_by_key(RouteResult::rank_key);
    routes
}
