//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::SearchConfig;
use crate::timetable::Timetable;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Scheduled legs
    pub timetable: Timetable,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(timetable: Timetable, config: SearchConfig) -> Self {
        Self {
            timetable,
            config: Arc::new(config),
        }
    }
}
