//! Web layer for the route planner.
//!
//! Provides JSON endpoints for managing legs and finding routes.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
