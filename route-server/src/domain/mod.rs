//! Domain types for the route planner.
//!
//! This module contains the validated value types that describe scheduled
//! rail legs. All types enforce their invariants at construction time, so
//! code that receives these types can trust their validity.

mod error;
mod leg;
mod risk;
mod station;
mod time;

pub use error::DomainError;
pub use leg::{Leg, LegRecord};
pub use risk::{Availability, RiskLevel};
pub use station::{InvalidStationCode, StationCode};
pub use time::{ClockTime, MINUTES_PER_DAY, TimeError, TravelDuration};
