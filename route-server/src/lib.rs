//! Rail itinerary route server.
//!
//! Finds every multi-leg itinerary between two stations in a timetable of
//! scheduled legs, respecting a minimum connection buffer and a hop limit,
//! and ranks them by travel time and risk.

pub mod config;
pub mod domain;
pub mod planner;
pub mod timetable;
pub mod web;
