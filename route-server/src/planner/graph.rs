//! Adjacency graph built from a flat list of legs.
//!
//! Each station maps to its outgoing edges in input order. An edge keeps
//! the leg plus its duration and risk weight, computed once at build time.
//! Full legs stay in the graph; the search skips them when expanding.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Leg, StationCode, TravelDuration};

/// A leg with its precomputed running time and risk weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub leg: Leg,
    pub duration: TravelDuration,
    pub risk: u32,
}

impl Edge {
    pub fn new(leg: Leg) -> Self {
        let duration = leg.duration();
        let risk = leg.risk.weight();
        Self {
            leg,
            duration,
            risk,
        }
    }

    pub fn destination(&self) -> &StationCode {
        &self.leg.destination
    }

    pub fn duration_mins(&self) -> u32 {
        self.duration.total_minutes()
    }
}

/// Station → outgoing edges.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: HashMap<StationCode, Vec<Arc<Edge>>>,
    edge_count: usize,
}

impl Graph {
    /// Build the graph from scheduled legs.
    ///
    /// Stations are not checked against any registry: an edge into a
    /// station with no departures is simply a dead end.
    pub fn build<'a>(legs: impl IntoIterator<Item = &'a Leg>) -> Self {
        let mut graph = Graph::default();
        for leg in legs {
            graph.add(leg.clone());
        }
        graph
    }

    /// Append one leg to its origin's edge list.
    pub fn add(&mut self, leg: Leg) {
        let origin = leg.origin.clone();
        self.edges
            .entry(origin)
            .or_default()
            .push(Arc::new(Edge::new(leg)));
        self.edge_count += 1;
    }

    /// Outgoing edges from `station`, empty if it has none.
    pub fn edges_from(&self, station: &StationCode) -> &[Arc<Edge>] {
        self.edges.get(station).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of stations with at least one departure.
    pub fn station_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }
}

impl FromIterator<Leg> for Graph {
    fn from_iter<I: IntoIterator<Item = Leg>>(iter: I) -> Self {
        let mut graph = Graph::default();
        for leg in iter {
            graph.add(leg);
        }
        graph
    }
}
