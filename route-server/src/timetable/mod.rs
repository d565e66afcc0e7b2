//! In-memory timetable of scheduled legs.
//!
//! Stands in for the leg datastore: the web layer adds and lists legs here,
//! and every route search works from a snapshot so that concurrent inserts
//! never affect a search already in progress.

mod error;

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{Leg, LegRecord};

pub use error::TimetableError;

/// Thread-safe store of scheduled legs.
#[derive(Clone, Default)]
pub struct Timetable {
    inner: Arc<RwLock<Vec<Leg>>>,
}

impl Timetable {
    /// Create an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timetable holding `legs`.
    pub fn with_legs(legs: Vec<Leg>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(legs)),
        }
    }

    /// Load a timetable from a JSON array of leg records.
    ///
    /// Fails on the first record that does not validate.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await?;
        let legs = parse_records(&contents)?;

        info!(path = %path.display(), legs = legs.len(), "Loaded timetable");

        Ok(Self::with_legs(legs))
    }

    /// Validate and append a leg, returning the stored form.
    pub async fn insert(&self, record: &LegRecord) -> Result<Leg, TimetableError> {
        let leg = Leg::try_from(record)?;

        let mut guard = self.inner.write().await;
        guard.push(leg.clone());

        Ok(leg)
    }

    /// Copy of every leg, in insertion order.
    pub async fn snapshot(&self) -> Vec<Leg> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Every leg as a wire record.
    pub async fn records(&self) -> Vec<LegRecord> {
        let guard = self.inner.read().await;
        guard.iter().map(LegRecord::from).collect()
    }

    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }
}

/// Parse and validate a JSON array of leg records.
fn parse_records(json: &[u8]) -> Result<Vec<Leg>, TimetableError> {
    let records: Vec<LegRecord> = serde_json::from_slice(json)?;
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Leg::try_from(record).map_err(|source| TimetableError::InvalidRecord { index, source })
        })
        .collect()
}
