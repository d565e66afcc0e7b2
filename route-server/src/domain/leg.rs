//! Scheduled legs.
//!
//! A `Leg` is one timetabled point-to-point train trip. Legs arrive from
//! outside the planner as loosely typed `LegRecord`s and are validated once
//! on conversion, so planner code can trust station codes and times.

use serde::{Deserialize, Serialize};

use super::{Availability, ClockTime, DomainError, RiskLevel, StationCode, TravelDuration};

/// Raw leg as stored or sent over the wire.
///
/// Field names follow the JSON shape used by the timetable store.
/// `trainNo` is accepted as an alias for `trainId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegRecord {
    #[serde(alias = "trainNo")]
    pub train_id: String,
    pub train_name: String,
    pub from: String,
    pub to: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub availability: String,
    pub risk_factor: String,
}

/// A validated scheduled leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub train_id: String,
    pub train_name: String,
    pub origin: StationCode,
    pub destination: StationCode,
    pub departure: ClockTime,
    pub arrival: ClockTime,
    pub availability: Availability,
    pub risk: RiskLevel,
}

impl Leg {
    /// Running time, wrapping past midnight at most once.
    pub fn duration(&self) -> TravelDuration {
        self.departure.duration_until(self.arrival)
    }

    pub fn is_full(&self) -> bool {
        self.availability.is_full()
    }

    /// True if the leg starts and ends at the same station.
    pub fn is_loop(&self) -> bool {
        self.origin == self.destination
    }
}

impl TryFrom<&LegRecord> for Leg {
    type Error = DomainError;

    /// Validate a raw record.
    ///
    /// # Errors
    ///
    /// Fails on the first blank identifier, malformed station code or
    /// malformed time. Unknown risk labels are not errors.
    fn try_from(record: &LegRecord) -> Result<Self, Self::Error> {
        let train_id = required(&record.train_id, "trainId")?;
        let train_name = required(&record.train_name, "trainName")?;

        let station = |field, value: &str| {
            StationCode::parse_normalized(value)
                .map_err(|source| DomainError::InvalidStation { field, source })
        };
        let time = |field, value: &str| {
            ClockTime::parse_hhmm(value.trim())
                .map_err(|source| DomainError::InvalidTime { field, source })
        };

        Ok(Leg {
            train_id,
            train_name,
            origin: station("from", &record.from)?,
            destination: station("to", &record.to)?,
            departure: time("departureTime", &record.departure_time)?,
            arrival: time("arrivalTime", &record.arrival_time)?,
            availability: Availability::from_label(&record.availability),
            risk: RiskLevel::from_label(&record.risk_factor),
        })
    }
}

impl TryFrom<LegRecord> for Leg {
    type Error = DomainError;

    fn try_from(record: LegRecord) -> Result<Self, Self::Error> {
        Leg::try_from(&record)
    }
}

impl From<&Leg> for LegRecord {
    fn from(leg: &Leg) -> Self {
        LegRecord {
            train_id: leg.train_id.clone(),
            train_name: leg.train_name.clone(),
            from: leg.origin.to_string(),
            to: leg.destination.to_string(),
            departure_time: leg.departure.to_string(),
            arrival_time: leg.arrival.to_string(),
            availability: leg.availability.label().to_string(),
            risk_factor: leg.risk.label().to_string(),
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DomainError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
