//! Categorical ratings attached to each leg: reliability risk and seat
//! availability.

use std::fmt;

/// Reliability rating for a scheduled leg.
///
/// Each level maps to a numeric weight that is summed along an itinerary.
/// One weight unit costs the same as one minute of travel when the planner
/// orders its queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Interpret a risk label. Labels are matched exactly; anything
    /// unrecognised is treated as `Low`.
    ///
    /// ```
    /// use route_server::domain::RiskLevel;
    ///
    /// assert_eq!(RiskLevel::from_label("High"), RiskLevel::High);
    /// assert_eq!(RiskLevel::from_label("Severe"), RiskLevel::Low);
    /// ```
    pub fn from_label(label: &str) -> Self {
        match label {
            "Medium" => RiskLevel::Medium,
            "High" => RiskLevel::High,
            _ => RiskLevel::Low,
        }
    }

    /// Numeric weight: Low = 1, Medium = 2, High = 3.
    pub fn weight(self) -> u32 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Seat availability on a leg. Full legs are never boarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Availability {
    #[default]
    Available,
    Full,
}

impl Availability {
    /// "full" in any case means `Full`; every other label means `Available`.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("full") {
            Availability::Full
        } else {
            Availability::Available
        }
    }

    pub fn is_full(self) -> bool {
        self == Availability::Full
    }

    pub fn label(self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Full => "Full",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_weights() {
        assert_eq!(RiskLevel::Low.weight(), 1);
        assert_eq!(RiskLevel::Medium.weight(), 2);
        assert_eq!(RiskLevel::High.weight(), 3);
    }

    #[test]
    fn unknown_risk_defaults_to_low() {
        assert_eq!(RiskLevel::from_label("").weight(), 1);
        assert_eq!(RiskLevel::from_label("Extreme").weight(), 1);
        // Matching is case-sensitive.
        assert_eq!(RiskLevel::from_label("high").weight(), 1);
    }

    #[test]
    fn risk_labels_roundtrip() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert_eq!(RiskLevel::from_label(level.label()), level);
        }
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
    }

    #[test]
    fn availability_is_case_insensitive() {
        assert!(Availability::from_label("Full").is_full());
        assert!(Availability::from_label("FULL").is_full());
        assert!(Availability::from_label("full").is_full());
        assert!(!Availability::from_label("Available").is_full());
        assert!(!Availability::from_label("waitlist").is_full());
    }
}
