//! Emission records
//!
//! An [`EmissionRecord`] is the immutable result of one calculation. Its
//! total is always derived from the four category values; there is no way
//! to set it independently, and deserializing a stored record recomputes it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityReport;
use crate::factors::LocationKey;

/// Round to 2 decimal places for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Emissions per category in kg CO2, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CategoryEmissions {
    pub transport: f64,
    pub energy: f64,
    pub diet: f64,
    pub lifestyle: f64,
}

impl CategoryEmissions {
    pub fn sum(&self) -> f64 {
        self.transport + self.energy + self.diet + self.lifestyle
    }
}

/// The stored shape of a record, without the derived total
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecordData {
    date: NaiveDate,
    activity: ActivityReport,
    emissions: CategoryEmissions,
    #[serde(default)]
    location: Option<LocationKey>,
}

/// One day's calculated emissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordData")]
pub struct EmissionRecord {
    date: NaiveDate,
    activity: ActivityReport,
    emissions: CategoryEmissions,
    total: f64,
    location: Option<LocationKey>,
}

impl From<RecordData> for EmissionRecord {
    fn from(data: RecordData) -> Self {
        EmissionRecord::new(data.date, data.activity, data.emissions, data.location)
    }
}

impl EmissionRecord {
    pub(crate) fn new(
        date: NaiveDate,
        activity: ActivityReport,
        emissions: CategoryEmissions,
        location: Option<LocationKey>,
    ) -> Self {
        Self {
            date,
            activity,
            total: round2(emissions.sum()),
            emissions,
            location,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The report this record was calculated from
    pub fn activity(&self) -> &ActivityReport {
        &self.activity
    }

    pub fn emissions(&self) -> &CategoryEmissions {
        &self.emissions
    }

    /// Day total rounded to 2 decimal places
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Unrounded day total, for aggregates
    pub fn raw_total(&self) -> f64 {
        self.emissions.sum()
    }

    /// Location snapshot used for the calculation
    pub fn location(&self) -> Option<&LocationKey> {
        self.location.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(emissions: CategoryEmissions) -> EmissionRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        EmissionRecord::new(date, ActivityReport::new(date), emissions, None)
    }

    #[test]
    fn test_total_is_rounded_sum() {
        let r = record(CategoryEmissions {
            transport: 1.8,
            energy: 2.0,
            diet: 7.41285,
            lifestyle: 0.0,
        });
        assert_eq!(r.total(), 11.21);
        assert!((r.raw_total() - 11.21285).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_recomputes_total() {
        let json = r#"{
            "date": "2024-01-02",
            "activity": {"date": "2024-01-02"},
            "emissions": {"transport": 1.0, "energy": 2.0, "diet": 3.0, "lifestyle": 0.5},
            "total": 999.0
        }"#;
        let r: EmissionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.total(), 6.5);
        assert!(r.location().is_none());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(7.41285), 7.41);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.0), 0.0);
    }
}
