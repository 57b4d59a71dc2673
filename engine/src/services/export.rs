//! History export service
//!
//! Supports multiple formats:
//! - JSON: Full structured export with summary and badges
//! - CSV: One row per day for spreadsheets

use carbon_tracker_shared::{
    round2, summarize_history, EarnedBadge, EmissionRecord, HistorySummary, Person, PersonStats,
    Streak,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub const EXPORT_VERSION: &str = "1.0";

/// Complete history export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExport {
    pub export_version: String,
    pub exported_at: DateTime<Utc>,
    pub person_id: String,
    pub summary: HistorySummary,
    pub stats: PersonStats,
    pub streak: Streak,
    pub badges: Vec<EarnedBadge>,
    pub records: Vec<EmissionRecord>,
}

/// CSV export row for one day
#[derive(Debug, Clone, Serialize)]
pub struct RecordCsvRow {
    pub date: String,
    pub country: String,
    pub city: String,
    pub transport_mode: String,
    pub transport_kg: f64,
    pub energy_kg: f64,
    pub diet_kg: f64,
    pub lifestyle_kg: f64,
    pub total_kg: f64,
    pub notes: String,
}

impl From<&EmissionRecord> for RecordCsvRow {
    fn from(record: &EmissionRecord) -> Self {
        let emissions = record.emissions();
        let location = record.location();
        Self {
            date: record.date().format("%Y-%m-%d").to_string(),
            country: location.map(|l| l.country.clone()).unwrap_or_default(),
            city: location.and_then(|l| l.city.clone()).unwrap_or_default(),
            transport_mode: record.activity().transport_mode().unwrap_or_default().to_string(),
            transport_kg: round2(emissions.transport),
            energy_kg: round2(emissions.energy),
            diet_kg: round2(emissions.diet),
            lifestyle_kg: round2(emissions.lifestyle),
            total_kg: record.total(),
            notes: record.activity().notes.clone().unwrap_or_default(),
        }
    }
}

/// Data export service
pub struct ExportService;

impl ExportService {
    /// Build the structured export, records sorted by date
    pub fn build(person: &Person, records: &[EmissionRecord], now: DateTime<Utc>) -> HistoryExport {
        let mut records = records.to_vec();
        records.sort_by_key(|r| r.date());

        HistoryExport {
            export_version: EXPORT_VERSION.to_string(),
            exported_at: now,
            person_id: person.id.to_string(),
            summary: summarize_history(&records),
            stats: person.stats.clone(),
            streak: person.streak,
            badges: person.badges.clone(),
            records,
        }
    }

    /// Export a person's history as pretty JSON
    pub fn to_json(
        person: &Person,
        records: &[EmissionRecord],
        now: DateTime<Utc>,
    ) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(&Self::build(person, records, now))?)
    }

    /// Export records as CSV, one row per record in date order
    pub fn to_csv(records: &[EmissionRecord]) -> EngineResult<String> {
        let mut sorted: Vec<&EmissionRecord> = records.iter().collect();
        sorted.sort_by_key(|r| r.date());

        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in sorted {
            wtr.serialize(RecordCsvRow::from(record))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| EngineError::Internal(format!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| EngineError::Internal(format!("CSV encoding error: {}", e)))
    }
}
