//! Common test utilities for integration tests
//!
//! Builds engine states backed by temporary catalog and factor files.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use carbon_tracker_engine::{
    config::EngineConfig,
    services::{TrackingOutcome, TrackingService},
    state::EngineState,
};
use carbon_tracker_shared::{
    ActivityReport, DietReport, EnergyReport, LocationKey, Person, TransportReport,
};
use chrono::{Duration, NaiveDate, Utc};
use tempfile::TempDir;

/// Test engine wrapper
pub struct TestEngine {
    pub state: EngineState,
    pub dir: TempDir,
}

impl TestEngine {
    /// Engine over the builtin factor table and badge catalog
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state = EngineState::from_config(config).expect("Failed to build engine state");
        Self { state, dir }
    }

    /// Engine whose catalog is read from a file, written with `contents`
    pub fn with_catalog_file(name: &str, contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write catalog");

        let mut config = EngineConfig::default();
        config.catalog.path = Some(path.to_string_lossy().into_owned());
        let state = EngineState::from_config(config).expect("Failed to build engine state");
        Self { state, dir }
    }

    /// Record a report that is expected to be accepted
    pub fn record(&self, person: &mut Person, report: &ActivityReport) -> TrackingOutcome {
        TrackingService::record_activity(&self.state, person, report, Utc::now())
            .expect("Report should be accepted")
    }

    /// Overwrite the configured catalog file
    pub fn rewrite_catalog(&self, contents: &str) {
        let path = self
            .state
            .config()
            .catalog
            .path
            .clone()
            .map(PathBuf::from)
            .expect("Engine has no catalog file");
        fs::write(path, contents).expect("Failed to rewrite catalog");
    }
}

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn date(offset: i64) -> NaiveDate {
    start_date() + Duration::days(offset)
}

pub fn person_in(country: &str) -> Person {
    Person::new(LocationKey::country(country))
}

pub fn commute(offset: i64, mode: &str, km: f64) -> ActivityReport {
    ActivityReport::new(date(offset)).with_transport(TransportReport::new(mode, km))
}

/// A full day: car commute, grid electricity and a given diet
pub fn full_day(offset: i64, diet: &str) -> ActivityReport {
    ActivityReport::new(date(offset))
        .with_transport(TransportReport::new("car", 12.0))
        .with_energy(EnergyReport {
            electricity: 8.0,
            renewable_percentage: 20.0,
            ..EnergyReport::default()
        })
        .with_diet(DietReport::new(diet))
}

pub const SMALL_CATALOG_TOML: &str = r#"
[[badges]]
id = "first_track"
title = "First Steps"
category = "streak"
difficulty = "easy"

[badges.criteria]
kind = "custom"
value = 1

[badges.rewards]
points = 10

[[badges]]
id = "three_in_a_row"
title = "Three in a Row"
category = "streak"
difficulty = "easy"

[badges.criteria]
kind = "streak"
value = 3
operator = "gte"

[badges.rewards]
points = 15
"#;
