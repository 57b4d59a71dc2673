//! Carbon Tracker WASM Module
//!
//! This crate provides WebAssembly bindings so the browser can preview a
//! day's emissions and chart history without a round trip. Inputs and
//! outputs cross the boundary as JSON strings.

use carbon_tracker_shared::{
    calculate_emissions, rolling_average as rolling, ActivityReport, FactorTable, LocationKey,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Request body for [`estimate_daily_emissions`]
#[derive(Debug, Deserialize)]
struct EstimateRequest {
    location: LocationKey,
    report: ActivityReport,
}

#[derive(Debug, Serialize)]
struct EstimateResponse {
    transport: f64,
    energy: f64,
    diet: f64,
    lifestyle: f64,
    total: f64,
}

#[derive(Debug, Serialize)]
struct CountryListing<'a> {
    country: &'a str,
    transport_modes: Vec<&'a str>,
}

/// Estimate one day's emissions.
///
/// Takes `{"location": {...}, "report": {...}}` and returns the per-category
/// and total emissions as JSON. Invalid input is raised as a JS error.
#[wasm_bindgen]
pub fn estimate_daily_emissions(request_json: &str) -> Result<String, JsValue> {
    estimate(request_json).map_err(|e| JsValue::from_str(&e))
}

/// Countries with their own factors and their transport modes, as JSON
#[wasm_bindgen]
pub fn list_countries() -> String {
    countries()
}

/// Trailing average for a series of daily totals
#[wasm_bindgen]
pub fn rolling_average(values: &[f64], window_size: usize) -> Vec<f64> {
    if values.is_empty() || window_size == 0 {
        return vec![];
    }
    rolling(values, window_size)
}

fn estimate(request_json: &str) -> Result<String, String> {
    let request: EstimateRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid request: {}", e))?;

    let factors = FactorTable::builtin().resolve(&request.location);
    let record = calculate_emissions(&request.report, &factors).map_err(|e| e.user_message())?;

    let emissions = record.emissions();
    let response = EstimateResponse {
        transport: emissions.transport,
        energy: emissions.energy,
        diet: emissions.diet,
        lifestyle: emissions.lifestyle,
        total: record.total(),
    };
    serde_json::to_string(&response).map_err(|e| e.to_string())
}

fn countries() -> String {
    let table = FactorTable::builtin();
    let listing: Vec<CountryListing<'_>> = table
        .available_countries()
        .into_iter()
        .map(|country| CountryListing {
            country,
            transport_modes: table.transport_modes(country),
        })
        .collect();
    serde_json::to_string(&listing).unwrap_or_else(|_| "[]".to_string())
}
