//! Emission factor tables
//!
//! Factors are stored as a three-level hierarchy:
//!
//! 1. **Global defaults**: always present, used for unknown locations
//! 2. **Country overrides**: replace any factor they define
//! 3. **State and city adjustments**: multipliers applied on top
//!
//! All factors are kg CO2-equivalent per unit (km travelled, kWh used,
//! day of eating a given diet). See [`crate::resolver`] for how the layers
//! are merged.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::activity::{
    DIET_MEAT, DIET_PESCATARIAN, DIET_VEGAN, DIET_VEGETARIAN, MODE_BIKE, MODE_BUS, MODE_CAR,
    MODE_METRO, MODE_MOTORCYCLE, MODE_PLANE, MODE_TAXI, MODE_TRAIN, MODE_WALK,
};
use crate::errors::ConfigurationError;

/// Identifies which override layers apply to a person
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationKey {
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl LocationKey {
    pub fn country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            state: None,
            city: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

/// A concrete, fully merged set of factors for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorSet {
    /// kg CO2 per km, by transport mode id
    pub transport: BTreeMap<String, f64>,
    /// kg CO2 per kWh
    pub electricity: f64,
    /// kg CO2 per day, by diet type id
    pub diet: BTreeMap<String, f64>,
    /// Location the set was resolved for; `None` for the bare global defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationKey>,
}

impl FactorSet {
    /// Factor for a transport mode; unknown modes are free
    pub fn transport_factor(&self, mode: &str) -> f64 {
        self.transport.get(mode).copied().unwrap_or(0.0)
    }

    /// Factor for a diet type; unknown diets are free
    pub fn diet_factor(&self, diet_type: &str) -> f64 {
        self.diet.get(diet_type).copied().unwrap_or(0.0)
    }
}

/// A country's partial override of the global defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CountryFactors {
    pub transport: BTreeMap<String, f64>,
    pub electricity: Option<f64>,
    pub diet: BTreeMap<String, f64>,
}

/// Multiplicative adjustment for a state or city.
///
/// An omitted multiplier leaves the factor unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LocationAdjustment {
    pub electricity: Option<f64>,
    pub transport: Option<f64>,
}

impl LocationAdjustment {
    pub const fn new(electricity: f64, transport: f64) -> Self {
        Self {
            electricity: Some(electricity),
            transport: Some(transport),
        }
    }
}

/// The full factor hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTable {
    pub global: FactorSet,
    #[serde(default)]
    pub countries: BTreeMap<String, CountryFactors>,
    /// Keyed by country, then state
    #[serde(default)]
    pub state_adjustments: BTreeMap<String, BTreeMap<String, LocationAdjustment>>,
    /// Keyed by city name alone
    #[serde(default)]
    pub city_adjustments: BTreeMap<String, LocationAdjustment>,
}

static BUILTIN_TABLE: Lazy<FactorTable> = Lazy::new(build_builtin_table);

impl FactorTable {
    /// The factor data shipped with the crate
    pub fn builtin() -> &'static FactorTable {
        &BUILTIN_TABLE
    }

    /// Copy of this table with the state layer switched off
    pub fn without_state_adjustments(&self) -> FactorTable {
        FactorTable {
            state_adjustments: BTreeMap::new(),
            ..self.clone()
        }
    }

    /// Copy of this table with the city layer switched off
    pub fn without_city_adjustments(&self) -> FactorTable {
        FactorTable {
            city_adjustments: BTreeMap::new(),
            ..self.clone()
        }
    }

    /// Countries with their own factor overrides, sorted by name
    pub fn available_countries(&self) -> Vec<&str> {
        self.countries.keys().map(String::as_str).collect()
    }

    /// Transport modes known for a country, falling back to the global list
    pub fn transport_modes(&self, country: &str) -> Vec<&str> {
        match self.countries.get(country) {
            Some(c) if !c.transport.is_empty() => {
                c.transport.keys().map(String::as_str).collect()
            }
            _ => self.global.transport.keys().map(String::as_str).collect(),
        }
    }

    /// Reject negative or non-finite factors and multipliers.
    ///
    /// Only needed for tables loaded from files; the builtin table is valid.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let global = &self.global;
        check_set("global", &global.transport, Some(global.electricity), &global.diet)?;

        for (country, factors) in &self.countries {
            check_set(country, &factors.transport, factors.electricity, &factors.diet)?;
        }
        for (country, states) in &self.state_adjustments {
            for (state, adjustment) in states {
                check_adjustment(&format!("{}.{}", country, state), adjustment)?;
            }
        }
        for (city, adjustment) in &self.city_adjustments {
            check_adjustment(city, adjustment)?;
        }
        Ok(())
    }
}

fn check_value(path: String, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidFactor { path, value })
    }
}

fn check_set(
    scope: &str,
    transport: &BTreeMap<String, f64>,
    electricity: Option<f64>,
    diet: &BTreeMap<String, f64>,
) -> Result<(), ConfigurationError> {
    for (mode, value) in transport {
        check_value(format!("{}.transport.{}", scope, mode), *value)?;
    }
    if let Some(value) = electricity {
        check_value(format!("{}.electricity", scope), value)?;
    }
    for (diet_type, value) in diet {
        check_value(format!("{}.diet.{}", scope, diet_type), *value)?;
    }
    Ok(())
}

fn check_adjustment(
    scope: &str,
    adjustment: &LocationAdjustment,
) -> Result<(), ConfigurationError> {
    if let Some(value) = adjustment.electricity {
        check_value(format!("{}.electricity", scope), value)?;
    }
    if let Some(value) = adjustment.transport {
        check_value(format!("{}.transport", scope), value)?;
    }
    Ok(())
}

// ============================================================================
// Builtin Data
// ============================================================================

const TRANSPORT_ORDER: [&str; 9] = [
    MODE_CAR,
    MODE_BUS,
    MODE_TRAIN,
    MODE_BIKE,
    MODE_WALK,
    MODE_PLANE,
    MODE_METRO,
    MODE_TAXI,
    MODE_MOTORCYCLE,
];

const DIET_ORDER: [&str; 4] = [DIET_MEAT, DIET_VEGETARIAN, DIET_VEGAN, DIET_PESCATARIAN];

/// Transport factors in `TRANSPORT_ORDER`
fn transport(values: [f64; 9]) -> BTreeMap<String, f64> {
    TRANSPORT_ORDER
        .iter()
        .zip(values)
        .map(|(mode, v)| (mode.to_string(), v))
        .collect()
}

/// Diet factors in `DIET_ORDER`
fn diet(values: [f64; 4]) -> BTreeMap<String, f64> {
    DIET_ORDER
        .iter()
        .zip(values)
        .map(|(d, v)| (d.to_string(), v))
        .collect()
}

fn country(transport_values: [f64; 9], electricity: f64, diet_values: [f64; 4]) -> CountryFactors {
    CountryFactors {
        transport: transport(transport_values),
        electricity: Some(electricity),
        diet: diet(diet_values),
    }
}

fn adjustments(entries: &[(&str, f64, f64)]) -> BTreeMap<String, LocationAdjustment> {
    entries
        .iter()
        .map(|(name, electricity, transport)| {
            (name.to_string(), LocationAdjustment::new(*electricity, *transport))
        })
        .collect()
}

#[rustfmt::skip]
fn build_builtin_table() -> FactorTable {
    let global = FactorSet {
        transport: transport([0.21, 0.089, 0.041, 0.0, 0.0, 0.255, 0.028, 0.25, 0.113]),
        electricity: 0.5,
        diet: diet([7.26, 3.81, 2.89, 4.67]),
        location: None,
    };

    let mut countries = BTreeMap::new();
    countries.insert(
        "United States".to_string(),
        country([0.24, 0.095, 0.045, 0.0, 0.0, 0.255, 0.032, 0.28, 0.125], 0.45, [8.1, 4.2, 3.1, 5.1]),
    );
    countries.insert(
        "India".to_string(),
        country([0.18, 0.075, 0.025, 0.0, 0.0, 0.255, 0.022, 0.2, 0.095], 0.82, [5.8, 2.9, 2.1, 3.8]),
    );
    countries.insert(
        "United Kingdom".to_string(),
        country([0.19, 0.082, 0.035, 0.0, 0.0, 0.255, 0.025, 0.22, 0.108], 0.28, [7.8, 4.1, 3.0, 4.9]),
    );
    countries.insert(
        "Germany".to_string(),
        country([0.16, 0.078, 0.032, 0.0, 0.0, 0.255, 0.024, 0.19, 0.102], 0.35, [7.2, 3.9, 2.8, 4.6]),
    );
    countries.insert(
        "Canada".to_string(),
        country([0.22, 0.088, 0.038, 0.0, 0.0, 0.255, 0.029, 0.25, 0.118], 0.15, [8.5, 4.4, 3.2, 5.3]),
    );
    countries.insert(
        "Australia".to_string(),
        country([0.23, 0.092, 0.042, 0.0, 0.0, 0.255, 0.031, 0.26, 0.121], 0.75, [8.8, 4.6, 3.4, 5.5]),
    );
    countries.insert(
        "Japan".to_string(),
        country([0.17, 0.076, 0.028, 0.0, 0.0, 0.255, 0.021, 0.19, 0.098], 0.52, [6.1, 3.2, 2.4, 4.1]),
    );
    countries.insert(
        "Brazil".to_string(),
        country([0.2, 0.085, 0.039, 0.0, 0.0, 0.255, 0.027, 0.23, 0.112], 0.08, [7.9, 4.1, 3.0, 4.8]),
    );
    countries.insert(
        "China".to_string(),
        country([0.19, 0.081, 0.033, 0.0, 0.0, 0.255, 0.026, 0.21, 0.105], 0.65, [6.8, 3.6, 2.7, 4.3]),
    );
    countries.insert(
        "France".to_string(),
        country([0.15, 0.074, 0.029, 0.0, 0.0, 0.255, 0.02, 0.17, 0.095], 0.06, [6.9, 3.7, 2.8, 4.4]),
    );

    let mut state_adjustments = BTreeMap::new();
    state_adjustments.insert(
        "India".to_string(),
        adjustments(&[
            ("Maharashtra", 0.9, 1.1),
            ("Delhi", 1.1, 1.2),
            ("Karnataka", 0.8, 1.0),
            ("Tamil Nadu", 0.7, 1.0),
            ("Gujarat", 0.9, 1.1),
            ("West Bengal", 1.2, 0.9),
            ("Rajasthan", 1.0, 0.8),
            ("Uttar Pradesh", 1.1, 0.9),
        ]),
    );
    state_adjustments.insert(
        "United States".to_string(),
        adjustments(&[
            ("California", 0.6, 1.0),
            ("Texas", 1.2, 1.1),
            ("New York", 0.7, 0.9),
            ("Florida", 1.1, 1.0),
            ("Washington", 0.3, 1.0),
            ("Wyoming", 2.0, 1.2),
        ]),
    );

    let city_adjustments = adjustments(&[
        ("Mumbai", 0.9, 1.2),
        ("Delhi", 1.1, 1.3),
        ("Bangalore", 0.8, 1.1),
        ("Chennai", 0.7, 1.0),
        ("Kolkata", 1.2, 0.8),
        ("Hyderabad", 0.9, 1.0),
        ("Pune", 0.8, 1.1),
        ("Ahmedabad", 0.9, 1.0),
        ("New York", 0.7, 0.8),
        ("Los Angeles", 0.6, 1.1),
        ("Chicago", 1.0, 0.9),
        ("Houston", 1.3, 1.2),
        ("San Francisco", 0.5, 0.7),
        ("Seattle", 0.3, 0.8),
        ("London", 0.8, 0.7),
        ("Berlin", 0.9, 0.8),
        ("Paris", 0.5, 0.8),
        ("Tokyo", 1.0, 0.7),
        ("Sydney", 1.1, 1.0),
        ("Toronto", 0.4, 0.9),
    ]);

    FactorTable {
        global,
        countries,
        state_adjustments,
        city_adjustments,
    }
}
