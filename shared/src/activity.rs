//! Daily activity reports
//!
//! One [`ActivityReport`] covers a single calendar day and is split into four
//! independent sub-reports. Any of them may be absent; an absent sub-report
//! contributes nothing to the day's emissions.
//!
//! Transport modes and diet types are free-form identifiers rather than
//! enums. A mode the factor table does not know is still a valid report; it
//! simply carries a zero factor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transport mode identifiers used by the builtin factor table
pub const MODE_CAR: &str = "car";
pub const MODE_BUS: &str = "bus";
pub const MODE_TRAIN: &str = "train";
pub const MODE_BIKE: &str = "bike";
pub const MODE_WALK: &str = "walk";
pub const MODE_PLANE: &str = "plane";
pub const MODE_METRO: &str = "metro";
pub const MODE_TAXI: &str = "taxi";
pub const MODE_MOTORCYCLE: &str = "motorcycle";

/// Diet type identifiers used by the builtin factor table
pub const DIET_MEAT: &str = "meat";
pub const DIET_VEGETARIAN: &str = "vegetarian";
pub const DIET_VEGAN: &str = "vegan";
pub const DIET_PESCATARIAN: &str = "pescatarian";

/// Default number of meals when a diet report omits it
pub const DEFAULT_MEALS_PER_DAY: u32 = 3;

/// Fuel used by a motorised trip. Recorded for history, not used by the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
    Electric,
    Hybrid,
    Cng,
    Lpg,
}

/// Travel for the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportReport {
    /// Transport mode id, e.g. "car" or "bike"
    pub mode: String,
    /// Distance travelled in km
    pub distance: f64,
    #[serde(default)]
    pub fuel_type: FuelType,
}

impl TransportReport {
    pub fn new(mode: impl Into<String>, distance: f64) -> Self {
        Self {
            mode: mode.into(),
            distance,
            fuel_type: FuelType::default(),
        }
    }
}

/// Home energy use for the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnergyReport {
    /// Electricity in kWh
    pub electricity: f64,
    /// Natural gas in cubic meters
    pub gas: f64,
    /// Heating in kWh
    pub heating: f64,
    /// Cooling in kWh
    pub cooling: f64,
    /// Share of electricity from renewable sources (0-100)
    pub renewable_percentage: f64,
}

/// Food eaten during the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietReport {
    /// Diet type id, e.g. "vegan"
    pub diet_type: String,
    #[serde(default = "default_meals")]
    pub meals: u32,
    #[serde(default)]
    pub meat_servings: f64,
    #[serde(default)]
    pub dairy_servings: f64,
    #[serde(default)]
    pub local_food: bool,
    #[serde(default)]
    pub organic_food: bool,
}

fn default_meals() -> u32 {
    DEFAULT_MEALS_PER_DAY
}

impl DietReport {
    pub fn new(diet_type: impl Into<String>) -> Self {
        Self {
            diet_type: diet_type.into(),
            meals: DEFAULT_MEALS_PER_DAY,
            meat_servings: 0.0,
            dairy_servings: 0.0,
            local_food: false,
            organic_food: false,
        }
    }
}

/// Consumption outside transport, energy and food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LifestyleReport {
    /// Waste produced in kg
    pub waste: f64,
    /// Material recycled in kg (recorded only)
    pub recycling: f64,
    /// Water used in liters
    pub water: f64,
    /// Money spent on shopping
    pub shopping: f64,
    /// Hours of digital device usage
    pub digital_usage: f64,
}

/// Everything a person reported for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<EnergyReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<DietReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<LifestyleReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ActivityReport {
    /// An empty report for `date`
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            transport: None,
            energy: None,
            diet: None,
            lifestyle: None,
            notes: None,
        }
    }

    pub fn with_transport(mut self, transport: TransportReport) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_energy(mut self, energy: EnergyReport) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_diet(mut self, diet: DietReport) -> Self {
        self.diet = Some(diet);
        self
    }

    pub fn with_lifestyle(mut self, lifestyle: LifestyleReport) -> Self {
        self.lifestyle = Some(lifestyle);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Transport mode of the day, if any travel was reported
    pub fn transport_mode(&self) -> Option<&str> {
        self.transport.as_ref().map(|t| t.mode.as_str())
    }

    /// Diet type of the day, if food was reported
    pub fn diet_type(&self) -> Option<&str> {
        self.diet.as_ref().map(|d| d.diet_type.as_str())
    }

    /// Renewable electricity share of the day, if energy was reported
    pub fn renewable_percentage(&self) -> Option<f64> {
        self.energy.as_ref().map(|e| e.renewable_percentage)
    }
}
