//! Emission calculations
//!
//! Converts one day's [`ActivityReport`] and a resolved [`FactorSet`] into an
//! [`EmissionRecord`]. All formulas are linear:
//!
//! - Transport: `distance × factor[mode]`
//! - Energy: `electricity × factor × (1 - renewable%/100)`
//!   `+ gas × 0.2 + heating × 0.3 + cooling × 0.25`
//! - Diet: `(factor[type] × meals + meat × 2.5 + dairy × 1.2)`,
//!   then `× 0.9` if local and `× 0.95` if organic
//! - Lifestyle: `waste × 0.5 + water × 0.001 + shopping × 0.1 + digital × 0.05`
//!
//! The flat multipliers do not depend on location.

use tracing::debug;

use crate::activity::{ActivityReport, DietReport, EnergyReport, LifestyleReport, TransportReport};
use crate::errors::ValidationError;
use crate::factors::FactorSet;
use crate::record::{CategoryEmissions, EmissionRecord};
use crate::validation::validate_activity_report;

/// kg CO2 per cubic meter of natural gas
pub const GAS_FACTOR: f64 = 0.2;
/// kg CO2 per kWh of heating
pub const HEATING_FACTOR: f64 = 0.3;
/// kg CO2 per kWh of cooling
pub const COOLING_FACTOR: f64 = 0.25;

/// kg CO2 per serving of meat on top of the diet baseline
pub const MEAT_SERVING_FACTOR: f64 = 2.5;
/// kg CO2 per serving of dairy on top of the diet baseline
pub const DAIRY_SERVING_FACTOR: f64 = 1.2;
pub const LOCAL_FOOD_MULTIPLIER: f64 = 0.9;
pub const ORGANIC_FOOD_MULTIPLIER: f64 = 0.95;

/// kg CO2 per kg of waste
pub const WASTE_FACTOR: f64 = 0.5;
/// kg CO2 per liter of water
pub const WATER_FACTOR: f64 = 0.001;
/// kg CO2 per unit of shopping spend
pub const SHOPPING_FACTOR: f64 = 0.1;
/// kg CO2 per hour of digital usage
pub const DIGITAL_FACTOR: f64 = 0.05;

// ============================================================================
// Category Formulas
// ============================================================================

/// Transport emissions. An unknown mode has a zero factor.
pub fn transport_emissions(transport: &TransportReport, factors: &FactorSet) -> f64 {
    if !factors.transport.contains_key(&transport.mode) {
        debug!(mode = %transport.mode, "Unknown transport mode, using zero factor");
    }
    transport.distance * factors.transport_factor(&transport.mode)
}

pub fn energy_emissions(energy: &EnergyReport, factors: &FactorSet) -> f64 {
    let electricity_factor = factors.electricity * (1.0 - energy.renewable_percentage / 100.0);
    energy.electricity * electricity_factor
        + energy.gas * GAS_FACTOR
        + energy.heating * HEATING_FACTOR
        + energy.cooling * COOLING_FACTOR
}

/// Diet emissions. Local and organic reductions compound, local first.
///
/// A meal count of zero counts as one meal.
pub fn diet_emissions(diet: &DietReport, factors: &FactorSet) -> f64 {
    let meals = diet.meals.max(1) as f64;
    let mut emissions = factors.diet_factor(&diet.diet_type) * meals
        + diet.meat_servings * MEAT_SERVING_FACTOR
        + diet.dairy_servings * DAIRY_SERVING_FACTOR;

    if diet.local_food {
        emissions *= LOCAL_FOOD_MULTIPLIER;
    }
    if diet.organic_food {
        emissions *= ORGANIC_FOOD_MULTIPLIER;
    }
    emissions
}

pub fn lifestyle_emissions(lifestyle: &LifestyleReport) -> f64 {
    lifestyle.waste * WASTE_FACTOR
        + lifestyle.water * WATER_FACTOR
        + lifestyle.shopping * SHOPPING_FACTOR
        + lifestyle.digital_usage * DIGITAL_FACTOR
}

/// Per-category emissions for an already validated report
pub fn category_emissions(report: &ActivityReport, factors: &FactorSet) -> CategoryEmissions {
    CategoryEmissions {
        transport: report
            .transport
            .as_ref()
            .map_or(0.0, |t| transport_emissions(t, factors)),
        energy: report
            .energy
            .as_ref()
            .map_or(0.0, |e| energy_emissions(e, factors)),
        diet: report
            .diet
            .as_ref()
            .map_or(0.0, |d| diet_emissions(d, factors)),
        lifestyle: report.lifestyle.as_ref().map_or(0.0, lifestyle_emissions),
    }
}

// ============================================================================
// Records
// ============================================================================

/// Validate a report and calculate its emission record
pub fn calculate_emissions(
    report: &ActivityReport,
    factors: &FactorSet,
) -> Result<EmissionRecord, ValidationError> {
    validate_activity_report(report)?;

    let emissions = category_emissions(report, factors);
    Ok(EmissionRecord::new(
        report.date,
        report.clone(),
        emissions,
        factors.location.clone(),
    ))
}

impl EmissionRecord {
    /// A replacement record with `changes` laid over this record's report.
    ///
    /// Sections and notes present in `changes` replace this record's; absent
    /// ones are kept. The date always comes from `changes`. The original
    /// record is left untouched; the caller swaps the two and adjusts stats
    /// with [`crate::person::PersonStats::revert_record`] and
    /// [`crate::person::PersonStats::apply_record`].
    pub fn corrected(
        &self,
        changes: &ActivityReport,
        factors: &FactorSet,
    ) -> Result<EmissionRecord, ValidationError> {
        let previous = self.activity();
        let merged = ActivityReport {
            date: changes.date,
            transport: changes.transport.clone().or_else(|| previous.transport.clone()),
            energy: changes.energy.clone().or_else(|| previous.energy.clone()),
            diet: changes.diet.clone().or_else(|| previous.diet.clone()),
            lifestyle: changes.lifestyle.clone().or_else(|| previous.lifestyle.clone()),
            notes: changes.notes.clone().or_else(|| previous.notes.clone()),
        };
        calculate_emissions(&merged, factors)
    }
}
