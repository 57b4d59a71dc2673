//! Input validation for activity reports
//!
//! Every quantity is checked before it enters an emission formula. A bad
//! value is reported with the dotted path of the offending field.

use crate::activity::{ActivityReport, DietReport, EnergyReport, LifestyleReport, TransportReport};
use crate::errors::ValidationError;

/// Upper bound on meals reported for a single day
pub const MAX_MEALS_PER_DAY: u32 = 10;

/// Upper bound on the free-text notes attached to a report
pub const MAX_NOTES_LEN: usize = 500;

/// Validate a quantity that must be a finite, non-negative number
pub fn validate_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "must be a valid number"));
    }
    if value < 0.0 {
        return Err(ValidationError::new(field, "cannot be negative"));
    }
    Ok(())
}

/// Validate percentage value (0-100)
pub fn validate_percentage(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "must be a valid number"));
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::new(field, "must be between 0 and 100"));
    }
    Ok(())
}

/// Validate the number of meals eaten in a day
pub fn validate_meal_count(field: &str, meals: u32) -> Result<(), ValidationError> {
    if meals > MAX_MEALS_PER_DAY {
        return Err(ValidationError::new(
            field,
            format!("cannot exceed {} per day", MAX_MEALS_PER_DAY),
        ));
    }
    Ok(())
}

/// Validate an identifier such as a transport mode or diet type
pub fn validate_identifier(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

pub fn validate_notes(field: &str, notes: &str) -> Result<(), ValidationError> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::new(
            field,
            format!("cannot exceed {} characters", MAX_NOTES_LEN),
        ));
    }
    Ok(())
}

// ============================================================================
// Report Validation
// ============================================================================

/// Validate a whole day's report, stopping at the first bad field
pub fn validate_activity_report(report: &ActivityReport) -> Result<(), ValidationError> {
    if let Some(transport) = &report.transport {
        validate_transport(transport)?;
    }
    if let Some(energy) = &report.energy {
        validate_energy(energy)?;
    }
    if let Some(diet) = &report.diet {
        validate_diet(diet)?;
    }
    if let Some(lifestyle) = &report.lifestyle {
        validate_lifestyle(lifestyle)?;
    }
    if let Some(notes) = &report.notes {
        validate_notes("notes", notes)?;
    }
    Ok(())
}

fn validate_transport(transport: &TransportReport) -> Result<(), ValidationError> {
    validate_identifier("transport.mode", &transport.mode)?;
    validate_non_negative("transport.distance", transport.distance)
}

fn validate_energy(energy: &EnergyReport) -> Result<(), ValidationError> {
    validate_non_negative("energy.electricity", energy.electricity)?;
    validate_non_negative("energy.gas", energy.gas)?;
    validate_non_negative("energy.heating", energy.heating)?;
    validate_non_negative("energy.cooling", energy.cooling)?;
    validate_percentage("energy.renewable_percentage", energy.renewable_percentage)
}

fn validate_diet(diet: &DietReport) -> Result<(), ValidationError> {
    validate_identifier("diet.diet_type", &diet.diet_type)?;
    validate_meal_count("diet.meals", diet.meals)?;
    validate_non_negative("diet.meat_servings", diet.meat_servings)?;
    validate_non_negative("diet.dairy_servings", diet.dairy_servings)
}

fn validate_lifestyle(lifestyle: &LifestyleReport) -> Result<(), ValidationError> {
    validate_non_negative("lifestyle.waste", lifestyle.waste)?;
    validate_non_negative("lifestyle.recycling", lifestyle.recycling)?;
    validate_non_negative("lifestyle.water", lifestyle.water)?;
    validate_non_negative("lifestyle.shopping", lifestyle.shopping)?;
    validate_non_negative("lifestyle.digital_usage", lifestyle.digital_usage)
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "transport.mode" => "Transport Mode",
        "transport.distance" => "Travel Distance",
        "energy.electricity" => "Electricity Used",
        "energy.gas" => "Gas Used",
        "energy.heating" => "Heating",
        "energy.cooling" => "Cooling",
        "energy.renewable_percentage" => "Renewable Share",
        "diet.diet_type" => "Diet Type",
        "diet.meals" => "Meals",
        "diet.meat_servings" => "Meat Servings",
        "diet.dairy_servings" => "Dairy Servings",
        "lifestyle.waste" => "Waste",
        "lifestyle.recycling" => "Recycling",
        "lifestyle.water" => "Water Used",
        "lifestyle.shopping" => "Shopping Spend",
        "lifestyle.digital_usage" => "Screen Time",
        "notes" => "Notes",
        _ => field_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("x", 0.0).is_ok());
        assert!(validate_non_negative("x", 12.5).is_ok());
        assert!(validate_non_negative("x", -0.1).is_err());
        assert!(validate_non_negative("x", f64::NAN).is_err());
        assert!(validate_non_negative("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("p", 0.0).is_ok());
        assert!(validate_percentage("p", 50.0).is_ok());
        assert!(validate_percentage("p", 100.0).is_ok());
        assert!(validate_percentage("p", -1.0).is_err());
        assert!(validate_percentage("p", 101.0).is_err());
    }

    #[test]
    fn test_validate_meal_count() {
        assert!(validate_meal_count("m", 0).is_ok());
        assert!(validate_meal_count("m", 10).is_ok());
        assert!(validate_meal_count("m", 11).is_err());
    }

    #[test]
    fn test_validate_notes_counts_characters() {
        assert!(validate_notes("notes", &"é".repeat(500)).is_ok());
        assert!(validate_notes("notes", &"a".repeat(501)).is_err());
    }

    #[test]
    fn test_empty_report_is_valid() {
        assert!(validate_activity_report(&ActivityReport::new(day())).is_ok());
    }

    #[test]
    fn test_negative_distance_names_field() {
        let report = ActivityReport::new(day()).with_transport(TransportReport::new("car", -3.0));
        let err = validate_activity_report(&report).unwrap_err();
        assert_eq!(err.field, "transport.distance");
    }

    #[test]
    fn test_blank_transport_mode_rejected() {
        let report = ActivityReport::new(day()).with_transport(TransportReport::new("  ", 3.0));
        let err = validate_activity_report(&report).unwrap_err();
        assert_eq!(err.field, "transport.mode");
    }

    #[test]
    fn test_blank_diet_type_rejected() {
        let report = ActivityReport::new(day()).with_diet(DietReport::new(""));
        let err = validate_activity_report(&report).unwrap_err();
        assert_eq!(err.field, "diet.diet_type");
        assert_eq!(err.message, "is required");
    }

    #[test]
    fn test_ten_meals_accepted_eleven_rejected() {
        let mut diet = DietReport::new("meat");
        diet.meals = 10;
        let report = ActivityReport::new(day()).with_diet(diet.clone());
        assert!(validate_activity_report(&report).is_ok());

        diet.meals = 11;
        let report = ActivityReport::new(day()).with_diet(diet);
        let err = validate_activity_report(&report).unwrap_err();
        assert_eq!(err.field, "diet.meals");
    }

    #[test]
    fn test_renewable_share_out_of_range() {
        let energy = EnergyReport {
            renewable_percentage: 120.0,
            ..EnergyReport::default()
        };
        let report = ActivityReport::new(day()).with_energy(energy);
        let err = validate_activity_report(&report).unwrap_err();
        assert_eq!(err.field, "energy.renewable_percentage");
    }

    #[test]
    fn test_negative_dairy_servings() {
        let diet = DietReport {
            dairy_servings: -1.0,
            ..DietReport::new("vegetarian")
        };
        let report = ActivityReport::new(day()).with_diet(diet);
        assert_eq!(
            validate_activity_report(&report).unwrap_err().field,
            "diet.dairy_servings"
        );
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("transport.distance"), "Travel Distance");
        assert_eq!(get_field_display_label("lifestyle.digital_usage"), "Screen Time");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_non_negative_values_accepted(value in 0.0f64..1.0e9) {
            prop_assert!(validate_non_negative("x", value).is_ok());
        }

        #[test]
        fn prop_negative_values_rejected(value in -1.0e9f64..-1.0e-9) {
            prop_assert!(validate_non_negative("x", value).is_err());
        }

        #[test]
        fn prop_valid_percentage_range(pct in 0.0f64..=100.0) {
            prop_assert!(validate_percentage("p", pct).is_ok());
        }

        #[test]
        fn prop_negative_waste_rejected(waste in -1000.0f64..-0.001) {
            let lifestyle = LifestyleReport { waste, ..LifestyleReport::default() };
            let report = ActivityReport::new(day()).with_lifestyle(lifestyle);
            let err = validate_activity_report(&report).unwrap_err();
            prop_assert_eq!(err.field, "lifestyle.waste");
        }
    }
}
