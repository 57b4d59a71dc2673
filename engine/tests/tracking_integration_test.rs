//! Integration tests for the tracking pipeline

mod common;

use carbon_tracker_engine::services::TrackingService;
use carbon_tracker_shared::{LocationKey, Person};
use common::{commute, full_day, person_in, TestEngine};
use proptest::prelude::*;

#[test]
fn test_car_in_india_records_expected_total() {
    let engine = TestEngine::new();
    let mut person = person_in("India");

    let outcome = engine.record(&mut person, &commute(0, "car", 10.0));

    assert_eq!(outcome.record.total(), 1.8);
    assert_eq!(outcome.record.location(), Some(&LocationKey::country("India")));
}

#[test]
fn test_week_of_tracking_earns_green_week_once() {
    let engine = TestEngine::new();
    let mut person = person_in("France");

    let mut earned_on = Vec::new();
    for day in 0..8 {
        let outcome = engine.record(&mut person, &full_day(day, "vegetarian"));
        if outcome.new_badges.iter().any(|b| b.id == "green_week") {
            earned_on.push(day);
        }
    }

    assert_eq!(earned_on, vec![6]);
    assert_eq!(person.streak.current, 8);
    assert_eq!(person.streak.longest, 8);
    assert!(person.has_badge("plant_based"));
}

#[test]
fn test_same_day_twice_keeps_streak() {
    let engine = TestEngine::new();
    let mut person = person_in("Japan");

    engine.record(&mut person, &commute(0, "metro", 8.0));
    let second = engine.record(&mut person, &commute(0, "walk", 2.0));

    assert_eq!(second.streak.current, 1);
    assert_eq!(person.stats.days_tracked, 2);
    // transport_hero comes from the second report; nothing is awarded twice
    assert_eq!(second.new_badges.len(), 1);
    assert_eq!(second.new_badges[0].id, "transport_hero");
}

#[test]
fn test_gap_resets_streak() {
    let engine = TestEngine::new();
    let mut person = person_in("Canada");

    for day in [0, 1, 2, 5] {
        engine.record(&mut person, &commute(day, "bus", 5.0));
    }

    assert_eq!(person.streak.current, 1);
    assert_eq!(person.streak.longest, 3);
}

#[test]
fn test_city_adjustment_applies_to_records() {
    let engine = TestEngine::new();
    let mut plain = person_in("United States");
    let mut seattle = Person::new(LocationKey::country("United States").with_city("Seattle"));

    let report = commute(0, "car", 100.0);
    let a = engine.record(&mut plain, &report);
    let b = engine.record(&mut seattle, &report);

    assert_eq!(a.record.total(), 24.0);
    assert_eq!(b.record.total(), 19.2);
}

#[test]
fn test_hoverboard_is_free() {
    let engine = TestEngine::new();
    let mut person = person_in("Australia");

    let outcome = engine.record(&mut person, &commute(0, "hoverboard", 30.0));

    assert_eq!(outcome.record.emissions().transport, 0.0);
    assert!(outcome.new_badges.iter().any(|b| b.id == "perfect_day"));
}

// ============================================================================
// Property-based tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_removing_every_record_resets_stats(days in 1i64..15, km in 0.0f64..50.0) {
        let engine = TestEngine::new();
        let mut person = person_in("Germany");

        let mut records = Vec::new();
        for day in 0..days {
            let outcome = engine.record(&mut person, &commute(day, "bus", km));
            records.push(outcome.record);
        }
        prop_assert_eq!(person.stats.days_tracked, days as u32);
        prop_assert_eq!(person.streak.current, days as u32);

        for record in &records {
            TrackingService::remove_record(&mut person, record);
        }
        prop_assert_eq!(person.stats.days_tracked, 0);
        prop_assert_eq!(person.stats.total_emissions, 0.0);
        prop_assert_eq!(person.stats.average_daily, 0.0);
    }
}
