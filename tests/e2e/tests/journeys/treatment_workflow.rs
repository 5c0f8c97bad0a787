//! Journey: register a treatment, simulate the course, read the forecast.
//!
//! Mirrors how a clinician-facing tool would use the engine: seed a patient
//! history, register an SSRI-like intervention, project a seven-day course,
//! and inspect the resulting curves phase by phase.

use chrono::Duration;
use std::collections::HashMap;

use neurotempo_core::{
    BrainRegion, Neurotransmitter, SimulationError, TemporalNeurotransmitterMapping,
};
use neurotempo_e2e_tests::fixtures::ScenarioFactory;

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn full_course_follows_three_phases() {
    let engine = ScenarioFactory::ssri_engine("ssri_standard");

    let response = engine
        .simulate_treatment_response(
            "ssri_standard",
            ScenarioFactory::start_time() + Duration::hours(6),
            Duration::days(7),
            Duration::hours(1),
            0.1,
        )
        .unwrap();

    // 7 days sampled hourly, endpoints included
    let curve = response
        .sequence(Neurotransmitter::Serotonin, BrainRegion::PrefrontalCortex)
        .unwrap();
    assert_eq!(curve.len(), 169);

    let values = curve.values();
    // Baseline is the most recent stored PFC level
    assert!(approx_eq(values[0], 0.35, 1e-9));
    // Mid-plateau: baseline + full delta
    assert!(approx_eq(values[84], 0.35 + 0.3, 1e-9));
    // End of course: delta scaled down by the decay fraction
    assert!(approx_eq(values[168], 0.35 + 0.3 * 0.9, 1e-9));
    // Rise phase climbs monotonically toward the plateau
    let rise_end = (169.0_f64 * 0.2).floor() as usize;
    assert!(values[..rise_end].windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn pairs_without_history_fall_back_to_midpoint_baseline() {
    let engine = ScenarioFactory::ssri_engine("ssri_standard");

    let response = engine
        .simulate_treatment_response(
            "ssri_standard",
            ScenarioFactory::start_time(),
            Duration::days(1),
            Duration::hours(1),
            0.1,
        )
        .unwrap();

    // No hippocampal measurements were seeded, so the curve anchors at 0.5
    let curve = response
        .sequence(Neurotransmitter::Serotonin, BrainRegion::Hippocampus)
        .unwrap();
    assert!(approx_eq(curve.values()[0], 0.5, 1e-9));
}

#[test]
fn secondary_effects_merge_at_half_strength() {
    let engine = ScenarioFactory::ssri_engine("ssri_standard");

    let registration = engine.get_treatment("ssri_standard").unwrap();
    // The dopamine slot was empty, so the 0.1 secondary delta lands halved
    assert_eq!(
        registration.effect(Neurotransmitter::Dopamine, BrainRegion::NucleusAccumbens),
        Some(0.05)
    );
    // Primary deltas are untouched by the merge
    assert_eq!(
        registration.effect(Neurotransmitter::Serotonin, BrainRegion::PrefrontalCortex),
        Some(0.3)
    );
}

#[test]
fn overlapping_secondary_stacks_a_quarter() {
    let mut engine = TemporalNeurotransmitterMapping::new();
    let mut primary = HashMap::new();
    primary.insert(
        Neurotransmitter::Serotonin,
        HashMap::from([(BrainRegion::PrefrontalCortex, 0.3)]),
    );
    let mut secondary = HashMap::new();
    secondary.insert(
        Neurotransmitter::Serotonin,
        HashMap::from([(BrainRegion::PrefrontalCortex, 0.2)]),
    );
    engine.register_treatment_effect("combo", primary, Some(secondary));

    let registration = engine.get_treatment("combo").unwrap();
    assert!(approx_eq(
        registration
            .effect(Neurotransmitter::Serotonin, BrainRegion::PrefrontalCortex)
            .unwrap(),
        0.3 + 0.2 * 0.25,
        1e-9,
    ));
}

#[test]
fn unregistered_treatment_is_an_error() {
    let engine = ScenarioFactory::engine();
    let result = engine.simulate_treatment_response(
        "no_such_treatment",
        ScenarioFactory::start_time(),
        Duration::days(1),
        Duration::hours(1),
        0.1,
    );
    assert!(matches!(
        result,
        Err(SimulationError::TreatmentNotRegistered { ref treatment_id })
            if treatment_id == "no_such_treatment"
    ));
}

#[test]
fn non_positive_interval_is_an_error() {
    let engine = ScenarioFactory::ssri_engine("ssri_standard");
    let result = engine.simulate_treatment_response(
        "ssri_standard",
        ScenarioFactory::start_time(),
        Duration::days(1),
        Duration::zero(),
        0.1,
    );
    assert!(matches!(result, Err(SimulationError::NonPositiveInterval)));
}

#[test]
fn simulation_never_mutates_stored_history() {
    let engine = ScenarioFactory::ssri_engine("ssri_standard");
    let before = engine
        .get_measurement_sequence(Neurotransmitter::Serotonin, BrainRegion::PrefrontalCortex)
        .unwrap()
        .len();

    engine
        .simulate_treatment_response(
            "ssri_standard",
            ScenarioFactory::start_time(),
            Duration::days(7),
            Duration::hours(1),
            0.1,
        )
        .unwrap();

    let after = engine
        .get_measurement_sequence(Neurotransmitter::Serotonin, BrainRegion::PrefrontalCortex)
        .unwrap()
        .len();
    assert_eq!(before, after);
}

#[test]
fn re_registration_replaces_prior_effects() {
    let mut engine = ScenarioFactory::ssri_engine("ssri_standard");
    let mut primary = HashMap::new();
    primary.insert(
        Neurotransmitter::Serotonin,
        HashMap::from([(BrainRegion::Amygdala, 0.1)]),
    );
    engine.register_treatment_effect("ssri_standard", primary, None);

    let registration = engine.get_treatment("ssri_standard").unwrap();
    assert_eq!(registration.len(), 1);
    assert_eq!(
        registration.effect(Neurotransmitter::Serotonin, BrainRegion::PrefrontalCortex),
        None
    );
}

#[test]
fn forecast_serializes_round_trip() {
    let engine = ScenarioFactory::ssri_engine("ssri_standard");
    let response = engine
        .simulate_treatment_response(
            "ssri_standard",
            ScenarioFactory::start_time(),
            Duration::days(1),
            Duration::hours(6),
            0.1,
        )
        .unwrap();

    let json = serde_json::to_string(&response).unwrap();
    let parsed: neurotempo_core::TreatmentResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.treatment_id, "ssri_standard");
    assert_eq!(parsed.len(), response.len());
}
