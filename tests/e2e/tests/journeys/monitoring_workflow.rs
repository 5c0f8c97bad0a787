//! Journey: continuous level monitoring, from ingestion to interpretation.

use chrono::Duration;
use std::collections::HashMap;

use neurotempo_core::{
    BrainRegion, InterpolationMethod, Neurotransmitter, NeurotransmitterState, Trend,
};
use neurotempo_e2e_tests::fixtures::ScenarioFactory;

#[test]
fn levels_classify_into_bands_over_time() {
    let mut engine = ScenarioFactory::engine();
    ScenarioFactory::hourly_series(
        &mut engine,
        Neurotransmitter::Dopamine,
        BrainRegion::Striatum,
        &[0.1, 0.3, 0.5, 0.7, 0.9],
    );

    let t = |h: i64| Some(ScenarioFactory::start_time() + Duration::hours(h));
    let state = |h| {
        engine.get_neurotransmitter_state(Neurotransmitter::Dopamine, BrainRegion::Striatum, t(h))
    };

    assert_eq!(state(0), NeurotransmitterState::Deficient);
    assert_eq!(state(1), NeurotransmitterState::BelowNormal);
    assert_eq!(state(2), NeurotransmitterState::Normal);
    assert_eq!(state(3), NeurotransmitterState::AboveNormal);
    assert_eq!(state(4), NeurotransmitterState::Excessive);
    // Latest level when no reference time is given
    assert_eq!(
        engine.get_neurotransmitter_state(Neurotransmitter::Dopamine, BrainRegion::Striatum, None),
        NeurotransmitterState::Excessive
    );
}

#[test]
fn out_of_range_samples_are_clamped_not_dropped() {
    let mut engine = ScenarioFactory::engine();
    engine.add_neurotransmitter_measurement(
        Neurotransmitter::Gaba,
        BrainRegion::Thalamus,
        ScenarioFactory::start_time(),
        1.4,
        HashMap::new(),
    );
    engine.add_neurotransmitter_measurement(
        Neurotransmitter::Gaba,
        BrainRegion::Thalamus,
        ScenarioFactory::start_time() + Duration::hours(1),
        -0.2,
        HashMap::new(),
    );

    let sequence = engine
        .get_measurement_sequence(Neurotransmitter::Gaba, BrainRegion::Thalamus)
        .unwrap();
    assert_eq!(sequence.values(), vec![1.0, 0.0]);
}

#[test]
fn interpolation_answers_between_sample_queries() {
    let engine = ScenarioFactory::low_serotonin_engine();
    let midpoint = ScenarioFactory::start_time() + Duration::minutes(30);

    // Halfway between 0.25 and 0.28
    let level = engine
        .get_current_level(
            Neurotransmitter::Serotonin,
            BrainRegion::PrefrontalCortex,
            Some(midpoint),
        )
        .unwrap();
    assert!((level - 0.265).abs() < 1e-9);

    // Nearest-neighbor answers even past the ends
    let sequence = engine
        .get_measurement_sequence(Neurotransmitter::Serotonin, BrainRegion::PrefrontalCortex)
        .unwrap();
    let past_end = ScenarioFactory::start_time() + Duration::hours(20);
    assert_eq!(
        sequence.value_at(past_end, InterpolationMethod::Nearest),
        Some(0.35)
    );
}

#[test]
fn slow_recovery_reads_as_an_increasing_trend() {
    let engine = ScenarioFactory::low_serotonin_engine();
    let sequence = engine
        .get_measurement_sequence(Neurotransmitter::Serotonin, BrainRegion::PrefrontalCortex)
        .unwrap();
    assert_eq!(sequence.trend(None), Trend::Increasing);
}

#[test]
fn windowed_effect_reflects_measured_levels() {
    let engine = ScenarioFactory::low_serotonin_engine();
    let start = ScenarioFactory::start_time();

    let effect = engine.analyze_temporal_effect(
        Neurotransmitter::Serotonin,
        BrainRegion::PrefrontalCortex,
        start,
        start + Duration::hours(12),
    );

    // Mean of the six seeded levels
    let expected = (0.25 + 0.28 + 0.30 + 0.32 + 0.33 + 0.35) / 6.0;
    assert!((effect.effect_size - expected).abs() < 1e-9);
    assert_eq!(effect.brain_region, Some(BrainRegion::PrefrontalCortex));
    // Dense receptors and a tight series earn the significant p-value
    assert!(effect.is_statistically_significant);
}

#[test]
fn empty_window_falls_back_to_baseline_estimate() {
    let engine = ScenarioFactory::low_serotonin_engine();
    let far_future = ScenarioFactory::start_time() + Duration::days(365);

    let effect = engine.analyze_temporal_effect(
        Neurotransmitter::Serotonin,
        BrainRegion::PrefrontalCortex,
        far_future,
        far_future + Duration::hours(1),
    );

    // The baseline estimate is the receptor density itself
    let density = engine
        .baseline()
        .analyze_receptor_affinity(Neurotransmitter::Serotonin, BrainRegion::PrefrontalCortex);
    assert!((effect.effect_size - density).abs() < 1e-9);
}

#[test]
fn patient_response_auto_splits_baseline_and_comparison() {
    let engine = ScenarioFactory::engine();
    let start = ScenarioFactory::start_time();
    let data: Vec<_> = (0..10)
        .map(|h| (start + Duration::hours(h), 0.3 + 0.02 * h as f64))
        .collect();

    let effect = engine.analyze_temporal_response(
        "patient-42",
        BrainRegion::PrefrontalCortex,
        Neurotransmitter::Serotonin,
        data,
        None,
    );

    // ceil(20% of 10) = 2 points form the baseline window
    let (baseline_start, baseline_end) = effect.baseline_period.unwrap();
    assert_eq!(baseline_start, start);
    assert_eq!(baseline_end, start + Duration::hours(1));
    let (comparison_start, comparison_end) = effect.comparison_period.unwrap();
    assert_eq!(comparison_start, start + Duration::hours(2));
    assert_eq!(comparison_end, start + Duration::hours(9));
    assert_eq!(effect.time_series_data.as_ref().unwrap().len(), 10);
}
