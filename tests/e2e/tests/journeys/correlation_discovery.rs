//! Journey: discover which regions co-move with a monitored target.

use chrono::Duration;
use std::collections::HashMap;

use neurotempo_core::{
    BrainRegion, Neurotransmitter, DEFAULT_CORRELATION_THRESHOLD,
};
use neurotempo_e2e_tests::fixtures::ScenarioFactory;

#[test]
fn co_moving_amygdala_is_reported_first() {
    let engine = ScenarioFactory::low_serotonin_engine();

    // Open bounds correlate over the full monitored history
    let found = engine.find_correlated_regions(
        Neurotransmitter::Serotonin,
        BrainRegion::PrefrontalCortex,
        DEFAULT_CORRELATION_THRESHOLD,
        None,
        None,
    );

    assert!(!found.is_empty());
    let top = &found[0];
    assert_eq!(top.region, BrainRegion::Amygdala);
    assert!(top.coefficient > DEFAULT_CORRELATION_THRESHOLD);
    assert_eq!(top.sample_count, 6);
    assert_eq!(top.defaulted_samples, 0);
    assert!(!top.low_confidence);
}

#[test]
fn anticorrelated_region_survives_the_absolute_threshold() {
    let mut engine = ScenarioFactory::low_serotonin_engine();
    ScenarioFactory::hourly_series(
        &mut engine,
        Neurotransmitter::Serotonin,
        BrainRegion::Hippocampus,
        &[0.75, 0.72, 0.70, 0.68, 0.67, 0.65],
    );
    let start = ScenarioFactory::start_time();

    let found = engine.find_correlated_regions(
        Neurotransmitter::Serotonin,
        BrainRegion::PrefrontalCortex,
        DEFAULT_CORRELATION_THRESHOLD,
        Some(start - Duration::hours(1)),
        Some(start + Duration::hours(12)),
    );

    let hippocampus = found
        .iter()
        .find(|c| c.region == BrainRegion::Hippocampus)
        .unwrap();
    assert!(hippocampus.coefficient < -DEFAULT_CORRELATION_THRESHOLD);
}

#[test]
fn narrow_window_starves_the_target_grid() {
    let engine = ScenarioFactory::low_serotonin_engine();
    let start = ScenarioFactory::start_time();

    // Only two target events fall inside
    let found = engine.find_correlated_regions(
        Neurotransmitter::Serotonin,
        BrainRegion::PrefrontalCortex,
        DEFAULT_CORRELATION_THRESHOLD,
        Some(start),
        Some(start + Duration::hours(1)),
    );
    assert!(found.is_empty());
}

#[test]
fn sparse_candidate_is_flagged_low_confidence() {
    let mut engine = ScenarioFactory::low_serotonin_engine();
    // Three hippocampal points crammed into the first hour: most of the
    // six-point target grid has to be filled with the 0.5 stand-in
    for (i, level) in [0.4, 0.6, 0.5].iter().enumerate() {
        engine.add_neurotransmitter_measurement(
            Neurotransmitter::Serotonin,
            BrainRegion::Hippocampus,
            ScenarioFactory::start_time() + Duration::minutes(i as i64 * 20),
            *level,
            HashMap::new(),
        );
    }
    let start = ScenarioFactory::start_time();

    let found = engine.find_correlated_regions(
        Neurotransmitter::Serotonin,
        BrainRegion::PrefrontalCortex,
        0.0,
        Some(start - Duration::hours(1)),
        Some(start + Duration::hours(12)),
    );

    let hippocampus = found
        .iter()
        .find(|c| c.region == BrainRegion::Hippocampus)
        .unwrap();
    assert!(hippocampus.defaulted_samples > hippocampus.sample_count / 2);
    assert!(hippocampus.low_confidence);
}

#[test]
fn results_serialize_for_reporting() {
    let engine = ScenarioFactory::low_serotonin_engine();

    let found = engine.find_correlated_regions(
        Neurotransmitter::Serotonin,
        BrainRegion::PrefrontalCortex,
        DEFAULT_CORRELATION_THRESHOLD,
        None,
        None,
    );
    let json = serde_json::to_string(&found).unwrap();
    let parsed: Vec<neurotempo_core::RegionCorrelation> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), found.len());
}
