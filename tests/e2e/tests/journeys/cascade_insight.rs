//! Journey: probe how a localized surge spreads through the pathway graph.

use chrono::Duration;

use neurotempo_core::{BrainRegion, Neurotransmitter};
use neurotempo_e2e_tests::fixtures::ScenarioFactory;

#[test]
fn serotonin_surge_spreads_from_prefrontal_cortex() {
    let engine = ScenarioFactory::low_serotonin_engine();

    let result = engine.predict_cascade_effect(
        BrainRegion::PrefrontalCortex,
        Neurotransmitter::Serotonin,
        0.8,
        10,
        Duration::minutes(30),
    );

    // Every region gets a full-length, in-range trajectory
    for region in BrainRegion::iter() {
        let trajectory = result.trajectory(region).unwrap();
        assert_eq!(trajectory.len(), 10);
        assert!(trajectory.iter().all(|l| (0.0..=1.0).contains(l)));
    }

    // Only the origin is seeded
    assert_eq!(result.trajectory(BrainRegion::PrefrontalCortex).unwrap()[0], 0.8);
    assert_eq!(result.trajectory(BrainRegion::Amygdala).unwrap()[0], 0.0);

    // The surge reaches regions that project onto the origin
    assert!(result.trajectory(BrainRegion::Amygdala).unwrap()[1] > 0.0);

    // The unconnected pituitary never sees it
    assert!(result
        .trajectory(BrainRegion::PituitaryGland)
        .unwrap()
        .iter()
        .all(|l| *l == 0.0));
}

#[test]
fn feedback_keeps_a_connected_origin_elevated() {
    let engine = ScenarioFactory::engine();

    let connected = engine.predict_cascade_effect(
        BrainRegion::PrefrontalCortex,
        Neurotransmitter::Serotonin,
        0.8,
        12,
        Duration::minutes(30),
    );
    let isolated = engine.predict_cascade_effect(
        BrainRegion::PituitaryGland,
        Neurotransmitter::Serotonin,
        0.8,
        12,
        Duration::minutes(30),
    );

    let pfc = connected.trajectory(BrainRegion::PrefrontalCortex).unwrap();
    let pituitary = isolated.trajectory(BrainRegion::PituitaryGland).unwrap();
    // Same decay constant, but the connected origin also re-absorbs its
    // neighbors' levels
    assert!(pfc[11] > pituitary[11]);
}

#[test]
fn timestamps_anchor_the_step_grid() {
    let engine = ScenarioFactory::engine();
    let result = engine.predict_cascade_effect(
        BrainRegion::Striatum,
        Neurotransmitter::Dopamine,
        0.6,
        5,
        Duration::minutes(15),
    );

    let start = ScenarioFactory::start_time();
    let stamps = result.timestamps(start);
    assert_eq!(stamps.len(), 5);
    assert_eq!(stamps[0], start);
    assert_eq!(stamps[4], start + Duration::minutes(60));
}

#[test]
fn regions_reaching_reports_arrival_order() {
    let engine = ScenarioFactory::engine();
    let result = engine.predict_cascade_effect(
        BrainRegion::PrefrontalCortex,
        Neurotransmitter::Serotonin,
        0.9,
        8,
        Duration::minutes(30),
    );

    let reached = result.regions_reaching(0.05);
    assert_eq!(reached[0].0, BrainRegion::PrefrontalCortex);
    assert!(reached.windows(2).all(|w| w[0].1 <= w[1].1));
    // Something downstream picks up at least a twentieth of the surge
    assert!(reached.len() > 1);
}
