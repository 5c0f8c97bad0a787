//! Test Scenario Factory
//!
//! Provides utilities for generating realistic measurement data:
//! - hourly level series for (neurotransmitter, region) pairs
//! - pre-built patient scenarios for common test cases
//! - a registered-treatment engine ready for simulation

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;

use neurotempo_core::{BrainRegion, Neurotransmitter, TemporalNeurotransmitterMapping};

/// Factory for creating test scenarios
///
/// Generates deterministic measurement histories so journey assertions can
/// pin exact values.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = ScenarioFactory::engine();
/// ScenarioFactory::hourly_series(
///     &mut engine,
///     Neurotransmitter::Serotonin,
///     BrainRegion::PrefrontalCortex,
///     &[0.3, 0.35, 0.4],
/// );
/// ```
pub struct ScenarioFactory;

impl ScenarioFactory {
    /// Fixed anchor so scenarios are reproducible.
    pub fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    }

    /// Fresh engine over the default human baseline.
    pub fn engine() -> TemporalNeurotransmitterMapping {
        TemporalNeurotransmitterMapping::new()
    }

    /// Ingest one measurement per hour starting at [`Self::start_time`].
    pub fn hourly_series(
        engine: &mut TemporalNeurotransmitterMapping,
        neurotransmitter: Neurotransmitter,
        region: BrainRegion,
        levels: &[f64],
    ) {
        for (hour, level) in levels.iter().enumerate() {
            engine.add_neurotransmitter_measurement(
                neurotransmitter,
                region,
                Self::start_time() + Duration::hours(hour as i64),
                *level,
                HashMap::new(),
            );
        }
    }

    /// A depressed-patient scenario: low serotonin in the prefrontal
    /// cortex trending slowly upward, plus parallel amygdala data.
    pub fn low_serotonin_engine() -> TemporalNeurotransmitterMapping {
        let mut engine = Self::engine();
        Self::hourly_series(
            &mut engine,
            Neurotransmitter::Serotonin,
            BrainRegion::PrefrontalCortex,
            &[0.25, 0.28, 0.30, 0.32, 0.33, 0.35],
        );
        Self::hourly_series(
            &mut engine,
            Neurotransmitter::Serotonin,
            BrainRegion::Amygdala,
            &[0.30, 0.32, 0.35, 0.36, 0.38, 0.40],
        );
        engine
    }

    /// [`Self::low_serotonin_engine`] with an SSRI-like treatment
    /// registered under `treatment_id`.
    pub fn ssri_engine(treatment_id: &str) -> TemporalNeurotransmitterMapping {
        let mut engine = Self::low_serotonin_engine();
        let mut primary = HashMap::new();
        primary.insert(
            Neurotransmitter::Serotonin,
            HashMap::from([
                (BrainRegion::PrefrontalCortex, 0.3),
                (BrainRegion::Hippocampus, 0.2),
                (BrainRegion::RapheNuclei, 0.25),
            ]),
        );
        let mut secondary = HashMap::new();
        secondary.insert(
            Neurotransmitter::Dopamine,
            HashMap::from([(BrainRegion::NucleusAccumbens, 0.1)]),
        );
        engine.register_treatment_effect(treatment_id, primary, Some(secondary));
        engine
    }
}
