//! # Temporal Neurotransmitter Engine
//!
//! The core engine: wraps a baseline [`NeurotransmitterMapping`] and owns
//! one measured [`TemporalSequence`] per (neurotransmitter, region) pair.
//! On top of that state it offers:
//!
//! - measurement ingestion ([`TemporalNeurotransmitterMapping::add_neurotransmitter_measurement`])
//! - level/state queries and windowed effect analysis
//! - treatment registration and response simulation (`treatment`)
//! - cross-region correlation discovery (`correlation`)
//! - graph-based cascade propagation (`cascade`)
//!
//! Everything is synchronous and in-memory. Queries are pure functions over
//! the current state; mutation carries no internal synchronization, so
//! callers sharing an instance across threads must serialize writers.
//! Retained history is unbounded by design - trimming is the caller's
//! responsibility.
//!
//! ## Leniency policy
//!
//! Ingestion clamps out-of-range levels silently instead of rejecting them,
//! and windowed analysis falls back to the baseline estimate instead of
//! erroring on empty windows. The one hard failure in the subsystem is
//! simulating an unregistered treatment.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::mapping::{NeurotransmitterEffect, NeurotransmitterMapping, P_VALUE_DEFAULT, P_VALUE_SIGNIFICANT};
use crate::taxonomy::{BrainRegion, ClinicalSignificance, Neurotransmitter, NeurotransmitterState};
use crate::temporal::{stats, InterpolationMethod, TemporalEvent, TemporalSequence};

pub mod cascade;
pub mod connectivity;
pub mod correlation;
pub mod treatment;

pub use cascade::{CascadeResult, DEFAULT_TIME_STEPS};
pub use connectivity::ConnectivityGraph;
pub use correlation::{RegionCorrelation, DEFAULT_CORRELATION_THRESHOLD};
pub use treatment::{SimulationError, TreatmentRegistration, TreatmentResponse};

// ============================================================================
// HEURISTIC CONSTANTS
// ============================================================================

/// Receptor density required for the low temporal p-value.
const TEMPORAL_P_DENSITY_CUTOFF: f64 = 0.5;

/// Level std-dev below which a window counts as consistent.
const TEMPORAL_P_STDDEV_CUTOFF: f64 = 0.2;

/// Floor for the response-analysis p-value.
const RESPONSE_P_FLOOR: f64 = 0.01;

/// Fraction of caller-supplied points used as the auto-split baseline.
const RESPONSE_BASELINE_FRACTION: f64 = 0.2;

// ============================================================================
// ENGINE
// ============================================================================

/// The temporal neurotransmitter modeling engine.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use neurotempo_core::engine::TemporalNeurotransmitterMapping;
/// use neurotempo_core::taxonomy::{BrainRegion, Neurotransmitter, NeurotransmitterState};
///
/// let mut engine = TemporalNeurotransmitterMapping::new();
/// engine.add_neurotransmitter_measurement(
///     Neurotransmitter::Serotonin,
///     BrainRegion::PrefrontalCortex,
///     Utc::now(),
///     0.35,
///     Default::default(),
/// );
///
/// let state = engine.get_neurotransmitter_state(
///     Neurotransmitter::Serotonin,
///     BrainRegion::PrefrontalCortex,
///     None,
/// );
/// assert_eq!(state, NeurotransmitterState::BelowNormal);
/// ```
#[derive(Debug, Clone)]
pub struct TemporalNeurotransmitterMapping {
    baseline: NeurotransmitterMapping,
    connectivity: ConnectivityGraph,
    /// One sequence per composite key; a single map sidesteps the
    /// partial-key-absence bugs of nested nt -> region -> sequence storage
    sequences: HashMap<(Neurotransmitter, BrainRegion), TemporalSequence<f64>>,
    treatments: HashMap<String, TreatmentRegistration>,
}

impl Default for TemporalNeurotransmitterMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl TemporalNeurotransmitterMapping {
    /// Engine over the default human baseline and pathway graph.
    pub fn new() -> Self {
        Self::with_parts(
            NeurotransmitterMapping::default_human(),
            ConnectivityGraph::default_human(),
        )
    }

    /// Engine over a caller-supplied baseline and connectivity graph.
    ///
    /// Sequences are pre-created for every pair with nonzero baseline
    /// receptor density; other pairs get one lazily on first measurement.
    pub fn with_parts(baseline: NeurotransmitterMapping, connectivity: ConnectivityGraph) -> Self {
        let sequences = baseline
            .nonzero_density_pairs()
            .into_iter()
            .map(|(nt, region)| ((nt, region), TemporalSequence::for_pair(nt, region)))
            .collect();
        Self {
            baseline,
            connectivity,
            sequences,
            treatments: HashMap::new(),
        }
    }

    /// The wrapped baseline mapping.
    pub fn baseline(&self) -> &NeurotransmitterMapping {
        &self.baseline
    }

    /// Mutable access for bulk baseline edits. Remember to call
    /// `rebuild_lookup_maps` afterwards.
    pub fn baseline_mut(&mut self) -> &mut NeurotransmitterMapping {
        &mut self.baseline
    }

    /// The injected connectivity graph.
    pub fn connectivity(&self) -> &ConnectivityGraph {
        &self.connectivity
    }

    // ========================================================================
    // INGESTION
    // ========================================================================

    /// Record a measured level for (neurotransmitter, region).
    ///
    /// Levels outside [0, 1] are clamped, never rejected - the upstream
    /// pipeline already decided the sample is worth keeping. Returns the
    /// new event's id.
    pub fn add_neurotransmitter_measurement(
        &mut self,
        neurotransmitter: Neurotransmitter,
        region: BrainRegion,
        timestamp: DateTime<Utc>,
        level: f64,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Uuid {
        let clamped = level.clamp(0.0, 1.0);
        if clamped != level {
            tracing::warn!(
                nt = %neurotransmitter,
                region = %region,
                level,
                clamped,
                "out-of-range measurement clamped"
            );
        }

        let event = TemporalEvent::new(timestamp, clamped).with_metadata(metadata);
        let event_id = event.event_id;

        self.sequences
            .entry((neurotransmitter, region))
            .or_insert_with(|| TemporalSequence::for_pair(neurotransmitter, region))
            .add_event(event);

        tracing::debug!(
            nt = %neurotransmitter,
            region = %region,
            level = clamped,
            %event_id,
            "measurement recorded"
        );
        event_id
    }

    /// The stored sequence for a pair, if one exists.
    pub fn get_measurement_sequence(
        &self,
        neurotransmitter: Neurotransmitter,
        region: BrainRegion,
    ) -> Option<&TemporalSequence<f64>> {
        self.sequences.get(&(neurotransmitter, region))
    }

    // ========================================================================
    // LEVEL QUERIES
    // ========================================================================

    /// The level at `reference_time` (linearly interpolated), or the most
    /// recent recorded level when omitted. `None` when no data can answer
    /// the question.
    pub fn get_current_level(
        &self,
        neurotransmitter: Neurotransmitter,
        region: BrainRegion,
        reference_time: Option<DateTime<Utc>>,
    ) -> Option<f64> {
        let sequence = self.get_measurement_sequence(neurotransmitter, region)?;
        match reference_time {
            Some(t) => sequence.value_at(t, InterpolationMethod::Linear),
            None => sequence.last().map(|e| e.value),
        }
    }

    /// Five-band classification of the current level. `Normal` when no
    /// data exists.
    pub fn get_neurotransmitter_state(
        &self,
        neurotransmitter: Neurotransmitter,
        region: BrainRegion,
        reference_time: Option<DateTime<Utc>>,
    ) -> NeurotransmitterState {
        self.get_current_level(neurotransmitter, region, reference_time)
            .map(NeurotransmitterState::from_level)
            .unwrap_or_default()
    }

    // ========================================================================
    // EFFECT ANALYSIS
    // ========================================================================

    /// Analyze measured levels inside `[start, end]`.
    ///
    /// An empty window falls back to the baseline estimate - callers always
    /// get a usable effect. Otherwise: `effect_size` is the window mean;
    /// p = 0.05 when the receptor density is >= 0.5 and the window is
    /// consistent (std-dev < 0.2), else 0.2; CI half-width grows with the
    /// window's spread; the significance bucket needs both mean and density
    /// to clear the same tier.
    pub fn analyze_temporal_effect(
        &self,
        neurotransmitter: Neurotransmitter,
        region: BrainRegion,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> NeurotransmitterEffect {
        let values = self
            .get_measurement_sequence(neurotransmitter, region)
            .map(|seq| seq.values_in_range(start, end))
            .unwrap_or_default();

        if values.is_empty() {
            return self.baseline.analyze_baseline_effect(neurotransmitter, region);
        }

        let mean = stats::mean(&values).unwrap_or(0.0);
        let std_dev = stats::std_dev(&values);
        let density = self.baseline.analyze_receptor_affinity(neurotransmitter, region);

        let p_value = if density >= TEMPORAL_P_DENSITY_CUTOFF && std_dev < TEMPORAL_P_STDDEV_CUTOFF
        {
            P_VALUE_SIGNIFICANT
        } else {
            P_VALUE_DEFAULT
        };

        NeurotransmitterEffect::new(
            neurotransmitter,
            mean,
            p_value,
            0.1 + std_dev,
            ClinicalSignificance::from_paired_tiers(mean, density),
        )
        .with_region(region)
    }

    /// Analyze a caller-supplied response series for a patient.
    ///
    /// When `time_series_data` is empty, the stored sequence for the pair
    /// stands in, provided its patient id is unset or matches. The p-value
    /// rewards dense receptors and consistent levels:
    /// `max(0.01, 0.05 * (1 - density * consistency))` with
    /// `consistency = 1 - min(1, std_dev * 5)`.
    ///
    /// A missing `baseline_period` is auto-split from the data: the first
    /// ceil(20%) of points form the baseline window, the remainder the
    /// comparison window.
    pub fn analyze_temporal_response(
        &self,
        patient_id: &str,
        region: BrainRegion,
        neurotransmitter: Neurotransmitter,
        time_series_data: Vec<(DateTime<Utc>, f64)>,
        baseline_period: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> NeurotransmitterEffect {
        let mut data = if time_series_data.is_empty() {
            self.get_measurement_sequence(neurotransmitter, region)
                .filter(|seq| {
                    seq.patient_id
                        .as_deref()
                        .is_none_or(|id| id == patient_id)
                })
                .map(|seq| {
                    seq.events()
                        .iter()
                        .map(|e| (e.timestamp, e.value))
                        .collect()
                })
                .unwrap_or_default()
        } else {
            time_series_data
        };
        data.sort_by_key(|(t, _)| *t);

        if data.is_empty() {
            return self.baseline.analyze_baseline_effect(neurotransmitter, region);
        }

        let values: Vec<f64> = data.iter().map(|(_, v)| *v).collect();
        let mean = stats::mean(&values).unwrap_or(0.0);
        let std_dev = stats::std_dev(&values);
        let density = self.baseline.analyze_receptor_affinity(neurotransmitter, region);

        let consistency = 1.0 - (std_dev * 5.0).min(1.0);
        let p_value = (P_VALUE_SIGNIFICANT * (1.0 - density * consistency)).max(RESPONSE_P_FLOOR);

        let (baseline_window, comparison_window) = match baseline_period {
            Some(window) => {
                let comparison = data
                    .iter()
                    .filter(|(t, _)| *t > window.1)
                    .map(|(t, _)| *t)
                    .collect::<Vec<_>>();
                let comparison = match (comparison.first(), comparison.last()) {
                    (Some(first), Some(last)) => Some((*first, *last)),
                    _ => None,
                };
                (Some(window), comparison)
            }
            None if data.len() >= 2 => {
                let split = ((data.len() as f64 * RESPONSE_BASELINE_FRACTION).ceil() as usize)
                    .clamp(1, data.len() - 1);
                (
                    Some((data[0].0, data[split - 1].0)),
                    Some((data[split].0, data[data.len() - 1].0)),
                )
            }
            None => (None, None),
        };

        NeurotransmitterEffect::new(
            neurotransmitter,
            mean,
            p_value,
            0.1 + std_dev,
            ClinicalSignificance::from_paired_tiers(mean, density),
        )
        .with_region(region)
        .with_time_series(data)
        .with_periods(baseline_window, comparison_window)
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    /// Iterate stored sequences (used by correlation discovery).
    pub(crate) fn sequences(
        &self,
    ) -> impl Iterator<Item = (&(Neurotransmitter, BrainRegion), &TemporalSequence<f64>)> {
        self.sequences.iter()
    }

    pub(crate) fn treatments(&self) -> &HashMap<String, TreatmentRegistration> {
        &self.treatments
    }

    pub(crate) fn treatments_mut(&mut self) -> &mut HashMap<String, TreatmentRegistration> {
        &mut self.treatments
    }
}

// ============================================================================
// TESTS
// ============================================================================
