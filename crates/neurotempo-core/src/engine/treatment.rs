//! # Treatment Registration and Response Simulation
//!
//! A treatment is a named set of per-(neurotransmitter, region) level
//! deltas. Registration merges primary and secondary effects into one
//! table; simulation turns that table into forecast level curves using a
//! three-phase response profile:
//!
//! 1. **Rapid rise** - the first 20% of the course ramps linearly to full
//!    response
//! 2. **Plateau** - full response holds through 70% of the course
//! 3. **Decay** - response tapers by `response_decay` over the final 30%
//!    (tolerance/auto-regulation)
//!
//! Simulation reads stored measurements for baselines but never mutates
//! them; every run returns freshly allocated sequences.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::TemporalNeurotransmitterMapping;
use crate::taxonomy::{BrainRegion, Neurotransmitter};
use crate::temporal::{TemporalEvent, TemporalSequence};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default response tapering over the decay phase.
pub const DEFAULT_RESPONSE_DECAY: f64 = 0.1;

/// Assumed level for pairs with no recorded measurements.
pub const DEFAULT_BASELINE_LEVEL: f64 = 0.5;

/// Fraction of the course spent in the rapid-rise phase.
const RISE_PHASE_END: f64 = 0.2;

/// Fraction of the course after which the decay phase begins.
const PLATEAU_PHASE_END: f64 = 0.7;

/// Scale applied to a secondary delta landing on an empty slot.
const SECONDARY_FRESH_FACTOR: f64 = 0.5;

/// Scale applied to a secondary delta stacking on an existing entry.
const SECONDARY_STACK_FACTOR: f64 = 0.25;

// ============================================================================
// SERDE SUPPORT
// ============================================================================

/// JSON maps need string keys, so composite-keyed maps serialize as entry
/// lists.
mod pair_map {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    use crate::taxonomy::{BrainRegion, Neurotransmitter};

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Entry<V> {
        neurotransmitter: Neurotransmitter,
        brain_region: BrainRegion,
        value: V,
    }

    pub fn serialize<S, V>(
        map: &HashMap<(Neurotransmitter, BrainRegion), V>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize + Clone,
    {
        let entries: Vec<Entry<V>> = map
            .iter()
            .map(|((nt, region), value)| Entry {
                neurotransmitter: *nt,
                brain_region: *region,
                value: value.clone(),
            })
            .collect();
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D, V>(
        deserializer: D,
    ) -> Result<HashMap<(Neurotransmitter, BrainRegion), V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let entries = Vec::<Entry<V>>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|e| ((e.neurotransmitter, e.brain_region), e.value))
            .collect())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Failures of the treatment workflow - the only hard errors in the
/// subsystem.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Simulation requested for an id that was never registered.
    #[error("treatment '{treatment_id}' has not been registered")]
    TreatmentNotRegistered { treatment_id: String },

    /// The sampling interval must be positive to lay out timestamps.
    #[error("sampling interval must be positive")]
    NonPositiveInterval,
}

// ============================================================================
// REGISTRATION
// ============================================================================

/// A registered treatment: one merged delta per affected pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRegistration {
    pub treatment_id: String,
    /// Merged primary + secondary deltas, each in [-1, 1]
    #[serde(with = "pair_map")]
    effects: HashMap<(Neurotransmitter, BrainRegion), f64>,
    pub registered_at: DateTime<Utc>,
}

impl TreatmentRegistration {
    fn new(treatment_id: impl Into<String>) -> Self {
        Self {
            treatment_id: treatment_id.into(),
            effects: HashMap::new(),
            registered_at: Utc::now(),
        }
    }

    /// The merged delta for a pair, if the treatment touches it.
    pub fn effect(&self, neurotransmitter: Neurotransmitter, region: BrainRegion) -> Option<f64> {
        self.effects.get(&(neurotransmitter, region)).copied()
    }

    /// All (neurotransmitter, region, delta) entries.
    pub fn effects(&self) -> impl Iterator<Item = (Neurotransmitter, BrainRegion, f64)> + '_ {
        self.effects.iter().map(|((nt, r), d)| (*nt, *r, *d))
    }

    /// Number of affected pairs.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the treatment affects no pairs.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

// ============================================================================
// SIMULATION RESULT
// ============================================================================

/// Forecast curves for one simulated treatment course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentResponse {
    pub treatment_id: String,
    pub start_time: DateTime<Utc>,
    pub interval: Duration,
    #[serde(with = "pair_map")]
    sequences: HashMap<(Neurotransmitter, BrainRegion), TemporalSequence<f64>>,
}

impl TreatmentResponse {
    /// The forecast curve for a pair, if the treatment affects it.
    pub fn sequence(
        &self,
        neurotransmitter: Neurotransmitter,
        region: BrainRegion,
    ) -> Option<&TemporalSequence<f64>> {
        self.sequences.get(&(neurotransmitter, region))
    }

    /// All affected pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Neurotransmitter, BrainRegion)> + '_ {
        self.sequences.keys().copied()
    }

    /// Number of forecast curves.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Whether the simulation produced no curves.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

// ============================================================================
// RESPONSE PROFILE
// ============================================================================

/// Three-phase response factor at a normalized course position in [0, 1].
fn response_factor(time_factor: f64, response_decay: f64) -> f64 {
    if time_factor < RISE_PHASE_END {
        time_factor * 5.0
    } else if time_factor < PLATEAU_PHASE_END {
        1.0
    } else {
        1.0 - ((time_factor - PLATEAU_PHASE_END) / (1.0 - PLATEAU_PHASE_END)) * response_decay
    }
}

// ============================================================================
// ENGINE METHODS
// ============================================================================

impl TemporalNeurotransmitterMapping {
    /// Register (or re-register) a treatment's effects.
    ///
    /// Primary deltas land directly. A secondary delta is merged at half
    /// strength when its (neurotransmitter, region) slot is empty, and
    /// otherwise stacks a quarter of its strength onto the existing entry.
    /// All deltas are clamped to [-1, 1].
    pub fn register_treatment_effect(
        &mut self,
        treatment_id: impl Into<String>,
        primary_effect: HashMap<Neurotransmitter, HashMap<BrainRegion, f64>>,
        secondary_effect: Option<HashMap<Neurotransmitter, HashMap<BrainRegion, f64>>>,
    ) {
        let treatment_id = treatment_id.into();
        let mut registration = TreatmentRegistration::new(&treatment_id);

        for (nt, regions) in primary_effect {
            for (region, delta) in regions {
                registration
                    .effects
                    .insert((nt, region), delta.clamp(-1.0, 1.0));
            }
        }

        if let Some(secondary) = secondary_effect {
            for (nt, regions) in secondary {
                for (region, delta) in regions {
                    let delta = delta.clamp(-1.0, 1.0);
                    registration
                        .effects
                        .entry((nt, region))
                        .and_modify(|existing| {
                            *existing =
                                (*existing + delta * SECONDARY_STACK_FACTOR).clamp(-1.0, 1.0);
                        })
                        .or_insert(delta * SECONDARY_FRESH_FACTOR);
                }
            }
        }

        tracing::info!(
            treatment_id = %treatment_id,
            pairs = registration.len(),
            "treatment effects registered"
        );
        self.treatments_mut().insert(treatment_id, registration);
    }

    /// The registration for an id, if present.
    pub fn get_treatment(&self, treatment_id: &str) -> Option<&TreatmentRegistration> {
        self.treatments().get(treatment_id)
    }

    /// Simulate the response to a registered treatment.
    ///
    /// Samples `duration / interval + 1` points from `start_time`. For each
    /// affected pair the baseline is the most recent stored level (or 0.5
    /// with no data), and each sample applies the three-phase response
    /// profile: `level = clamp(baseline + delta * factor, 0, 1)`.
    ///
    /// Errors on an unregistered id; never mutates stored sequences.
    pub fn simulate_treatment_response(
        &self,
        treatment_id: &str,
        start_time: DateTime<Utc>,
        duration: Duration,
        interval: Duration,
        response_decay: f64,
    ) -> Result<TreatmentResponse, SimulationError> {
        let registration =
            self.treatments()
                .get(treatment_id)
                .ok_or_else(|| SimulationError::TreatmentNotRegistered {
                    treatment_id: treatment_id.to_string(),
                })?;

        if interval <= Duration::zero() {
            return Err(SimulationError::NonPositiveInterval);
        }
        let steps = (duration.num_milliseconds() / interval.num_milliseconds()).max(0) as usize;
        let samples = steps + 1;

        let mut sequences = HashMap::new();
        for (nt, region, delta) in registration.effects() {
            let baseline = self
                .get_current_level(nt, region, None)
                .unwrap_or(DEFAULT_BASELINE_LEVEL);

            let mut sequence = TemporalSequence::for_pair(nt, region);
            sequence.name = format!("{} response: {} in {}", treatment_id, nt, region);
            for idx in 0..samples {
                let time_factor = if samples > 1 {
                    idx as f64 / (samples - 1) as f64
                } else {
                    0.0
                };
                let factor = response_factor(time_factor, response_decay);
                let level = (baseline + delta * factor).clamp(0.0, 1.0);
                sequence.add_event(TemporalEvent::new(
                    start_time + interval * idx as i32,
                    level,
                ));
            }
            sequences.insert((nt, region), sequence);
        }

        tracing::info!(
            treatment_id = %treatment_id,
            pairs = sequences.len(),
            samples,
            "treatment response simulated"
        );
        Ok(TreatmentResponse {
            treatment_id: treatment_id.to_string(),
            start_time,
            interval,
            sequences,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
