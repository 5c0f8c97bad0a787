//! # Cascade Propagation
//!
//! Discrete-step propagation of a level perturbation across the weighted
//! region-connectivity graph. Useful for "what does a serotonin surge in
//! the prefrontal cortex drag along?" style insight queries.
//!
//! Per step, a connected region blends its own decayed level with a
//! normalized influence term gathered over its projection list, where each
//! contribution is scaled by edge weight and the neighbor's receptor
//! affinity for the propagating neurotransmitter. The origin holds on to
//! more of its own level (slow decay, weak coupling); downstream regions
//! couple harder. Regions with no projections just decay.
//!
//! The simulation is side-effect free: it reads the graph and the baseline
//! receptor table and returns freshly allocated trajectories.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::TemporalNeurotransmitterMapping;
use crate::taxonomy::{BrainRegion, Neurotransmitter};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default number of simulation steps.
pub const DEFAULT_TIME_STEPS: usize = 5;

/// Origin region: slow self-decay, weak incoming coupling.
const ORIGIN_DECAY: f64 = 0.9;
const ORIGIN_PROPAGATE: f64 = 0.1;

/// Downstream regions: faster self-decay, strong incoming coupling.
const DOWNSTREAM_DECAY: f64 = 0.7;
const DOWNSTREAM_PROPAGATE: f64 = 0.3;

/// Flat per-step decay for regions with no projections.
const UNCONNECTED_DECAY: f64 = 0.9;

// ============================================================================
// RESULT
// ============================================================================

/// One level trajectory per region over the simulated steps.
///
/// Ephemeral by design - nothing here is written back to the engine's
/// measurement state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeResult {
    pub start_region: BrainRegion,
    pub neurotransmitter: Neurotransmitter,
    /// Perturbation applied to the origin at step 0 (clamped to [0, 1])
    pub initial_level: f64,
    pub step_duration: Duration,
    trajectories: HashMap<BrainRegion, Vec<f64>>,
}

impl CascadeResult {
    /// The trajectory of one region, `time_steps` long.
    pub fn trajectory(&self, region: BrainRegion) -> Option<&[f64]> {
        self.trajectories.get(&region).map(Vec::as_slice)
    }

    /// All trajectories.
    pub fn trajectories(&self) -> &HashMap<BrainRegion, Vec<f64>> {
        &self.trajectories
    }

    /// Number of simulated steps.
    pub fn time_steps(&self) -> usize {
        self.trajectories
            .values()
            .next()
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Wall-clock timestamps for each step, anchored at `start`.
    pub fn timestamps(&self, start: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        (0..self.time_steps())
            .map(|i| start + self.step_duration * i as i32)
            .collect()
    }

    /// Regions whose trajectory ever exceeds `threshold`, with the step at
    /// which they first do.
    pub fn regions_reaching(&self, threshold: f64) -> Vec<(BrainRegion, usize)> {
        let mut reached: Vec<_> = self
            .trajectories
            .iter()
            .filter_map(|(region, levels)| {
                levels
                    .iter()
                    .position(|l| *l >= threshold)
                    .map(|step| (*region, step))
            })
            .collect();
        reached.sort_by_key(|(region, step)| (*step, region.as_str()));
        reached
    }
}

// ============================================================================
// ENGINE METHOD
// ============================================================================

impl TemporalNeurotransmitterMapping {
    /// Simulate how a level perturbation at `start_region` propagates
    /// across the connectivity graph.
    ///
    /// Step 0 is the seeded state: every region at 0.0 except the origin at
    /// `initial_level`. Each subsequent step, a region with projection
    /// entries computes
    ///
    /// `influence = sum(prev_level(n) * weight * affinity(nt, n))
    ///            / sum(weight * affinity(nt, n))`
    ///
    /// over its projection list (zero denominator yields zero influence)
    /// and blends: `new = clamp(current * decay + influence * propagate)`,
    /// with `(0.9, 0.1)` at the origin and `(0.7, 0.3)` elsewhere. Regions
    /// with no projections decay by a flat 0.9.
    pub fn predict_cascade_effect(
        &self,
        start_region: BrainRegion,
        neurotransmitter: Neurotransmitter,
        initial_level: f64,
        time_steps: usize,
        step_duration: Duration,
    ) -> CascadeResult {
        let initial_level = initial_level.clamp(0.0, 1.0);

        let mut levels: HashMap<BrainRegion, f64> =
            BrainRegion::iter().map(|r| (r, 0.0)).collect();
        levels.insert(start_region, initial_level);

        let mut trajectories: HashMap<BrainRegion, Vec<f64>> = BrainRegion::iter()
            .map(|r| (r, Vec::with_capacity(time_steps)))
            .collect();
        if time_steps > 0 {
            for (region, trajectory) in trajectories.iter_mut() {
                trajectory.push(levels[region]);
            }
        }

        for _ in 1..time_steps {
            let mut next = HashMap::with_capacity(levels.len());
            for region in BrainRegion::iter() {
                let current = levels[&region];
                let projections = self.connectivity().neighbors(region);

                let new_level = if projections.is_empty() {
                    current * UNCONNECTED_DECAY
                } else {
                    let mut weighted_sum = 0.0;
                    let mut weight_total = 0.0;
                    for (neighbor, weight) in projections {
                        let affinity = self
                            .baseline()
                            .analyze_receptor_affinity(neurotransmitter, *neighbor);
                        weighted_sum += levels[neighbor] * weight * affinity;
                        weight_total += weight * affinity;
                    }
                    let influence = if weight_total > 0.0 {
                        weighted_sum / weight_total
                    } else {
                        0.0
                    };

                    let (decay, propagate) = if region == start_region {
                        (ORIGIN_DECAY, ORIGIN_PROPAGATE)
                    } else {
                        (DOWNSTREAM_DECAY, DOWNSTREAM_PROPAGATE)
                    };
                    (current * decay + influence * propagate).clamp(0.0, 1.0)
                };
                next.insert(region, new_level);
            }
            levels = next;
            for (region, trajectory) in trajectories.iter_mut() {
                trajectory.push(levels[region]);
            }
        }

        tracing::debug!(
            origin = %start_region,
            nt = %neurotransmitter,
            initial_level,
            time_steps,
            "cascade simulated"
        );
        CascadeResult {
            start_region,
            neurotransmitter,
            initial_level,
            step_duration,
            trajectories,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
