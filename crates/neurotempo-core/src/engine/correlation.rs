//! # Cross-Region Correlation Discovery
//!
//! Finds regions whose measured levels of a neurotransmitter move together
//! with a target region's levels inside a time window. The target's events
//! set the sampling grid; every other stored sequence for the same
//! neurotransmitter is interpolated onto that grid and compared with a
//! Pearson coefficient.
//!
//! Grid points a candidate sequence cannot answer are filled with the 0.5
//! midpoint so the comparison never silently shrinks the sample. Each
//! result carries how many points were substituted and a `low_confidence`
//! flag when substitutions dominate, so callers can weigh the coefficient
//! accordingly.

use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};

use super::TemporalNeurotransmitterMapping;
use crate::taxonomy::{BrainRegion, Neurotransmitter};
use crate::temporal::{stats, InterpolationMethod};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default absolute-coefficient cutoff for reporting a region.
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.7;

/// Stand-in level for grid points a candidate sequence cannot answer.
const DEFAULT_SAMPLE_LEVEL: f64 = 0.5;

/// Minimum events (target and candidate) for a meaningful coefficient.
const MIN_CORRELATION_EVENTS: usize = 3;

// ============================================================================
// RESULT
// ============================================================================

/// One correlated region, with enough provenance to judge the coefficient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCorrelation {
    pub region: BrainRegion,
    /// Pearson coefficient against the target region, in [-1, 1]
    pub coefficient: f64,
    /// Grid points compared (the target's event count in the window)
    pub sample_count: usize,
    /// Grid points filled with the 0.5 stand-in
    pub defaulted_samples: usize,
    /// Set when more than half the grid was substituted
    pub low_confidence: bool,
}

// ============================================================================
// ENGINE METHOD
// ============================================================================

impl TemporalNeurotransmitterMapping {
    /// Regions whose `neurotransmitter` levels correlate with `region`'s
    /// inside `[start, end]`, strongest first. A `None` bound is open:
    /// `None, None` correlates over the full stored history.
    ///
    /// Returns empty when the target has fewer than 3 events in the
    /// window. Candidates need at least 3 events overall; ones whose
    /// coefficient falls below `threshold` in absolute value are dropped.
    /// Results are ordered by descending |coefficient|.
    pub fn find_correlated_regions(
        &self,
        neurotransmitter: Neurotransmitter,
        region: BrainRegion,
        threshold: f64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<RegionCorrelation> {
        let target_events: Vec<(DateTime<Utc>, f64)> = match self
            .get_measurement_sequence(neurotransmitter, region)
        {
            Some(seq) => seq
                .events()
                .iter()
                .filter(|e| {
                    start.is_none_or(|s| e.timestamp >= s)
                        && end.is_none_or(|t| e.timestamp <= t)
                })
                .map(|e| (e.timestamp, e.value))
                .collect(),
            None => Vec::new(),
        };
        if target_events.len() < MIN_CORRELATION_EVENTS {
            tracing::debug!(
                nt = %neurotransmitter,
                region = %region,
                events = target_events.len(),
                "too few target events for correlation"
            );
            return Vec::new();
        }
        let target_values: Vec<f64> = target_events.iter().map(|(_, v)| *v).collect();

        let mut correlations = Vec::new();
        for ((nt, other_region), sequence) in self.sequences() {
            if *nt != neurotransmitter || *other_region == region {
                continue;
            }
            if sequence.len() < MIN_CORRELATION_EVENTS {
                continue;
            }

            let mut defaulted = 0usize;
            let sampled: Vec<f64> = target_events
                .iter()
                .map(|(t, _)| {
                    sequence
                        .value_at(*t, InterpolationMethod::Linear)
                        .unwrap_or_else(|| {
                            defaulted += 1;
                            DEFAULT_SAMPLE_LEVEL
                        })
                })
                .collect();

            let coefficient = stats::pearson(&target_values, &sampled);
            if coefficient.abs() < threshold {
                continue;
            }

            let low_confidence = defaulted * 2 > target_values.len();
            if low_confidence {
                tracing::warn!(
                    nt = %neurotransmitter,
                    target = %region,
                    candidate = %other_region,
                    defaulted,
                    samples = target_values.len(),
                    "correlation dominated by substituted samples"
                );
            }
            correlations.push(RegionCorrelation {
                region: *other_region,
                coefficient,
                sample_count: target_values.len(),
                defaulted_samples: defaulted,
                low_confidence,
            });
        }

        correlations.sort_by(|a, b| {
            b.coefficient
                .abs()
                .partial_cmp(&a.coefficient.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.region.as_str().cmp(b.region.as_str()))
        });
        correlations
    }
}

// ============================================================================
// TESTS
// ============================================================================
