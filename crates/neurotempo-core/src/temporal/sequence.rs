//! # Temporal Sequences
//!
//! Append-only, timestamp-sorted time series. One sequence tracks one
//! (neurotransmitter, region) pair, but the container itself is generic and
//! carries no domain logic.
//!
//! The split between the generic container and the `f64` extension is
//! deliberate: interpolation, statistics, and trend classification are only
//! defined for numeric series, so they live in an `impl TemporalSequence<f64>`
//! block. The type bound replaces the runtime "is every value numeric?"
//! checks that a dynamically typed container would need.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::event::TemporalEvent;
use super::stats;
use crate::taxonomy::{BrainRegion, Neurotransmitter};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Volatility above this classifies a trend as volatile, regardless of net
/// change.
pub const TREND_VOLATILITY_THRESHOLD: f64 = 0.2;

/// Net percent change beyond +/- this classifies increasing/decreasing.
pub const TREND_PERCENT_CHANGE_THRESHOLD: f64 = 10.0;

// ============================================================================
// INTERPOLATION
// ============================================================================

/// How [`TemporalSequence::value_at`] estimates values between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Exact timestamp matches only
    None,
    /// Value of the chronologically closer neighbor
    Nearest,
    /// Linear interpolation between the bracketing events
    #[default]
    Linear,
}

// ============================================================================
// TREND CLASSIFICATION
// ============================================================================

/// Trend classification of a numeric sequence.
///
/// Computed from net percent change (first to last value) and volatility
/// (std-dev of pointwise fractional changes). Volatility dominates: a
/// choppy series is volatile even when its net change is large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Fewer than 2 points in the requested window
    InsufficientData,
    Volatile,
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::InsufficientData => "insufficient_data",
            Trend::Volatile => "volatile",
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Descriptive statistics over a numeric sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceStatistics {
    /// Number of events
    pub count: usize,
    /// Seconds between the first and last event
    pub duration_seconds: f64,
    pub first_timestamp: DateTime<Utc>,
    pub last_timestamp: DateTime<Utc>,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation; 0.0 for fewer than 2 points
    pub std_dev: f64,
}

// ============================================================================
// TEMPORAL SEQUENCE
// ============================================================================

/// An append-only, timestamp-sorted time series.
///
/// Invariant: `events` is always sorted ascending by timestamp. `add_event`
/// re-sorts (stably) after every insert - sortedness is the hard
/// correctness requirement, not insert performance.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use neurotempo_core::temporal::{TemporalEvent, TemporalSequence};
///
/// let mut seq: TemporalSequence<f64> = TemporalSequence::new("serotonin levels");
/// let start = Utc::now();
/// seq.add_event(TemporalEvent::new(start + Duration::hours(2), 0.6));
/// seq.add_event(TemporalEvent::new(start, 0.4));
///
/// // Events are sorted regardless of insertion order
/// assert_eq!(seq.values(), vec![0.4, 0.6]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalSequence<T> {
    /// Human-readable label
    pub name: String,
    /// Unique identifier
    pub sequence_id: Uuid,
    /// Subject the series belongs to, if any
    pub patient_id: Option<String>,
    /// Region this series is scoped to, if any
    pub brain_region: Option<BrainRegion>,
    /// Neurotransmitter this series is scoped to, if any
    pub neurotransmitter: Option<Neurotransmitter>,
    events: Vec<TemporalEvent<T>>,
    /// Free-form annotations
    #[serde(default = "HashMap::new")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl<T> TemporalSequence<T> {
    /// Create an empty sequence.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence_id: Uuid::new_v4(),
            patient_id: None,
            brain_region: None,
            neurotransmitter: None,
            events: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Create a sequence scoped to a (neurotransmitter, region) pair.
    pub fn for_pair(neurotransmitter: Neurotransmitter, region: BrainRegion) -> Self {
        let mut seq = Self::new(format!("{} in {}", neurotransmitter, region));
        seq.neurotransmitter = Some(neurotransmitter);
        seq.brain_region = Some(region);
        seq
    }

    /// Append an event, restoring timestamp order.
    ///
    /// The re-sort is stable, so events sharing a timestamp keep their
    /// insertion order.
    pub fn add_event(&mut self, event: TemporalEvent<T>) {
        self.events.push(event);
        self.events.sort_by_key(|e| e.timestamp);
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the sequence holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events, sorted ascending by timestamp.
    pub fn events(&self) -> &[TemporalEvent<T>] {
        &self.events
    }

    /// Events with `start <= timestamp <= end` (inclusive on both sides).
    pub fn events_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<&TemporalEvent<T>> {
        self.events
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .collect()
    }

    /// Earliest event, if any.
    pub fn first(&self) -> Option<&TemporalEvent<T>> {
        self.events.first()
    }

    /// Latest event, if any.
    pub fn last(&self) -> Option<&TemporalEvent<T>> {
        self.events.last()
    }
}

// ============================================================================
// NUMERIC EXTENSION
// ============================================================================

impl TemporalSequence<f64> {
    /// All values, in timestamp order.
    pub fn values(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.value).collect()
    }

    /// Values with `start <= timestamp <= end`.
    pub fn values_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<f64> {
        self.events_in_range(start, end)
            .into_iter()
            .map(|e| e.value)
            .collect()
    }

    /// Estimate the value at `timestamp`.
    ///
    /// An exact timestamp match always wins, regardless of method.
    /// Otherwise:
    ///
    /// - `None`: no estimate
    /// - `Nearest`: the chronologically closer neighbor (either side alone
    ///   suffices at the boundaries)
    /// - `Linear`: interpolation between the bracketing events; `None` when
    ///   the timestamp falls before the first or after the last event
    pub fn value_at(&self, timestamp: DateTime<Utc>, method: InterpolationMethod) -> Option<f64> {
        if let Some(exact) = self.events.iter().find(|e| e.timestamp == timestamp) {
            return Some(exact.value);
        }

        let before = self
            .events
            .iter()
            .filter(|e| e.timestamp < timestamp)
            .next_back();
        let after = self.events.iter().find(|e| e.timestamp > timestamp);

        match method {
            InterpolationMethod::None => None,
            InterpolationMethod::Nearest => match (before, after) {
                (Some(b), Some(a)) => {
                    let to_before = timestamp.signed_duration_since(b.timestamp);
                    let to_after = a.timestamp.signed_duration_since(timestamp);
                    if to_before <= to_after {
                        Some(b.value)
                    } else {
                        Some(a.value)
                    }
                }
                (Some(b), None) => Some(b.value),
                (None, Some(a)) => Some(a.value),
                (None, None) => None,
            },
            InterpolationMethod::Linear => {
                let (b, a) = (before?, after?);
                let span = (a.timestamp - b.timestamp).num_milliseconds() as f64;
                if span == 0.0 {
                    return Some(b.value);
                }
                let offset = (timestamp - b.timestamp).num_milliseconds() as f64;
                let fraction = offset / span;
                Some(b.value + (a.value - b.value) * fraction)
            }
        }
    }

    /// Descriptive statistics, or `None` for an empty sequence.
    pub fn statistics(&self) -> Option<SequenceStatistics> {
        let first = self.events.first()?;
        let last = self.events.last()?;
        let values = self.values();

        Some(SequenceStatistics {
            count: values.len(),
            duration_seconds: (last.timestamp - first.timestamp).num_milliseconds() as f64
                / 1000.0,
            first_timestamp: first.timestamp,
            last_timestamp: last.timestamp,
            mean: stats::mean(&values).unwrap_or(0.0),
            median: stats::median(&values).unwrap_or(0.0),
            min: values.iter().cloned().fold(f64::INFINITY, f64::min),
            max: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            std_dev: stats::std_dev(&values),
        })
    }

    /// Classify the trend, optionally restricted to a trailing window.
    ///
    /// Net change is the percent change from the first to the last value in
    /// range, with a zero starting value mapping to +/- infinity rather than
    /// an error. Volatility is the std-dev of pointwise fractional changes
    /// between consecutive values.
    pub fn trend(&self, window: Option<Duration>) -> Trend {
        let values: Vec<f64> = match window {
            Some(w) => {
                let Some(last) = self.events.last() else {
                    return Trend::InsufficientData;
                };
                let cutoff = last.timestamp - w;
                self.events
                    .iter()
                    .filter(|e| e.timestamp >= cutoff)
                    .map(|e| e.value)
                    .collect()
            }
            None => self.values(),
        };

        if values.len() < 2 {
            return Trend::InsufficientData;
        }

        let first = values[0];
        let last = values[values.len() - 1];
        let percent_change = if first == 0.0 {
            if last > 0.0 {
                f64::INFINITY
            } else if last < 0.0 {
                f64::NEG_INFINITY
            } else {
                0.0
            }
        } else {
            (last - first) / first * 100.0
        };

        // Zero previous values contribute a zero fractional change
        let changes: Vec<f64> = values
            .windows(2)
            .map(|pair| {
                if pair[0] == 0.0 {
                    0.0
                } else {
                    (pair[1] - pair[0]) / pair[0]
                }
            })
            .collect();
        let volatility = stats::std_dev(&changes);

        if volatility > TREND_VOLATILITY_THRESHOLD {
            Trend::Volatile
        } else if percent_change > TREND_PERCENT_CHANGE_THRESHOLD {
            Trend::Increasing
        } else if percent_change < -TREND_PERCENT_CHANGE_THRESHOLD {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
