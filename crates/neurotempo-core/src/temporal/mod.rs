//! # Temporal Sequences and Statistics
//!
//! The time-series layer: append-only, timestamp-sorted event containers
//! plus the descriptive statistics the analysis heuristics are built on.
//!
//! A [`TemporalSequence`] is a generic ordered container; everything numeric
//! (interpolation, statistics, trend classification) is implemented only for
//! `TemporalSequence<f64>`, so non-numeric series cannot reach the analysis
//! paths at all.

pub mod event;
pub mod sequence;
pub mod stats;

pub use event::TemporalEvent;
pub use sequence::{
    InterpolationMethod, SequenceStatistics, TemporalSequence, Trend,
    TREND_PERCENT_CHANGE_THRESHOLD, TREND_VOLATILITY_THRESHOLD,
};
pub use stats::pearson;
