//! # Neurotempo Core
//!
//! Temporal neurotransmitter modeling engine. Models how neurotransmitter
//! levels in brain regions evolve over time and what those levels mean:
//!
//! - **Anatomical Taxonomy**: regions, neurotransmitters, receptor
//!   subtypes, level bands, and clinical-significance tiers
//! - **Temporal Sequences**: append-only measured time series with
//!   interpolation, summary statistics, and trend classification
//! - **Baseline Mapping**: static production and receptor-density tables
//!   with explicitly rebuilt lookup indices
//! - **Treatment Simulation**: three-phase (rise, plateau, decay) response
//!   projection for registered interventions
//! - **Correlation Discovery**: Pearson screening of co-moving regions
//! - **Cascade Propagation**: discrete-step spread of a perturbation over
//!   a weighted region-connectivity graph
//!
//! Everything runs synchronously and in memory. Levels live on a
//! normalized [0, 1] scale throughout; ingestion clamps rather than
//! rejects, and analysis falls back to baseline estimates rather than
//! erroring on missing data.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use neurotempo_core::prelude::*;
//!
//! let mut engine = TemporalNeurotransmitterMapping::new();
//!
//! // Record a measurement
//! engine.add_neurotransmitter_measurement(
//!     Neurotransmitter::Serotonin,
//!     BrainRegion::PrefrontalCortex,
//!     Utc::now(),
//!     0.35,
//!     Default::default(),
//! );
//!
//! // Classify the current level
//! let state = engine.get_neurotransmitter_state(
//!     Neurotransmitter::Serotonin,
//!     BrainRegion::PrefrontalCortex,
//!     None,
//! );
//! assert_eq!(state, NeurotransmitterState::BelowNormal);
//!
//! // Register a treatment and project its response
//! use std::collections::HashMap;
//! let mut primary = HashMap::new();
//! primary.insert(
//!     Neurotransmitter::Serotonin,
//!     HashMap::from([(BrainRegion::PrefrontalCortex, 0.3)]),
//! );
//! engine.register_treatment_effect("ssri_standard", primary, None);
//!
//! let response = engine
//!     .simulate_treatment_response(
//!         "ssri_standard",
//!         Utc::now(),
//!         Duration::days(7),
//!         Duration::hours(1),
//!         0.1,
//!     )
//!     .unwrap();
//! assert!(!response.is_empty());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
// Only warn about missing docs for public items exported from the crate root
// Internal struct fields and enum variants don't need documentation
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod engine;
pub mod mapping;
pub mod taxonomy;
pub mod temporal;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Taxonomy
pub use taxonomy::{
    BrainRegion, ClinicalSignificance, Neurotransmitter, NeurotransmitterState, ReceptorSubtype,
    ReceptorType,
};

// Temporal sequences
pub use temporal::{
    InterpolationMethod, SequenceStatistics, TemporalEvent, TemporalSequence, Trend,
};

// Baseline mapping
pub use mapping::{NeurotransmitterEffect, NeurotransmitterMapping, ReceptorProfile};

// Engine
pub use engine::{
    CascadeResult, ConnectivityGraph, RegionCorrelation, SimulationError,
    TemporalNeurotransmitterMapping, TreatmentRegistration, TreatmentResponse,
    DEFAULT_CORRELATION_THRESHOLD, DEFAULT_TIME_STEPS,
};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        BrainRegion, CascadeResult, ClinicalSignificance, ConnectivityGraph, InterpolationMethod,
        Neurotransmitter, NeurotransmitterEffect, NeurotransmitterMapping, NeurotransmitterState,
        RegionCorrelation, SimulationError, TemporalNeurotransmitterMapping, TemporalSequence,
        TreatmentRegistration, TreatmentResponse, Trend,
    };
}
