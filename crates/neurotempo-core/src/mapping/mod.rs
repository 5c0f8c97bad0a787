//! # Baseline Neurotransmitter Mapping
//!
//! Static neurochemical knowledge: which regions produce which
//! neurotransmitters, and how densely each region expresses receptors for
//! each neurotransmitter. The temporal engine layers measured data on top of
//! this baseline and falls back to it whenever a requested window is empty.
//!
//! The two source-of-truth maps (`production_map`, `receptor_profiles`) are
//! paired with derived reverse indices (`producer_lookup`,
//! `receptor_lookup`). The indices are rebuilt only through an explicit
//! [`NeurotransmitterMapping::rebuild_lookup_maps`] call after bulk edits,
//! never implicitly on read.
//!
//! All thresholds here (significance tiers, p-value cutoffs, interval
//! half-widths) are empirical placeholders, not statistically rigorous
//! inference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::taxonomy::{BrainRegion, ClinicalSignificance, Neurotransmitter};

// ============================================================================
// HEURISTIC CONSTANTS
// ============================================================================

/// p-values at or below this count as statistically significant.
pub const P_VALUE_SIGNIFICANT: f64 = 0.05;

/// Default p-value when the affinity heuristic does not fire.
pub const P_VALUE_DEFAULT: f64 = 0.2;

/// Baseline affinity at or above this gets the significant p-value.
const BASELINE_P_AFFINITY_CUTOFF: f64 = 0.5;

/// Baseline affinity at or above this gets the narrow confidence interval.
const BASELINE_NARROW_CI_CUTOFF: f64 = 0.7;

const CI_HALF_WIDTH_NARROW: f64 = 0.1;
const CI_HALF_WIDTH_WIDE: f64 = 0.2;

// ============================================================================
// EFFECT TYPE
// ============================================================================

/// The result of an effect analysis (baseline or temporal).
///
/// Invariants enforced by [`NeurotransmitterEffect::new`]:
/// - `confidence_interval` bounds are clamped to [0, 1]
/// - `clinical_significance` is non-`None` only when the effect is
///   statistically significant (`p_value <= 0.05`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeurotransmitterEffect {
    pub neurotransmitter: Neurotransmitter,
    /// Effect magnitude in [0, 1]
    pub effect_size: f64,
    pub p_value: f64,
    /// (low, high), clamped to [0, 1]
    pub confidence_interval: (f64, f64),
    pub clinical_significance: ClinicalSignificance,
    pub is_statistically_significant: bool,
    pub brain_region: Option<BrainRegion>,
    /// The samples the analysis ran over, when caller-supplied
    pub time_series_data: Option<Vec<(DateTime<Utc>, f64)>>,
    pub baseline_period: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub comparison_period: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl NeurotransmitterEffect {
    /// Build an effect, enforcing the CI and significance invariants.
    ///
    /// `ci_half_width` is applied symmetrically around `effect_size` before
    /// clamping. A `clinical_significance` bucket passed for a
    /// non-significant effect is downgraded to `None`.
    pub fn new(
        neurotransmitter: Neurotransmitter,
        effect_size: f64,
        p_value: f64,
        ci_half_width: f64,
        clinical_significance: ClinicalSignificance,
    ) -> Self {
        let is_statistically_significant = p_value <= P_VALUE_SIGNIFICANT;
        Self {
            neurotransmitter,
            effect_size,
            p_value,
            confidence_interval: (
                (effect_size - ci_half_width).clamp(0.0, 1.0),
                (effect_size + ci_half_width).clamp(0.0, 1.0),
            ),
            clinical_significance: if is_statistically_significant {
                clinical_significance
            } else {
                ClinicalSignificance::None
            },
            is_statistically_significant,
            brain_region: None,
            time_series_data: None,
            baseline_period: None,
            comparison_period: None,
        }
    }

    /// Attach the region the effect was analyzed for.
    pub fn with_region(mut self, region: BrainRegion) -> Self {
        self.brain_region = Some(region);
        self
    }

    /// Attach the samples the analysis ran over.
    pub fn with_time_series(mut self, data: Vec<(DateTime<Utc>, f64)>) -> Self {
        self.time_series_data = Some(data);
        self
    }

    /// Attach baseline/comparison windows.
    pub fn with_periods(
        mut self,
        baseline: Option<(DateTime<Utc>, DateTime<Utc>)>,
        comparison: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Self {
        self.baseline_period = baseline;
        self.comparison_period = comparison;
        self
    }
}

// ============================================================================
// RECEPTOR PROFILE
// ============================================================================

/// Receptor densities of a single region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptorProfile {
    pub brain_region: BrainRegion,
    /// Density in [0, 1] per neurotransmitter; absent means 0.0
    pub receptor_densities: HashMap<Neurotransmitter, f64>,
}

impl ReceptorProfile {
    /// Empty profile for a region.
    pub fn new(brain_region: BrainRegion) -> Self {
        Self {
            brain_region,
            receptor_densities: HashMap::new(),
        }
    }

    /// Stored density, or 0.0.
    pub fn density(&self, neurotransmitter: Neurotransmitter) -> f64 {
        self.receptor_densities
            .get(&neurotransmitter)
            .copied()
            .unwrap_or(0.0)
    }
}

// ============================================================================
// BASELINE MAPPING
// ============================================================================

/// Static production/receptor knowledge plus derived reverse indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeurotransmitterMapping {
    production_map: HashMap<BrainRegion, Vec<Neurotransmitter>>,
    receptor_profiles: HashMap<BrainRegion, HashMap<Neurotransmitter, f64>>,
    producer_lookup: HashMap<Neurotransmitter, Vec<BrainRegion>>,
    receptor_lookup: HashMap<Neurotransmitter, Vec<(BrainRegion, f64)>>,
    /// Set by mutators, cleared by `rebuild_lookup_maps`
    lookups_stale: bool,
}

impl Default for NeurotransmitterMapping {
    fn default() -> Self {
        Self::default_human()
    }
}

impl NeurotransmitterMapping {
    /// Empty mapping with fresh (empty) indices.
    pub fn new() -> Self {
        Self {
            production_map: HashMap::new(),
            receptor_profiles: HashMap::new(),
            producer_lookup: HashMap::new(),
            receptor_lookup: HashMap::new(),
            lookups_stale: false,
        }
    }

    /// Canonical human baseline: production sites and receptor densities
    /// for the regions in [`BrainRegion::ALL`], drawn from standard
    /// neuroanatomy references. Indices come pre-built.
    pub fn default_human() -> Self {
        let mut mapping = Self::new();

        for (region, transmitters) in [
            (BrainRegion::RapheNuclei, vec![Neurotransmitter::Serotonin]),
            (
                BrainRegion::VentralTegmentalArea,
                vec![Neurotransmitter::Dopamine],
            ),
            (
                BrainRegion::SubstantiaNigra,
                vec![Neurotransmitter::Dopamine],
            ),
            (
                BrainRegion::LocusCoeruleus,
                vec![Neurotransmitter::Norepinephrine],
            ),
            (
                BrainRegion::Hypothalamus,
                vec![Neurotransmitter::Oxytocin, Neurotransmitter::Histamine],
            ),
            (
                BrainRegion::PituitaryGland,
                vec![Neurotransmitter::Endorphins, Neurotransmitter::Oxytocin],
            ),
            (BrainRegion::BrainStem, vec![Neurotransmitter::Glycine]),
            (
                BrainRegion::Striatum,
                vec![Neurotransmitter::Gaba, Neurotransmitter::SubstanceP],
            ),
            (BrainRegion::NucleusAccumbens, vec![Neurotransmitter::Gaba]),
            (
                BrainRegion::PrefrontalCortex,
                vec![Neurotransmitter::Glutamate],
            ),
            (BrainRegion::Hippocampus, vec![Neurotransmitter::Glutamate]),
            (BrainRegion::Amygdala, vec![Neurotransmitter::Glutamate]),
            (BrainRegion::Thalamus, vec![Neurotransmitter::Glutamate]),
            (
                BrainRegion::Cerebellum,
                vec![Neurotransmitter::Gaba, Neurotransmitter::Glutamate],
            ),
        ] {
            for nt in transmitters {
                mapping.add_production(region, nt);
            }
        }

        for (region, densities) in [
            (
                BrainRegion::PrefrontalCortex,
                vec![
                    (Neurotransmitter::Serotonin, 0.8),
                    (Neurotransmitter::Dopamine, 0.75),
                    (Neurotransmitter::Norepinephrine, 0.6),
                    (Neurotransmitter::Glutamate, 0.9),
                    (Neurotransmitter::Gaba, 0.7),
                    (Neurotransmitter::Acetylcholine, 0.6),
                ],
            ),
            (
                BrainRegion::Amygdala,
                vec![
                    (Neurotransmitter::Serotonin, 0.7),
                    (Neurotransmitter::Dopamine, 0.5),
                    (Neurotransmitter::Norepinephrine, 0.8),
                    (Neurotransmitter::Gaba, 0.75),
                    (Neurotransmitter::Glutamate, 0.8),
                ],
            ),
            (
                BrainRegion::Hippocampus,
                vec![
                    (Neurotransmitter::Serotonin, 0.6),
                    (Neurotransmitter::Dopamine, 0.4),
                    (Neurotransmitter::Glutamate, 0.9),
                    (Neurotransmitter::Acetylcholine, 0.8),
                    (Neurotransmitter::Gaba, 0.7),
                ],
            ),
            (
                BrainRegion::Striatum,
                vec![
                    (Neurotransmitter::Dopamine, 0.9),
                    (Neurotransmitter::Glutamate, 0.7),
                    (Neurotransmitter::Gaba, 0.8),
                    (Neurotransmitter::Acetylcholine, 0.7),
                ],
            ),
            (
                BrainRegion::NucleusAccumbens,
                vec![
                    (Neurotransmitter::Dopamine, 0.9),
                    (Neurotransmitter::Serotonin, 0.5),
                    (Neurotransmitter::Endorphins, 0.7),
                    (Neurotransmitter::Gaba, 0.6),
                ],
            ),
            (
                BrainRegion::Thalamus,
                vec![
                    (Neurotransmitter::Glutamate, 0.8),
                    (Neurotransmitter::Gaba, 0.8),
                    (Neurotransmitter::Histamine, 0.5),
                ],
            ),
            (
                BrainRegion::Hypothalamus,
                vec![
                    (Neurotransmitter::Oxytocin, 0.8),
                    (Neurotransmitter::Histamine, 0.7),
                    (Neurotransmitter::Serotonin, 0.5),
                    (Neurotransmitter::Norepinephrine, 0.5),
                ],
            ),
            (
                BrainRegion::Cerebellum,
                vec![
                    (Neurotransmitter::Glutamate, 0.8),
                    (Neurotransmitter::Gaba, 0.9),
                    (Neurotransmitter::Glycine, 0.4),
                ],
            ),
            (
                BrainRegion::BrainStem,
                vec![
                    (Neurotransmitter::Glycine, 0.8),
                    (Neurotransmitter::Serotonin, 0.6),
                    (Neurotransmitter::SubstanceP, 0.6),
                    (Neurotransmitter::Adenosine, 0.4),
                ],
            ),
            (
                BrainRegion::LocusCoeruleus,
                vec![
                    (Neurotransmitter::Norepinephrine, 0.7),
                    (Neurotransmitter::Glutamate, 0.5),
                ],
            ),
            (
                BrainRegion::RapheNuclei,
                vec![
                    (Neurotransmitter::Serotonin, 0.7),
                    (Neurotransmitter::Gaba, 0.5),
                ],
            ),
            (
                BrainRegion::SubstantiaNigra,
                vec![
                    (Neurotransmitter::Dopamine, 0.8),
                    (Neurotransmitter::Gaba, 0.6),
                ],
            ),
            (
                BrainRegion::VentralTegmentalArea,
                vec![
                    (Neurotransmitter::Dopamine, 0.8),
                    (Neurotransmitter::Glutamate, 0.6),
                    (Neurotransmitter::Endorphins, 0.5),
                ],
            ),
            (
                BrainRegion::PituitaryGland,
                vec![
                    (Neurotransmitter::Oxytocin, 0.7),
                    (Neurotransmitter::Endorphins, 0.6),
                ],
            ),
        ] {
            for (nt, density) in densities {
                mapping.set_receptor_density(region, nt, density);
            }
        }

        mapping.rebuild_lookup_maps();
        mapping
    }

    // ========================================================================
    // MUTATION (marks indices stale)
    // ========================================================================

    /// Record that `region` produces `neurotransmitter`.
    pub fn add_production(&mut self, region: BrainRegion, neurotransmitter: Neurotransmitter) {
        let produced = self.production_map.entry(region).or_default();
        if !produced.contains(&neurotransmitter) {
            produced.push(neurotransmitter);
        }
        self.lookups_stale = true;
    }

    /// Set the receptor density for (region, neurotransmitter), clamped to
    /// [0, 1].
    pub fn set_receptor_density(
        &mut self,
        region: BrainRegion,
        neurotransmitter: Neurotransmitter,
        density: f64,
    ) {
        self.receptor_profiles
            .entry(region)
            .or_default()
            .insert(neurotransmitter, density.clamp(0.0, 1.0));
        self.lookups_stale = true;
    }

    /// Rebuild the derived reverse indices from the source maps.
    ///
    /// Call after a batch of `add_production` / `set_receptor_density`
    /// edits. Reads in between see the previous index state.
    pub fn rebuild_lookup_maps(&mut self) {
        self.producer_lookup.clear();
        self.receptor_lookup.clear();

        for (region, transmitters) in &self.production_map {
            for nt in transmitters {
                self.producer_lookup.entry(*nt).or_default().push(*region);
            }
        }
        for (region, densities) in &self.receptor_profiles {
            for (nt, density) in densities {
                self.receptor_lookup
                    .entry(*nt)
                    .or_default()
                    .push((*region, *density));
            }
        }
        // Deterministic order for consumers that iterate the indices
        for regions in self.producer_lookup.values_mut() {
            regions.sort_by_key(|r| r.as_str());
        }
        for sites in self.receptor_lookup.values_mut() {
            sites.sort_by_key(|(r, _)| r.as_str());
        }

        self.lookups_stale = false;
    }

    /// Whether the indices lag behind the source maps.
    pub fn lookups_stale(&self) -> bool {
        self.lookups_stale
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Regions that produce `neurotransmitter` (from the derived index).
    pub fn producers_of(&self, neurotransmitter: Neurotransmitter) -> &[BrainRegion] {
        self.producer_lookup
            .get(&neurotransmitter)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// (region, density) sites for `neurotransmitter` (from the derived
    /// index).
    pub fn receptor_sites(&self, neurotransmitter: Neurotransmitter) -> &[(BrainRegion, f64)] {
        self.receptor_lookup
            .get(&neurotransmitter)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The receptor profile of a region, materialized.
    pub fn receptor_profile(&self, region: BrainRegion) -> ReceptorProfile {
        ReceptorProfile {
            brain_region: region,
            receptor_densities: self
                .receptor_profiles
                .get(&region)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Stored receptor density, or 0.0. Reads the source map directly, so it
    /// never goes stale.
    pub fn analyze_receptor_affinity(
        &self,
        neurotransmitter: Neurotransmitter,
        region: BrainRegion,
    ) -> f64 {
        self.receptor_profiles
            .get(&region)
            .and_then(|d| d.get(&neurotransmitter))
            .copied()
            .unwrap_or(0.0)
    }

    /// Baseline effect estimate driven entirely by receptor affinity.
    ///
    /// Heuristics: `effect_size = affinity`; p = 0.05 when affinity >= 0.5
    /// else 0.2; CI half-width 0.1 when affinity >= 0.7 else 0.2. The
    /// significance bucket uses the 0.8/0.6/0.4/0.2 affinity tiers.
    pub fn analyze_baseline_effect(
        &self,
        neurotransmitter: Neurotransmitter,
        region: BrainRegion,
    ) -> NeurotransmitterEffect {
        let affinity = self.analyze_receptor_affinity(neurotransmitter, region);

        let p_value = if affinity >= BASELINE_P_AFFINITY_CUTOFF {
            P_VALUE_SIGNIFICANT
        } else {
            P_VALUE_DEFAULT
        };
        let half_width = if affinity >= BASELINE_NARROW_CI_CUTOFF {
            CI_HALF_WIDTH_NARROW
        } else {
            CI_HALF_WIDTH_WIDE
        };

        NeurotransmitterEffect::new(
            neurotransmitter,
            affinity,
            p_value,
            half_width,
            ClinicalSignificance::from_affinity(affinity),
        )
        .with_region(region)
    }

    /// Every (neurotransmitter, region) pair with a nonzero receptor
    /// density. The engine pre-creates one sequence per pair.
    pub fn nonzero_density_pairs(&self) -> Vec<(Neurotransmitter, BrainRegion)> {
        let mut pairs: Vec<_> = self
            .receptor_profiles
            .iter()
            .flat_map(|(region, densities)| {
                densities
                    .iter()
                    .filter(|(_, d)| **d > 0.0)
                    .map(move |(nt, _)| (*nt, *region))
            })
            .collect();
        pairs.sort_by_key(|(nt, r)| (nt.as_str(), r.as_str()));
        pairs
    }
}

// ============================================================================
// TESTS
// ============================================================================
