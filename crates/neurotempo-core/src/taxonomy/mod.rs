//! # Neurochemical Taxonomy
//!
//! Closed enumerations that identify the entities the engine tracks:
//! brain regions, neurotransmitters, and receptor types/subtypes, plus the
//! derived classifications computed from measured levels.
//!
//! These are identity types - map keys and labels. The only behavior they
//! carry is classification from a numeric value:
//!
//! - [`NeurotransmitterState`]: 5-band bucket of a current level (deficient
//!   through excessive)
//! - [`ClinicalSignificance`]: coarse effect-size bucket (none through
//!   significant)
//!
//! The thresholds behind both classifications are empirical placeholders,
//! not clinically validated cutoffs.

use serde::{Deserialize, Serialize};

// ============================================================================
// BRAIN REGIONS
// ============================================================================

/// Anatomical brain regions tracked by the engine.
///
/// Used as map keys throughout: receptor profiles, measurement sequences,
/// treatment effects, and connectivity-graph nodes are all indexed by region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrainRegion {
    /// Emotional salience and fear processing
    Amygdala,
    /// Episodic memory formation
    Hippocampus,
    /// Executive function, working memory, top-down regulation
    PrefrontalCortex,
    Cerebellum,
    /// Motor planning and habit formation
    Striatum,
    BrainStem,
    /// Sensory relay
    Thalamus,
    /// Homeostatic and endocrine control
    Hypothalamus,
    /// Reward processing core
    NucleusAccumbens,
    /// Primary dopamine producer for motor pathways
    SubstantiaNigra,
    /// Primary dopamine producer for reward pathways
    VentralTegmentalArea,
    /// Primary norepinephrine producer
    LocusCoeruleus,
    /// Primary serotonin producer
    RapheNuclei,
    PituitaryGland,
}

impl BrainRegion {
    /// All regions, in a stable order. Cascade trajectories and receptor
    /// profiles are seeded by iterating this list.
    pub const ALL: [BrainRegion; 14] = [
        BrainRegion::Amygdala,
        BrainRegion::Hippocampus,
        BrainRegion::PrefrontalCortex,
        BrainRegion::Cerebellum,
        BrainRegion::Striatum,
        BrainRegion::BrainStem,
        BrainRegion::Thalamus,
        BrainRegion::Hypothalamus,
        BrainRegion::NucleusAccumbens,
        BrainRegion::SubstantiaNigra,
        BrainRegion::VentralTegmentalArea,
        BrainRegion::LocusCoeruleus,
        BrainRegion::RapheNuclei,
        BrainRegion::PituitaryGland,
    ];

    /// Iterate over every region.
    pub fn iter() -> impl Iterator<Item = BrainRegion> {
        Self::ALL.into_iter()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BrainRegion::Amygdala => "amygdala",
            BrainRegion::Hippocampus => "hippocampus",
            BrainRegion::PrefrontalCortex => "prefrontal_cortex",
            BrainRegion::Cerebellum => "cerebellum",
            BrainRegion::Striatum => "striatum",
            BrainRegion::BrainStem => "brain_stem",
            BrainRegion::Thalamus => "thalamus",
            BrainRegion::Hypothalamus => "hypothalamus",
            BrainRegion::NucleusAccumbens => "nucleus_accumbens",
            BrainRegion::SubstantiaNigra => "substantia_nigra",
            BrainRegion::VentralTegmentalArea => "ventral_tegmental_area",
            BrainRegion::LocusCoeruleus => "locus_coeruleus",
            BrainRegion::RapheNuclei => "raphe_nuclei",
            BrainRegion::PituitaryGland => "pituitary_gland",
        }
    }

    /// Parse from string name. Returns `None` for unknown names.
    pub fn parse_name(s: &str) -> Option<Self> {
        BrainRegion::iter().find(|r| r.as_str() == s.to_lowercase())
    }
}

impl std::fmt::Display for BrainRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// NEUROTRANSMITTERS
// ============================================================================

/// Neurotransmitters whose concentration levels the engine models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neurotransmitter {
    /// Mood, sleep, appetite regulation
    Serotonin,
    /// Reward, motivation, motor control
    Dopamine,
    /// Arousal and vigilance
    Norepinephrine,
    /// Primary inhibitory transmitter
    Gaba,
    /// Primary excitatory transmitter
    Glutamate,
    /// Attention and memory encoding
    Acetylcholine,
    Endorphins,
    SubstanceP,
    Oxytocin,
    Histamine,
    Glycine,
    Adenosine,
}

impl Neurotransmitter {
    /// All neurotransmitters, in a stable order.
    pub const ALL: [Neurotransmitter; 12] = [
        Neurotransmitter::Serotonin,
        Neurotransmitter::Dopamine,
        Neurotransmitter::Norepinephrine,
        Neurotransmitter::Gaba,
        Neurotransmitter::Glutamate,
        Neurotransmitter::Acetylcholine,
        Neurotransmitter::Endorphins,
        Neurotransmitter::SubstanceP,
        Neurotransmitter::Oxytocin,
        Neurotransmitter::Histamine,
        Neurotransmitter::Glycine,
        Neurotransmitter::Adenosine,
    ];

    /// Iterate over every neurotransmitter.
    pub fn iter() -> impl Iterator<Item = Neurotransmitter> {
        Self::ALL.into_iter()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Neurotransmitter::Serotonin => "serotonin",
            Neurotransmitter::Dopamine => "dopamine",
            Neurotransmitter::Norepinephrine => "norepinephrine",
            Neurotransmitter::Gaba => "gaba",
            Neurotransmitter::Glutamate => "glutamate",
            Neurotransmitter::Acetylcholine => "acetylcholine",
            Neurotransmitter::Endorphins => "endorphins",
            Neurotransmitter::SubstanceP => "substance_p",
            Neurotransmitter::Oxytocin => "oxytocin",
            Neurotransmitter::Histamine => "histamine",
            Neurotransmitter::Glycine => "glycine",
            Neurotransmitter::Adenosine => "adenosine",
        }
    }

    /// Parse from string name. Returns `None` for unknown names.
    pub fn parse_name(s: &str) -> Option<Self> {
        Neurotransmitter::iter().find(|n| n.as_str() == s.to_lowercase())
    }
}

impl std::fmt::Display for Neurotransmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RECEPTORS
// ============================================================================

/// Broad receptor signaling class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptorType {
    /// Ligand-gated ion channels, fast signaling
    Ionotropic,
    /// G-protein coupled, slow modulatory signaling
    Metabotropic,
}

/// Specific receptor subtypes.
///
/// Identity only - the engine keys receptor density by
/// (region, neurotransmitter), so subtypes appear in metadata but never
/// drive computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptorSubtype {
    Serotonin5Ht1a,
    Serotonin5Ht2a,
    DopamineD1,
    DopamineD2,
    GabaA,
    GabaB,
    Nmda,
    Ampa,
    MuscarinicM1,
    Nicotinic,
    AdrenergicAlpha1,
    AdrenergicBeta1,
    MuOpioid,
}

impl ReceptorSubtype {
    /// The signaling class this subtype belongs to.
    pub fn receptor_type(&self) -> ReceptorType {
        match self {
            ReceptorSubtype::GabaA
            | ReceptorSubtype::Nmda
            | ReceptorSubtype::Ampa
            | ReceptorSubtype::Nicotinic => ReceptorType::Ionotropic,
            _ => ReceptorType::Metabotropic,
        }
    }
}

// ============================================================================
// LEVEL STATE CLASSIFICATION
// ============================================================================

/// Band boundaries for [`NeurotransmitterState::from_level`].
pub const STATE_BAND_DEFICIENT: f64 = 0.2;
pub const STATE_BAND_BELOW_NORMAL: f64 = 0.4;
pub const STATE_BAND_NORMAL: f64 = 0.6;
pub const STATE_BAND_ABOVE_NORMAL: f64 = 0.8;

/// Five-band classification of a current neurotransmitter level.
///
/// This is a pure function of the numeric level - the engine never stores
/// or transitions state, it classifies on demand.
///
/// | Band        | Level range |
/// |-------------|-------------|
/// | Deficient   | < 0.2       |
/// | BelowNormal | 0.2 - 0.4   |
/// | Normal      | 0.4 - 0.6   |
/// | AboveNormal | 0.6 - 0.8   |
/// | Excessive   | >= 0.8      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NeurotransmitterState {
    Deficient,
    BelowNormal,
    /// Also the answer when no measurement exists
    #[default]
    Normal,
    AboveNormal,
    Excessive,
}

impl NeurotransmitterState {
    /// Classify a level into its band.
    pub fn from_level(level: f64) -> Self {
        if level < STATE_BAND_DEFICIENT {
            NeurotransmitterState::Deficient
        } else if level < STATE_BAND_BELOW_NORMAL {
            NeurotransmitterState::BelowNormal
        } else if level < STATE_BAND_NORMAL {
            NeurotransmitterState::Normal
        } else if level < STATE_BAND_ABOVE_NORMAL {
            NeurotransmitterState::AboveNormal
        } else {
            NeurotransmitterState::Excessive
        }
    }

    /// Whether the level sits outside the two middle bands.
    pub fn is_abnormal(&self) -> bool {
        matches!(
            self,
            NeurotransmitterState::Deficient | NeurotransmitterState::Excessive
        )
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NeurotransmitterState::Deficient => "deficient",
            NeurotransmitterState::BelowNormal => "below_normal",
            NeurotransmitterState::Normal => "normal",
            NeurotransmitterState::AboveNormal => "above_normal",
            NeurotransmitterState::Excessive => "excessive",
        }
    }
}

impl std::fmt::Display for NeurotransmitterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLINICAL SIGNIFICANCE
// ============================================================================

/// Coarse classification of an analyzed effect.
///
/// Bucketed from effect size (and, for temporal analysis, receptor density)
/// using fixed heuristic thresholds. Non-clinical: the tiers rank effects
/// relative to each other, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalSignificance {
    #[default]
    None,
    Minimal,
    Mild,
    Moderate,
    Significant,
}

impl ClinicalSignificance {
    /// Baseline bucket: driven by receptor affinity alone.
    ///
    /// Tiers: >= 0.8 significant, >= 0.6 moderate, >= 0.4 mild,
    /// >= 0.2 minimal, else none.
    pub fn from_affinity(affinity: f64) -> Self {
        if affinity >= 0.8 {
            ClinicalSignificance::Significant
        } else if affinity >= 0.6 {
            ClinicalSignificance::Moderate
        } else if affinity >= 0.4 {
            ClinicalSignificance::Mild
        } else if affinity >= 0.2 {
            ClinicalSignificance::Minimal
        } else {
            ClinicalSignificance::None
        }
    }

    /// Temporal bucket: both the observed effect size and the receptor
    /// density must clear the same tier (0.7 / 0.5 / 0.3), else minimal.
    pub fn from_paired_tiers(effect_size: f64, density: f64) -> Self {
        if effect_size >= 0.7 && density >= 0.7 {
            ClinicalSignificance::Significant
        } else if effect_size >= 0.5 && density >= 0.5 {
            ClinicalSignificance::Moderate
        } else if effect_size >= 0.3 && density >= 0.3 {
            ClinicalSignificance::Mild
        } else {
            ClinicalSignificance::Minimal
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicalSignificance::None => "none",
            ClinicalSignificance::Minimal => "minimal",
            ClinicalSignificance::Mild => "mild",
            ClinicalSignificance::Moderate => "moderate",
            ClinicalSignificance::Significant => "significant",
        }
    }
}

impl std::fmt::Display for ClinicalSignificance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
