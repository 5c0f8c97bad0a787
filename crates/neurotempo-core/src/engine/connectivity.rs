//! # Region Connectivity Graph
//!
//! Explicit weighted directed adjacency between brain regions. The cascade
//! algorithm takes the graph as injected state, so topology lives here and
//! propagation logic lives in `cascade.rs`.
//!
//! Edge weight is projection strength in [0, 1]. Edges are directed:
//! `VTA -> NucleusAccumbens` says nothing about the reverse projection.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::taxonomy::BrainRegion;

/// Weighted directed region adjacency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityGraph {
    adjacency: HashMap<BrainRegion, Vec<(BrainRegion, f64)>>,
}

impl ConnectivityGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical human pathway table.
    ///
    /// Weights are coarse relative strengths of the major projections, not
    /// tract-tracing data: the mesolimbic and mesocortical dopamine
    /// pathways, the ascending serotonergic/noradrenergic systems, the
    /// cortico-striatal loop, and the limbic PFC-amygdala-hippocampus
    /// triangle.
    pub fn default_human() -> Self {
        let mut graph = Self::new();
        for (from, to, weight) in [
            // Limbic triangle
            (BrainRegion::PrefrontalCortex, BrainRegion::Amygdala, 0.7),
            (BrainRegion::PrefrontalCortex, BrainRegion::Hippocampus, 0.6),
            (BrainRegion::PrefrontalCortex, BrainRegion::Striatum, 0.8),
            (BrainRegion::PrefrontalCortex, BrainRegion::Thalamus, 0.6),
            (BrainRegion::Amygdala, BrainRegion::PrefrontalCortex, 0.6),
            (BrainRegion::Amygdala, BrainRegion::Hippocampus, 0.7),
            (BrainRegion::Amygdala, BrainRegion::Hypothalamus, 0.8),
            (BrainRegion::Hippocampus, BrainRegion::PrefrontalCortex, 0.7),
            (BrainRegion::Hippocampus, BrainRegion::Amygdala, 0.5),
            // Cortico-striatal-thalamic loop
            (BrainRegion::Striatum, BrainRegion::Thalamus, 0.7),
            (BrainRegion::Thalamus, BrainRegion::PrefrontalCortex, 0.8),
            (BrainRegion::Thalamus, BrainRegion::Striatum, 0.5),
            // Mesolimbic / mesocortical dopamine
            (
                BrainRegion::VentralTegmentalArea,
                BrainRegion::NucleusAccumbens,
                0.9,
            ),
            (
                BrainRegion::VentralTegmentalArea,
                BrainRegion::PrefrontalCortex,
                0.7,
            ),
            (
                BrainRegion::VentralTegmentalArea,
                BrainRegion::Amygdala,
                0.5,
            ),
            (BrainRegion::SubstantiaNigra, BrainRegion::Striatum, 0.9),
            (
                BrainRegion::NucleusAccumbens,
                BrainRegion::Hypothalamus,
                0.5,
            ),
            // Ascending serotonergic system
            (BrainRegion::RapheNuclei, BrainRegion::PrefrontalCortex, 0.7),
            (BrainRegion::RapheNuclei, BrainRegion::Hippocampus, 0.6),
            (BrainRegion::RapheNuclei, BrainRegion::Amygdala, 0.6),
            (BrainRegion::RapheNuclei, BrainRegion::Hypothalamus, 0.5),
            // Ascending noradrenergic system
            (
                BrainRegion::LocusCoeruleus,
                BrainRegion::PrefrontalCortex,
                0.7,
            ),
            (BrainRegion::LocusCoeruleus, BrainRegion::Amygdala, 0.7),
            (BrainRegion::LocusCoeruleus, BrainRegion::Hippocampus, 0.5),
            (BrainRegion::LocusCoeruleus, BrainRegion::Thalamus, 0.6),
            // Hypothalamic-pituitary axis
            (BrainRegion::Hypothalamus, BrainRegion::PituitaryGland, 0.9),
            (BrainRegion::Hypothalamus, BrainRegion::BrainStem, 0.6),
            // Brain stem and cerebellum
            (BrainRegion::BrainStem, BrainRegion::Thalamus, 0.6),
            (BrainRegion::BrainStem, BrainRegion::Cerebellum, 0.7),
            (BrainRegion::Cerebellum, BrainRegion::Thalamus, 0.7),
        ] {
            graph.add_projection(from, to, weight);
        }
        graph
    }

    /// Add (or overwrite) a directed projection. Weight is clamped to
    /// [0, 1].
    pub fn add_projection(&mut self, from: BrainRegion, to: BrainRegion, weight: f64) {
        let edges = self.adjacency.entry(from).or_default();
        let weight = weight.clamp(0.0, 1.0);
        if let Some(edge) = edges.iter_mut().find(|(target, _)| *target == to) {
            edge.1 = weight;
        } else {
            edges.push((to, weight));
        }
    }

    /// Outgoing projections of a region.
    pub fn neighbors(&self, region: BrainRegion) -> &[(BrainRegion, f64)] {
        self.adjacency
            .get(&region)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the region has any outgoing projections.
    pub fn is_connected(&self, region: BrainRegion) -> bool {
        !self.neighbors(region).is_empty()
    }

    /// Number of directed edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Regions with at least one outgoing projection, in a stable order.
    pub fn regions_with_projections(&self) -> Vec<BrainRegion> {
        let mut regions: Vec<_> = self
            .adjacency
            .iter()
            .filter(|(_, edges)| !edges.is_empty())
            .map(|(region, _)| *region)
            .collect();
        regions.sort_by_key(|r| r.as_str());
        regions
    }
}
