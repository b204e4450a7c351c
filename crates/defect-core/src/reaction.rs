// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Reaction Catalog
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Deduplicated storage for production and dissociation reactions.
//! Rate constants live here; per-cluster term lists index into these
//! tables.

use std::collections::HashMap;

use defect_types::species::Composition;

use crate::cluster::Participant;

/// Forward reaction `first + second -> product` with rate constant
/// `k_plus = 4 pi (r_f + r_s) (D_f + D_s)`.
#[derive(Debug, Clone)]
pub struct ProductionReaction {
    pub first: Participant,
    pub second: Participant,
    pub product: Participant,
    pub first_comp: Composition,
    pub second_comp: Composition,
    pub product_comp: Composition,
    /// Sum of the two reaction radii, fixed at catalog build time.
    pub radius_sum: f64,
    pub rate: f64,
}

/// Reverse reaction `emitter -> first + second`, tied to its forward
/// partner through `reverse`. A non-finite binding energy disables the
/// channel (rate pinned to zero) without removing it from the catalog.
#[derive(Debug, Clone)]
pub struct DissociationReaction {
    pub emitter: Participant,
    pub first: Participant,
    pub second: Participant,
    pub emitter_comp: Composition,
    pub reverse: usize,
    pub binding_energy: f64,
    pub rate: f64,
}

/// The network-wide reaction tables. Pairs are keyed on the ordered
/// reactant compositions so re-registration returns the existing entry.
#[derive(Debug, Default)]
pub struct ReactionCatalog {
    pub productions: Vec<ProductionReaction>,
    pub dissociations: Vec<DissociationReaction>,
    pair_index: HashMap<(Composition, Composition), usize>,
    largest_rate: f64,
}

impl ReactionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a production, returning its index and whether it was
    /// newly created.
    pub fn add_production(&mut self, reaction: ProductionReaction) -> (usize, bool) {
        let key = (reaction.first_comp, reaction.second_comp);
        if let Some(&idx) = self.pair_index.get(&key) {
            return (idx, false);
        }
        let idx = self.productions.len();
        self.pair_index.insert(key, idx);
        self.productions.push(reaction);
        (idx, true)
    }

    pub fn add_dissociation(&mut self, reaction: DissociationReaction) -> usize {
        let idx = self.dissociations.len();
        self.dissociations.push(reaction);
        idx
    }

    pub fn clear(&mut self) {
        self.productions.clear();
        self.dissociations.clear();
        self.pair_index.clear();
        self.largest_rate = 0.0;
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty() && self.dissociations.is_empty()
    }

    /// Largest production rate constant currently in the catalog, used
    /// by callers to bound integrator step sizes.
    pub fn largest_rate(&self) -> f64 {
        self.largest_rate
    }

    pub fn observe_rate(&mut self, rate: f64) {
        if rate > self.largest_rate {
            self.largest_rate = rate;
        }
    }

    pub fn reset_largest_rate(&mut self) {
        self.largest_rate = 0.0;
    }
}
