// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Reaction Connectivity Builder
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Enumerates every binary combination in the network, registers the
//! surviving reactions in the catalog, and wires the per-cluster term
//! lists and Jacobian connectivity rows.
//!
//! The enumeration universe contains each raw cluster once and each
//! member of every super-cluster section once, so grouped reactions
//! carry per-member distances and rate radii.

use defect_types::config::MaterialParams;
use defect_types::error::NetworkResult;
use defect_types::species::Composition;

use crate::cluster::{
    reaction_radius, CombinationTerm, DissociationTerm, EmissionTerm, Participant, ProductionTerm,
};
use crate::reaction::{DissociationReaction, ProductionReaction, ReactionCatalog};
use crate::registry::ClusterRegistry;

#[derive(Debug, Clone, Copy)]
struct UniverseEntry {
    comp: Composition,
    participant: Participant,
    size: u32,
    radius: f64,
    /// Structural mobility gate: the pre-exponential factor, not the
    /// temperature-dependent coefficient, so the catalog does not
    /// depend on when the temperature is first set.
    diffusion_factor: f64,
}

/// Rebuilds the reaction catalog and all per-cluster wiring from the
/// current arena. Clears any previous wiring first; moment ids are
/// assigned before member participants are formed.
pub fn create_reaction_connectivity(
    registry: &mut ClusterRegistry,
    catalog: &mut ReactionCatalog,
    material: &MaterialParams,
) -> NetworkResult<()> {
    catalog.clear();
    registry.assign_moment_ids();
    for cluster in registry.clusters_mut() {
        cluster.reset_connectivity();
    }

    let universe = build_universe(registry, material);

    for i in 0..universe.len() {
        for j in i..universe.len() {
            let (a, b) = (universe[i], universe[j]);
            if a.diffusion_factor == 0.0 && b.diffusion_factor == 0.0 {
                continue;
            }
            let product_comp = a.comp.plus(&b.comp);
            let product = match registry.resolve(&product_comp) {
                Some(p) => p,
                None => continue,
            };
            // Canonical reactant order: smaller cluster first.
            let (first, second) = if (b.size, b.comp) < (a.size, a.comp) {
                (b, a)
            } else {
                (a, b)
            };

            let (prod_idx, _) = catalog.add_production(ProductionReaction {
                first: first.participant,
                second: second.participant,
                product,
                first_comp: first.comp,
                second_comp: second.comp,
                product_comp,
                radius_sum: first.radius + second.radius,
                rate: 0.0,
            });
            wire_production(registry, prod_idx, first.participant, second.participant, product);

            if first.size == 1 || second.size == 1 {
                let binding = binding_energy(registry, &first, &second, product.id);
                let diss_idx = catalog.add_dissociation(DissociationReaction {
                    emitter: product,
                    first: first.participant,
                    second: second.participant,
                    emitter_comp: product_comp,
                    reverse: prod_idx,
                    binding_energy: binding,
                    rate: 0.0,
                });
                wire_dissociation(registry, diss_idx, first.participant, second.participant, product);
            }
        }
    }
    Ok(())
}

fn build_universe(registry: &ClusterRegistry, material: &MaterialParams) -> Vec<UniverseEntry> {
    let mut universe = Vec::with_capacity(registry.len());
    for cluster in registry.clusters() {
        match &cluster.super_data {
            None => universe.push(UniverseEntry {
                comp: cluster.composition,
                participant: Participant::plain(cluster.id),
                size: cluster.size,
                radius: cluster.reaction_radius,
                diffusion_factor: cluster.diffusion_factor,
            }),
            Some(s) => {
                for &x in &s.members {
                    let comp = Composition::of(s.axis, x);
                    universe.push(UniverseEntry {
                        comp,
                        participant: Participant {
                            id: cluster.id,
                            distance: s.distance(x),
                            moment: Some(s.moment_id),
                        },
                        size: comp.size(),
                        radius: reaction_radius(&comp, material),
                        diffusion_factor: 0.0,
                    });
                }
            }
        }
    }
    universe
}

fn wire_production(
    registry: &mut ClusterRegistry,
    reaction: usize,
    first: Participant,
    second: Participant,
    product: Participant,
) {
    let clusters = registry.clusters_mut();

    let prod = &mut clusters[product.id];
    prod.producing.push(ProductionTerm {
        reaction,
        first,
        second,
        self_distance: product.distance,
    });
    prod.connect(&first);
    prod.connect(&second);

    let a = &mut clusters[first.id];
    a.combining.push(CombinationTerm {
        reaction,
        other: second,
        self_distance: first.distance,
    });
    a.connect(&first);
    a.connect(&second);

    let b = &mut clusters[second.id];
    b.combining.push(CombinationTerm {
        reaction,
        other: first,
        self_distance: second.distance,
    });
    b.connect(&first);
    b.connect(&second);
}

fn wire_dissociation(
    registry: &mut ClusterRegistry,
    reaction: usize,
    first: Participant,
    second: Participant,
    emitter: Participant,
) {
    let clusters = registry.clusters_mut();

    let a = &mut clusters[first.id];
    a.dissociating.push(DissociationTerm {
        reaction,
        dissociating: emitter,
        self_distance: first.distance,
    });
    a.connect(&emitter);

    let b = &mut clusters[second.id];
    b.dissociating.push(DissociationTerm {
        reaction,
        dissociating: emitter,
        self_distance: second.distance,
    });
    b.connect(&emitter);

    let e = &mut clusters[emitter.id];
    e.emitting.push(EmissionTerm {
        reaction,
        self_distance: emitter.distance,
    });
    e.connect(&emitter);
}

fn binding_energy(
    registry: &ClusterRegistry,
    first: &UniverseEntry,
    second: &UniverseEntry,
    emitter_id: usize,
) -> f64 {
    let ef = |id: usize| registry.by_id(id).map_or(f64::INFINITY, |c| c.formation_energy);
    ef(first.participant.id) + ef(second.participant.id) - ef(emitter_id)
}
