// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Network Dump
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Deterministic text dump of a constructed network, for baseline
//! comparison between runs. Iteration follows arena and catalog order,
//! so two identically-built networks dump byte-identical text.

use std::fmt::Write as _;

use crate::network::ReactionNetwork;

/// Renders the arena and the reaction catalog. Floats use `{:e}` so
/// the output does not depend on locale or float-to-shortest quirks
/// across platforms.
pub fn dump_network(network: &ReactionNetwork) -> String {
    let mut out = String::new();
    let registry = network.registry();
    let catalog = network.catalog();

    let _ = writeln!(
        out,
        "network {}: {} clusters ({} super), dof={}",
        network.config().network_name,
        registry.len(),
        registry.num_super(),
        network.dof(),
    );
    for cluster in registry.clusters() {
        let _ = write!(
            out,
            "cluster {} {} size={} radius={:.6e} D0={:.6e} Em={:.6e} Ef={:.6e}",
            cluster.id,
            cluster.composition.canonical_string(),
            cluster.size,
            cluster.reaction_radius,
            cluster.diffusion_factor,
            cluster.migration_energy,
            cluster.formation_energy,
        );
        if let Some(s) = &cluster.super_data {
            let _ = write!(
                out,
                " section=[{},{}] members={} mean={:.6e} dispersion={:.6e}",
                s.lower,
                s.upper,
                s.num_members(),
                s.mean,
                s.dispersion,
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "productions {}", catalog.productions.len());
    for p in &catalog.productions {
        let _ = writeln!(
            out,
            "  {} + {} -> {}",
            p.first_comp.canonical_string(),
            p.second_comp.canonical_string(),
            p.product_comp.canonical_string(),
        );
    }
    let _ = writeln!(out, "dissociations {}", catalog.dissociations.len());
    for d in &catalog.dissociations {
        let forward = &catalog.productions[d.reverse];
        let _ = writeln!(
            out,
            "  {} -> {} + {} Eb={:.6e}",
            d.emitter_comp.canonical_string(),
            forward.first_comp.canonical_string(),
            forward.second_comp.canonical_string(),
            d.binding_energy,
        );
    }
    out
}
