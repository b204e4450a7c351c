// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — End-to-End Network Scenarios
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Full-pipeline scenarios: a tungsten network driven through a
//! spatial diffusion stencil against literature values, and species
//! conservation of the pure reaction fluxes.

use std::io::Cursor;

use defect_core::loader::{generate_network, load_network};
use defect_core::ReactionNetwork;
use defect_types::config::{
    GenerationParams, GroupingParams, MaterialParams, NetworkConfig, ReactionParams,
};
use defect_types::constants::K_BOLTZMANN_EV;
use defect_types::species::Species;

fn tungsten_config() -> NetworkConfig {
    NetworkConfig {
        network_name: "W100-HeVI".into(),
        material: MaterialParams {
            lattice_constant: 0.317,
            impurity_radius: 0.3,
            atomic_volume: None,
        },
        generation: GenerationParams { max_xe: 0, max_he: 8, max_v: 2, max_i: 0 },
        grouping: None,
        reactions: ReactionParams { dissociations_enabled: true },
    }
}

/// He1..He8, V1 and V2 from the W100 transport tables: the ten-cluster
/// network used by the diffusion stencil checks.
fn ten_cluster_network() -> ReactionNetwork {
    let text = "\
# W100 helium chain plus small vacancies
1 0 0 6.15  0.13 2.9e10
2 0 0 11.44 0.20 3.2e10
3 0 0 16.35 0.25 2.3e10
4 0 0 21.0  0.20 1.7e10
5 0 0 26.1  0.12 5.0e9
6 0 0 30.24 0.30 1.0e9
7 0 0 34.93 0.40 5.0e8
8 0 0 38.80 infinite 0.0
0 1 0 3.6  1.30 1.8e12
0 2 0 7.25 infinite 0.0
";
    let mut net = load_network(tungsten_config(), Cursor::new(text)).unwrap();
    net.set_temperature(1000.0);
    net
}

fn diffusion_coefficient(net: &ReactionNetwork, id: usize) -> f64 {
    net.registry().by_id(id).unwrap().diffusion_coefficient
}

/// Five-point Laplacian update on a 3x3 unit grid whose concentration
/// field is the square of the flat (cell, dof) index: every neighbor
/// bracket collapses to 20 * dof^2 regardless of the middle index.
#[test]
fn stencil_update_matches_arrhenius_transport() {
    let net = ten_cluster_network();
    let dof = net.dof();
    assert_eq!(dof, 10);

    // conc[cell][k] with cells in row-major order on the 3x3 grid.
    let conc: Vec<Vec<f64>> = (0..9)
        .map(|cell| {
            (0..dof)
                .map(|k| {
                    let flat = (cell * dof + k) as f64;
                    flat * flat
                })
                .collect()
        })
        .collect();

    let mid = 4; // (1,1)
    let (left, right, top, bottom) = (3, 5, 1, 7);
    for k in 0..dof {
        let d = diffusion_coefficient(&net, k);
        let bracket =
            conc[left][k] + conc[right][k] + conc[top][k] + conc[bottom][k] - 4.0 * conc[mid][k];
        assert!(
            (bracket - 20.0 * (dof * dof) as f64).abs() < 1e-9,
            "bracket degenerated for cluster {k}"
        );
        let update = d * bracket;
        let expected = d * 2000.0;
        assert!((update - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }

    // Literature check for He1 at 1000 K: D = 2.9e10 exp(-0.13/kB T),
    // update = 2000 D = 1.2831e13.
    let he1 = net.registry().get(Species::He, 1).unwrap();
    let d_he1 = 2.9e10 * (-0.13 / (K_BOLTZMANN_EV * 1000.0)).exp();
    assert!((he1.diffusion_coefficient - d_he1).abs() <= 1e-9 * d_he1);
    let update = d_he1 * 2000.0;
    assert!((update - 1.2831e13).abs() <= 1e-4 * 1.2831e13);

    // The matching stencil Jacobian entries: -4D on the diagonal and
    // +D on each neighbor.
    let diag = -4.0 * d_he1;
    let off = d_he1;
    assert!((diag + 2.56618e10).abs() <= 1e-4 * 2.56618e10);
    assert!((off - 6.41544e9).abs() <= 1e-4 * 6.41544e9);
}

/// Pure reaction fluxes move atoms between clusters but never create
/// or destroy them: sum_i count_s(i) * flux_i = 0 per species.
#[test]
fn reaction_fluxes_conserve_atoms() {
    let mut net = ten_cluster_network();
    let dof = net.dof();
    let state: Vec<f64> = (0..dof).map(|i| 1.0e-4 / (1.0 + i as f64)).collect();
    net.update_concentrations_from_array(&state).unwrap();

    let mut fluxes = vec![0.0; dof];
    net.compute_all_fluxes(&mut fluxes).unwrap();
    assert!(fluxes.iter().any(|&f| f != 0.0));

    for species in [Species::He, Species::V] {
        let mut net_rate = 0.0;
        let mut scale = 0.0;
        for cluster in net.registry().clusters() {
            let weighted = f64::from(cluster.composition.count(species)) * fluxes[cluster.id];
            net_rate += weighted;
            scale += weighted.abs();
        }
        assert!(
            net_rate.abs() <= 1e-10 * scale.max(1.0),
            "{species:?} atoms drift: {net_rate} against scale {scale}"
        );
    }
}

/// The generated tungsten and xenon networks run the whole pipeline:
/// flux, sparse Jacobian, totals and the largest-rate bound.
#[test]
fn generated_networks_run_end_to_end() {
    let mut config = tungsten_config();
    config.generation.max_i = 1;
    let mut net = generate_network(config).unwrap();
    net.set_temperature(1000.0);
    exercise(&mut net);

    let xenon = NetworkConfig {
        network_name: "UO2-Xe".into(),
        material: MaterialParams {
            lattice_constant: 0.547,
            impurity_radius: 0.3,
            atomic_volume: Some(0.0818),
        },
        generation: GenerationParams { max_xe: 30, max_he: 0, max_v: 0, max_i: 0 },
        grouping: Some(GroupingParams {
            axis: Species::Xe,
            threshold: 11,
            section_width: 5,
        }),
        reactions: ReactionParams { dissociations_enabled: true },
    };
    let mut net = generate_network(xenon).unwrap();
    net.set_temperature(1500.0);
    exercise(&mut net);
}

fn exercise(net: &mut ReactionNetwork) {
    let dof = net.dof();
    let state: Vec<f64> = (0..dof).map(|i| 1.0e-5 * (1.0 + (i % 7) as f64)).collect();
    net.update_concentrations_from_array(&state).unwrap();

    let mut fluxes = vec![0.0; dof];
    net.compute_all_fluxes(&mut fluxes).unwrap();
    assert!(fluxes.iter().any(|&f| f != 0.0));

    let mut vals = vec![0.0; dof * dof];
    let mut indices = vec![0usize; dof * dof];
    let mut sizes = vec![0usize; dof];
    net.compute_all_partials(&mut vals, &mut indices, &mut sizes).unwrap();
    for row in 0..dof {
        assert!(sizes[row] >= 1);
        let cols = net.connectivity(row).unwrap();
        assert_eq!(cols.len(), sizes[row]);
        for w in cols.windows(2) {
            assert!(w[0] < w[1], "columns not strictly sorted in row {row}");
        }
    }

    assert!(net.largest_rate() > 0.0);
    for cluster in net.registry().clusters().to_vec() {
        let total = net.total_flux(cluster.id);
        let parts = net.production_flux(cluster.id) - net.combination_flux(cluster.id)
            + net.dissociation_flux(cluster.id)
            - net.emission_flux(cluster.id);
        assert!((total - parts).abs() <= 1e-12 * total.abs().max(1e-30));
    }
}
