// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Network Loader
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Builds networks from a textual descriptor list or generates them
//! procedurally from the configured per-species size bounds.
//!
//! Descriptor lines carry six whitespace-separated fields:
//! `nImpurity nV nI formationEnergy migrationEnergy diffusionFactor`.
//! `#` starts a comment; `infinite` is accepted for the float fields.

use std::io::BufRead;

use defect_types::config::NetworkConfig;
use defect_types::error::{NetworkError, NetworkResult};
use defect_types::species::{Composition, Species};

use crate::fits::he_v_formation_energy;
use crate::network::ReactionNetwork;
use crate::rates::{FormationEnergyModel, TungstenFormationModel, XenonFormationModel};

/// One parsed cluster line, origin-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterDescriptor {
    pub composition: Composition,
    pub formation_energy: f64,
    pub migration_energy: f64,
    pub diffusion_factor: f64,
}

/// Single-vacancy and small-cluster transport tables for W100.
const W_HE_DIFFUSION: [f64; 7] = [2.9e10, 3.2e10, 2.3e10, 1.7e10, 5.0e9, 1.0e9, 5.0e8];
const W_HE_MIGRATION: [f64; 7] = [0.13, 0.20, 0.25, 0.20, 0.12, 0.30, 0.40];
const W_V_DIFFUSION: [f64; 1] = [1.8e12];
const W_V_MIGRATION: [f64; 1] = [1.30];
const W_I_DIFFUSION: [f64; 5] = [8.8e10, 8.0e10, 3.9e10, 2.0e10, 1.0e10];
const W_I_MIGRATION: [f64; 5] = [0.01, 0.02, 0.02, 0.02, 0.02];

/// Helium capacity of small vacancy clusters; beyond the table the
/// capacity grows as four heliums per vacancy.
const MAX_HE_PER_V: [u32; 10] = [9, 14, 18, 20, 27, 30, 35, 40, 45, 50];

fn max_he_for_v(num_v: u32) -> u32 {
    MAX_HE_PER_V
        .get(num_v as usize - 1)
        .copied()
        .unwrap_or(4 * num_v)
}

fn parse_float(token: &str, line: usize) -> NetworkResult<f64> {
    if token.eq_ignore_ascii_case("infinite") {
        return Ok(f64::INFINITY);
    }
    token.parse::<f64>().map_err(|_| NetworkError::InvalidDescriptor {
        line,
        message: format!("bad float field {token:?}"),
    })
}

fn parse_count(token: &str, line: usize) -> NetworkResult<u32> {
    token.parse::<u32>().map_err(|_| NetworkError::InvalidDescriptor {
        line,
        message: format!("bad count field {token:?}"),
    })
}

/// Parses descriptor lines. `impurity` names the species of the first
/// column (He for tungsten networks, Xe for fission-gas networks).
/// Fails fast with a one-based line number on the first malformed line.
pub fn parse_descriptors(
    reader: impl BufRead,
    impurity: Species,
) -> NetworkResult<Vec<ClusterDescriptor>> {
    let mut descriptors = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let body = line.split('#').next().unwrap_or("").trim();
        if body.is_empty() {
            continue;
        }
        let fields: Vec<&str> = body.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(NetworkError::InvalidDescriptor {
                line: line_no,
                message: format!("expected 6 fields, found {}", fields.len()),
            });
        }
        let composition = Composition::new()
            .with(impurity, parse_count(fields[0], line_no)?)
            .with(Species::V, parse_count(fields[1], line_no)?)
            .with(Species::I, parse_count(fields[2], line_no)?);
        if composition.is_empty() {
            return Err(NetworkError::InvalidDescriptor {
                line: line_no,
                message: "empty composition".into(),
            });
        }
        descriptors.push(ClusterDescriptor {
            composition,
            formation_energy: parse_float(fields[3], line_no)?,
            migration_energy: parse_float(fields[4], line_no)?,
            diffusion_factor: parse_float(fields[5], line_no)?,
        });
    }
    Ok(descriptors)
}

/// Loads a network from a descriptor stream and runs the full
/// construction pipeline: add, group, connect, reinitialize.
pub fn load_network(config: NetworkConfig, reader: impl BufRead) -> NetworkResult<ReactionNetwork> {
    let impurity = if config.generation.max_xe > 0 {
        Species::Xe
    } else {
        Species::He
    };
    let descriptors = parse_descriptors(reader, impurity)?;
    let mut network = ReactionNetwork::new(config)?;
    for d in &descriptors {
        network.add_cluster(
            d.composition,
            d.formation_energy,
            d.migration_energy,
            d.diffusion_factor,
        )?;
    }
    finish(&mut network)?;
    Ok(network)
}

/// Generates a network from the configured size bounds: a tungsten
/// He/V/I network when the helium bound is set, otherwise a xenon
/// bubble chain.
pub fn generate_network(config: NetworkConfig) -> NetworkResult<ReactionNetwork> {
    let mut network = ReactionNetwork::new(config)?;
    if network.config().generation.max_xe > 0 {
        generate_xenon(&mut network)?;
    } else {
        generate_tungsten(&mut network)?;
    }
    finish(&mut network)?;
    Ok(network)
}

fn finish(network: &mut ReactionNetwork) -> NetworkResult<()> {
    if network.config().grouping.is_some() {
        network.apply_grouping()?;
    }
    network.create_reaction_connectivity()?;
    network.reinitialize();
    Ok(())
}

fn table(t: &[f64], n: u32, beyond: f64) -> f64 {
    t.get(n as usize - 1).copied().unwrap_or(beyond)
}

fn generate_tungsten(network: &mut ReactionNetwork) -> NetworkResult<()> {
    let model = TungstenFormationModel;
    let bounds = network.config().generation.clone();

    for n in 1..=bounds.max_i {
        let comp = Composition::of(Species::I, n);
        network.add_cluster(
            comp,
            model.formation_energy(&comp),
            table(&W_I_MIGRATION, n, f64::INFINITY),
            table(&W_I_DIFFUSION, n, 0.0),
        )?;
    }
    for n in 1..=bounds.max_he {
        let comp = Composition::of(Species::He, n);
        network.add_cluster(
            comp,
            model.formation_energy(&comp),
            table(&W_HE_MIGRATION, n, f64::INFINITY),
            table(&W_HE_DIFFUSION, n, 0.0),
        )?;
    }
    for v in 1..=bounds.max_v {
        let comp = Composition::of(Species::V, v);
        network.add_cluster(
            comp,
            model.formation_energy(&comp),
            table(&W_V_MIGRATION, v, f64::INFINITY),
            table(&W_V_DIFFUSION, v, 0.0),
        )?;
        // Helium filling of each vacancy cluster, immobile.
        for he in 1..=max_he_for_v(v) {
            let comp = Composition::of(Species::He, he).with(Species::V, v);
            network.add_cluster(
                comp,
                he_v_formation_energy(he, v),
                f64::INFINITY,
                0.0,
            )?;
        }
    }
    Ok(())
}

fn generate_xenon(network: &mut ReactionNetwork) -> NetworkResult<()> {
    let model = XenonFormationModel::default();
    let max_xe = network.config().generation.max_xe;
    // The full chain is registered; grouping absorbs the tail beyond
    // the threshold into sections afterwards.
    for n in 1..=max_xe {
        let comp = Composition::of(Species::Xe, n);
        let (d0, em) = if n == 1 { (5.0e9, 0.2) } else { (0.0, f64::INFINITY) };
        network.add_cluster(comp, model.formation_energy(&comp), em, d0)?;
    }
    Ok(())
}
