// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Cluster Arena Entry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! A cluster in the arena: composition, energetics, transport
//! attributes, and the per-cluster reaction term lists that drive the
//! flux and Jacobian assembly.

use std::collections::BTreeSet;

use defect_types::config::MaterialParams;
use defect_types::constants::K_BOLTZMANN_EV;
use defect_types::species::{Composition, CompositionShape, Species};

/// A reactant reference as seen from inside a reaction term.
///
/// `id` is the arena index of the cluster (or of the super cluster that
/// owns the member). For members of a super cluster, `distance` is the
/// normalized offset of the member within its section and `moment` is
/// the degree-of-freedom index of the section's first moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Participant {
    pub id: usize,
    pub distance: f64,
    pub moment: Option<usize>,
}

impl Participant {
    pub fn plain(id: usize) -> Self {
        Participant { id, distance: 0.0, moment: None }
    }
}

/// Term on the product's row: `first + second -> self`, gain `+k c_f c_s`.
#[derive(Debug, Clone, Copy)]
pub struct ProductionTerm {
    pub reaction: usize,
    pub first: Participant,
    pub second: Participant,
    pub self_distance: f64,
}

/// Term on a reactant's row: `self + other -> product`, loss `-k c_self c_o`.
#[derive(Debug, Clone, Copy)]
pub struct CombinationTerm {
    pub reaction: usize,
    pub other: Participant,
    pub self_distance: f64,
}

/// Term on an emitted cluster's row: `dissociating -> self + other`,
/// gain `+k_minus c_d`.
#[derive(Debug, Clone, Copy)]
pub struct DissociationTerm {
    pub reaction: usize,
    pub dissociating: Participant,
    pub self_distance: f64,
}

/// Term on the emitter's row: `self -> a + b`, loss `-k_minus c_self`.
#[derive(Debug, Clone, Copy)]
pub struct EmissionTerm {
    pub reaction: usize,
    pub self_distance: f64,
}

/// Sectional payload carried only by super clusters.
#[derive(Debug, Clone)]
pub struct SuperData {
    pub axis: Species,
    pub lower: u32,
    pub upper: u32,
    /// Grouped-axis counts actually represented by this section, in
    /// ascending order. A section never represents counts that were
    /// absent from the network, so this can be sparser than the bounds.
    pub members: Vec<u32>,
    pub mean: f64,
    pub dispersion: f64,
    /// Degree-of-freedom index of the first moment, assigned at
    /// reinitialize time after the arena is final.
    pub moment_id: usize,
    pub moment_connectivity: BTreeSet<usize>,
}

impl SuperData {
    pub fn num_members(&self) -> u32 {
        self.members.len() as u32
    }

    /// Normalized in-section offset of the member with `x` atoms on the
    /// grouped axis. Antisymmetric about the section mean, zero outside
    /// the section bounds and for width-one sections.
    pub fn distance(&self, x: u32) -> f64 {
        let span = self.upper - self.lower + 1;
        if x < self.lower || x > self.upper || span <= 1 {
            return 0.0;
        }
        2.0 * (f64::from(x) - self.mean) / f64::from(span - 1)
    }
}

/// One arena entry. Raw clusters have `super_data == None`.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub id: usize,
    pub composition: Composition,
    pub size: u32,
    pub formation_energy: f64,
    pub migration_energy: f64,
    pub diffusion_factor: f64,
    pub diffusion_coefficient: f64,
    pub reaction_radius: f64,
    pub super_data: Option<SuperData>,

    pub producing: Vec<ProductionTerm>,
    pub combining: Vec<CombinationTerm>,
    pub dissociating: Vec<DissociationTerm>,
    pub emitting: Vec<EmissionTerm>,
    /// Columns of this cluster's zeroth-moment Jacobian row. Seeded
    /// with the cluster's own id.
    pub connectivity: BTreeSet<usize>,
}

impl Cluster {
    pub fn new(
        id: usize,
        composition: Composition,
        formation_energy: f64,
        migration_energy: f64,
        diffusion_factor: f64,
        reaction_radius: f64,
    ) -> Self {
        let mut connectivity = BTreeSet::new();
        connectivity.insert(id);
        Cluster {
            id,
            composition,
            size: composition.size(),
            formation_energy,
            migration_energy,
            diffusion_factor,
            diffusion_coefficient: 0.0,
            reaction_radius,
            super_data: None,
            producing: Vec::new(),
            combining: Vec::new(),
            dissociating: Vec::new(),
            emitting: Vec::new(),
            connectivity,
        }
    }

    pub fn is_super(&self) -> bool {
        self.super_data.is_some()
    }

    /// Number of members represented by this entry (1 for raw clusters).
    pub fn num_members(&self) -> u32 {
        self.super_data.as_ref().map_or(1, |s| s.num_members())
    }

    pub fn dispersion(&self) -> f64 {
        self.super_data.as_ref().map_or(1.0, |s| s.dispersion)
    }

    pub fn moment_id(&self) -> Option<usize> {
        self.super_data.as_ref().map(|s| s.moment_id)
    }

    /// Arrhenius update of the diffusion coefficient. Must be called
    /// again whenever the temperature or a transport attribute changes.
    pub fn recompute_diffusion(&mut self, temperature: f64) {
        self.diffusion_coefficient = if self.diffusion_factor == 0.0 || temperature <= 0.0 {
            0.0
        } else {
            self.diffusion_factor
                * (-self.migration_energy / (K_BOLTZMANN_EV * temperature)).exp()
        };
    }

    pub fn set_migration_energy(&mut self, energy: f64, temperature: f64) {
        self.migration_energy = energy;
        self.recompute_diffusion(temperature);
    }

    pub fn set_diffusion_factor(&mut self, factor: f64, temperature: f64) {
        self.diffusion_factor = factor;
        self.recompute_diffusion(temperature);
    }

    /// Clears reaction wiring so the catalog can be rebuilt, keeping
    /// the self-coupling seed of the connectivity row.
    pub fn reset_connectivity(&mut self) {
        self.producing.clear();
        self.combining.clear();
        self.dissociating.clear();
        self.emitting.clear();
        self.connectivity.clear();
        self.connectivity.insert(self.id);
        if let Some(s) = self.super_data.as_mut() {
            s.moment_connectivity.clear();
        }
    }

    /// Marks the columns a participant touches on both of this
    /// cluster's Jacobian rows.
    pub fn connect(&mut self, p: &Participant) {
        self.connectivity.insert(p.id);
        if let Some(m) = p.moment {
            self.connectivity.insert(m);
        }
        if let Some(s) = self.super_data.as_mut() {
            s.moment_connectivity.insert(p.id);
            if let Some(m) = p.moment {
                s.moment_connectivity.insert(m);
            }
        }
    }
}

/// Reaction radius in nm for a cluster of the given composition.
///
/// Impurity clusters (He, Xe) follow the hard-sphere packing form with
/// the configured impurity offset; vacancy and interstitial clusters
/// scale with the cube root of the occupied lattice-site volume. Mixed
/// clusters take the radius of their lattice-site part.
pub fn reaction_radius(comp: &Composition, material: &MaterialParams) -> f64 {
    let a = material.lattice_constant;
    match comp.shape() {
        Some(CompositionShape::Single(s)) if s == Species::He || s == Species::Xe => {
            impurity_radius(comp.count(s), material)
        }
        Some(CompositionShape::Single(s)) => site_radius(comp.count(s), a),
        Some(CompositionShape::Mixed(_, _)) => {
            let sites = if comp.count(Species::V) > 0 {
                comp.count(Species::V)
            } else {
                comp.count(Species::I)
            };
            if sites > 0 {
                site_radius(sites, a)
            } else {
                impurity_radius(comp.count(Species::He) + comp.count(Species::Xe), material)
            }
        }
        None => 0.0,
    }
}

fn impurity_radius(n: u32, material: &MaterialParams) -> f64 {
    let a = material.lattice_constant;
    let site = (3.0 / (4.0 * std::f64::consts::PI)) * a.powi(3) / 10.0;
    material.impurity_radius + (site * f64::from(n)).cbrt() - site.cbrt()
}

fn site_radius(n: u32, a: f64) -> f64 {
    a * (3.0 * f64::from(n) / (32.0 * std::f64::consts::PI)).cbrt()
}
