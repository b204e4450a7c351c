// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Reaction Network
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The network facade: owns the arena, the catalog, the concentration
//! state and the frozen Jacobian sparsity, and exposes the flux and
//! partial-derivative entry points an implicit ODE integrator calls on
//! every step.

use ndarray::Array1;

use defect_types::config::NetworkConfig;
use defect_types::error::{NetworkError, NetworkResult};
use defect_types::species::{Composition, Species};

use crate::cluster::{Cluster, Participant};
use crate::connectivity::create_reaction_connectivity;
use crate::grouping::apply_sectional_grouping;
use crate::rates::{
    compute_all_rate_constants, FormationEnergyModel, TungstenFormationModel, XenonFormationModel,
};
use crate::reaction::ReactionCatalog;
use crate::registry::ClusterRegistry;

pub struct ReactionNetwork {
    config: NetworkConfig,
    model: Box<dyn FormationEnergyModel>,
    registry: ClusterRegistry,
    catalog: ReactionCatalog,
    temperature: f64,
    concentrations: Array1<f64>,
    /// Dense scratch row for partial assembly; only the columns listed
    /// in the sparsity pattern are ever touched.
    scratch: Vec<f64>,
    /// Frozen per-row Jacobian columns, indexed by degree of freedom.
    dfill: Vec<Vec<usize>>,
    /// Arena id owning each moment row, in moment-id order.
    moment_owner: Vec<usize>,
    grouped: bool,
    initialized: bool,
}

impl ReactionNetwork {
    pub fn new(config: NetworkConfig) -> NetworkResult<Self> {
        config.validate()?;
        let model: Box<dyn FormationEnergyModel> = if config.generation.max_xe > 0 {
            Box::new(XenonFormationModel::default())
        } else {
            Box::new(TungstenFormationModel)
        };
        Ok(ReactionNetwork {
            config,
            model,
            registry: ClusterRegistry::new(),
            catalog: ReactionCatalog::new(),
            temperature: 0.0,
            concentrations: Array1::zeros(0),
            scratch: Vec::new(),
            dfill: Vec::new(),
            moment_owner: Vec::new(),
            grouped: false,
            initialized: false,
        })
    }

    pub fn set_formation_model(&mut self, model: Box<dyn FormationEnergyModel>) {
        self.model = model;
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn registry(&self) -> &ClusterRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &ReactionCatalog {
        &self.catalog
    }

    pub fn formation_energy_of(&self, composition: &Composition) -> f64 {
        self.model.formation_energy(composition)
    }

    /// Registers a raw cluster. Invalidates any previous initialization.
    pub fn add_cluster(
        &mut self,
        composition: Composition,
        formation_energy: f64,
        migration_energy: f64,
        diffusion_factor: f64,
    ) -> NetworkResult<usize> {
        self.initialized = false;
        let id = self.registry.add(
            composition,
            formation_energy,
            migration_energy,
            diffusion_factor,
            &self.config.material,
        )?;
        if self.temperature > 0.0 {
            self.registry.clusters_mut()[id].recompute_diffusion(self.temperature);
        }
        Ok(id)
    }

    /// Coarse-grains the configured axis. One-shot: must run after all
    /// raw clusters are added and before connectivity is built.
    pub fn apply_grouping(&mut self) -> NetworkResult<()> {
        if self.grouped {
            return Err(NetworkError::ConfigError(
                "sectional grouping already applied".into(),
            ));
        }
        self.initialized = false;
        apply_sectional_grouping(&mut self.registry, &self.config, self.model.as_ref())?;
        self.grouped = true;
        Ok(())
    }

    /// Builds the reaction catalog and per-cluster wiring, then
    /// refreshes rate constants at the current temperature.
    pub fn create_reaction_connectivity(&mut self) -> NetworkResult<()> {
        self.initialized = false;
        create_reaction_connectivity(&mut self.registry, &mut self.catalog, &self.config.material)?;
        self.refresh_rates();
        Ok(())
    }

    /// Freezes ids, moment ids, the degree-of-freedom count and the
    /// Jacobian sparsity, and sizes the state buffers. Must be called
    /// after any structural change and before any flux evaluation.
    pub fn reinitialize(&mut self) {
        self.registry.assign_moment_ids();
        let n = self.registry.len();
        let dof = self.registry.dof();

        self.moment_owner.clear();
        self.dfill.clear();
        self.dfill.reserve(dof);
        for cluster in self.registry.clusters() {
            self.dfill.push(cluster.connectivity.iter().copied().collect());
        }
        for cluster in self.registry.clusters() {
            if let Some(s) = &cluster.super_data {
                self.moment_owner.push(cluster.id);
                self.dfill.push(s.moment_connectivity.iter().copied().collect());
            }
        }
        debug_assert_eq!(self.dfill.len(), dof);
        debug_assert_eq!(self.moment_owner.len(), dof - n);

        self.concentrations = Array1::zeros(dof);
        self.scratch = vec![0.0; dof];
        self.initialized = true;
    }

    /// Drops clusters from the arena. The catalog and all wiring are
    /// cleared; the caller must rebuild connectivity and reinitialize.
    pub fn remove_clusters(&mut self, ids: &[usize]) {
        self.registry.remove(ids);
        self.catalog.clear();
        self.initialized = false;
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Updates every diffusion coefficient and rate constant. A no-op
    /// when the temperature is unchanged.
    pub fn set_temperature(&mut self, temperature: f64) {
        if temperature == self.temperature {
            return;
        }
        self.temperature = temperature;
        for cluster in self.registry.clusters_mut() {
            cluster.recompute_diffusion(temperature);
        }
        self.refresh_rates();
    }

    fn refresh_rates(&mut self) {
        compute_all_rate_constants(
            &mut self.catalog,
            self.registry.clusters(),
            self.temperature,
            self.config.material.atomic_volume(),
            &self.config.reactions,
        );
    }

    pub fn largest_rate(&self) -> f64 {
        self.catalog.largest_rate()
    }

    pub fn dof(&self) -> usize {
        self.registry.dof()
    }

    fn check_initialized(&self) -> NetworkResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(NetworkError::NotInitialized(
                "reinitialize() must run before flux or Jacobian evaluation".into(),
            ))
        }
    }

    /// Copies the integrator's state vector into the network.
    pub fn update_concentrations_from_array(&mut self, state: &[f64]) -> NetworkResult<()> {
        self.check_initialized()?;
        if state.len() != self.concentrations.len() {
            return Err(NetworkError::ConfigError(format!(
                "state vector has {} entries, network has {} degrees of freedom",
                state.len(),
                self.concentrations.len()
            )));
        }
        for (dst, &src) in self.concentrations.iter_mut().zip(state) {
            *dst = src;
        }
        Ok(())
    }

    pub fn concentration(&self, dof_index: usize) -> f64 {
        self.concentrations[dof_index]
    }

    /// Effective concentration of a participant: the zeroth moment
    /// plus the distance-weighted first moment for grouped members.
    fn participant_concentration(&self, p: &Participant) -> f64 {
        let c = self.concentrations[p.id];
        match p.moment {
            Some(m) => c + p.distance * self.concentrations[m],
            None => c,
        }
    }

    fn self_concentration(&self, cluster: &Cluster, distance: f64) -> f64 {
        let c = self.concentrations[cluster.id];
        match cluster.moment_id() {
            Some(m) => c + distance * self.concentrations[m],
            None => c,
        }
    }

    /// The four flux components of one row, weighted either for the
    /// zeroth moment (1/n) or the first moment (d/(n·dispersion)).
    fn flux_components(&self, cluster: &Cluster, moment_row: bool) -> (f64, f64, f64, f64) {
        let n = f64::from(cluster.num_members());
        let dispersion = cluster.dispersion();
        let weight = |d: f64| if moment_row { d / (n * dispersion) } else { 1.0 / n };

        let mut production = 0.0;
        for t in &cluster.producing {
            let k = self.catalog.productions[t.reaction].rate;
            production += weight(t.self_distance)
                * k
                * self.participant_concentration(&t.first)
                * self.participant_concentration(&t.second);
        }
        let mut combination = 0.0;
        for t in &cluster.combining {
            let k = self.catalog.productions[t.reaction].rate;
            combination += weight(t.self_distance)
                * k
                * self.self_concentration(cluster, t.self_distance)
                * self.participant_concentration(&t.other);
        }
        let mut dissociation = 0.0;
        for t in &cluster.dissociating {
            let k = self.catalog.dissociations[t.reaction].rate;
            dissociation += weight(t.self_distance) * k * self.participant_concentration(&t.dissociating);
        }
        let mut emission = 0.0;
        for t in &cluster.emitting {
            let k = self.catalog.dissociations[t.reaction].rate;
            emission += weight(t.self_distance) * k * self.self_concentration(cluster, t.self_distance);
        }
        (production, combination, dissociation, emission)
    }

    pub fn production_flux(&self, id: usize) -> f64 {
        self.flux_components(&self.registry.clusters()[id], false).0
    }

    pub fn combination_flux(&self, id: usize) -> f64 {
        self.flux_components(&self.registry.clusters()[id], false).1
    }

    pub fn dissociation_flux(&self, id: usize) -> f64 {
        self.flux_components(&self.registry.clusters()[id], false).2
    }

    pub fn emission_flux(&self, id: usize) -> f64 {
        self.flux_components(&self.registry.clusters()[id], false).3
    }

    /// Net mass-action flux of a cluster's zeroth moment.
    pub fn total_flux(&self, id: usize) -> f64 {
        let (p, c, d, e) = self.flux_components(&self.registry.clusters()[id], false);
        p - c + d - e
    }

    /// Net flux of a super cluster's first moment; zero for raw clusters.
    pub fn moment_flux(&self, id: usize) -> f64 {
        let cluster = &self.registry.clusters()[id];
        if !cluster.is_super() {
            return 0.0;
        }
        let (p, c, d, e) = self.flux_components(cluster, true);
        p - c + d - e
    }

    /// Accumulates every degree of freedom's flux into `out` (adds to
    /// the existing values, matching the integrator's RHS contract).
    pub fn compute_all_fluxes(&self, out: &mut [f64]) -> NetworkResult<()> {
        self.check_initialized()?;
        for cluster in self.registry.clusters() {
            let (p, c, d, e) = self.flux_components(cluster, false);
            out[cluster.id] += p - c + d - e;
            if let Some(m) = cluster.moment_id() {
                let (p, c, d, e) = self.flux_components(cluster, true);
                out[m] += p - c + d - e;
            }
        }
        Ok(())
    }

    /// Total loss rate of a cluster per unit of its own concentration:
    /// the sum of its combination rates times partner concentrations
    /// plus its emission rate constants.
    pub fn left_side_rate(&self, id: usize) -> f64 {
        let cluster = &self.registry.clusters()[id];
        let mut rate = 0.0;
        for t in &cluster.combining {
            rate += self.catalog.productions[t.reaction].rate
                * self.participant_concentration(&t.other);
        }
        for t in &cluster.emitting {
            rate += self.catalog.dissociations[t.reaction].rate;
        }
        rate
    }

    /// Scatters one row of partials into the dense scratch slice.
    fn fill_partials_row(&self, cluster: &Cluster, moment_row: bool, out: &mut [f64]) {
        let n = f64::from(cluster.num_members());
        let dispersion = cluster.dispersion();
        let weight = |d: f64| if moment_row { d / (n * dispersion) } else { 1.0 / n };
        let own_moment = cluster.moment_id();

        for t in &cluster.producing {
            let kw = self.catalog.productions[t.reaction].rate * weight(t.self_distance);
            let c_first = self.participant_concentration(&t.first);
            let c_second = self.participant_concentration(&t.second);
            out[t.first.id] += kw * c_second;
            if let Some(m) = t.first.moment {
                out[m] += kw * c_second * t.first.distance;
            }
            out[t.second.id] += kw * c_first;
            if let Some(m) = t.second.moment {
                out[m] += kw * c_first * t.second.distance;
            }
        }
        for t in &cluster.combining {
            let kw = self.catalog.productions[t.reaction].rate * weight(t.self_distance);
            let c_other = self.participant_concentration(&t.other);
            let c_self = self.self_concentration(cluster, t.self_distance);
            out[cluster.id] -= kw * c_other;
            if let Some(m) = own_moment {
                out[m] -= kw * c_other * t.self_distance;
            }
            out[t.other.id] -= kw * c_self;
            if let Some(m) = t.other.moment {
                out[m] -= kw * c_self * t.other.distance;
            }
        }
        for t in &cluster.dissociating {
            let kw = self.catalog.dissociations[t.reaction].rate * weight(t.self_distance);
            out[t.dissociating.id] += kw;
            if let Some(m) = t.dissociating.moment {
                out[m] += kw * t.dissociating.distance;
            }
        }
        for t in &cluster.emitting {
            let kw = self.catalog.dissociations[t.reaction].rate * weight(t.self_distance);
            out[cluster.id] -= kw;
            if let Some(m) = own_moment {
                out[m] -= kw * t.self_distance;
            }
        }
    }

    fn row_target(&self, row: usize) -> (usize, bool) {
        let n = self.registry.len();
        if row < n {
            (row, false)
        } else {
            (self.moment_owner[row - n], true)
        }
    }

    /// Fills the sparse Jacobian in the frozen row layout: for row `r`
    /// with `s = sizes[r]` entries, `vals[r*dof .. r*dof+s]` holds the
    /// partials and `indices[r*dof .. r*dof+s]` their columns. Only
    /// columns in the sparsity pattern are written; no allocation.
    pub fn compute_all_partials(
        &mut self,
        vals: &mut [f64],
        indices: &mut [usize],
        sizes: &mut [usize],
    ) -> NetworkResult<()> {
        self.check_initialized()?;
        let dof = self.registry.dof();
        let mut scratch = std::mem::take(&mut self.scratch);
        let row_buf = scratch.as_mut_slice();
        for row in 0..dof {
            let (id, moment_row) = self.row_target(row);
            let cluster = &self.registry.clusters()[id];
            self.fill_partials_row(cluster, moment_row, row_buf);
            let columns = &self.dfill[row];
            for (j, &col) in columns.iter().enumerate() {
                vals[row * dof + j] = row_buf[col];
                indices[row * dof + j] = col;
                row_buf[col] = 0.0;
            }
            sizes[row] = columns.len();
        }
        self.scratch = scratch;
        Ok(())
    }

    /// Dense partials of one row, freshly allocated. Diagnostic path.
    pub fn partial_derivatives(&self, row: usize) -> NetworkResult<Vec<f64>> {
        self.check_initialized()?;
        let mut out = vec![0.0; self.registry.dof()];
        let (id, moment_row) = self.row_target(row);
        self.fill_partials_row(&self.registry.clusters()[id], moment_row, &mut out);
        Ok(out)
    }

    /// Sorted Jacobian columns of one row, as frozen at reinitialize.
    pub fn connectivity(&self, row: usize) -> NetworkResult<&[usize]> {
        self.check_initialized()?;
        Ok(&self.dfill[row])
    }

    pub fn diagonal_fill(&self) -> &[Vec<usize>] {
        &self.dfill
    }

    /// Total concentration of a species' atoms over the whole network,
    /// including grouped sections member by member.
    pub fn total_atom_concentration(&self, species: Species) -> f64 {
        let mut total = 0.0;
        for cluster in self.registry.clusters() {
            match &cluster.super_data {
                None => {
                    total += self.concentrations[cluster.id]
                        * f64::from(cluster.composition.count(species));
                }
                Some(s) if s.axis == species => {
                    let l0 = self.concentrations[cluster.id];
                    let l1 = self.concentrations[s.moment_id];
                    for &x in &s.members {
                        total += f64::from(x) * (l0 + s.distance(x) * l1);
                    }
                }
                Some(_) => {}
            }
        }
        total
    }

    /// Total concentration of a species' atoms held inside
    /// vacancy-bearing clusters.
    pub fn total_trapped_atom_concentration(&self, species: Species) -> f64 {
        let mut total = 0.0;
        for cluster in self.registry.clusters() {
            if cluster.is_super() {
                continue;
            }
            if cluster.composition.count(Species::V) > 0 {
                total += self.concentrations[cluster.id]
                    * f64::from(cluster.composition.count(species));
            }
        }
        total
    }
}
