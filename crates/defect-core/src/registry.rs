// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Cluster Registry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Arena of clusters plus the composition lookup maps. Arena index is
//! the cluster id and the concentration index; super clusters carry an
//! extra first-moment degree of freedom appended after the arena.

use std::collections::BTreeSet;
use std::collections::HashMap;

use defect_types::config::MaterialParams;
use defect_types::error::{NetworkError, NetworkResult};
use defect_types::species::{Composition, CompositionShape, Species};

use crate::cluster::{reaction_radius, Cluster, Participant, SuperData};

#[derive(Debug, Default)]
pub struct ClusterRegistry {
    clusters: Vec<Cluster>,
    single_map: HashMap<Composition, usize>,
    mixed_map: HashMap<Composition, usize>,
    super_map: HashMap<Composition, usize>,
    /// Member composition -> owning super cluster.
    group_index: HashMap<Composition, usize>,
    num_super: usize,
}

impl ClusterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn num_super(&self) -> usize {
        self.num_super
    }

    /// Network degrees of freedom: one per arena entry plus one first
    /// moment per super cluster.
    pub fn dof(&self) -> usize {
        self.clusters.len() + self.num_super
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn clusters_mut(&mut self) -> &mut [Cluster] {
        &mut self.clusters
    }

    /// Adds a raw cluster and returns its arena id.
    pub fn add(
        &mut self,
        composition: Composition,
        formation_energy: f64,
        migration_energy: f64,
        diffusion_factor: f64,
        material: &MaterialParams,
    ) -> NetworkResult<usize> {
        let shape = composition
            .shape()
            .ok_or_else(|| NetworkError::ConfigError("empty composition".into()))?;
        let map = match shape {
            CompositionShape::Single(_) => &mut self.single_map,
            CompositionShape::Mixed(_, _) => &mut self.mixed_map,
        };
        if map.contains_key(&composition) {
            return Err(NetworkError::DuplicateCluster(composition.canonical_string()));
        }
        if self.group_index.contains_key(&composition) {
            return Err(NetworkError::GroupingConflict(format!(
                "{} is already represented by a super cluster",
                composition.canonical_string()
            )));
        }
        let id = self.clusters.len();
        map.insert(composition, id);
        let radius = reaction_radius(&composition, material);
        self.clusters.push(Cluster::new(
            id,
            composition,
            formation_energy,
            migration_energy,
            diffusion_factor,
            radius,
        ));
        Ok(id)
    }

    /// Adds a super cluster with bounds `lower..=upper` on `axis`,
    /// representing exactly the given member counts, and claims the
    /// member compositions in the reverse index. Members still
    /// registered as raw clusters are a conflict.
    pub fn add_super(
        &mut self,
        axis: Species,
        lower: u32,
        upper: u32,
        members: &[u32],
        formation_energy: f64,
        material: &MaterialParams,
    ) -> NetworkResult<usize> {
        if members.is_empty() {
            return Err(NetworkError::ConfigError(format!(
                "section [{lower}, {upper}] on {axis} has no members"
            )));
        }
        let n = members.len() as u32;
        let mean = members.iter().map(|&x| f64::from(x)).sum::<f64>() / f64::from(n);
        let representative = Composition::of(axis, mean.round() as u32);
        if self.super_map.contains_key(&representative) {
            return Err(NetworkError::DuplicateCluster(format!(
                "super {}",
                representative.canonical_string()
            )));
        }
        for &x in members {
            let member = Composition::of(axis, x);
            if self.single_map.contains_key(&member) || self.mixed_map.contains_key(&member) {
                return Err(NetworkError::GroupingConflict(format!(
                    "{} is registered as a raw cluster inside section [{lower}, {upper}]",
                    member.canonical_string()
                )));
            }
            if self.group_index.contains_key(&member) {
                return Err(NetworkError::GroupingConflict(format!(
                    "{} belongs to two sections",
                    member.canonical_string()
                )));
            }
        }

        let span = upper - lower + 1;
        let mut dispersion = 0.0;
        if span > 1 {
            for &x in members {
                let d = 2.0 * (f64::from(x) - mean) / f64::from(span - 1);
                dispersion += d * d;
            }
            dispersion /= f64::from(n);
        }
        if dispersion == 0.0 {
            dispersion = 1.0;
        }

        let id = self.clusters.len();
        let radius = reaction_radius(&representative, material);
        let mut cluster = Cluster::new(id, representative, formation_energy, f64::INFINITY, 0.0, radius);
        cluster.super_data = Some(SuperData {
            axis,
            lower,
            upper,
            members: members.to_vec(),
            mean,
            dispersion,
            moment_id: usize::MAX,
            moment_connectivity: BTreeSet::new(),
        });
        self.super_map.insert(representative, id);
        for &x in members {
            self.group_index.insert(Composition::of(axis, x), id);
        }
        self.clusters.push(cluster);
        self.num_super += 1;
        Ok(id)
    }

    /// Assigns moment ids in arena order, after the arena is final.
    /// Idempotent; also seeds each moment row with its own column.
    pub fn assign_moment_ids(&mut self) {
        let base = self.clusters.len();
        let mut next = base;
        for cluster in &mut self.clusters {
            if let Some(s) = cluster.super_data.as_mut() {
                s.moment_id = next;
                s.moment_connectivity.insert(next);
                next += 1;
            }
        }
    }

    pub fn get(&self, species: Species, size: u32) -> Option<&Cluster> {
        let comp = Composition::of(species, size);
        self.single_map.get(&comp).map(|&i| &self.clusters[i])
    }

    pub fn get_compound(&self, composition: &Composition) -> Option<&Cluster> {
        self.mixed_map.get(composition).map(|&i| &self.clusters[i])
    }

    /// Super cluster whose representative composition matches exactly.
    pub fn get_super(&self, composition: &Composition) -> Option<&Cluster> {
        self.super_map.get(composition).map(|&i| &self.clusters[i])
    }

    /// Super cluster owning the given member composition.
    pub fn super_for_member(&self, composition: &Composition) -> Option<&Cluster> {
        self.group_index.get(composition).map(|&i| &self.clusters[i])
    }

    pub fn by_id(&self, id: usize) -> Option<&Cluster> {
        self.clusters.get(id)
    }

    /// Resolves a composition to a participant: a raw cluster stands
    /// for itself, a grouped composition maps to its super cluster with
    /// the member's in-section distance and moment column.
    pub fn resolve(&self, composition: &Composition) -> Option<Participant> {
        if let Some(&id) = self
            .single_map
            .get(composition)
            .or_else(|| self.mixed_map.get(composition))
        {
            return Some(Participant::plain(id));
        }
        let &id = self.group_index.get(composition)?;
        let super_data = self.clusters[id].super_data.as_ref()?;
        let x = composition.count(super_data.axis);
        Some(Participant {
            id,
            distance: super_data.distance(x),
            moment: Some(super_data.moment_id),
        })
    }

    /// Drops the given arena entries, compacts ids, and clears all
    /// reaction wiring. The caller must rebuild connectivity and
    /// reinitialize before computing fluxes again.
    pub fn remove(&mut self, ids: &[usize]) {
        let doomed: BTreeSet<usize> = ids.iter().copied().collect();
        let old = std::mem::take(&mut self.clusters);
        self.single_map.clear();
        self.mixed_map.clear();
        self.super_map.clear();
        self.group_index.clear();
        self.num_super = 0;
        for (old_id, mut cluster) in old.into_iter().enumerate() {
            if doomed.contains(&old_id) {
                continue;
            }
            let id = self.clusters.len();
            cluster.id = id;
            cluster.reset_connectivity();
            match (&cluster.super_data, cluster.composition.shape()) {
                (Some(s), _) => {
                    self.super_map.insert(cluster.composition, id);
                    for &x in &s.members {
                        self.group_index.insert(Composition::of(s.axis, x), id);
                    }
                    self.num_super += 1;
                }
                (None, Some(CompositionShape::Single(_))) => {
                    self.single_map.insert(cluster.composition, id);
                }
                (None, _) => {
                    self.mixed_map.insert(cluster.composition, id);
                }
            }
            self.clusters.push(cluster);
        }
        self.assign_moment_ids();
    }
}
