// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Rate Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Diffusion-limited capture rates and detailed-balance dissociation
//! rates, plus the material formation-energy models feeding the
//! binding energies.

use defect_types::config::ReactionParams;
use defect_types::constants::{FOUR_PI, K_BOLTZMANN_EV};
use defect_types::species::{Composition, CompositionShape, Species};

use crate::cluster::Cluster;
use crate::fits::he_v_formation_energy;
use crate::reaction::ReactionCatalog;

/// Formation energy in eV for a composition, or positive infinity when
/// the model has no value (which disables emission of that cluster).
pub trait FormationEnergyModel {
    fn formation_energy(&self, composition: &Composition) -> f64;
}

/// Tungsten (W100) energetics: tabulated single-species values plus
/// the Legendre fit for mixed He-V clusters.
#[derive(Debug, Default, Clone, Copy)]
pub struct TungstenFormationModel;

const W_HE_FORMATION: [f64; 8] = [6.15, 11.44, 16.35, 21.0, 26.1, 30.24, 34.93, 38.80];
const W_V_FORMATION: [f64; 2] = [3.6, 7.25];
const W_I_FORMATION: [f64; 5] = [10.4, 18.5, 27.0, 35.0, 42.5];

impl FormationEnergyModel for TungstenFormationModel {
    fn formation_energy(&self, composition: &Composition) -> f64 {
        let table = |t: &[f64], n: u32| match n {
            0 => f64::INFINITY,
            _ => t.get(n as usize - 1).copied().unwrap_or(f64::INFINITY),
        };
        match composition.shape() {
            Some(CompositionShape::Single(Species::He)) => {
                table(&W_HE_FORMATION, composition.count(Species::He))
            }
            Some(CompositionShape::Single(Species::V)) => {
                table(&W_V_FORMATION, composition.count(Species::V))
            }
            Some(CompositionShape::Single(Species::I)) => {
                table(&W_I_FORMATION, composition.count(Species::I))
            }
            Some(CompositionShape::Mixed(Species::He, Species::V)) => he_v_formation_energy(
                composition.count(Species::He),
                composition.count(Species::V),
            ),
            _ => f64::INFINITY,
        }
    }
}

/// Xenon-in-UO2 energetics: a surface-energy bubble law on the xenon
/// count, finite for every size so grouped sections stay emissive.
#[derive(Debug, Clone, Copy)]
pub struct XenonFormationModel {
    pub surface_energy: f64,
}

impl Default for XenonFormationModel {
    fn default() -> Self {
        XenonFormationModel { surface_energy: 7.0 }
    }
}

impl FormationEnergyModel for XenonFormationModel {
    fn formation_energy(&self, composition: &Composition) -> f64 {
        let n = composition.count(Species::Xe);
        if n == 0 || composition.shape() != Some(CompositionShape::Single(Species::Xe)) {
            return f64::INFINITY;
        }
        self.surface_energy * f64::from(n).powf(2.0 / 3.0)
    }
}

/// Diffusion-limited capture rate `4 pi (r_a + r_b) (D_a + D_b)`.
pub fn capture_rate(radius_sum: f64, d_first: f64, d_second: f64) -> f64 {
    FOUR_PI * radius_sum * (d_first + d_second)
}

/// Detailed-balance reverse rate for the forward rate `k_plus` and
/// binding energy `e_b`: `k_plus / omega * exp(-e_b / kB T)`. Channels
/// with a non-finite binding energy are disabled, not an error.
pub fn dissociation_rate(k_plus: f64, binding_energy: f64, temperature: f64, atomic_volume: f64) -> f64 {
    if !binding_energy.is_finite() || temperature <= 0.0 {
        return 0.0;
    }
    (k_plus / atomic_volume) * (-binding_energy / (K_BOLTZMANN_EV * temperature)).exp()
}

/// Recomputes every rate constant in the catalog against the given
/// cluster arena and temperature, refreshing the largest-rate bound.
pub fn compute_all_rate_constants(
    catalog: &mut ReactionCatalog,
    clusters: &[Cluster],
    temperature: f64,
    atomic_volume: f64,
    reactions: &ReactionParams,
) {
    catalog.reset_largest_rate();
    let mut forward = Vec::with_capacity(catalog.productions.len());
    let mut largest = 0.0_f64;
    for production in catalog.productions.iter_mut() {
        let a = &clusters[production.first.id];
        let b = &clusters[production.second.id];
        production.rate = capture_rate(
            production.radius_sum,
            a.diffusion_coefficient,
            b.diffusion_coefficient,
        );
        largest = largest.max(production.rate);
        forward.push(production.rate);
    }
    for dissociation in catalog.dissociations.iter_mut() {
        let k_plus = forward[dissociation.reverse];
        dissociation.rate = if reactions.dissociations_enabled {
            dissociation_rate(k_plus, dissociation.binding_energy, temperature, atomic_volume)
        } else {
            0.0
        };
    }
    // Only forward rates feed the adaptive-step bound.
    catalog.observe_rate(largest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_rate_is_symmetric_in_diffusion() {
        let k = capture_rate(0.6, 2.0e9, 5.0e8);
        let k_swapped = capture_rate(0.6, 5.0e8, 2.0e9);
        assert_eq!(k, k_swapped);
        assert!((k - FOUR_PI * 0.6 * 2.5e9).abs() / k < 1e-14);
    }

    #[test]
    fn non_finite_binding_energy_disables_the_channel() {
        assert_eq!(dissociation_rate(1.0e12, f64::INFINITY, 1000.0, 0.0159), 0.0);
        assert_eq!(dissociation_rate(1.0e12, f64::NEG_INFINITY, 1000.0, 0.0159), 0.0);
        assert_eq!(dissociation_rate(1.0e12, f64::NAN, 1000.0, 0.0159), 0.0);
        assert!(dissociation_rate(1.0e12, 1.0, 1000.0, 0.0159) > 0.0);
    }

    #[test]
    fn tungsten_tables_cover_the_small_clusters() {
        let m = TungstenFormationModel;
        assert_eq!(m.formation_energy(&Composition::of(Species::He, 1)), 6.15);
        assert_eq!(m.formation_energy(&Composition::of(Species::V, 2)), 7.25);
        assert_eq!(m.formation_energy(&Composition::of(Species::I, 5)), 42.5);
        assert_eq!(m.formation_energy(&Composition::of(Species::He, 9)), f64::INFINITY);
        let mixed = Composition::of(Species::He, 2).with(Species::V, 1);
        assert!((m.formation_energy(&mixed) - 8.20919).abs() < 1e-12);
    }

    #[test]
    fn xenon_binding_energy_is_positive_under_the_bubble_law() {
        let m = XenonFormationModel::default();
        for n in 2..=30u32 {
            let binding = m.formation_energy(&Composition::of(Species::Xe, n - 1))
                + m.formation_energy(&Composition::of(Species::Xe, 1))
                - m.formation_energy(&Composition::of(Species::Xe, n));
            assert!(binding > 0.0, "Xe{n} binding {binding}");
        }
    }
}
