// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Boltzmann constant (eV/K). All energies in this crate are in eV,
/// lengths in nm, diffusion in nm²/s.
pub const K_BOLTZMANN_EV: f64 = 8.617333262e-5;

/// 4π, the geometric factor in the diffusion-limited capture rate.
pub const FOUR_PI: f64 = 4.0 * std::f64::consts::PI;

/// Tungsten lattice constant (nm), bcc.
pub const TUNGSTEN_LATTICE_CONSTANT: f64 = 0.317;

/// Uranium dioxide lattice constant (nm), fluorite.
pub const URANIUM_DIOXIDE_LATTICE_CONSTANT: f64 = 0.547;

/// Default impurity (He/Xe) hard-sphere radius offset (nm).
pub const IMPURITY_RADIUS: f64 = 0.3;
