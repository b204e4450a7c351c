// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Core Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Reaction-network engine for point-defect cluster dynamics.
//!
//! Builds the production/dissociation catalog over a cluster arena,
//! computes mass-action fluxes and the sparse Jacobian rows consumed by
//! a stiff-ODE integrator, and coarse-grains one species axis into
//! sectional super clusters with first-moment tracking.

pub mod cluster;
pub mod connectivity;
pub mod dump;
pub mod fits;
pub mod grouping;
pub mod loader;
pub mod network;
pub mod rates;
pub mod reaction;
pub mod registry;

pub use cluster::{Cluster, Participant};
pub use network::ReactionNetwork;
pub use rates::{FormationEnergyModel, TungstenFormationModel, XenonFormationModel};
pub use registry::ClusterRegistry;
