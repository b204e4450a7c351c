// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants;
use crate::species::Species;
use serde::{Deserialize, Serialize};

/// Top-level reaction-network configuration.
///
/// Typed replacement for the string-keyed properties map of older
/// cluster-dynamics codes: every parameter that used to be parsed from
/// strings at use sites is populated once, here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_name: String,
    #[serde(default)]
    pub material: MaterialParams,
    #[serde(default)]
    pub generation: GenerationParams,
    /// Optional sectional coarse-graining. When absent, every cluster
    /// stays a raw single.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<GroupingParams>,
    #[serde(default)]
    pub reactions: ReactionParams,
}

/// Lattice/material parameters entering the rate models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialParams {
    /// Lattice constant (nm).
    #[serde(default = "default_lattice_constant")]
    pub lattice_constant: f64,
    /// Hard-sphere radius offset for impurity (He/Xe) clusters (nm).
    #[serde(default = "default_impurity_radius")]
    pub impurity_radius: f64,
    /// Atomic volume Ω (nm³) used in the detailed-balance constant.
    /// When absent it derives from the lattice constant as a³/2
    /// (bcc, two atoms per conventional cell).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atomic_volume: Option<f64>,
}

fn default_lattice_constant() -> f64 {
    constants::TUNGSTEN_LATTICE_CONSTANT
}
fn default_impurity_radius() -> f64 {
    constants::IMPURITY_RADIUS
}

impl Default for MaterialParams {
    fn default() -> Self {
        MaterialParams {
            lattice_constant: default_lattice_constant(),
            impurity_radius: default_impurity_radius(),
            atomic_volume: None,
        }
    }
}

impl MaterialParams {
    /// Ω (nm³): configured value, or a³/2 when unset.
    pub fn atomic_volume(&self) -> f64 {
        self.atomic_volume
            .unwrap_or(0.5 * self.lattice_constant.powi(3))
    }
}

/// Per-species size bounds for procedural network generation and for
/// the silent product-size cutoff of the connectivity builder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerationParams {
    #[serde(default)]
    pub max_xe: u32,
    #[serde(default)]
    pub max_he: u32,
    #[serde(default)]
    pub max_v: u32,
    #[serde(default)]
    pub max_i: u32,
}

impl GenerationParams {
    pub fn max_for(&self, species: Species) -> u32 {
        match species {
            Species::Xe => self.max_xe,
            Species::He => self.max_he,
            Species::V => self.max_v,
            Species::I => self.max_i,
        }
    }
}

/// Sectional coarse-graining parameters for one grouped species axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingParams {
    /// The grouped species axis.
    pub axis: Species,
    /// Sizes below this stay ungrouped raw clusters.
    pub threshold: u32,
    /// Width of each section along the grouped axis.
    #[serde(default = "default_section_width")]
    pub section_width: u32,
}

fn default_section_width() -> u32 {
    4
}

/// Reaction-rule switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionParams {
    /// When false, every dissociation rate constant is forced to zero
    /// while production constants are left untouched.
    #[serde(default = "default_dissociations_enabled")]
    pub dissociations_enabled: bool,
}

fn default_dissociations_enabled() -> bool {
    true
}

impl Default for ReactionParams {
    fn default() -> Self {
        ReactionParams {
            dissociations_enabled: default_dissociations_enabled(),
        }
    }
}

impl NetworkConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> crate::error::NetworkResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural sanity checks, fatal at load time.
    pub fn validate(&self) -> crate::error::NetworkResult<()> {
        if self.material.lattice_constant <= 0.0 {
            return Err(crate::error::NetworkError::ConfigError(
                "lattice_constant must be > 0".to_string(),
            ));
        }
        if self.material.atomic_volume() <= 0.0 {
            return Err(crate::error::NetworkError::ConfigError(
                "atomic_volume must be > 0".to_string(),
            ));
        }
        if let Some(ref grouping) = self.grouping {
            if grouping.section_width == 0 {
                return Err(crate::error::NetworkError::ConfigError(
                    "grouping.section_width must be >= 1".to_string(),
                ));
            }
            if grouping.threshold == 0 {
                return Err(crate::error::NetworkError::ConfigError(
                    "grouping.threshold must be >= 1".to_string(),
                ));
            }
            if self.generation.max_for(grouping.axis) > 0
                && grouping.threshold > self.generation.max_for(grouping.axis)
            {
                return Err(crate::error::NetworkError::ConfigError(format!(
                    "grouping.threshold {} exceeds the {} axis bound {}",
                    grouping.threshold,
                    grouping.axis,
                    self.generation.max_for(grouping.axis)
                )));
            }
        }
        Ok(())
    }
}
