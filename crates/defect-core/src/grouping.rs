// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Sectional Grouping
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coarse-grains the tail of one species axis into contiguous sections,
//! each represented by a super cluster with a zeroth and a first moment.

use defect_types::config::{GroupingParams, NetworkConfig};
use defect_types::error::{NetworkError, NetworkResult};
use defect_types::species::Composition;

use crate::rates::FormationEnergyModel;
use crate::registry::ClusterRegistry;

/// Tiles the sections `[threshold, axis_max]` of the configured width,
/// collects the raw clusters registered inside each section, and
/// replaces them with one super cluster per non-empty section. Sections
/// are contiguous and non-overlapping; the last section is clipped to
/// the axis bound; sections with no registered members produce no
/// group. Must run after all raw clusters are added and before
/// reaction connectivity is built.
pub fn apply_sectional_grouping(
    registry: &mut ClusterRegistry,
    config: &NetworkConfig,
    model: &dyn FormationEnergyModel,
) -> NetworkResult<()> {
    let params = match &config.grouping {
        Some(p) => p,
        None => return Ok(()),
    };
    let axis_max = config.generation.max_for(params.axis);
    if axis_max == 0 {
        return Err(NetworkError::ConfigError(format!(
            "grouping on {} requires a generation bound for that axis",
            params.axis
        )));
    }
    if axis_max < params.threshold {
        return Ok(());
    }

    let mut absorbed = Vec::new();
    let mut sections = Vec::new();
    let mut lower = params.threshold;
    while lower <= axis_max {
        let upper = (lower + params.section_width - 1).min(axis_max);
        let members: Vec<u32> = (lower..=upper)
            .filter_map(|x| {
                registry.get(params.axis, x).map(|cluster| {
                    absorbed.push(cluster.id);
                    x
                })
            })
            .collect();
        if !members.is_empty() {
            sections.push((lower, upper, members));
        }
        lower = upper + 1;
    }
    if !absorbed.is_empty() {
        registry.remove(&absorbed);
    }

    for (lower, upper, members) in sections {
        let n = members.len() as f64;
        let mean = members.iter().map(|&x| f64::from(x)).sum::<f64>() / n;
        let representative = Composition::of(params.axis, mean.round() as u32);
        let formation_energy = model.formation_energy(&representative);
        registry.add_super(
            params.axis,
            lower,
            upper,
            &members,
            formation_energy,
            &config.material,
        )?;
    }
    registry.assign_moment_ids();
    Ok(())
}

/// Number of sections the tiling spans for the given bounds. Sections
/// left empty by the registered network are skipped, so this is an
/// upper bound; it is exact when every size in the range is present.
pub fn section_count(params: &GroupingParams, axis_max: u32) -> usize {
    if axis_max < params.threshold {
        return 0;
    }
    let span = axis_max - params.threshold + 1;
    span.div_ceil(params.section_width) as usize
}
