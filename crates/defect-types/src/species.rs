// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Species & Composition
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Canonical, order-independent cluster compositions.
//!
//! A composition maps each point-defect species to a non-negative
//! count. Counts live in a fixed-order array so that equality, hashing
//! and the canonical string never depend on construction order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed point-defect species set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    Xe,
    He,
    V,
    I,
}

impl Species {
    /// All species in the fixed global iteration order.
    pub const ALL: [Species; 4] = [Species::Xe, Species::He, Species::V, Species::I];

    /// Index into composition arrays.
    pub fn index(self) -> usize {
        match self {
            Species::Xe => 0,
            Species::He => 1,
            Species::V => 2,
            Species::I => 3,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Species::Xe => "Xe",
            Species::He => "He",
            Species::V => "V",
            Species::I => "I",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Structural classification of a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionShape {
    /// One species with a positive count.
    Single(Species),
    /// Exactly two species with positive counts, in fixed-order.
    Mixed(Species, Species),
}

/// Per-species integer counts identifying one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Composition {
    counts: [u32; 4],
}

impl Composition {
    /// The empty composition (all counts zero).
    pub fn new() -> Self {
        Composition::default()
    }

    /// A single-species composition of the given size.
    pub fn of(species: Species, count: u32) -> Self {
        let mut comp = Composition::default();
        comp.counts[species.index()] = count;
        comp
    }

    /// Builder-style count assignment.
    pub fn with(mut self, species: Species, count: u32) -> Self {
        self.counts[species.index()] = count;
        self
    }

    pub fn count(&self, species: Species) -> u32 {
        self.counts[species.index()]
    }

    pub fn set(&mut self, species: Species, count: u32) {
        self.counts[species.index()] = count;
    }

    /// Total number of point defects (cluster size).
    pub fn size(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Number of species with a positive count.
    pub fn species_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Component-wise sum of two compositions.
    pub fn plus(&self, other: &Composition) -> Composition {
        let mut out = *self;
        for i in 0..4 {
            out.counts[i] += other.counts[i];
        }
        out
    }

    /// Component-wise difference; `None` if any count would go negative.
    pub fn minus(&self, other: &Composition) -> Option<Composition> {
        let mut out = *self;
        for i in 0..4 {
            out.counts[i] = out.counts[i].checked_sub(other.counts[i])?;
        }
        Some(out)
    }

    /// Structural shape, or `None` for empty or >2-species compositions.
    pub fn shape(&self) -> Option<CompositionShape> {
        let present: Vec<Species> = Species::ALL
            .iter()
            .copied()
            .filter(|s| self.count(*s) > 0)
            .collect();
        match present.as_slice() {
            [a] => Some(CompositionShape::Single(*a)),
            [a, b] => Some(CompositionShape::Mixed(*a, *b)),
            _ => None,
        }
    }

    /// Canonical string over the fixed species order, skipping zero
    /// counts: `He1V50`, `Xe12`. Identical compositions always render
    /// identically, independent of how they were built.
    pub fn canonical_string(&self) -> String {
        let mut out = String::new();
        for species in Species::ALL {
            let n = self.count(species);
            if n > 0 {
                out.push_str(species.symbol());
                out.push_str(&n.to_string());
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_string_is_order_independent() {
        let a = Composition::new().with(Species::V, 50).with(Species::He, 1);
        let b = Composition::new().with(Species::He, 1).with(Species::V, 50);
        assert_eq!(a, b);
        assert_eq!(a.canonical_string(), "He1V50");
        assert_eq!(b.canonical_string(), "He1V50");
    }

    #[test]
    fn test_size_and_species_count() {
        let comp = Composition::of(Species::He, 3).with(Species::V, 2);
        assert_eq!(comp.size(), 5);
        assert_eq!(comp.species_count(), 2);
        assert_eq!(comp.count(Species::I), 0);
    }

    #[test]
    fn test_shape_classification() {
        assert_eq!(
            Composition::of(Species::Xe, 4).shape(),
            Some(CompositionShape::Single(Species::Xe))
        );
        assert_eq!(
            Composition::of(Species::He, 1).with(Species::V, 2).shape(),
            Some(CompositionShape::Mixed(Species::He, Species::V))
        );
        assert_eq!(Composition::new().shape(), None);
        let three = Composition::of(Species::He, 1)
            .with(Species::V, 1)
            .with(Species::I, 1);
        assert_eq!(three.shape(), None);
    }

    #[test]
    fn test_plus_and_minus() {
        let a = Composition::of(Species::He, 2);
        let b = Composition::of(Species::He, 3).with(Species::V, 1);
        let c = a.plus(&b);
        assert_eq!(c.count(Species::He), 5);
        assert_eq!(c.count(Species::V), 1);
        assert_eq!(c.minus(&a), Some(b));
        assert_eq!(a.minus(&b), None);
    }

    #[test]
    fn test_mixed_shape_uses_fixed_species_order() {
        // Construction order V-then-He must still report (He, V).
        let comp = Composition::new().with(Species::V, 7).with(Species::He, 2);
        assert_eq!(
            comp.shape(),
            Some(CompositionShape::Mixed(Species::He, Species::V))
        );
    }
}
