//! # Materials Table
//!
//! Per-square-foot material rates for each project type. The table is fixed;
//! a material that is not listed for its project type is priced at
//! [`DEFAULT_RATE`].
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::ProjectType;
//! use estimate_core::materials::{rate_for, DEFAULT_RATE};
//!
//! assert_eq!(rate_for(ProjectType::Deck, "Composite").0, 45.0);
//! assert_eq!(rate_for(ProjectType::Patio, "pavers").0, 22.0);
//! assert_eq!(rate_for(ProjectType::Deck, "Gold-plated"), DEFAULT_RATE);
//! ```

use serde::Serialize;

use crate::calculations::ProjectType;
use crate::units::DollarsPerSqft;

/// Rate applied when the material is not in the table for its project type
pub const DEFAULT_RATE: DollarsPerSqft = DollarsPerSqft(25.0);

/// One row of the rate table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialRate {
    pub project_type: ProjectType,
    /// Display name, also the canonical spelling for lookups
    pub name: &'static str,
    pub rate: DollarsPerSqft,
}

const fn row(project_type: ProjectType, name: &'static str, rate: f64) -> MaterialRate {
    MaterialRate {
        project_type,
        name,
        rate: DollarsPerSqft(rate),
    }
}

/// All priced materials, grouped by project type. The first entry of each
/// group is that project type's default choice.
pub const MATERIAL_RATES: &[MaterialRate] = &[
    row(ProjectType::Deck, "Pressure-treated wood", 25.0),
    row(ProjectType::Deck, "Composite", 45.0),
    row(ProjectType::Deck, "PVC", 50.0),
    row(ProjectType::Patio, "Concrete", 15.0),
    row(ProjectType::Patio, "Pavers", 22.0),
    row(ProjectType::Patio, "Stone", 30.0),
    row(ProjectType::Fence, "Wood", 30.0),
    row(ProjectType::Fence, "Vinyl", 40.0),
    row(ProjectType::Fence, "Chain-link", 20.0),
];

/// Materials offered for a project type, in table order.
pub fn materials_for(project_type: ProjectType) -> impl Iterator<Item = &'static MaterialRate> {
    MATERIAL_RATES
        .iter()
        .filter(move |m| m.project_type == project_type)
}

/// Look up a material by name, ignoring ASCII case and surrounding whitespace.
pub fn find_material(project_type: ProjectType, name: &str) -> Option<&'static MaterialRate> {
    let name = name.trim();
    materials_for(project_type).find(|m| m.name.eq_ignore_ascii_case(name))
}

/// Rate for a material, falling back to [`DEFAULT_RATE`] for unknown names.
pub fn rate_for(project_type: ProjectType, name: &str) -> DollarsPerSqft {
    match find_material(project_type, name) {
        Some(material) => material.rate,
        None => {
            tracing::warn!(
                project_type = %project_type,
                material = name,
                rate = DEFAULT_RATE.0,
                "unknown material, using default rate"
            );
            DEFAULT_RATE
        }
    }
}

/// The material a new estimate starts with for this project type.
pub fn default_material(project_type: ProjectType) -> &'static MaterialRate {
    materials_for(project_type)
        .next()
        .unwrap_or(&MATERIAL_RATES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rates() {
        assert_eq!(rate_for(ProjectType::Deck, "Pressure-treated wood").0, 25.0);
        assert_eq!(rate_for(ProjectType::Deck, "Composite").0, 45.0);
        assert_eq!(rate_for(ProjectType::Deck, "PVC").0, 50.0);
        assert_eq!(rate_for(ProjectType::Patio, "Concrete").0, 15.0);
        assert_eq!(rate_for(ProjectType::Patio, "Pavers").0, 22.0);
        assert_eq!(rate_for(ProjectType::Patio, "Stone").0, 30.0);
        assert_eq!(rate_for(ProjectType::Fence, "Wood").0, 30.0);
        assert_eq!(rate_for(ProjectType::Fence, "Vinyl").0, 40.0);
        assert_eq!(rate_for(ProjectType::Fence, "Chain-link").0, 20.0);
    }

    #[test]
    fn test_unknown_material_uses_default_rate() {
        assert_eq!(rate_for(ProjectType::Deck, "Gold-plated"), DEFAULT_RATE);
        assert_eq!(rate_for(ProjectType::Fence, ""), DEFAULT_RATE);
    }

    #[test]
    fn test_material_belongs_to_its_project_type() {
        // Vinyl is a fence material, so a vinyl deck is priced at the default
        assert!(find_material(ProjectType::Deck, "Vinyl").is_none());
        assert_eq!(rate_for(ProjectType::Deck, "Vinyl"), DEFAULT_RATE);
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let material = find_material(ProjectType::Deck, "  composite ").unwrap();
        assert_eq!(material.name, "Composite");
    }

    #[test]
    fn test_three_materials_per_project_type() {
        for project_type in ProjectType::ALL {
            assert_eq!(materials_for(project_type).count(), 3);
        }
    }

    #[test]
    fn test_default_material() {
        assert_eq!(default_material(ProjectType::Patio).name, "Concrete");
        assert_eq!(default_material(ProjectType::Fence).name, "Wood");
    }
}
