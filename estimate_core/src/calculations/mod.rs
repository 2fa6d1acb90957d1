//! # Estimate Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Request` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `estimate(request, policy) -> Result<*Result, EstimateError>` - Pure function
//!
//! ## Available Calculations
//!
//! - [`estimate`] - Area, material, labor and total cost for one project
//! - [`pricing`] - The pricing policies a deployment can choose between

pub mod estimate;
pub mod pricing;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EstimateError;

// Re-export commonly used types
pub use estimate::{estimate, Dimensions, EstimateRequest, EstimateResult};
pub use pricing::PricingPolicy;

/// Kind of project being quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    Deck,
    Patio,
    Fence,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [ProjectType::Deck, ProjectType::Patio, ProjectType::Fence];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Deck => "Deck",
            ProjectType::Patio => "Patio",
            ProjectType::Fence => "Fence",
        }
    }

    /// Name of the second dimension this project type is measured by
    pub fn second_dimension(&self) -> &'static str {
        match self {
            ProjectType::Deck | ProjectType::Patio => "width",
            ProjectType::Fence => "height",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

impl FromStr for ProjectType {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ProjectType::ALL
            .into_iter()
            .find(|t| t.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EstimateError::invalid_project_type(s))
    }
}
