//! # Project Estimate Calculation
//!
//! Prices a deck, patio or fence from its dimensions and material.
//!
//! ## Method
//!
//! - Area: `length x width` (deck, patio) or `length x height` (fence)
//! - Material: table rate x area
//! - Labor: one hour per 20 sqft at $65/hour
//! - Duration: labor hours / 8, in days
//! - Total: per the selected [`PricingPolicy`]
//!
//! Money is rounded to cents and duration to a tenth of a day, each from the
//! unrounded intermediate values.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::{estimate, EstimateRequest, PricingPolicy, ProjectType};
//!
//! let request = EstimateRequest::area(ProjectType::Deck, 10.0, 10.0, "Pressure-treated wood")
//!     .with_markup(20.0);
//!
//! let result = estimate(&request, PricingPolicy::Markup).unwrap();
//! assert_eq!(result.sqft.0, 100.0);
//! assert_eq!(result.material_cost.to_string(), "2500.00");
//! assert_eq!(result.labor_cost.to_string(), "325.00");
//! assert_eq!(result.total_estimate.to_string(), "3390.00");
//! ```

use serde::{Deserialize, Serialize};

use super::pricing::{PricingPolicy, HOURS_PER_DAY, LABOR_RATE, SQFT_PER_LABOR_HOUR};
use super::ProjectType;
use crate::errors::{CoreResult, EstimateError};
use crate::materials::rate_for;
use crate::units::{Days, Dollars, Feet, Hours, SquareFeet};

/// Input parameters for one estimate.
///
/// ## JSON Example (Fence)
///
/// ```json
/// {
///   "project_type": "Fence",
///   "length": 120.0,
///   "height": 6.0,
///   "material": "Vinyl"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub project_type: ProjectType,

    /// Length in feet
    pub length: f64,

    /// Width in feet (deck and patio)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Height in feet (fence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Material name; unknown names are priced at the default rate
    pub material: String,

    /// Markup percentage, only used by [`PricingPolicy::Markup`]
    #[serde(default)]
    pub markup_percent: f64,
}

impl EstimateRequest {
    /// Request for a deck or patio measured by length and width.
    pub fn area(project_type: ProjectType, length: f64, width: f64, material: impl Into<String>) -> Self {
        EstimateRequest {
            project_type,
            length,
            width: Some(width),
            height: None,
            material: material.into(),
            markup_percent: 0.0,
        }
    }

    /// Request for a fence measured by length and height.
    pub fn fence(length: f64, height: f64, material: impl Into<String>) -> Self {
        EstimateRequest {
            project_type: ProjectType::Fence,
            length,
            width: None,
            height: Some(height),
            material: material.into(),
            markup_percent: 0.0,
        }
    }

    pub fn with_markup(mut self, markup_percent: f64) -> Self {
        self.markup_percent = markup_percent;
        self
    }

    /// Resolve and validate the dimensions this project type is measured by.
    ///
    /// The dimension that does not apply (height for a deck, width for a
    /// fence) is ignored.
    pub fn dimensions(&self) -> CoreResult<Dimensions> {
        let length = positive("length", self.length)?;
        match self.project_type {
            ProjectType::Deck | ProjectType::Patio => {
                let width = self.width.ok_or_else(|| self.missing_second_dimension())?;
                Ok(Dimensions::Area {
                    length: Feet(length),
                    width: Feet(positive("width", width)?),
                })
            }
            ProjectType::Fence => {
                let height = self.height.ok_or_else(|| self.missing_second_dimension())?;
                Ok(Dimensions::Run {
                    length: Feet(length),
                    height: Feet(positive("height", height)?),
                })
            }
        }
    }

    fn missing_second_dimension(&self) -> EstimateError {
        EstimateError::missing_dimension(
            self.project_type.display_name(),
            self.project_type.second_dimension(),
        )
    }
}

fn positive(field: &str, value: f64) -> CoreResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Dimension must be a positive number of feet",
        ));
    }
    Ok(value)
}

fn finite(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() {
        return Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Project is too large to price",
        ));
    }
    Ok(())
}

/// Validated measurements of a project
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimensions {
    /// Deck or patio footprint
    Area { length: Feet, width: Feet },
    /// Fence run and height
    Run { length: Feet, height: Feet },
}

impl Dimensions {
    pub fn sqft(&self) -> SquareFeet {
        match *self {
            Dimensions::Area { length, width } => length * width,
            Dimensions::Run { length, height } => length * height,
        }
    }
}

/// Cost breakdown for one estimate.
///
/// Field order is the order used in documents and the record log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Project area (sqft)
    pub sqft: SquareFeet,
    pub material_cost: Dollars,
    pub labor_cost: Dollars,
    pub total_estimate: Dollars,
    /// Deposit, only under the fixed-multiplier policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<Dollars>,
    /// Working days, to a tenth of a day
    pub duration_days: Days,
}

impl EstimateResult {
    /// Field keys and formatted values, in output order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("sqft", self.sqft.to_string()),
            ("material_cost", self.material_cost.to_string()),
            ("labor_cost", self.labor_cost.to_string()),
            ("total_estimate", self.total_estimate.to_string()),
        ];
        if let Some(down_payment) = self.down_payment {
            fields.push(("down_payment", down_payment.to_string()));
        }
        fields.push(("duration_days", self.duration_days.to_string()));
        fields
    }

    /// Just the field keys, in output order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields().into_iter().map(|(name, _)| name).collect()
    }
}

/// Price a project.
///
/// # Errors
///
/// * `MissingDimension` - width (deck, patio) or height (fence) not given
/// * `InvalidInput` - a dimension is zero, negative or not finite, the
///   markup is negative, or the area or total overflows
pub fn estimate(request: &EstimateRequest, policy: PricingPolicy) -> CoreResult<EstimateResult> {
    let dimensions = request.dimensions()?;

    if !request.markup_percent.is_finite() || request.markup_percent < 0.0 {
        return Err(EstimateError::invalid_input(
            "markup_percent",
            request.markup_percent.to_string(),
            "Markup must be zero or a positive percentage",
        ));
    }

    let sqft = dimensions.sqft();
    let rate = rate_for(request.project_type, &request.material);

    let material_cost = rate * sqft;
    let labor_hours = Hours(sqft.0 / SQFT_PER_LABOR_HOUR);
    let labor_cost = labor_hours * LABOR_RATE;
    let duration = Days(labor_hours.0 / HOURS_PER_DAY);

    let priced = policy.price(material_cost, labor_cost, request.markup_percent);

    // Every other output is bounded by these two
    finite("sqft", sqft.0)?;
    finite("total_estimate", priced.total.0)?;

    let result = EstimateResult {
        sqft: sqft.rounded(),
        material_cost: material_cost.rounded(),
        labor_cost: labor_cost.rounded(),
        total_estimate: priced.total.rounded(),
        down_payment: priced.down_payment.map(Dollars::rounded),
        duration_days: duration.rounded(),
    };

    tracing::debug!(
        project_type = %request.project_type,
        material = %request.material,
        policy = policy.display_name(),
        sqft = result.sqft.0,
        total = result.total_estimate.0,
        "estimate calculated"
    );

    Ok(result)
}
