//! # Unit Types
//!
//! Type-safe wrappers for the quantities an estimate deals in. They are plain
//! `f64` newtypes that serialize as bare numbers.
//!
//! Estimates use US customary units:
//! - Length: feet (ft)
//! - Area: square feet (sqft)
//! - Money: US dollars, quoted to the cent
//! - Time: labor hours and working days
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{Feet, SquareFeet, Dollars};
//!
//! let area: SquareFeet = Feet(10.0) * Feet(12.0);
//! assert_eq!(area.0, 120.0);
//!
//! let cost = Dollars(2666.666_666);
//! assert_eq!(cost.rounded().0, 2666.67);
//! assert_eq!(cost.to_string(), "2666.67");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul};

/// Round half away from zero to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// Length and Area
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareFeet(pub f64);

impl Mul for Feet {
    type Output = SquareFeet;
    fn mul(self, rhs: Self) -> SquareFeet {
        SquareFeet(self.0 * rhs.0)
    }
}

impl SquareFeet {
    pub fn rounded(self) -> Self {
        SquareFeet(round_to(self.0, 2))
    }
}

impl fmt::Display for SquareFeet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Amount in US dollars
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dollars(pub f64);

impl Dollars {
    /// Round to whole cents
    pub fn rounded(self) -> Self {
        Dollars(round_to(self.0, 2))
    }
}

impl Add for Dollars {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Dollars(self.0 + rhs.0)
    }
}

impl Mul<f64> for Dollars {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Dollars(self.0 * rhs)
    }
}

impl Div<f64> for Dollars {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Dollars(self.0 / rhs)
    }
}

/// Always two decimal places, no currency symbol.
impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Dollars charged per square foot of material
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DollarsPerSqft(pub f64);

impl Mul<SquareFeet> for DollarsPerSqft {
    type Output = Dollars;
    fn mul(self, rhs: SquareFeet) -> Dollars {
        Dollars(self.0 * rhs.0)
    }
}

/// Dollars charged per labor hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DollarsPerHour(pub f64);

// ============================================================================
// Time
// ============================================================================

/// Labor time in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

impl Mul<DollarsPerHour> for Hours {
    type Output = Dollars;
    fn mul(self, rhs: DollarsPerHour) -> Dollars {
        Dollars(self.0 * rhs.0)
    }
}

/// Project duration in working days
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Days(pub f64);

impl Days {
    /// Round to a tenth of a day
    pub fn rounded(self) -> Self {
        Days(round_to(self.0, 1))
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_from_lengths() {
        assert_eq!(Feet(5.0) * Feet(10.0), SquareFeet(50.0));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to(2.345, 1), 2.3);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-1.005, 0), -1.0);
    }

    #[test]
    fn test_money_display_has_two_decimals() {
        assert_eq!(Dollars(2500.0).to_string(), "2500.00");
        assert_eq!(Dollars(8000.0 / 3.0).rounded().to_string(), "2666.67");
        assert_eq!(Dollars(0.1).to_string(), "0.10");
    }

    #[test]
    fn test_days_display_has_one_decimal() {
        assert_eq!(Days(0.625).rounded().to_string(), "0.6");
        assert_eq!(Days(2.0).to_string(), "2.0");
    }

    #[test]
    fn test_rate_multiplication() {
        let cost = DollarsPerSqft(45.0) * SquareFeet(12.5);
        assert_eq!(cost, Dollars(562.5));
        let labor = Hours(5.0) * DollarsPerHour(65.0);
        assert_eq!(labor, Dollars(325.0));
    }

    #[test]
    fn test_units_serialize_as_numbers() {
        let json = serde_json::to_string(&Dollars(12.5)).unwrap();
        assert_eq!(json, "12.5");
    }
}
