//! # Pricing Policies
//!
//! Two ways of turning material and labor cost into a quoted total have been
//! used over the life of the estimator. A deployment picks exactly one in its
//! configuration; they are never applied together.
//!
//! | Policy | Total | Down payment |
//! |---|---|---|
//! | `Markup` | (material + labor) x (1 + markup%) | none |
//! | `FixedMultiplier` | material x 3.2 | total / 3 |

use serde::{Deserialize, Serialize};

use crate::units::{Dollars, DollarsPerHour};

/// Hourly labor rate
pub const LABOR_RATE: DollarsPerHour = DollarsPerHour(65.0);

/// Square feet of work completed per labor hour
pub const SQFT_PER_LABOR_HOUR: f64 = 20.0;

/// Labor hours in one working day
pub const HOURS_PER_DAY: f64 = 8.0;

/// Material cost multiplier for the fixed-multiplier policy
pub const FIXED_MULTIPLIER: f64 = 3.2;

/// Fraction of the total collected up front under the fixed-multiplier policy
pub const DOWN_PAYMENT_DIVISOR: f64 = 3.0;

/// How the quoted total is derived from material and labor cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingPolicy {
    /// Material plus labor, raised by the request's markup percentage
    #[default]
    Markup,
    /// Material cost times 3.2, with a one-third deposit
    FixedMultiplier,
}

/// Total and optional deposit produced by a policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedTotal {
    pub total: Dollars,
    pub down_payment: Option<Dollars>,
}

impl PricingPolicy {
    pub fn display_name(&self) -> &'static str {
        match self {
            PricingPolicy::Markup => "Markup",
            PricingPolicy::FixedMultiplier => "Fixed multiplier",
        }
    }

    /// Apply the policy to unrounded material and labor cost.
    pub fn price(&self, material_cost: Dollars, labor_cost: Dollars, markup_percent: f64) -> PricedTotal {
        match self {
            PricingPolicy::Markup => PricedTotal {
                total: (material_cost + labor_cost) * (1.0 + markup_percent / 100.0),
                down_payment: None,
            },
            PricingPolicy::FixedMultiplier => {
                if markup_percent != 0.0 {
                    tracing::warn!(
                        markup_percent,
                        "markup is ignored by the fixed-multiplier pricing policy"
                    );
                }
                let total = material_cost * FIXED_MULTIPLIER;
                PricedTotal {
                    total,
                    down_payment: Some(total / DOWN_PAYMENT_DIVISOR),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_applies_to_material_and_labor() {
        let priced = PricingPolicy::Markup.price(Dollars(1000.0), Dollars(200.0), 10.0);
        assert!((priced.total.0 - 1320.0).abs() < 1e-9);
        assert_eq!(priced.down_payment, None);
    }

    #[test]
    fn test_zero_markup_is_cost() {
        let priced = PricingPolicy::Markup.price(Dollars(1000.0), Dollars(200.0), 0.0);
        assert_eq!(priced.total, Dollars(1200.0));
    }

    #[test]
    fn test_fixed_multiplier_ignores_labor_and_markup() {
        let priced = PricingPolicy::FixedMultiplier.price(Dollars(1000.0), Dollars(200.0), 50.0);
        assert_eq!(priced.total, Dollars(3200.0));
        let deposit = priced.down_payment.unwrap();
        assert!((deposit.0 - 3200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&PricingPolicy::FixedMultiplier).unwrap();
        assert_eq!(json, "\"fixed_multiplier\"");
        let policy: PricingPolicy = serde_json::from_str("\"markup\"").unwrap();
        assert_eq!(policy, PricingPolicy::Markup);
    }
}
