// src/policy/formulas.rs

//! Shared formulas used by every policy calculator.
//!
//! Safety stock uses a four-point z-score table rather than an inverse normal
//! CDF. Service levels that miss the table are scored as 95%.

use tracing::debug;

use crate::error::{PolicyError, PolicyResult};

/// Days per planning year, used to annualize daily demand.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// z-score used when the service level is not one of the table keys.
pub const FALLBACK_Z_SCORE: f64 = 1.65;

const Z_SCORES: [(f64, f64); 4] = [(0.90, 1.28), (0.95, 1.65), (0.98, 2.05), (0.99, 2.33)];

/// Whether `service_level` is one of the four tabulated levels.
pub fn is_tabulated(service_level: f64) -> bool {
    Z_SCORES.iter().any(|(level, _)| *level == service_level)
}

/// Looks up the z-score for a service level.
///
/// Matching is exact: 0.97 is not between anything, it simply misses and gets
/// [`FALLBACK_Z_SCORE`].
pub fn z_score(service_level: f64) -> f64 {
    match Z_SCORES
        .iter()
        .find(|(level, _)| *level == service_level)
    {
        Some((_, z)) => *z,
        None => {
            debug!(service_level, z = FALLBACK_Z_SCORE, "z-score fallback");
            FALLBACK_Z_SCORE
        }
    }
}

/// Safety stock for normally distributed daily demand over the lead time.
///
/// # Formula
/// SafetyStock = z * DemandStd * sqrt(LeadTimeDays)
pub fn safety_stock(demand_std: f64, lead_time_days: u32, service_level: f64) -> f64 {
    z_score(service_level) * demand_std * f64::from(lead_time_days).sqrt()
}

/// Classic Economic Order Quantity.
///
/// # Formula
/// EOQ = sqrt(2 * Demand * OrderingCost / HoldingCost)
///
/// # Errors
/// `DivisionByZero` when `holding_cost_rate` is zero, `InvalidParameter`
/// naming the offending input when any of them is negative or not finite.
pub fn economic_order_quantity(
    demand_mean: f64,
    ordering_cost: f64,
    holding_cost_rate: f64,
) -> PolicyResult<f64> {
    if holding_cost_rate == 0.0 {
        return Err(PolicyError::DivisionByZero("economic order quantity"));
    }
    require_non_negative("demand_mean", demand_mean)?;
    require_non_negative("ordering_cost", ordering_cost)?;
    require_non_negative("holding_cost_rate", holding_cost_rate)?;

    let radicand = 2.0 * demand_mean * ordering_cost / holding_cost_rate;
    if !radicand.is_finite() {
        return Err(PolicyError::invalid(
            "economic_order_quantity",
            format!(
                "EOQ overflows for demand={demand_mean}, ordering_cost={ordering_cost}, holding_cost_rate={holding_cost_rate}"
            ),
        ));
    }

    Ok(radicand.sqrt())
}

fn require_non_negative(field: &'static str, value: f64) -> PolicyResult<()> {
    if !(value >= 0.0 && value.is_finite()) {
        return Err(PolicyError::invalid(
            field,
            format!("must be a finite value >= 0, got {value}"),
        ));
    }
    Ok(())
}

/// Orders per year needed to cover annualized demand in batches of `order_quantity`.
pub fn annual_orders(demand_mean: f64, order_quantity: f64) -> PolicyResult<f64> {
    if order_quantity == 0.0 {
        return Err(PolicyError::DivisionByZero("annual orders"));
    }
    Ok(DAYS_PER_YEAR * demand_mean / order_quantity)
}

/// Expected demand over the replenishment lead time.
pub fn lead_time_demand(demand_mean: f64, lead_time_days: u32) -> f64 {
    demand_mean * f64::from(lead_time_days)
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
