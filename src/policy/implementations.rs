// src/policy/implementations.rs

use tracing::debug;

use crate::error::PolicyResult;
use crate::policy::formulas::{
    annual_orders, economic_order_quantity, lead_time_demand, safety_stock, DAYS_PER_YEAR,
};
use crate::policy::types::{InventoryPolicy, PolicyInputs, PolicyOutcome, PolicyType};

/// Reorder level and order-up-to level for the two-level policies.
///
/// Both (s,S) and Min-Max size the lower level as lead-time demand plus safety
/// stock and put the upper level one EOQ above it.
#[derive(Debug, Clone, Copy)]
struct TwoLevels {
    safety_stock: f64,
    lower: f64,
    upper: f64,
    eoq: f64,
    annual_orders: f64,
    total_cost: f64,
}

fn two_levels(inputs: &PolicyInputs) -> PolicyResult<TwoLevels> {
    let safety_stock = safety_stock(
        inputs.demand_std,
        inputs.lead_time_days,
        inputs.service_level,
    );
    let lower = lead_time_demand(inputs.demand_mean, inputs.lead_time_days) + safety_stock;

    let eoq = economic_order_quantity(
        inputs.demand_mean,
        inputs.ordering_cost,
        inputs.holding_cost_rate,
    )?;
    let upper = lower + eoq;

    let annual_orders = annual_orders(inputs.demand_mean, eoq)?;

    // Average inventory is taken as the midpoint of the two levels
    let average_inventory = (upper + lower) / 2.0;
    let total_cost =
        annual_orders * inputs.ordering_cost + average_inventory * inputs.holding_cost_rate;

    Ok(TwoLevels {
        safety_stock,
        lower,
        upper,
        eoq,
        annual_orders,
        total_cost,
    })
}

// =========================================================================
// 1. (s,S) Policy
// =========================================================================

/// Continuous review: when the inventory position drops to `s`, order enough
/// to bring it back up to `S`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SsPolicy;

impl InventoryPolicy for SsPolicy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::Ss
    }

    fn evaluate(&self, inputs: &PolicyInputs) -> PolicyResult<PolicyOutcome> {
        let levels = two_levels(inputs)?;
        debug!(
            s = levels.lower,
            big_s = levels.upper,
            eoq = levels.eoq,
            "(s,S) levels"
        );

        Ok(PolicyOutcome {
            parameters: vec![("reorder_point", levels.lower), ("order_up_to", levels.upper)],
            safety_stock: levels.safety_stock,
            reorder_point: levels.lower,
            order_quantity: levels.eoq,
            annual_orders: levels.annual_orders,
            total_cost: levels.total_cost,
        })
    }
}

// =========================================================================
// 2. Min-Max Policy
// =========================================================================

/// Same mechanics as (s,S), expressed as a min and a max stock level.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxPolicy;

impl InventoryPolicy for MinMaxPolicy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::MinMax
    }

    fn evaluate(&self, inputs: &PolicyInputs) -> PolicyResult<PolicyOutcome> {
        let levels = two_levels(inputs)?;
        debug!(min = levels.lower, max = levels.upper, "min-max levels");

        Ok(PolicyOutcome {
            parameters: vec![("min_level", levels.lower), ("max_level", levels.upper)],
            safety_stock: levels.safety_stock,
            reorder_point: levels.lower,
            order_quantity: levels.eoq,
            annual_orders: levels.annual_orders,
            total_cost: levels.total_cost,
        })
    }
}

// =========================================================================
// 3. EOQ Policy
// =========================================================================

/// Fixed order quantity placed whenever stock hits the reorder point.
///
/// Average inventory here is half a cycle plus safety stock, which is not the
/// same approximation the two-level policies use.
#[derive(Debug, Clone, Copy, Default)]
pub struct EoqPolicy;

impl InventoryPolicy for EoqPolicy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::Eoq
    }

    fn evaluate(&self, inputs: &PolicyInputs) -> PolicyResult<PolicyOutcome> {
        let eoq = economic_order_quantity(
            inputs.demand_mean,
            inputs.ordering_cost,
            inputs.holding_cost_rate,
        )?;
        let safety_stock = safety_stock(
            inputs.demand_std,
            inputs.lead_time_days,
            inputs.service_level,
        );
        let reorder_point = lead_time_demand(inputs.demand_mean, inputs.lead_time_days) + safety_stock;

        let annual_orders = annual_orders(inputs.demand_mean, eoq)?;
        let average_inventory = eoq / 2.0 + safety_stock;
        let total_cost =
            annual_orders * inputs.ordering_cost + average_inventory * inputs.holding_cost_rate;

        debug!(eoq, reorder_point, total_cost, "eoq levels");

        Ok(PolicyOutcome {
            parameters: vec![("order_quantity", eoq), ("reorder_point", reorder_point)],
            safety_stock,
            reorder_point,
            order_quantity: eoq,
            annual_orders,
            total_cost,
        })
    }
}

// =========================================================================
// 4. Base Stock Policy
// =========================================================================

/// Replenish every day back up to a fixed target level.
///
/// There is no fixed ordering cost in this model, so the cost is holding only
/// and the policy places one order-equivalent per day.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseStockPolicy;

impl InventoryPolicy for BaseStockPolicy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::BaseStock
    }

    fn evaluate(&self, inputs: &PolicyInputs) -> PolicyResult<PolicyOutcome> {
        let safety_stock = safety_stock(
            inputs.demand_std,
            inputs.lead_time_days,
            inputs.service_level,
        );
        let base_stock = lead_time_demand(inputs.demand_mean, inputs.lead_time_days) + safety_stock;
        let total_cost = base_stock * inputs.holding_cost_rate;

        debug!(base_stock, total_cost, "base-stock level");

        Ok(PolicyOutcome {
            parameters: vec![("base_stock", base_stock)],
            safety_stock,
            reorder_point: base_stock,
            order_quantity: inputs.demand_mean,
            annual_orders: DAYS_PER_YEAR,
            total_cost,
        })
    }
}
