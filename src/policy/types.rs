// src/policy/types.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};

/// The four inventory-control policies the optimizer knows how to size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    /// Reorder at `s`, order up to `S`.
    #[serde(rename = "s_s")]
    Ss,
    #[serde(rename = "min_max")]
    MinMax,
    #[serde(rename = "eoq")]
    Eoq,
    #[serde(rename = "base_stock")]
    BaseStock,
}

impl PolicyType {
    pub const ALL: [PolicyType; 4] = [
        PolicyType::Ss,
        PolicyType::MinMax,
        PolicyType::Eoq,
        PolicyType::BaseStock,
    ];

    /// Wire name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Ss => "s_s",
            PolicyType::MinMax => "min_max",
            PolicyType::Eoq => "eoq",
            PolicyType::BaseStock => "base_stock",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PolicyError::UnsupportedPolicy(s.to_string()))
    }
}

/// Input to a single optimization call.
///
/// `policy_type` stays a plain string so that an unknown policy survives
/// deserialization and is reported by the optimizer as `UnsupportedPolicy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyOptimizationRequest {
    pub item_id: String,
    pub location_id: String,
    pub policy_type: String,
    pub demand_mean: f64,
    pub demand_std: f64,
    pub lead_time_days: i64,
    pub holding_cost_rate: f64,
    pub ordering_cost: f64,
    pub service_level: f64,
}

pub const MIN_SERVICE_LEVEL: f64 = 0.50;
pub const MAX_SERVICE_LEVEL: f64 = 0.99;

impl PolicyOptimizationRequest {
    /// Checks every field constraint of the request schema.
    ///
    /// The optimizer does not call this; it only re-checks the values that
    /// would otherwise turn into NaN or infinity.
    pub fn validate(&self) -> PolicyResult<()> {
        if self.item_id.trim().is_empty() {
            return Err(PolicyError::invalid("item_id", "must not be empty"));
        }
        if self.location_id.trim().is_empty() {
            return Err(PolicyError::invalid("location_id", "must not be empty"));
        }
        self.policy_type.parse::<PolicyType>()?;

        require_positive("demand_mean", self.demand_mean)?;
        if !(self.demand_std >= 0.0 && self.demand_std.is_finite()) {
            return Err(PolicyError::invalid(
                "demand_std",
                format!("must be >= 0, got {}", self.demand_std),
            ));
        }
        if self.lead_time_days <= 0 {
            return Err(PolicyError::invalid(
                "lead_time_days",
                format!("must be > 0, got {}", self.lead_time_days),
            ));
        }
        require_positive("holding_cost_rate", self.holding_cost_rate)?;
        require_positive("ordering_cost", self.ordering_cost)?;

        if !(MIN_SERVICE_LEVEL..=MAX_SERVICE_LEVEL).contains(&self.service_level) {
            return Err(PolicyError::invalid(
                "service_level",
                format!(
                    "must be within [{MIN_SERVICE_LEVEL}, {MAX_SERVICE_LEVEL}], got {}",
                    self.service_level
                ),
            ));
        }
        Ok(())
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> PolicyResult<()> {
    // `!(x > 0)` also rejects NaN
    if !(value > 0.0 && value.is_finite()) {
        return Err(PolicyError::invalid(
            field,
            format!("must be > 0, got {value}"),
        ));
    }
    Ok(())
}

/// Output of a single optimization call. All numbers are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecommendation {
    pub policy_type: PolicyType,
    pub optimal_parameters: BTreeMap<String, f64>,
    pub expected_cost: f64,
    pub service_level: f64,
    pub safety_stock: f64,
    /// Reorder point, min level or base-stock level depending on the policy.
    pub reorder_point: f64,
    pub order_quantity: f64,
    pub annual_orders: f64,
    pub total_cost: f64,
}

/// The raw numbers produced by one policy calculator, before rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutcome {
    pub parameters: Vec<(&'static str, f64)>,
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub order_quantity: f64,
    pub annual_orders: f64,
    pub total_cost: f64,
}

/// Numeric inputs shared by every calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyInputs {
    pub demand_mean: f64,
    pub demand_std: f64,
    pub lead_time_days: u32,
    pub holding_cost_rate: f64,
    pub ordering_cost: f64,
    pub service_level: f64,
}

/// One inventory-control policy.
///
/// Implementations are stateless; `Send + Sync` lets a single instance serve
/// any number of concurrent callers.
pub trait InventoryPolicy: fmt::Debug + Send + Sync {
    fn policy_type(&self) -> PolicyType;

    fn evaluate(&self, inputs: &PolicyInputs) -> PolicyResult<PolicyOutcome>;
}
