// src/policy/demand_stats.rs

use crate::error::{PolicyError, PolicyResult};
use crate::policy::types::{PolicyOptimizationRequest, PolicyType};

/// Mean and spread of daily demand, as consumed by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandStats {
    pub mean: f64,
    /// Sample standard deviation (n - 1). Zero for a single observation.
    pub std_dev: f64,
    pub observations: usize,
}

impl DemandStats {
    pub fn from_history(history: &[f64]) -> PolicyResult<Self> {
        if history.is_empty() {
            return Err(PolicyError::invalid(
                "demand_history",
                "at least one observation is required",
            ));
        }
        if let Some(bad) = history.iter().find(|v| !v.is_finite()) {
            return Err(PolicyError::invalid(
                "demand_history",
                format!("non-finite observation {bad}"),
            ));
        }

        let n = history.len();
        let mean = history.iter().sum::<f64>() / n as f64;

        let std_dev = if n < 2 {
            0.0
        } else {
            let var = history.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            var.sqrt()
        };

        Ok(Self {
            mean,
            std_dev,
            observations: n,
        })
    }

    /// Builds an optimization request around these statistics.
    pub fn into_request(
        self,
        item_id: impl Into<String>,
        location_id: impl Into<String>,
        policy_type: PolicyType,
        costs: &CostParameters,
    ) -> PolicyOptimizationRequest {
        PolicyOptimizationRequest {
            item_id: item_id.into(),
            location_id: location_id.into(),
            policy_type: policy_type.as_str().to_string(),
            demand_mean: self.mean,
            demand_std: self.std_dev,
            lead_time_days: costs.lead_time_days,
            holding_cost_rate: costs.holding_cost_rate,
            ordering_cost: costs.ordering_cost,
            service_level: costs.service_level,
        }
    }
}

/// The non-demand half of a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostParameters {
    pub lead_time_days: i64,
    pub holding_cost_rate: f64,
    pub ordering_cost: f64,
    pub service_level: f64,
}
