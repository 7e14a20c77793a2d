// src/config.rs

use crate::policy::CostParameters;

/// Scenario used by the `demo` and `compare` commands.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub item_id: String,
    pub location_id: String,
    pub history_days: usize,
    pub demand_mean: f64,
    pub demand_std: f64,
    pub lead_time_days: i64,
    pub holding_cost_rate: f64,
    pub ordering_cost: f64,
    pub service_level: f64,
    /// Fixes the synthetic demand history when set.
    pub seed: Option<u64>,
}

impl RunConfig {
    pub fn cost_parameters(&self) -> CostParameters {
        CostParameters {
            lead_time_days: self.lead_time_days,
            holding_cost_rate: self.holding_cost_rate,
            ordering_cost: self.ordering_cost,
            service_level: self.service_level,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            item_id: "SKU-DEMO".to_string(),
            location_id: "WH-MAIN".to_string(),
            history_days: 90,
            demand_mean: 20.0,
            demand_std: 5.0,
            lead_time_days: 7,
            holding_cost_rate: 1.0,
            ordering_cost: 25.0,
            service_level: 0.95,
            seed: None,
        }
    }
}
