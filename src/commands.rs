// src/commands.rs

//! The work behind each CLI subcommand, minus the printing.

use std::fmt::Write as _;

use crate::config::RunConfig;
use crate::error::AppResult;
use crate::io::demand;
use crate::policy::{
    compare_policies, DemandStats, PolicyOptimizationRequest, PolicyRecommendation, PolicyType,
};

impl RunConfig {
    /// The request described by this scenario's own demand figures.
    pub fn request(&self) -> PolicyOptimizationRequest {
        PolicyOptimizationRequest {
            item_id: self.item_id.clone(),
            location_id: self.location_id.clone(),
            policy_type: PolicyType::Ss.as_str().to_string(),
            demand_mean: self.demand_mean,
            demand_std: self.demand_std,
            lead_time_days: self.lead_time_days,
            holding_cost_rate: self.holding_cost_rate,
            ordering_cost: self.ordering_cost,
            service_level: self.service_level,
        }
    }
}

/// Validates the scenario's request and ranks all four policies on it.
pub fn compare_scenario(config: &RunConfig) -> AppResult<Vec<PolicyRecommendation>> {
    let request = config.request();
    request.validate()?;
    Ok(compare_policies(&request)?)
}

/// Result of the `demo` command.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub stats: DemandStats,
    pub ranking: Vec<PolicyRecommendation>,
}

/// Synthesizes a demand history from the scenario, measures it, and ranks the
/// policies on the measured statistics rather than the configured ones.
pub fn demo_scenario(config: &RunConfig) -> AppResult<DemoReport> {
    let history = demand::generate_normal_demand(
        config.history_days,
        config.demand_mean,
        config.demand_std,
        config.seed,
    )?;
    let stats = DemandStats::from_history(&history)?;

    let request = stats.into_request(
        config.item_id.as_str(),
        config.location_id.as_str(),
        PolicyType::Ss,
        &config.cost_parameters(),
    );
    request.validate()?;

    Ok(DemoReport {
        stats,
        ranking: compare_policies(&request)?,
    })
}

/// Renders a ranking as the cost table printed by `compare` and `demo`.
pub fn format_ranking(ranked: &[PolicyRecommendation]) -> String {
    let mut out = String::from("=== Cost Analysis ===\n");
    for rec in ranked {
        let params = rec
            .optimal_parameters
            .iter()
            .map(|(name, value)| format!("{name}={value:.2}"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "{:<10} total ${:>10.2}  safety stock {:>8.2}  orders/yr {:>7.2}  [{}]",
            rec.policy_type.as_str(),
            rec.total_cost,
            rec.safety_stock,
            rec.annual_orders,
            params
        );
    }
    out
}
