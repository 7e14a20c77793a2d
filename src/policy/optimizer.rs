// src/policy/optimizer.rs

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::error::{PolicyError, PolicyResult};
use crate::policy::formulas::{is_tabulated, round2, FALLBACK_Z_SCORE};
use crate::policy::implementations::{BaseStockPolicy, EoqPolicy, MinMaxPolicy, SsPolicy};
use crate::policy::types::{
    require_positive, InventoryPolicy, PolicyInputs, PolicyOptimizationRequest,
    PolicyRecommendation, PolicyType,
};

impl PolicyType {
    /// The calculator for this policy.
    pub fn calculator(&self) -> &'static dyn InventoryPolicy {
        match self {
            PolicyType::Ss => &SsPolicy,
            PolicyType::MinMax => &MinMaxPolicy,
            PolicyType::Eoq => &EoqPolicy,
            PolicyType::BaseStock => &BaseStockPolicy,
        }
    }
}

impl PolicyInputs {
    /// Extracts the numeric inputs, rejecting values that would make the
    /// formulas divide by zero or return NaN.
    pub fn from_request(request: &PolicyOptimizationRequest) -> PolicyResult<Self> {
        require_positive("demand_mean", request.demand_mean)?;
        require_positive("holding_cost_rate", request.holding_cost_rate)?;

        if request.lead_time_days <= 0 {
            return Err(PolicyError::invalid(
                "lead_time_days",
                format!("must be > 0, got {}", request.lead_time_days),
            ));
        }
        let lead_time_days = u32::try_from(request.lead_time_days).map_err(|_| {
            PolicyError::invalid(
                "lead_time_days",
                format!(
                    "must be at most {} days, got {}",
                    u32::MAX,
                    request.lead_time_days
                ),
            )
        })?;

        if !is_tabulated(request.service_level) {
            warn!(
                service_level = request.service_level,
                z = FALLBACK_Z_SCORE,
                item_id = %request.item_id,
                "service level not in z-score table, using fallback"
            );
        }

        Ok(Self {
            demand_mean: request.demand_mean,
            demand_std: request.demand_std,
            lead_time_days,
            holding_cost_rate: request.holding_cost_rate,
            ordering_cost: request.ordering_cost,
            service_level: request.service_level,
        })
    }
}

/// Computes the recommendation for the policy named in the request.
///
/// Fails with `UnsupportedPolicy` for an unknown policy type before any
/// arithmetic is done.
pub fn optimize(request: &PolicyOptimizationRequest) -> PolicyResult<PolicyRecommendation> {
    let policy_type = request.policy_type.parse::<PolicyType>().map_err(|e| {
        warn!(policy_type = %request.policy_type, item_id = %request.item_id, "unsupported policy type");
        e
    })?;

    let inputs = PolicyInputs::from_request(request)?;
    let recommendation = recommend(policy_type.calculator(), &inputs)?;

    info!(
        policy_type = %policy_type,
        item_id = %request.item_id,
        location_id = %request.location_id,
        total_cost = recommendation.total_cost,
        "policy optimization completed"
    );

    Ok(recommendation)
}

/// Runs every policy on the same parameters, cheapest first.
///
/// The request's own `policy_type` is ignored. Ties keep `PolicyType::ALL`
/// order.
pub fn compare_policies(
    request: &PolicyOptimizationRequest,
) -> PolicyResult<Vec<PolicyRecommendation>> {
    let inputs = PolicyInputs::from_request(request)?;

    let mut recommendations = PolicyType::ALL
        .iter()
        .map(|policy| recommend(policy.calculator(), &inputs))
        .collect::<PolicyResult<Vec<_>>>()?;

    recommendations.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));

    if let Some(best) = recommendations.first() {
        info!(
            item_id = %request.item_id,
            location_id = %request.location_id,
            best = %best.policy_type,
            total_cost = best.total_cost,
            "policy comparison completed"
        );
    }

    Ok(recommendations)
}

fn recommend(
    policy: &dyn InventoryPolicy,
    inputs: &PolicyInputs,
) -> PolicyResult<PolicyRecommendation> {
    let outcome = policy.evaluate(inputs)?;

    let optimal_parameters = outcome
        .parameters
        .iter()
        .map(|(name, value)| (name.to_string(), round2(*value)))
        .collect::<BTreeMap<_, _>>();

    let total_cost = round2(outcome.total_cost);

    Ok(PolicyRecommendation {
        policy_type: policy.policy_type(),
        optimal_parameters,
        expected_cost: total_cost,
        service_level: round2(inputs.service_level),
        safety_stock: round2(outcome.safety_stock),
        reorder_point: round2(outcome.reorder_point),
        order_quantity: round2(outcome.order_quantity),
        annual_orders: round2(outcome.annual_orders),
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(policy_type: &str) -> PolicyOptimizationRequest {
        PolicyOptimizationRequest {
            item_id: "SKU-42".to_string(),
            location_id: "DC-EAST".to_string(),
            policy_type: policy_type.to_string(),
            demand_mean: 20.0,
            demand_std: 5.0,
            lead_time_days: 7,
            holding_cost_rate: 1.0,
            ordering_cost: 25.0,
            service_level: 0.95,
        }
    }

    #[test]
    fn ss_end_to_end() {
        let rec = optimize(&request("s_s")).unwrap();

        assert_eq!(rec.policy_type, PolicyType::Ss);
        assert_eq!(rec.safety_stock, 21.83);
        assert_eq!(rec.reorder_point, 161.83);
        assert_eq!(rec.order_quantity, 31.62);
        assert_eq!(rec.optimal_parameters["reorder_point"], 161.83);
        assert_eq!(rec.optimal_parameters["order_up_to"], 193.45);
        assert_eq!(rec.optimal_parameters.len(), 2);
        assert_eq!(rec.annual_orders, 230.85);
        assert_eq!(rec.service_level, 0.95);
    }

    #[test]
    fn expected_cost_equals_total_cost_for_every_policy() {
        for policy in PolicyType::ALL {
            let rec = optimize(&request(policy.as_str())).unwrap();
            assert_eq!(rec.policy_type, policy);
            assert_eq!(rec.expected_cost, rec.total_cost, "{policy}");
        }
    }

    #[test]
    fn optimal_parameter_keys_per_policy() {
        let keys = |p: &str| {
            optimize(&request(p))
                .unwrap()
                .optimal_parameters
                .into_keys()
                .collect::<Vec<_>>()
        };
        assert_eq!(keys("s_s"), ["order_up_to", "reorder_point"]);
        assert_eq!(keys("min_max"), ["max_level", "min_level"]);
        assert_eq!(keys("eoq"), ["order_quantity", "reorder_point"]);
        assert_eq!(keys("base_stock"), ["base_stock"]);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = optimize(&request("unknown")).unwrap_err();
        assert_eq!(err, PolicyError::UnsupportedPolicy("unknown".to_string()));
    }

    #[test]
    fn unknown_policy_wins_over_bad_numbers() {
        let mut r = request("fifo");
        r.holding_cost_rate = 0.0;
        assert!(matches!(optimize(&r), Err(PolicyError::UnsupportedPolicy(_))));
    }

    #[test]
    fn non_positive_divisors_fail_fast() {
        let mut r = request("eoq");
        r.holding_cost_rate = 0.0;
        assert!(matches!(
            optimize(&r),
            Err(PolicyError::InvalidParameter { field: "holding_cost_rate", .. })
        ));

        let mut r = request("base_stock");
        r.lead_time_days = 0;
        assert!(matches!(
            optimize(&r),
            Err(PolicyError::InvalidParameter { field: "lead_time_days", .. })
        ));

        let mut r = request("min_max");
        r.demand_mean = -3.0;
        assert!(matches!(
            optimize(&r),
            Err(PolicyError::InvalidParameter { field: "demand_mean", .. })
        ));
    }

    #[test]
    fn oversized_lead_time_has_its_own_message() {
        let mut r = request("eoq");
        r.lead_time_days = i64::from(u32::MAX) + 1;
        match optimize(&r) {
            Err(PolicyError::InvalidParameter { field, message }) => {
                assert_eq!(field, "lead_time_days");
                assert!(message.contains("at most"), "{message}");
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }

        r.lead_time_days = -4;
        match optimize(&r) {
            Err(PolicyError::InvalidParameter { message, .. }) => {
                assert!(message.contains("must be > 0"), "{message}");
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn negative_ordering_cost_names_ordering_cost() {
        let mut r = request("s_s");
        r.ordering_cost = -25.0;
        assert!(matches!(
            optimize(&r),
            Err(PolicyError::InvalidParameter { field: "ordering_cost", .. })
        ));
    }

    #[test]
    fn fallback_service_level_still_compares_all_policies() {
        let mut r = request("s_s");
        r.service_level = 0.97;
        let ranked = compare_policies(&r).unwrap();
        assert_eq!(ranked.len(), 4);
        assert!(ranked.iter().all(|rec| rec.service_level == 0.97));
    }

    #[test]
    fn base_stock_reports_daily_replenishment() {
        let rec = optimize(&request("base_stock")).unwrap();
        assert_eq!(rec.annual_orders, 365.0);
        assert_eq!(rec.order_quantity, 20.0);
        assert_eq!(rec.reorder_point, rec.optimal_parameters["base_stock"]);
    }

    #[test]
    fn comparison_is_sorted_by_cost() {
        let ranked = compare_policies(&request("s_s")).unwrap();
        assert_eq!(ranked.len(), 4);
        assert!(ranked.windows(2).all(|w| w[0].total_cost <= w[1].total_cost));
        // holding-only cost is by far the cheapest for this item
        assert_eq!(ranked[0].policy_type, PolicyType::BaseStock);
    }

    #[test]
    fn comparison_ignores_request_policy_type() {
        assert_eq!(compare_policies(&request("unknown")).unwrap().len(), 4);
    }
}
