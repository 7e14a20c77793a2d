// src/io/reporting.rs

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::AppResult;
use crate::policy::PolicyRecommendation;

/// One CSV row per recommendation.
///
/// CSV has no nested maps, so `optimal_parameters` is flattened to
/// `name=value;name=value` in key order.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRecord {
    pub item_id: String,
    pub location_id: String,
    pub policy_type: String,
    pub optimal_parameters: String,
    pub expected_cost: f64,
    pub service_level: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub order_quantity: f64,
    pub annual_orders: f64,
    pub total_cost: f64,
}

impl RecommendationRecord {
    pub fn new(item_id: &str, location_id: &str, rec: &PolicyRecommendation) -> Self {
        let optimal_parameters = rec
            .optimal_parameters
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(";");

        Self {
            item_id: item_id.to_string(),
            location_id: location_id.to_string(),
            policy_type: rec.policy_type.to_string(),
            optimal_parameters,
            expected_cost: rec.expected_cost,
            service_level: rec.service_level,
            safety_stock: rec.safety_stock,
            reorder_point: rec.reorder_point,
            order_quantity: rec.order_quantity,
            annual_orders: rec.annual_orders,
            total_cost: rec.total_cost,
        }
    }
}

/// Writes recommendation rows to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/policies.csv").
/// * `data` - The rows to write, in order.
pub fn write_recommendations(
    file_path: impl AsRef<Path>,
    data: &[RecommendationRecord],
) -> AppResult<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = data.len(), path = %path.display(), "recommendations exported");
    Ok(())
}
