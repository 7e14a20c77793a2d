// src/io/requests.rs

use std::path::Path;

use tracing::{info, warn};

use crate::error::AppResult;
use crate::io::reporting::{write_recommendations, RecommendationRecord};
use crate::policy::{optimize, PolicyOptimizationRequest};

/// Requests that passed validation, plus how many rows did not.
#[derive(Debug, Default)]
pub struct LoadedRequests {
    pub requests: Vec<PolicyOptimizationRequest>,
    pub skipped: usize,
}

/// Reads optimization requests from a CSV file whose headers are the request
/// field names.
///
/// Rows that fail to parse or validate are logged with their line number and
/// skipped. Only I/O and header errors abort the read.
pub fn read_requests(file_path: impl AsRef<Path>) -> AppResult<LoadedRequests> {
    let mut rdr = csv::Reader::from_path(file_path.as_ref())?;
    let headers = rdr.headers()?.clone();
    let mut loaded = LoadedRequests::default();
    let mut row = csv::StringRecord::new();

    while rdr.read_record(&mut row)? {
        let line = row.position().map_or(0, |pos| pos.line());

        let parsed = row
            .deserialize::<PolicyOptimizationRequest>(Some(&headers))
            .map_err(|e| e.to_string())
            .and_then(|request| {
                request.validate().map_err(|e| e.to_string())?;
                Ok(request)
            });

        match parsed {
            Ok(request) => loaded.requests.push(request),
            Err(message) => {
                warn!(line, error = %message, "skipping invalid request row");
                loaded.skipped += 1;
            }
        }
    }

    info!(
        rows = loaded.requests.len(),
        skipped = loaded.skipped,
        "requests loaded"
    );
    Ok(loaded)
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub records: Vec<RecommendationRecord>,
    /// Rows read, valid or not.
    pub rows: usize,
    pub skipped: usize,
}

/// Optimizes every request; failures are logged and skipped.
pub fn optimize_batch(requests: &[PolicyOptimizationRequest]) -> BatchSummary {
    let mut summary = BatchSummary {
        rows: requests.len(),
        ..BatchSummary::default()
    };

    for request in requests {
        match optimize(request) {
            Ok(rec) => summary.records.push(RecommendationRecord::new(
                &request.item_id,
                &request.location_id,
                &rec,
            )),
            Err(e) => {
                warn!(
                    item_id = %request.item_id,
                    location_id = %request.location_id,
                    error = %e,
                    "skipping request"
                );
                summary.skipped += 1;
            }
        }
    }

    summary
}

/// Reads `input`, optimizes every valid row and writes the recommendations to
/// `output`. Skipped rows from both stages are counted in the summary.
pub fn run_batch(input: impl AsRef<Path>, output: impl AsRef<Path>) -> AppResult<BatchSummary> {
    let loaded = read_requests(input)?;
    let mut summary = optimize_batch(&loaded.requests);
    summary.rows += loaded.skipped;
    summary.skipped += loaded.skipped;

    write_recommendations(output, &summary.records)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "item_id,location_id,policy_type,demand_mean,demand_std,lead_time_days,holding_cost_rate,ordering_cost,service_level";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_valid_rows() {
        let file = write_csv(&[
            "SKU-1,WH-1,s_s,20,5,7,1,25,0.95",
            "SKU-2,WH-1,base_stock,8,2,3,0.5,10,0.99",
        ]);
        let loaded = read_requests(file.path()).unwrap();
        assert_eq!(loaded.requests.len(), 2);
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.requests[1].policy_type, "base_stock");
        assert_eq!(loaded.requests[1].lead_time_days, 3);
    }

    #[test]
    fn invalid_middle_row_is_skipped() {
        let file = write_csv(&[
            "SKU-1,WH-1,s_s,20,5,7,1,25,0.95",
            "SKU-2,WH-1,eoq,20,5,7,1,25,1.5",
            "SKU-3,WH-1,base_stock,20,5,7,1,25,0.95",
        ]);
        let loaded = read_requests(file.path()).unwrap();

        assert_eq!(loaded.skipped, 1);
        let ids: Vec<&str> = loaded.requests.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, ["SKU-1", "SKU-3"]);
    }

    #[test]
    fn unparseable_row_is_skipped() {
        let file = write_csv(&[
            "SKU-1,WH-1,s_s,twenty,5,7,1,25,0.95",
            "SKU-2,WH-1,eoq,20,5,7,1,25,0.9",
        ]);
        let loaded = read_requests(file.path()).unwrap();
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.requests[0].item_id, "SKU-2");
    }

    #[test]
    fn run_batch_counts_rows_from_both_stages() {
        let input = write_csv(&[
            "SKU-1,WH-1,s_s,20,5,7,1,25,0.95",
            "SKU-2,WH-1,eoq,20,5,7,1,25,1.5",
            "SKU-3,WH-1,base_stock,20,5,7,1,25,0.95",
        ]);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let summary = run_batch(input.path(), &output).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.records[1].item_id, "SKU-3");

        let written = csv::Reader::from_path(&output).unwrap().records().count();
        assert_eq!(written, 2);
    }

    #[test]
    fn batch_skips_failures() {
        let good = PolicyOptimizationRequest {
            item_id: "SKU-1".to_string(),
            location_id: "WH-1".to_string(),
            policy_type: "eoq".to_string(),
            demand_mean: 1000.0,
            demand_std: 0.0,
            lead_time_days: 1,
            holding_cost_rate: 2.0,
            ordering_cost: 50.0,
            service_level: 0.9,
        };
        let mut bad = good.clone();
        bad.policy_type = "kanban".to_string();

        let summary = optimize_batch(&[good, bad]);
        assert_eq!(summary.records.len(), 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.records[0].order_quantity, 223.61);
    }
}
