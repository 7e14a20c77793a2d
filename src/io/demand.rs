// src/io/demand.rs

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::{PolicyError, PolicyResult};

/// A daily demand history where every day has the exact same demand.
pub fn generate_constant_demand(days: usize, value: f64) -> Vec<f64> {
    vec![value; days]
}

/// Generates a daily demand history from a Normal (Bell Curve) distribution.
///
/// # Arguments
/// * `days` - Length of the history.
/// * `mean` - The average daily demand (e.g., 20.0).
/// * `std_dev` - The standard deviation (volatility) (e.g., 5.0).
/// * `seed` - Fixes the sequence when set; otherwise a thread-local RNG is used.
pub fn generate_normal_demand(
    days: usize,
    mean: f64,
    std_dev: f64,
    seed: Option<u64>,
) -> PolicyResult<Vec<f64>> {
    // Normal::new only rejects non-finite spreads
    if !(std_dev >= 0.0 && std_dev.is_finite()) {
        return Err(PolicyError::invalid(
            "demand_std",
            format!("must be a finite value >= 0, got {std_dev}"),
        ));
    }

    let normal = Normal::new(mean, std_dev)
        .map_err(|e| PolicyError::invalid("demand_std", e.to_string()))?;

    let history = match seed {
        Some(seed) => sample(&normal, days, &mut StdRng::seed_from_u64(seed)),
        None => sample(&normal, days, &mut thread_rng()),
    };
    Ok(history)
}

fn sample<R: Rng>(normal: &Normal<f64>, days: usize, rng: &mut R) -> Vec<f64> {
    // Demand cannot be negative
    (0..days).map(|_| normal.sample(&mut *rng).max(0.0)).collect()
}
