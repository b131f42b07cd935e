// src/io/demand.rs

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{ConfigurationError, InputError};

/// Demand realizations for every period of a run. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandSeries(Vec<f64>);

impl DemandSeries {
    /// Wraps caller-supplied demand. Every value must be finite and non-negative.
    pub fn from_values(values: Vec<f64>) -> Result<Self, InputError> {
        if let Some((period, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(InputError::NegativeDemand { period, value });
        }
        Ok(Self(values))
    }

    pub fn get(&self, period: usize) -> Option<f64> {
        self.0.get(period).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Generates a demand series where every period has the exact same demand.
/// Useful for steady-state checks.
pub fn generate_constant_demand(periods: usize, value: f64) -> Result<DemandSeries, InputError> {
    DemandSeries::from_values(vec![value; periods])
}

/// Generates demand from a Normal distribution, floored at zero.
///
/// The same `(mean, std_dev, periods, seed)` always yields the same series.
///
/// # Arguments
/// * `periods` - Length of the simulation.
/// * `mean` - The average demand per period.
/// * `std_dev` - The standard deviation of per-period demand.
/// * `seed` - Seed for the random source.
pub fn generate_normal_demand(
    periods: usize,
    mean: f64,
    std_dev: f64,
    seed: u64,
) -> Result<DemandSeries, ConfigurationError> {
    let normal = Normal::new(mean, std_dev)
        .map_err(|e| ConfigurationError::DemandDistribution(e.to_string()))?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    // Demand cannot be negative.
    let values = (0..periods)
        .map(|_| normal.sample(&mut rng).max(0.0))
        .collect();

    Ok(DemandSeries(values))
}
