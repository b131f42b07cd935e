// src/strategy/optimization.rs

//! Closed-form inventory parameters used to precompute each policy.
//!
//! All of these are evaluated once per run, never per period.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::ConfigurationError;

/// Calculates the newsvendor Critical Fractile (target service level).
///
/// The fractile balances the margin lost on a shortage (penalty minus unit cost)
/// against the cost of a unit left over (penalty plus holding).
///
/// Formula: CR = (p - c) / (p + h)
///
/// Callers check that the result lies in (0, 1); a zero denominator yields NaN.
pub fn critical_fractile(backlog_cost: f64, purchase_cost: f64, holding_cost: f64) -> f64 {
    (backlog_cost - purchase_cost) / (backlog_cost + holding_cost)
}

/// Quantile of a Normal(mean, std_dev) distribution at `probability`.
///
/// With no variability the distribution is a point mass and every quantile is the mean.
pub fn normal_quantile(
    mean: f64,
    std_dev: f64,
    probability: f64,
) -> Result<f64, ConfigurationError> {
    if std_dev == 0.0 {
        return Ok(mean);
    }
    let normal = Normal::new(mean, std_dev)
        .map_err(|e| ConfigurationError::DemandDistribution(e.to_string()))?;
    Ok(normal.inverse_cdf(probability))
}

/// Economic Order Quantity with a floor of one unit.
///
/// Formula: Q = max(1, sqrt(2 * K * mu / h))
pub fn economic_order_quantity(setup_cost: f64, mean_demand: f64, holding_cost: f64) -> f64 {
    (2.0 * setup_cost * mean_demand / holding_cost).sqrt().max(1.0)
}

/// Lead-time demand plus safety stock.
///
/// # Formula
/// Level = L * mu + z * sqrt(L) * sigma
///
/// Serves as both the EOQ reorder point and the base-stock target. A lead time of
/// zero gives a level of zero.
pub fn lead_time_stock_level(
    lead_time: usize,
    mean_demand: f64,
    std_dev_demand: f64,
    safety_factor: f64,
) -> f64 {
    let lead = lead_time as f64;
    lead * mean_demand + safety_factor * lead.sqrt() * std_dev_demand
}
