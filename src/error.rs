// src/error.rs

use thiserror::Error;

/// Every way a simulation can be rejected before its first period runs.
///
/// Once a configuration validates, the per-period loop cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("input error: {0}")]
    Input(#[from] InputError),
}

/// The requested policy is unknown, or undefined for the given parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown policy '{0}' (expected one of: eoq, basestock, newsvendor)")]
    UnknownPolicy(String),

    #[error(
        "newsvendor critical fractile (p - c) / (p + h) = {fractile} must lie in (0, 1); \
         got p = {backlog_cost}, c = {purchase_cost}, h = {holding_cost}"
    )]
    CriticalFractileOutOfRange {
        fractile: f64,
        backlog_cost: f64,
        purchase_cost: f64,
        holding_cost: f64,
    },

    #[error("invalid demand distribution: {0}")]
    DemandDistribution(String),

    #[error("policy parameter '{name}' evaluates to {value}; the inputs are too extreme")]
    NonFiniteParameter { name: &'static str, value: f64 },
}

/// A parameter is outside the domain the engine accepts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("horizon must be at least one period, got {0}")]
    NonPositiveHorizon(i64),

    #[error("lead time cannot be negative, got {0}")]
    NegativeLeadTime(i64),

    #[error("horizon of {periods} periods exceeds the maximum of {max}")]
    HorizonTooLong { periods: i64, max: i64 },

    #[error("lead time of {lead_time} periods exceeds the maximum of {max}")]
    LeadTimeTooLong { lead_time: i64, max: i64 },

    #[error("parameter '{name}' = {value} is invalid: expected {expected}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("demand in period {period} is {value}; demand must be finite and non-negative")]
    NegativeDemand { period: usize, value: f64 },

    #[error("demand series covers {actual} periods but the horizon is {expected}")]
    DemandLengthMismatch { expected: usize, actual: usize },
}

/// Failures while persisting a run's history.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
