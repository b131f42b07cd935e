// src/simulation/config.rs

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ConfigurationError, InputError, SimulationError};
use crate::simulation::costs::CostRates;

/// The three replenishment policies the engine can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Eoq,
    BaseStock,
    Newsvendor,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::Eoq,
        PolicyKind::BaseStock,
        PolicyKind::Newsvendor,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            PolicyKind::Eoq => "eoq",
            PolicyKind::BaseStock => "basestock",
            PolicyKind::Newsvendor => "newsvendor",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eoq" => Ok(PolicyKind::Eoq),
            "basestock" | "base-stock" | "base_stock" => Ok(PolicyKind::BaseStock),
            "newsvendor" => Ok(PolicyKind::Newsvendor),
            _ => Err(ConfigurationError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Mean and standard deviation of per-period demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandProfile {
    pub mean: f64,
    pub std_dev: f64,
}

/// Constants used when precomputing policy parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyTuning {
    /// Setup-cost proxy `K` in the EOQ formula.
    pub setup_cost: f64,
    /// Safety factor `z` applied to lead-time demand variability (1.65 ~ 95% service).
    pub safety_factor: f64,
}

impl Default for PolicyTuning {
    fn default() -> Self {
        Self {
            setup_cost: 100.0,
            safety_factor: 1.65,
        }
    }
}

/// Longest horizon a single run accepts.
pub const MAX_PERIODS: i64 = 1_000_000;
/// Longest lead time a single run accepts.
pub const MAX_LEAD_TIME: i64 = 1_000_000;

/// Raw parameters as they arrive from a caller or the command line.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub policy: String,
    pub holding_cost: f64,
    pub purchase_cost: f64,
    pub backlog_cost: f64,
    pub mean_demand: f64,
    pub std_dev_demand: f64,
    pub lead_time: i64,
    pub periods: i64,
    pub seed: u64,
    pub tuning: PolicyTuning,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            policy: PolicyKind::BaseStock.tag().to_string(),
            holding_cost: 1.0,
            purchase_cost: 10.0,
            backlog_cost: 30.0,
            mean_demand: 100.0,
            std_dev_demand: 25.0,
            lead_time: 2,
            periods: 365,
            seed: 7,
            tuning: PolicyTuning::default(),
        }
    }
}

impl SimulationParams {
    /// Checks every parameter and produces a typed configuration.
    ///
    /// Policy-specific preconditions (the newsvendor fractile) are checked when the
    /// policy itself is built, which also happens before the first period.
    pub fn validate(&self) -> Result<SimulationConfig, SimulationError> {
        let policy: PolicyKind = self.policy.parse()?;

        if self.periods < 1 {
            return Err(InputError::NonPositiveHorizon(self.periods).into());
        }
        if self.periods > MAX_PERIODS {
            return Err(InputError::HorizonTooLong {
                periods: self.periods,
                max: MAX_PERIODS,
            }
            .into());
        }
        if self.lead_time < 0 {
            return Err(InputError::NegativeLeadTime(self.lead_time).into());
        }
        if self.lead_time > MAX_LEAD_TIME {
            return Err(InputError::LeadTimeTooLong {
                lead_time: self.lead_time,
                max: MAX_LEAD_TIME,
            }
            .into());
        }

        positive("h", self.holding_cost)?;
        non_negative("c", self.purchase_cost)?;
        positive("p", self.backlog_cost)?;
        non_negative("mu", self.mean_demand)?;
        non_negative("sigma", self.std_dev_demand)?;
        positive("setup_cost", self.tuning.setup_cost)?;
        if !self.tuning.safety_factor.is_finite() {
            return Err(InputError::InvalidParameter {
                name: "safety_factor",
                value: self.tuning.safety_factor,
                expected: "a finite number",
            }
            .into());
        }

        Ok(SimulationConfig {
            policy,
            costs: CostRates {
                holding: self.holding_cost,
                purchase: self.purchase_cost,
                backlog: self.backlog_cost,
            },
            demand: DemandProfile {
                mean: self.mean_demand,
                std_dev: self.std_dev_demand,
            },
            lead_time: self.lead_time as usize,
            periods: self.periods as usize,
            seed: self.seed,
            tuning: self.tuning,
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidParameter {
            name,
            value,
            expected: "a finite value > 0",
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidParameter {
            name,
            value,
            expected: "a finite value >= 0",
        })
    }
}

/// A validated configuration. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub policy: PolicyKind,
    pub costs: CostRates,
    pub demand: DemandProfile,
    pub lead_time: usize,
    pub periods: usize,
    pub seed: u64,
    pub tuning: PolicyTuning,
}

impl SimulationConfig {
    /// Same configuration, different policy. Used when comparing policies on one demand path.
    pub fn with_policy(&self, policy: PolicyKind) -> Self {
        Self {
            policy,
            ..self.clone()
        }
    }
}
