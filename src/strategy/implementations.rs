// src/strategy/implementations.rs

use tracing::debug;

use crate::error::ConfigurationError;
use crate::simulation::config::{PolicyKind, SimulationConfig};
use crate::strategy::optimization::{
    critical_fractile, economic_order_quantity, lead_time_stock_level, normal_quantile,
};
use crate::strategy::traits::OrderPolicy;

/// Precomputed parameters must be finite; extreme inputs can overflow them.
fn finite(name: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::NonFiniteParameter { name, value })
    }
}

// =========================================================================
// 1. EOQ Policy (Reorder Point, Fixed Order Quantity)
// =========================================================================

/// Continuous-review (R, Q) logic checked once per period.
///
/// Orders exactly `Q` whenever the inventory position is at or below `R`.
#[derive(Debug, Clone, PartialEq)]
pub struct EoqPolicy {
    order_quantity: f64,
    reorder_point: f64,
}

impl EoqPolicy {
    pub fn new(order_quantity: f64, reorder_point: f64) -> Self {
        Self {
            order_quantity,
            reorder_point,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigurationError> {
        let q = economic_order_quantity(
            config.tuning.setup_cost,
            config.demand.mean,
            config.costs.holding,
        );
        let r = lead_time_stock_level(
            config.lead_time,
            config.demand.mean,
            config.demand.std_dev,
            config.tuning.safety_factor,
        );
        Ok(Self::new(finite("Q", q)?, finite("R", r)?))
    }

    pub fn fixed_quantity(&self) -> f64 {
        self.order_quantity
    }

    pub fn reorder_point(&self) -> f64 {
        self.reorder_point
    }
}

impl OrderPolicy for EoqPolicy {
    fn order_quantity(&self, inventory_position: f64) -> f64 {
        // Inclusive threshold: sitting exactly on R triggers an order.
        if inventory_position <= self.reorder_point {
            self.order_quantity
        } else {
            0.0
        }
    }

    fn target_level(&self) -> f64 {
        self.reorder_point
    }
}

// =========================================================================
// 2. Base Stock Policy (Order-Up-To)
// =========================================================================

/// Brings the inventory position back up to `S` every period.
///
/// If the position is already above `S`, we order 0.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseStockPolicy {
    target_stock: f64,
}

impl BaseStockPolicy {
    pub fn new(target_stock: f64) -> Self {
        Self { target_stock }
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigurationError> {
        let s = lead_time_stock_level(
            config.lead_time,
            config.demand.mean,
            config.demand.std_dev,
            config.tuning.safety_factor,
        );
        Ok(Self::new(finite("S", s)?))
    }
}

impl OrderPolicy for BaseStockPolicy {
    fn order_quantity(&self, inventory_position: f64) -> f64 {
        (self.target_stock - inventory_position).max(0.0)
    }

    fn target_level(&self) -> f64 {
        self.target_stock
    }
}

// =========================================================================
// 3. Newsvendor Policy (Critical-Fractile Order-Up-To)
// =========================================================================

/// Orders up to the critical-fractile quantile of single-period demand.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsvendorPolicy {
    critical_fractile: f64,
    quantile: f64,
}

impl NewsvendorPolicy {
    /// Fails when `(p - c) / (p + h)` falls outside the open interval (0, 1),
    /// where the quantile is undefined.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigurationError> {
        let costs = &config.costs;
        let crit = critical_fractile(costs.backlog, costs.purchase, costs.holding);

        let defined = costs.backlog + costs.holding > 0.0 && crit > 0.0 && crit < 1.0;
        if !defined {
            return Err(ConfigurationError::CriticalFractileOutOfRange {
                fractile: crit,
                backlog_cost: costs.backlog,
                purchase_cost: costs.purchase,
                holding_cost: costs.holding,
            });
        }

        let quantile = finite(
            "quantile",
            normal_quantile(config.demand.mean, config.demand.std_dev, crit)?,
        )?;
        Ok(Self {
            critical_fractile: crit,
            quantile,
        })
    }

    pub fn critical_fractile(&self) -> f64 {
        self.critical_fractile
    }

    pub fn quantile(&self) -> f64 {
        self.quantile
    }
}

impl OrderPolicy for NewsvendorPolicy {
    fn order_quantity(&self, inventory_position: f64) -> f64 {
        (self.quantile - inventory_position).max(0.0)
    }

    fn target_level(&self) -> f64 {
        self.quantile
    }
}

// =========================================================================
// Selection
// =========================================================================

/// The policy chosen for a run, with its parameters precomputed.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplenishmentPolicy {
    Eoq(EoqPolicy),
    BaseStock(BaseStockPolicy),
    Newsvendor(NewsvendorPolicy),
}

impl ReplenishmentPolicy {
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigurationError> {
        let policy = match config.policy {
            PolicyKind::Eoq => {
                let p = EoqPolicy::from_config(config)?;
                debug!(q = p.order_quantity, r = p.reorder_point, "eoq parameters");
                ReplenishmentPolicy::Eoq(p)
            }
            PolicyKind::BaseStock => {
                let p = BaseStockPolicy::from_config(config)?;
                debug!(s = p.target_stock, "base-stock parameters");
                ReplenishmentPolicy::BaseStock(p)
            }
            PolicyKind::Newsvendor => {
                let p = NewsvendorPolicy::from_config(config)?;
                debug!(
                    crit = p.critical_fractile,
                    quantile = p.quantile,
                    "newsvendor parameters"
                );
                ReplenishmentPolicy::Newsvendor(p)
            }
        };
        Ok(policy)
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            ReplenishmentPolicy::Eoq(_) => PolicyKind::Eoq,
            ReplenishmentPolicy::BaseStock(_) => PolicyKind::BaseStock,
            ReplenishmentPolicy::Newsvendor(_) => PolicyKind::Newsvendor,
        }
    }

    fn inner(&self) -> &dyn OrderPolicy {
        match self {
            ReplenishmentPolicy::Eoq(p) => p,
            ReplenishmentPolicy::BaseStock(p) => p,
            ReplenishmentPolicy::Newsvendor(p) => p,
        }
    }
}

impl OrderPolicy for ReplenishmentPolicy {
    fn order_quantity(&self, inventory_position: f64) -> f64 {
        self.inner().order_quantity(inventory_position)
    }

    fn target_level(&self) -> f64 {
        self.inner().target_level()
    }
}
