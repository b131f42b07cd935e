//! Periodic-review, single-item inventory simulation under stochastic demand.
//!
//! Evaluates an EOQ reorder-point, base-stock or newsvendor order-up-to policy and
//! records on-hand stock, backlog, orders and costs for every period.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{ConfigurationError, InputError, ReportError, SimulationError};
pub use io::demand::{generate_constant_demand, generate_normal_demand, DemandSeries};
pub use io::reporting::{write_history, write_history_to, DEFAULT_HISTORY_PATH};
pub use simulation::config::{PolicyKind, PolicyTuning, SimulationConfig, SimulationParams};
pub use simulation::costs::{CostRates, CostSummary};
pub use simulation::engine::{
    compare_policies, run_simulation, simulate, InventorySimulation, PeriodRecord,
    PolicyComparison,
};
pub use strategy::implementations::ReplenishmentPolicy;
pub use strategy::traits::OrderPolicy;
