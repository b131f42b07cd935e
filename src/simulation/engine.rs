// src/simulation/engine.rs

use std::thread;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{InputError, SimulationError};
use crate::io::demand::{generate_normal_demand, DemandSeries};
use crate::model::inventory::InventoryState;
use crate::model::queues::Pipeline;
use crate::simulation::config::{PolicyKind, SimulationConfig, SimulationParams};
use crate::simulation::costs::CostSummary;
use crate::strategy::implementations::ReplenishmentPolicy;
use crate::strategy::traits::OrderPolicy;

/// One row of output per period. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRecord {
    pub t: usize,
    pub demand: f64,
    pub arrivals: f64,
    pub on_hand: f64,
    pub backlog: f64,
    pub order: f64,
    pub holding_cost: f64,
    pub backlog_cost: f64,
    pub purchase_cost: f64,
    pub total_cost: f64,

    // Diagnostics, not part of the persisted columns.
    /// Units shipped this period. With no lead time this also counts backlog cleared
    /// by the period's own order, so it can exceed the stock on hand before shipping.
    #[serde(skip_serializing)]
    pub shipped: f64,
    #[serde(skip_serializing)]
    pub inventory_position: f64,
}

pub struct InventorySimulation {
    config: SimulationConfig,
    policy: ReplenishmentPolicy,

    inventory: InventoryState,
    pipeline: Pipeline,

    demand: DemandSeries,
    current_period: usize,
    pub history: Vec<PeriodRecord>,
}

impl InventorySimulation {
    /// Builds a run with demand drawn from the configured distribution and seed.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let policy = ReplenishmentPolicy::from_config(&config)?;
        let demand = generate_normal_demand(
            config.periods,
            config.demand.mean,
            config.demand.std_dev,
            config.seed,
        )?;
        Ok(Self::assemble(config, policy, demand))
    }

    /// Builds a run over a caller-supplied demand series covering exactly `periods`.
    pub fn with_demand(
        config: SimulationConfig,
        demand: DemandSeries,
    ) -> Result<Self, SimulationError> {
        let policy = ReplenishmentPolicy::from_config(&config)?;
        if demand.len() != config.periods {
            return Err(InputError::DemandLengthMismatch {
                expected: config.periods,
                actual: demand.len(),
            }
            .into());
        }
        Ok(Self::assemble(config, policy, demand))
    }

    fn assemble(
        config: SimulationConfig,
        policy: ReplenishmentPolicy,
        demand: DemandSeries,
    ) -> Self {
        Self {
            pipeline: Pipeline::new(config.lead_time),
            inventory: InventoryState::new(),
            history: Vec::with_capacity(config.periods),
            current_period: 0,
            config,
            policy,
            demand,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn policy(&self) -> &ReplenishmentPolicy {
        &self.policy
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn inventory(&self) -> InventoryState {
        self.inventory
    }

    pub fn is_finished(&self) -> bool {
        self.current_period >= self.config.periods
    }

    pub fn run(&mut self) {
        info!(
            policy = %self.config.policy,
            lead_time = self.config.lead_time,
            periods = self.config.periods,
            seed = self.config.seed,
            target = self.policy.target_level(),
            "starting simulation"
        );

        while !self.is_finished() {
            self.step();
        }

        let summary = self.cost_summary();
        let end = self.inventory();
        info!(
            policy = %self.config.policy,
            total_cost = summary.total_cost,
            fill_rate = summary.fill_rate,
            on_hand = end.on_hand,
            backlog = end.backlog,
            "simulation complete"
        );
    }

    /// Advances one period. Returns `None` once the horizon is exhausted.
    pub fn step(&mut self) -> Option<&PeriodRecord> {
        if self.is_finished() {
            return None;
        }
        let t = self.current_period;

        // 1. Arrivals: the head of the pipeline lands on the shelf.
        let arrivals = self.pipeline.advance();
        self.inventory.receive(arrivals);

        // 2. Demand: ship against current demand plus backlog, owe the rest.
        let demand = self.demand.get(t).unwrap_or(0.0);
        let mut shipped = self.inventory.fulfill(demand);

        // 3. Decision on the inventory position after shipping.
        let position = self.inventory.position(self.pipeline.in_transit());
        let order = self.policy.order_quantity(position);

        // 4. Placement. With no lead time the order is usable at once and
        //    goes to backlog before the shelf.
        let immediate = self.pipeline.inject(order);
        if immediate > 0.0 {
            shipped += self.inventory.receive_immediate(immediate);
        }

        // 5. Record.
        let costs = self
            .config
            .costs
            .assess(self.inventory.on_hand, self.inventory.backlog, order);

        debug!(
            t,
            demand,
            arrivals,
            on_hand = self.inventory.on_hand,
            backlog = self.inventory.backlog,
            position,
            order,
            total_cost = costs.total,
            "period"
        );

        self.history.push(PeriodRecord {
            t,
            demand,
            arrivals,
            on_hand: self.inventory.on_hand,
            backlog: self.inventory.backlog,
            order,
            holding_cost: costs.holding,
            backlog_cost: costs.backlog,
            purchase_cost: costs.purchase,
            total_cost: costs.total,
            shipped,
            inventory_position: position,
        });
        self.current_period += 1;
        self.history.last()
    }

    pub fn cost_summary(&self) -> CostSummary {
        CostSummary::from_history(&self.history)
    }

    pub fn into_history(self) -> Vec<PeriodRecord> {
        self.history
    }
}

/// Runs a validated configuration to completion.
pub fn run_simulation(config: SimulationConfig) -> Result<Vec<PeriodRecord>, SimulationError> {
    let mut sim = InventorySimulation::new(config)?;
    sim.run();
    Ok(sim.into_history())
}

/// Validates the parameters and runs the simulation to completion.
///
/// Every error is raised before the first period; a validated run cannot fail.
#[allow(clippy::too_many_arguments)]
pub fn simulate(
    policy: &str,
    h: f64,
    c: f64,
    p: f64,
    mu: f64,
    sigma: f64,
    lead: i64,
    periods: i64,
    seed: u64,
) -> Result<Vec<PeriodRecord>, SimulationError> {
    let params = SimulationParams {
        policy: policy.to_string(),
        holding_cost: h,
        purchase_cost: c,
        backlog_cost: p,
        mean_demand: mu,
        std_dev_demand: sigma,
        lead_time: lead,
        periods,
        seed,
        ..SimulationParams::default()
    };
    run_simulation(params.validate()?)
}

/// Cost outcome of one policy within a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyComparison {
    pub policy: PolicyKind,
    pub summary: CostSummary,
}

/// Runs every policy against the same demand path, one thread per policy.
///
/// The policy named in `params` is replaced by each kind in turn. All three runs are built
/// before any run starts, so a policy that is undefined for these costs fails
/// the whole comparison up front.
pub fn compare_policies(params: &SimulationParams) -> Result<Vec<PolicyComparison>, SimulationError> {
    let base = params.validate()?;
    let sims = PolicyKind::ALL
        .iter()
        .map(|&kind| InventorySimulation::new(base.with_policy(kind)))
        .collect::<Result<Vec<_>, _>>()?;

    let results: Vec<PolicyComparison> = thread::scope(|scope| {
        let handles: Vec<_> = sims
            .into_iter()
            .map(|mut sim| {
                scope.spawn(move || {
                    sim.run();
                    PolicyComparison {
                        policy: sim.config().policy,
                        summary: sim.cost_summary(),
                    }
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use crate::io::demand::generate_constant_demand;

    fn params(policy: &str) -> SimulationParams {
        SimulationParams {
            policy: policy.into(),
            ..SimulationParams::default()
        }
    }

    #[test]
    fn runs_for_the_full_horizon() {
        let config = SimulationParams {
            periods: 30,
            ..params("basestock")
        }
        .validate()
        .unwrap();
        let records = run_simulation(config).unwrap();
        assert_eq!(records.len(), 30);
        assert!(records.iter().enumerate().all(|(i, r)| r.t == i));
    }

    #[test]
    fn step_stops_at_horizon() {
        let config = SimulationParams {
            periods: 2,
            ..params("eoq")
        }
        .validate()
        .unwrap();
        let mut sim = InventorySimulation::new(config).unwrap();
        assert!(sim.step().is_some());
        assert!(sim.step().is_some());
        assert!(sim.is_finished());
        assert!(sim.step().is_none());
        assert_eq!(sim.history.len(), 2);
    }

    #[test]
    fn first_orders_wait_for_lead_time() {
        let config = SimulationParams {
            lead_time: 3,
            std_dev_demand: 0.0,
            periods: 5,
            ..params("basestock")
        }
        .validate()
        .unwrap();
        let records = run_simulation(config).unwrap();

        assert_eq!(records[0].arrivals, 0.0);
        assert_eq!(records[1].arrivals, 0.0);
        assert_eq!(records[2].arrivals, 0.0);
        assert_eq!(records[3].arrivals, records[0].order);
        assert_eq!(records[4].arrivals, records[1].order);
    }

    #[test]
    fn base_stock_holds_position_at_target() {
        let config = SimulationParams {
            lead_time: 2,
            std_dev_demand: 0.0,
            periods: 8,
            ..params("basestock")
        }
        .validate()
        .unwrap();
        let records = run_simulation(config).unwrap();

        // S = 200. After the first decision the position is restored every period,
        // so each later order replaces exactly one period of demand.
        assert_eq!(records[0].order, 300.0);
        for r in &records[1..] {
            assert_eq!(r.order, 100.0);
        }
    }

    #[test]
    fn immediate_receipt_counts_as_shipped() {
        let config = SimulationParams {
            lead_time: 0,
            std_dev_demand: 0.0,
            periods: 3,
            ..params("basestock")
        }
        .validate()
        .unwrap();
        let mut sim = InventorySimulation::new(config).unwrap();
        sim.run();

        // Nothing on hand before shipping, yet the period's own order clears the demand.
        assert_eq!(sim.history[0].shipped, 100.0);
        assert_eq!(sim.history[0].backlog, 0.0);

        let last = sim.history.last().unwrap();
        assert_eq!(sim.inventory().on_hand, last.on_hand);
        assert_eq!(sim.inventory().backlog, last.backlog);
    }

    #[test]
    fn demand_length_must_match_horizon() {
        let config = SimulationParams {
            periods: 4,
            ..params("basestock")
        }
        .validate()
        .unwrap();
        let demand = generate_constant_demand(3, 10.0).unwrap();
        assert_eq!(
            InventorySimulation::with_demand(config, demand).err(),
            Some(SimulationError::Input(InputError::DemandLengthMismatch {
                expected: 4,
                actual: 3
            }))
        );
    }

    #[test]
    fn simulate_fails_before_running() {
        assert!(matches!(
            simulate("lost-sales", 1.0, 10.0, 30.0, 100.0, 25.0, 2, 10, 7),
            Err(SimulationError::Configuration(_))
        ));
        assert!(matches!(
            simulate("newsvendor", 1.0, 40.0, 30.0, 100.0, 25.0, 2, 10, 7),
            Err(SimulationError::Configuration(_))
        ));
        assert!(matches!(
            simulate("eoq", 1.0, 10.0, 30.0, 100.0, 25.0, 2, 0, 7),
            Err(SimulationError::Input(InputError::NonPositiveHorizon(0)))
        ));
    }

    #[test]
    fn extreme_inputs_are_rejected_not_run() {
        assert!(matches!(
            simulate("eoq", 1e-300, 10.0, 30.0, 1e10, 0.0, 0, 3, 7),
            Err(SimulationError::Configuration(
                ConfigurationError::NonFiniteParameter { .. }
            ))
        ));
        assert!(matches!(
            simulate("basestock", 1.0, 10.0, 30.0, 100.0, 25.0, i64::MAX, 1, 7),
            Err(SimulationError::Input(InputError::LeadTimeTooLong { .. }))
        ));
        assert!(matches!(
            simulate("basestock", 1.0, 10.0, 30.0, 100.0, 25.0, 1, i64::MAX, 7),
            Err(SimulationError::Input(InputError::HorizonTooLong { .. }))
        ));
    }

    #[test]
    fn comparison_covers_every_policy() {
        let results = compare_policies(&SimulationParams {
            periods: 60,
            ..SimulationParams::default()
        })
        .unwrap();
        let kinds: Vec<_> = results.iter().map(|r| r.policy).collect();
        assert_eq!(kinds, PolicyKind::ALL.to_vec());
        assert!(results.iter().all(|r| r.summary.periods == 60));
    }
}
