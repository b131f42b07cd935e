// src/simulation/costs.rs

use serde::Serialize;

use crate::simulation::engine::PeriodRecord;

/// Per-unit cost rates applied to every period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRates {
    /// `h`: cost per unit on hand at the end of a period.
    pub holding: f64,
    /// `c`: cost per unit ordered.
    pub purchase: f64,
    /// `p`: penalty per unit of backlog at the end of a period.
    pub backlog: f64,
}

/// The cost components of a single period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodCosts {
    pub holding: f64,
    pub backlog: f64,
    pub purchase: f64,
    pub total: f64,
}

impl CostRates {
    /// Costs depend only on the period's own end state and order, never on its neighbours.
    pub fn assess(&self, on_hand: f64, backlog: f64, order: f64) -> PeriodCosts {
        let holding = self.holding * on_hand;
        let backlog = self.backlog * backlog;
        let purchase = self.purchase * order;
        PeriodCosts {
            holding,
            backlog,
            purchase,
            total: holding + backlog + purchase,
        }
    }
}

/// Totals over a complete run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostSummary {
    pub periods: usize,
    pub holding_cost: f64,
    pub backlog_cost: f64,
    pub purchase_cost: f64,
    pub total_cost: f64,
    /// Share of demand shipped over the run. 1.0 when there was no demand.
    pub fill_rate: f64,
}

impl CostSummary {
    pub fn from_history(history: &[PeriodRecord]) -> Self {
        let mut summary = CostSummary {
            periods: history.len(),
            ..CostSummary::default()
        };
        let mut demand = 0.0;
        let mut shipped = 0.0;

        for record in history {
            summary.holding_cost += record.holding_cost;
            summary.backlog_cost += record.backlog_cost;
            summary.purchase_cost += record.purchase_cost;
            summary.total_cost += record.total_cost;
            demand += record.demand;
            shipped += record.shipped;
        }

        summary.fill_rate = if demand > 0.0 { shipped / demand } else { 1.0 };
        summary
    }

    pub fn average_cost(&self) -> f64 {
        if self.periods == 0 {
            0.0
        } else {
            self.total_cost / self.periods as f64
        }
    }
}
