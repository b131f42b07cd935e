use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use inventory_sim::{
    compare_policies, write_history, InventorySimulation, PolicyTuning, SimulationParams,
    DEFAULT_HISTORY_PATH,
};

/// Simulates a periodic-review inventory under a chosen replenishment policy.
#[derive(Parser, Debug)]
#[command(name = "inventory-sim")]
#[command(version)]
struct Args {
    /// Replenishment policy: eoq, basestock or newsvendor
    #[arg(long, default_value = "basestock")]
    policy: String,

    /// Holding cost per unit per period
    #[arg(long, default_value_t = 1.0)]
    h: f64,

    /// Purchase cost per unit ordered
    #[arg(long, default_value_t = 10.0)]
    c: f64,

    /// Backlog penalty per unit per period
    #[arg(long, default_value_t = 30.0)]
    p: f64,

    /// Mean demand per period
    #[arg(long, default_value_t = 100.0)]
    mu: f64,

    /// Standard deviation of demand per period
    #[arg(long, default_value_t = 25.0)]
    sigma: f64,

    /// Lead time in periods
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    lead: i64,

    /// Number of periods to simulate
    #[arg(long, default_value_t = 365, allow_negative_numbers = true)]
    periods: i64,

    /// Seed for demand generation
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// EOQ setup-cost proxy K
    #[arg(long, default_value_t = 100.0)]
    setup_cost: f64,

    /// Safety factor z for reorder point and base-stock level
    #[arg(long = "safety-z", default_value_t = 1.65, allow_negative_numbers = true)]
    safety_z: f64,

    /// Where to write the period history
    #[arg(short, long, default_value = DEFAULT_HISTORY_PATH)]
    output: PathBuf,

    /// Run all three policies on the same demand and report their costs
    #[arg(long)]
    compare: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn params(&self) -> SimulationParams {
        SimulationParams {
            policy: self.policy.clone(),
            holding_cost: self.h,
            purchase_cost: self.c,
            backlog_cost: self.p,
            mean_demand: self.mu,
            std_dev_demand: self.sigma,
            lead_time: self.lead,
            periods: self.periods,
            seed: self.seed,
            tuning: PolicyTuning {
                setup_cost: self.setup_cost,
                safety_factor: self.safety_z,
            },
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let params = args.params();

    if args.compare {
        for result in compare_policies(&params)? {
            let s = result.summary;
            info!(
                policy = %result.policy,
                holding = format_args!("{:.2}", s.holding_cost),
                backlog = format_args!("{:.2}", s.backlog_cost),
                purchase = format_args!("{:.2}", s.purchase_cost),
                total = format_args!("{:.2}", s.total_cost),
                average = format_args!("{:.2}", s.average_cost()),
                fill_rate = format_args!("{:.4}", s.fill_rate),
                "policy cost"
            );
        }
        return Ok(());
    }

    let config = params.validate()?;
    let mut sim = InventorySimulation::new(config)?;
    sim.run();

    let summary = sim.cost_summary();
    info!(
        holding = format_args!("{:.2}", summary.holding_cost),
        backlog = format_args!("{:.2}", summary.backlog_cost),
        purchase = format_args!("{:.2}", summary.purchase_cost),
        total = format_args!("{:.2}", summary.total_cost),
        fill_rate = format_args!("{:.4}", summary.fill_rate),
        "cost analysis"
    );

    write_history(&args.output, &sim.history)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
