use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::error;

use stock_policy::config::RunConfig;
use stock_policy::error::AppResult;
use stock_policy::io::requests;
use stock_policy::{commands, logging};

#[derive(Debug, Parser)]
#[command(name = "stock-policy", about = "Inventory policy optimizer")]
struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimize every request in a CSV file.
    Optimize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Rank all four policies for one item by total cost.
    Compare {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },
    /// Derive demand statistics from a synthetic history, then compare policies.
    Demo {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Length of the synthetic daily history.
        #[arg(long)]
        days: Option<usize>,
        /// RNG seed for a reproducible history.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Args)]
struct ScenarioArgs {
    #[arg(long)]
    item_id: Option<String>,
    #[arg(long)]
    location_id: Option<String>,
    #[arg(long)]
    demand_mean: Option<f64>,
    #[arg(long)]
    demand_std: Option<f64>,
    #[arg(long)]
    lead_time_days: Option<i64>,
    #[arg(long)]
    holding_cost_rate: Option<f64>,
    #[arg(long)]
    ordering_cost: Option<f64>,
    #[arg(long)]
    service_level: Option<f64>,
}

impl ScenarioArgs {
    fn into_config(self) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            item_id: self.item_id.unwrap_or(defaults.item_id),
            location_id: self.location_id.unwrap_or(defaults.location_id),
            demand_mean: self.demand_mean.unwrap_or(defaults.demand_mean),
            demand_std: self.demand_std.unwrap_or(defaults.demand_std),
            lead_time_days: self.lead_time_days.unwrap_or(defaults.lead_time_days),
            holding_cost_rate: self.holding_cost_rate.unwrap_or(defaults.holding_cost_rate),
            ordering_cost: self.ordering_cost.unwrap_or(defaults.ordering_cost),
            service_level: self.service_level.unwrap_or(defaults.service_level),
            ..defaults
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> AppResult<()> {
    match command {
        Command::Optimize { input, output } => {
            let summary = requests::run_batch(&input, &output)?;
            println!(
                "Optimized {} of {} rows ({} skipped) -> {}",
                summary.records.len(),
                summary.rows,
                summary.skipped,
                output.display()
            );
        }
        Command::Compare { scenario } => {
            let config = scenario.into_config();
            print!("{}", commands::format_ranking(&commands::compare_scenario(&config)?));
        }
        Command::Demo {
            scenario,
            days,
            seed,
        } => {
            let mut config = scenario.into_config();
            config.history_days = days.unwrap_or(config.history_days);
            config.seed = seed.or(config.seed);

            let report = commands::demo_scenario(&config)?;
            println!("=== Inventory Policy Lab ===");
            println!(
                "Demand over {} days: mean {:.2}/day, std {:.2}",
                report.stats.observations, report.stats.mean, report.stats.std_dev
            );
            println!();
            print!("{}", commands::format_ranking(&report.ranking));
        }
    }
    Ok(())
}
