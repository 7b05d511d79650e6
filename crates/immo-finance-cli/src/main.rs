mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::financing::{PlanArgs, RemainingDebtArgs};

/// Mortgage amortisation and affordability planning
#[derive(Parser)]
#[command(
    name = "immo",
    version,
    about = "Mortgage amortisation and affordability planning",
    long_about = "A CLI for sizing a property loan from purchase price and equity, \
                  decomposing the fixed monthly payment into interest and principal, \
                  projecting the payoff term and querying the remaining balance at a \
                  future year. All calculations use decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full financing plan from the market inputs
    Plan(PlanArgs),
    /// Remaining loan balance at a given year of the schedule
    RemainingDebt(RemainingDebtArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Plan(args) => commands::financing::run_plan(args),
        Commands::RemainingDebt(args) => commands::financing::run_remaining_debt(args),
        Commands::Version => {
            println!("immo {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
