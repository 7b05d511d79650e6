use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use immo_finance_core::financing::schedule;
use immo_finance_core::financing::{self, FinancingInput};

use crate::input;

/// Arguments for the full financing plan
#[derive(Args)]
pub struct PlanArgs {
    /// Property purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Total equity available before acquisition costs
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 3.8)
    #[arg(long, alias = "interest")]
    pub interest_rate: Option<Decimal>,

    /// Annual initial repayment rate in percent (e.g. 2.0)
    #[arg(long, alias = "repayment")]
    pub repayment_rate: Option<Decimal>,

    /// Monthly building maintenance fee
    #[arg(long, default_value = "0")]
    pub maintenance_fee: Decimal,

    /// Monthly private reserve contribution
    #[arg(long, default_value = "0")]
    pub private_reserve: Decimal,

    /// Year at which the remaining balance is reported
    #[arg(long, default_value = "10")]
    pub horizon_years: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the remaining-balance query
#[derive(Args)]
pub struct RemainingDebtArgs {
    /// Outstanding loan amount at the start of the schedule
    #[arg(long)]
    pub loan_amount: Decimal,

    /// Annual interest rate in percent
    #[arg(long, alias = "interest")]
    pub interest_rate: Decimal,

    /// Annual initial repayment rate in percent
    #[arg(long, alias = "repayment")]
    pub repayment_rate: Decimal,

    /// Year of the schedule to query
    #[arg(long)]
    pub year: Decimal,
}

pub fn run_plan(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: FinancingInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FinancingInput {
            purchase_price: args
                .purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            equity: args
                .equity
                .ok_or("--equity is required (or provide --input)")?,
            interest_rate_pct: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            repayment_rate_pct: args
                .repayment_rate
                .ok_or("--repayment-rate is required (or provide --input)")?,
            maintenance_fee: args.maintenance_fee,
            private_reserve: args.private_reserve,
            horizon_years: args.horizon_years,
        }
    };

    let result = financing::compute_financing(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_remaining_debt(args: RemainingDebtArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.loan_amount < Decimal::ZERO {
        return Err("--loan-amount must not be negative".into());
    }
    if args.year < Decimal::ZERO {
        return Err("--year must not be negative".into());
    }
    if args.interest_rate < Decimal::ZERO || args.repayment_rate < Decimal::ZERO {
        return Err("rates must not be negative".into());
    }

    let remaining = schedule::remaining_debt_at_year(
        args.loan_amount,
        args.interest_rate,
        args.repayment_rate,
        args.year,
    );

    Ok(serde_json::json!({
        "year": args.year.to_string(),
        "remaining_debt": remaining.to_string(),
    }))
}
