pub mod acquisition;
pub mod loan;
pub mod schedule;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ImmoFinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::ImmoFinanceResult;

use acquisition::assess_equity;
use loan::size_loan;
use schedule::{payoff_term, remaining_debt_at_year, LoanTerm};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The caller-supplied market and financing inputs, plus the year at which
/// the remaining balance is queried. Each field is independently settable;
/// the plan is fully recomputed from the current tuple on every change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingInput {
    /// Property purchase price
    pub purchase_price: Money,
    /// Total equity available before acquisition costs
    pub equity: Money,
    /// Annual interest rate in percent (e.g. 3.8)
    pub interest_rate_pct: Percent,
    /// Annual initial amortisation rate in percent (e.g. 2.0)
    pub repayment_rate_pct: Percent,
    /// Monthly building maintenance fee (Hausgeld)
    pub maintenance_fee: Money,
    /// Monthly private reserve contribution
    pub private_reserve: Money,
    /// Year of the schedule at which the remaining balance is reported
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
}

fn default_horizon_years() -> u32 {
    10
}

/// One fully derived financing record. A value, not an entity: it carries
/// no identity or mutation history and is rebuilt from scratch whenever
/// any input changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingPlan {
    /// One-time transaction overhead (tax, notary, broker)
    pub acquisition_costs: Money,
    /// Equity remaining after acquisition costs
    pub net_equity: Money,
    /// Principal drawn from the bank
    pub loan_amount: Money,
    /// Fixed total monthly payment (interest + principal)
    pub monthly_bank_rate: Money,
    /// Interest component of the first monthly payment
    pub monthly_interest: Money,
    /// Principal component of the first monthly payment
    pub monthly_repayment: Money,
    /// Projected time to full payoff, or the non-convergent sentinel
    pub term: LoanTerm,
    /// Year at which the balance below is evaluated
    pub horizon_years: u32,
    /// Outstanding principal at the queried horizon
    pub remaining_debt_at_horizon: Money,
    /// Bank rate plus maintenance fee plus private reserve
    pub total_monthly_cost: Money,
    /// Net equity as a percentage of the purchase price
    pub equity_ratio_pct: Percent,
    /// Complement of the equity ratio
    pub loan_to_value_pct: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Recompute the full financing plan from the current input tuple.
///
/// Runs equity assessment, loan sizing and the schedule solver in order and
/// returns either a complete `FinancingPlan` or the feasibility error from
/// the equity gate, never a partial record. Pure and idempotent: the same
/// tuple always yields an identical plan regardless of how it was reached.
pub fn compute_financing(
    input: &FinancingInput,
) -> ImmoFinanceResult<ComputationOutput<FinancingPlan>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let assessment = assess_equity(input.purchase_price, input.equity)?;
    let payments = size_loan(
        input.purchase_price,
        assessment.net_equity,
        input.interest_rate_pct,
        input.repayment_rate_pct,
    );
    let term = payoff_term(&payments, input.interest_rate_pct);
    let remaining_debt_at_horizon = remaining_debt_at_year(
        payments.loan_amount,
        input.interest_rate_pct,
        input.repayment_rate_pct,
        Decimal::from(input.horizon_years),
    );

    let total_monthly_cost =
        payments.monthly_bank_rate + input.maintenance_fee + input.private_reserve;
    let equity_ratio_pct = assessment.net_equity / input.purchase_price * dec!(100);
    let loan_to_value_pct = dec!(100) - equity_ratio_pct;

    if !payments.loan_amount.is_zero() && equity_ratio_pct < dec!(20) {
        warnings.push(format!(
            "Equity ratio of {equity_ratio_pct:.1}% is below 20%; lenders typically price a rate premium"
        ));
    }

    match term {
        LoanTerm::NonConvergent if !payments.loan_amount.is_zero() => {
            warnings.push(
                "Payment does not exceed accruing interest; the loan never amortises at these rates"
                    .into(),
            );
        }
        LoanTerm::Finite { years } if years > dec!(50) => {
            warnings.push(format!(
                "Projected term of {years:.1} years exceeds 50 years; repayment rate is unusually low"
            ));
        }
        _ => {}
    }

    let plan = FinancingPlan {
        acquisition_costs: assessment.acquisition_costs,
        net_equity: assessment.net_equity,
        loan_amount: payments.loan_amount,
        monthly_bank_rate: payments.monthly_bank_rate,
        monthly_interest: payments.monthly_interest,
        monthly_repayment: payments.monthly_repayment,
        term,
        horizon_years: input.horizon_years,
        remaining_debt_at_horizon,
        total_monthly_cost,
        equity_ratio_pct,
        loan_to_value_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-repayment annuity financing (Munich/Bavaria acquisition costs)",
        input,
        warnings,
        elapsed,
        plan,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &FinancingInput) -> ImmoFinanceResult<()> {
    if input.purchase_price <= Decimal::ZERO {
        return Err(ImmoFinanceError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }

    let non_negative = [
        ("equity", input.equity),
        ("interest_rate_pct", input.interest_rate_pct),
        ("repayment_rate_pct", input.repayment_rate_pct),
        ("maintenance_fee", input.maintenance_fee),
        ("private_reserve", input.private_reserve),
    ];

    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(ImmoFinanceError::InvalidInput {
                field: field.into(),
                reason: "Value must not be negative".into(),
            });
        }
    }

    Ok(())
}
