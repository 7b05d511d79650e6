use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Years};

use super::loan::LoanPayments;

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Projected time to full payoff under the fixed-payment schedule.
///
/// `NonConvergent` is a valid terminal state, not an error: the payment
/// does not exceed accruing interest, so the balance never reaches zero.
/// It is a distinct tag rather than a large sentinel number so callers
/// cannot mistake a capped display value for a computed term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoanTerm {
    /// The schedule reaches zero balance after this many years
    Finite { years: Years },
    /// The schedule never reaches zero balance at the current rates
    NonConvergent,
}

impl LoanTerm {
    pub fn is_finite(&self) -> bool {
        matches!(self, LoanTerm::Finite { .. })
    }

    pub fn years(&self) -> Option<Years> {
        match self {
            LoanTerm::Finite { years } => Some(*years),
            LoanTerm::NonConvergent => None,
        }
    }
}

/// Solve for the number of months until the balance reaches zero, holding
/// the total monthly payment fixed while the interest/principal split
/// shifts as the balance shrinks.
///
/// Closed-form annuity identity: `n = -ln(1 - i*K/R) / ln(1 + i)` where
/// `i` is the monthly interest factor, `K` the loan amount and `R` the
/// fixed monthly payment. `i*K` is exactly the first month's interest,
/// which is used directly so that a schedule whose payment equals the
/// accruing interest lands on a log argument of exactly zero.
pub fn payoff_term(loan: &LoanPayments, interest_rate_pct: Percent) -> LoanTerm {
    if loan.monthly_bank_rate.is_zero() {
        // Zero loan or zero combined rate: the schedule never amortises
        return LoanTerm::NonConvergent;
    }

    if interest_rate_pct.is_zero() {
        // The identity degenerates at zero interest; payoff is purely
        // principal-driven and therefore linear
        let months = loan.loan_amount / loan.monthly_repayment;
        return LoanTerm::Finite {
            years: months / MONTHS_PER_YEAR,
        };
    }

    let log_arg = Decimal::ONE - loan.monthly_interest / loan.monthly_bank_rate;
    if log_arg <= Decimal::ZERO {
        // Payment too small to ever cover the accruing interest
        return LoanTerm::NonConvergent;
    }

    let monthly_interest_factor = interest_rate_pct / HUNDRED / MONTHS_PER_YEAR;
    let months = -log_arg.ln() / (Decimal::ONE + monthly_interest_factor).ln();

    LoanTerm::Finite {
        years: months / MONTHS_PER_YEAR,
    }
}

/// Outstanding principal after `years` under the same fixed-payment
/// schedule, via the future-value-of-annuity closed form
/// `K*q^t - R*(q^t - 1)/(q - 1)` with `q = 1 + interest/100` and `R` the
/// annual payment, clamped at zero once the balance crosses it.
///
/// Evaluated independently of `payoff_term`; at the solved term the two
/// agree up to the annual-versus-monthly compounding gap.
pub fn remaining_debt_at_year(
    loan_amount: Money,
    interest_rate_pct: Percent,
    repayment_rate_pct: Percent,
    years: Years,
) -> Money {
    let annual_payment = loan_amount * (interest_rate_pct + repayment_rate_pct) / HUNDRED;
    let q = Decimal::ONE + interest_rate_pct / HUNDRED;

    if q == Decimal::ONE {
        // Removable singularity at zero interest; the limit is linear
        return (loan_amount - annual_payment * years).max(Decimal::ZERO);
    }

    if repayment_rate_pct.is_zero() {
        // Interest-only: the payment exactly offsets the growth, so the
        // balance is the loan amount at every horizon
        return loan_amount;
    }

    // The annual payment always covers the full year's interest (the rates
    // are non-negative and the payment is sized from both of them), so the
    // balance is non-increasing and crosses zero in finite time whenever
    // the repayment rate is positive. An overflowing growth factor can
    // therefore only happen far past that crossing, where the clamped
    // balance is already zero.
    let Some(growth) = q.checked_powd(years) else {
        return Decimal::ZERO;
    };
    let Some(grown_principal) = loan_amount.checked_mul(growth) else {
        return Decimal::ZERO;
    };
    let Some(annuity_factor) = (growth - Decimal::ONE).checked_div(q - Decimal::ONE) else {
        return Decimal::ZERO;
    };
    let Some(paid_off) = annual_payment.checked_mul(annuity_factor) else {
        return Decimal::ZERO;
    };

    (grown_principal - paid_off).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financing::loan::size_loan;
    use rust_decimal_macros::dec;

    #[test]
    fn test_term_typical_schedule() {
        // 568,560 at 3.8% + 2.0% amortises in roughly 28.1 years
        let payments = size_loan(dec!(800000), dec!(231440), dec!(3.8), dec!(2.0));
        let term = payoff_term(&payments, dec!(3.8));

        let years = term.years().expect("schedule should converge");
        assert!(
            (years - dec!(28.06)).abs() < dec!(0.1),
            "expected ~28.06 years, got {years}"
        );
    }

    #[test]
    fn test_term_zero_repayment_never_converges() {
        // Interest-only payment: the balance never moves
        let payments = size_loan(dec!(500000), dec!(100000), dec!(3.0), dec!(0.0));
        assert_eq!(payoff_term(&payments, dec!(3.0)), LoanTerm::NonConvergent);
    }

    #[test]
    fn test_term_zero_loan_is_sentinel() {
        let payments = size_loan(dec!(300000), dec!(300000), dec!(3.5), dec!(2.0));
        assert_eq!(payoff_term(&payments, dec!(3.5)), LoanTerm::NonConvergent);
    }

    #[test]
    fn test_term_zero_combined_rate_is_sentinel() {
        let payments = size_loan(dec!(300000), dec!(100000), dec!(0.0), dec!(0.0));
        assert_eq!(payoff_term(&payments, dec!(0.0)), LoanTerm::NonConvergent);
    }

    #[test]
    fn test_term_interest_free_is_linear() {
        // 120,000 at 0% interest and 1% repayment: 100 per month, 100 years
        let payments = size_loan(dec!(120000), dec!(0), dec!(0.0), dec!(1.0));
        let term = payoff_term(&payments, dec!(0.0));

        assert_eq!(term, LoanTerm::Finite { years: dec!(100) });
    }

    #[test]
    fn test_remaining_debt_at_year_zero_is_loan_amount() {
        let remaining = remaining_debt_at_year(dec!(568560), dec!(3.8), dec!(2.0), dec!(0));
        assert_eq!(remaining, dec!(568560));
    }

    #[test]
    fn test_remaining_debt_is_non_increasing() {
        let mut previous = remaining_debt_at_year(dec!(568560), dec!(3.8), dec!(2.0), dec!(0));
        for year in 1..=30 {
            let current =
                remaining_debt_at_year(dec!(568560), dec!(3.8), dec!(2.0), Decimal::from(year));
            assert!(
                current <= previous + dec!(0.0001),
                "balance rose from {previous} to {current} at year {year}"
            );
            previous = current;
        }
    }

    #[test]
    fn test_remaining_debt_clamps_at_zero_past_payoff() {
        // Term is ~28.1 years, so year 35 is past payoff
        let remaining = remaining_debt_at_year(dec!(568560), dec!(3.8), dec!(2.0), dec!(35));
        assert_eq!(remaining, Decimal::ZERO);
    }

    #[test]
    fn test_remaining_debt_constant_when_interest_only() {
        // Zero repayment with positive interest: the annual payment exactly
        // offsets the interest growth and the balance stays put
        for year in [1, 5, 20, 1000] {
            let remaining =
                remaining_debt_at_year(dec!(400000), dec!(3.0), dec!(0.0), Decimal::from(year));
            assert_eq!(remaining, dec!(400000), "balance drifted at year {year}");
        }
    }

    #[test]
    fn test_remaining_debt_zero_at_extreme_horizon() {
        // 1.2^500 exceeds the decimal range; the schedule paid off after
        // ~17 years, so the clamped balance must come back as zero rather
        // than blowing up in the growth factor
        let remaining = remaining_debt_at_year(dec!(500000), dec!(20.0), dec!(1.0), dec!(500));
        assert_eq!(remaining, Decimal::ZERO);
    }

    #[test]
    fn test_remaining_debt_zero_when_grown_principal_exceeds_range() {
        // The growth factor itself fits, but multiplying it onto a large
        // principal does not; the schedule is still long past payoff
        let remaining =
            remaining_debt_at_year(dec!(10000000000), dec!(20.0), dec!(1.0), dec!(300));
        assert_eq!(remaining, Decimal::ZERO);
    }

    #[test]
    fn test_remaining_debt_zero_interest_linear_limit() {
        // q == 1 branch: 120,000 at 1% repayment pays down 1,200 per year
        let remaining = remaining_debt_at_year(dec!(120000), dec!(0.0), dec!(1.0), dec!(50));
        assert_eq!(remaining, dec!(60000));

        let at_payoff = remaining_debt_at_year(dec!(120000), dec!(0.0), dec!(1.0), dec!(100));
        assert_eq!(at_payoff, Decimal::ZERO);

        let past_payoff = remaining_debt_at_year(dec!(120000), dec!(0.0), dec!(1.0), dec!(120));
        assert_eq!(past_payoff, Decimal::ZERO);
    }
}
