use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Sized loan with its fixed monthly payment split into interest and
/// principal components. The split reflects month one of the annuity
/// schedule; over time interest shrinks and principal grows while the
/// total payment stays fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPayments {
    /// Principal drawn: purchase price minus net equity
    pub loan_amount: Money,
    /// Fixed total monthly payment to the bank (interest + principal)
    pub monthly_bank_rate: Money,
    /// Interest component of the first monthly payment
    pub monthly_interest: Money,
    /// Principal component of the first monthly payment
    pub monthly_repayment: Money,
}

/// Size the loan and decompose the fixed monthly payment.
///
/// `net_equity` must come from a successful equity assessment, so the loan
/// amount is never negative. A zero loan (fully self-funded purchase) is
/// valid and yields all-zero payments.
pub fn size_loan(
    purchase_price: Money,
    net_equity: Money,
    interest_rate_pct: Percent,
    repayment_rate_pct: Percent,
) -> LoanPayments {
    let loan_amount = purchase_price - net_equity;

    let monthly_bank_rate =
        loan_amount * (interest_rate_pct + repayment_rate_pct) / HUNDRED / MONTHS_PER_YEAR;
    let monthly_interest = loan_amount * interest_rate_pct / HUNDRED / MONTHS_PER_YEAR;
    let monthly_repayment = loan_amount * repayment_rate_pct / HUNDRED / MONTHS_PER_YEAR;

    LoanPayments {
        loan_amount,
        monthly_bank_rate,
        monthly_interest,
        monthly_repayment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_size_loan_scenario_a() {
        // 800k purchase, 231,440 net equity, 3.8% interest, 2.0% repayment
        let payments = size_loan(dec!(800000), dec!(231440), dec!(3.8), dec!(2.0));

        assert_eq!(payments.loan_amount, dec!(568560));
        assert_eq!(payments.monthly_bank_rate, dec!(2748.04));
        assert_eq!(payments.monthly_interest, dec!(1800.44));
        assert_eq!(payments.monthly_repayment, dec!(947.60));
    }

    #[test]
    fn test_payment_split_sums_to_bank_rate() {
        // Non-terminating divisions may round in the last digit, so the
        // decomposition is checked to a far tighter tolerance than any
        // caller would observe
        let payments = size_loan(dec!(650000), dec!(120000), dec!(4.1), dec!(1.5));
        let sum = payments.monthly_interest + payments.monthly_repayment;
        assert!((sum - payments.monthly_bank_rate).abs() < dec!(0.000001));
    }

    #[test]
    fn test_zero_loan_fully_self_funded() {
        let payments = size_loan(dec!(400000), dec!(400000), dec!(3.5), dec!(2.0));

        assert_eq!(payments.loan_amount, Decimal::ZERO);
        assert_eq!(payments.monthly_bank_rate, Decimal::ZERO);
        assert_eq!(payments.monthly_interest, Decimal::ZERO);
        assert_eq!(payments.monthly_repayment, Decimal::ZERO);
    }
}
