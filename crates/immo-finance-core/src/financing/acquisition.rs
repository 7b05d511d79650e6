use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ImmoFinanceError;
use crate::types::{Money, Rate};
use crate::ImmoFinanceResult;

/// Land transfer tax (Grunderwerbsteuer), Bavarian rate.
pub const LAND_TRANSFER_TAX_RATE: Decimal = dec!(0.035);

/// Notary and land-registry fees.
pub const NOTARY_RATE: Decimal = dec!(0.015);

/// Broker commission, Munich buyer split.
pub const BROKER_RATE: Decimal = dec!(0.0357);

/// Combined one-time acquisition overhead as a fraction of the purchase
/// price (8.57%). Paid from equity before any loan is drawn.
pub fn acquisition_cost_rate() -> Rate {
    LAND_TRANSFER_TAX_RATE + NOTARY_RATE + BROKER_RATE
}

/// Equity position after the one-time transaction overhead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityAssessment {
    /// Transaction overhead (tax, notary, broker) on the purchase price
    pub acquisition_costs: Money,
    /// Equity left to reduce the loan after acquisition costs
    pub net_equity: Money,
}

/// Check that equity covers the acquisition costs and compute what remains.
///
/// Fails with `InsufficientEquity` carrying the exact shortfall when equity
/// does not even cover the transaction overhead. In that case no downstream
/// fields may be derived.
pub fn assess_equity(purchase_price: Money, equity: Money) -> ImmoFinanceResult<EquityAssessment> {
    let acquisition_costs = purchase_price * acquisition_cost_rate();
    let net_equity = equity - acquisition_costs;

    if net_equity < Decimal::ZERO {
        return Err(ImmoFinanceError::InsufficientEquity {
            acquisition_costs,
            shortfall: net_equity.abs(),
        });
    }

    Ok(EquityAssessment {
        acquisition_costs,
        net_equity,
    })
}
