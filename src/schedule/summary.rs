use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::upcoming::UpcomingPayment;

/// Headline statistics over a list of upcoming payments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    /// Sum of rule amounts in minor units. Saturates instead of overflowing.
    pub total_amount: u64,
    pub earliest_date: Option<NaiveDate>,
}

/// Summarizes `payments`, which are expected in the order `upcoming_payments` returns.
pub fn summarize(payments: &[UpcomingPayment<'_>]) -> Summary {
    let total_amount = payments
        .iter()
        .fold(0u64, |total, payment| total.saturating_add(payment.rule.amount));
    Summary {
        count: payments.len(),
        total_amount,
        earliest_date: payments.first().map(|payment| payment.date),
    }
}
