use super::{occurrence::occurrences_in_window, DateWindow};
use crate::domain::{Frequency, RecurringRule};

/// Whether `rule` counts toward the monthly recurring total.
pub fn is_monthly(rule: &RecurringRule) -> bool {
    rule.is_active && rule.frequency == Frequency::Monthly
}

/// Sums the amounts of active rules billed monthly.
///
/// Weekly, biweekly and yearly rules are left out even when they recur inside a
/// month; see [`projected_spend`] for a cadence-aware figure.
pub fn monthly_total<'a, I>(rules: I) -> u64
where
    I: IntoIterator<Item = &'a RecurringRule>,
{
    rules
        .into_iter()
        .filter(|rule| is_monthly(rule))
        .fold(0u64, |total, rule| total.saturating_add(rule.amount))
}

/// Sums every charge that active rules of any cadence produce inside `window`.
pub fn projected_spend<'a, I>(rules: I, window: &DateWindow) -> u64
where
    I: IntoIterator<Item = &'a RecurringRule>,
{
    rules
        .into_iter()
        .filter(|rule| rule.is_active)
        .fold(0u64, |total, rule| {
            let charges = occurrences_in_window(rule, window).len() as u64;
            total.saturating_add(rule.amount.saturating_mul(charges))
        })
}
