use chrono::NaiveDate;
use serde::Serialize;

use super::occurrence::next_occurrence;
use crate::domain::RecurringRule;

pub const DEFAULT_HORIZON_DAYS: u32 = 7;
pub const DEFAULT_UPCOMING_LIMIT: usize = 3;

/// A rule paired with the date its next charge is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpcomingPayment<'a> {
    pub rule: &'a RecurringRule,
    pub date: NaiveDate,
}

impl UpcomingPayment<'_> {
    /// Whole calendar days between `reference` and the due date.
    pub fn days_until(&self, reference: NaiveDate) -> i64 {
        (self.date - reference).num_days()
    }
}

/// Parameters of an upcoming-payments query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingQuery {
    pub from: NaiveDate,
    pub horizon_days: u32,
    pub limit: usize,
}

impl UpcomingQuery {
    pub fn new(from: NaiveDate) -> Self {
        Self {
            from,
            horizon_days: DEFAULT_HORIZON_DAYS,
            limit: DEFAULT_UPCOMING_LIMIT,
        }
    }

    pub fn with_horizon(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn run<'a, I>(&self, rules: I) -> Vec<UpcomingPayment<'a>>
    where
        I: IntoIterator<Item = &'a RecurringRule>,
    {
        upcoming_payments(rules, self.from, self.horizon_days, self.limit)
    }
}

/// Collects the next charge of every active rule due within `horizon_days` of `from`.
///
/// A charge exactly `horizon_days` days ahead is included. Results are ordered by due
/// date, then by rule id, and truncated to the first `limit` entries. Each rule
/// contributes at most one entry.
pub fn upcoming_payments<'a, I>(
    rules: I,
    from: NaiveDate,
    horizon_days: u32,
    limit: usize,
) -> Vec<UpcomingPayment<'a>>
where
    I: IntoIterator<Item = &'a RecurringRule>,
{
    let horizon = i64::from(horizon_days);
    let mut upcoming: Vec<UpcomingPayment<'a>> = rules
        .into_iter()
        .filter(|rule| rule.is_active)
        .filter_map(|rule| {
            let date = next_occurrence(rule, from)?;
            Some(UpcomingPayment { rule, date })
        })
        .filter(|payment| payment.days_until(from) <= horizon)
        .collect();

    upcoming.sort_by(|left, right| {
        left.date
            .cmp(&right.date)
            .then_with(|| left.rule.id.cmp(&right.rule.id))
    });
    upcoming.truncate(limit);

    tracing::trace!(
        %from,
        horizon_days,
        limit,
        returned = upcoming.len(),
        "computed upcoming payments"
    );
    upcoming
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::{Frequency, RuleCategory};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly(id: u128, anchor: NaiveDate) -> RecurringRule {
        RecurringRule::new("Weekly", 100, RuleCategory::Other, Frequency::Weekly, anchor)
            .with_id(Uuid::from_u128(id))
    }

    #[test]
    fn default_query_uses_seven_days_and_three_rows() {
        let query = UpcomingQuery::new(date(2025, 1, 1));
        assert_eq!(query.horizon_days, 7);
        assert_eq!(query.limit, 3);
    }

    #[test]
    fn ties_are_broken_by_rule_id() {
        let anchor = date(2025, 1, 2);
        let rules = vec![weekly(9, anchor), weekly(3, anchor), weekly(5, anchor)];
        let ids: Vec<u128> = upcoming_payments(&rules, date(2025, 1, 1), 7, 10)
            .iter()
            .map(|payment| payment.rule.id.as_u128())
            .collect();
        assert_eq!(ids, vec![3, 5, 9]);
    }

    #[test]
    fn zero_limit_returns_nothing() {
        let rules = vec![weekly(1, date(2025, 1, 2))];
        assert!(upcoming_payments(&rules, date(2025, 1, 1), 7, 0).is_empty());
    }

    #[test]
    fn zero_horizon_keeps_only_same_day_charges() {
        let rules = vec![weekly(1, date(2025, 1, 1)), weekly(2, date(2025, 1, 2))];
        let upcoming = upcoming_payments(&rules, date(2025, 1, 8), 0, 10);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].rule.id, Uuid::from_u128(1));
        assert_eq!(upcoming[0].days_until(date(2025, 1, 8)), 0);
    }

    #[test]
    fn query_run_matches_free_function() {
        let rules = vec![weekly(1, date(2025, 1, 3)), weekly(2, date(2025, 1, 5))];
        let query = UpcomingQuery::new(date(2025, 1, 1)).with_limit(1);
        assert_eq!(
            query.run(&rules),
            upcoming_payments(&rules, date(2025, 1, 1), 7, 1)
        );
    }
}
