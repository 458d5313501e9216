use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::{ServiceError, ServiceResult};
use crate::{
    config::Config,
    errors::BalanceError,
    core::{store::RuleStore, time::Clock},
    domain::RecurringRule,
    schedule::{
        monthly_total, next_occurrence, projected_spend, summarize, DateWindow, Summary,
        UpcomingPayment, UpcomingQuery,
    },
};

/// Owned counterpart of [`UpcomingPayment`] that can outlive the rule snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingEntry {
    pub rule: RecurringRule,
    pub date: NaiveDate,
}

impl From<UpcomingPayment<'_>> for UpcomingEntry {
    fn from(payment: UpcomingPayment<'_>) -> Self {
        Self {
            rule: payment.rule.clone(),
            date: payment.date,
        }
    }
}

/// Everything the upcoming-payments card needs, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingReport {
    pub reference: NaiveDate,
    pub horizon_days: u32,
    pub entries: Vec<UpcomingEntry>,
    pub summary: Summary,
    pub monthly_total: u64,
}

/// Answers scheduling questions about the rules held in a [`RuleStore`].
pub struct ScheduleService {
    store: Arc<RuleStore>,
    clock: Arc<dyn Clock>,
    horizon_days: u32,
    limit: usize,
}

impl ScheduleService {
    pub fn new(store: Arc<RuleStore>, clock: Arc<dyn Clock>, config: &Config) -> Self {
        Self {
            store,
            clock,
            horizon_days: config.upcoming_horizon_days,
            limit: config.upcoming_limit,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Upcoming payments as of the clock's current date.
    pub fn upcoming(&self) -> UpcomingReport {
        self.upcoming_from(
            UpcomingQuery::new(self.today())
                .with_horizon(self.horizon_days)
                .with_limit(self.limit),
        )
    }

    pub fn upcoming_from(&self, query: UpcomingQuery) -> UpcomingReport {
        let rules = self.store.snapshot();
        let payments = query.run(&rules);
        let summary = summarize(&payments);
        let report = UpcomingReport {
            reference: query.from,
            horizon_days: query.horizon_days,
            entries: payments.into_iter().map(UpcomingEntry::from).collect(),
            summary,
            monthly_total: monthly_total(&rules),
        };
        tracing::debug!(
            reference = %report.reference,
            count = report.summary.count,
            total = report.summary.total_amount,
            "upcoming report built"
        );
        report
    }

    pub fn monthly_total(&self) -> u64 {
        monthly_total(&self.store.snapshot())
    }

    /// Next due date of one rule as of today, regardless of its active flag.
    pub fn next_due(&self, id: Uuid) -> ServiceResult<Option<NaiveDate>> {
        let rule = self
            .store
            .get(id)
            .ok_or_else(|| ServiceError::Invalid(format!("rule {} not found", id)))?;
        Ok(next_occurrence(&rule, self.today()))
    }

    /// Every active rule with its next due date, ordered like the upcoming list.
    pub fn schedule(&self) -> Vec<UpcomingEntry> {
        let rules = self.store.snapshot();
        UpcomingQuery::new(self.today())
            .with_horizon(u32::MAX)
            .with_limit(usize::MAX)
            .run(&rules)
            .into_iter()
            .map(UpcomingEntry::from)
            .collect()
    }

    /// Cadence-aware spend for the calendar month containing today.
    pub fn projected_spend_this_month(&self) -> ServiceResult<u64> {
        let window = DateWindow::month_containing(self.today()).map_err(BalanceError::from)?;
        Ok(projected_spend(&self.store.snapshot(), &window))
    }
}
