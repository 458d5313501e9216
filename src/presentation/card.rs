use chrono::NaiveDate;
use serde::Serialize;

use super::labels::{format_minor_units, relative_day_label};
use crate::{core::services::UpcomingReport, domain::Displayable};

/// One line of the upcoming-payments card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRow {
    pub name: String,
    pub detail: String,
    pub amount: String,
    pub when: String,
    pub date: NaiveDate,
}

/// View model for the upcoming-payments card shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingCard {
    pub headline: String,
    pub total: String,
    pub monthly_total: String,
    pub rows: Vec<CardRow>,
}

impl UpcomingCard {
    pub fn from_report(report: &UpcomingReport) -> Self {
        let headline = match report.summary.count {
            0 => format!("Nothing due in the next {} days", report.horizon_days),
            1 => "1 payment due soon".to_string(),
            count => format!("{count} payments due soon"),
        };
        let rows = report
            .entries
            .iter()
            .map(|entry| CardRow {
                name: entry.rule.name.clone(),
                detail: entry.rule.display_label(),
                amount: format_minor_units(entry.rule.amount),
                when: relative_day_label(entry.date, report.reference),
                date: entry.date,
            })
            .collect();
        Self {
            headline,
            total: format_minor_units(report.summary.total_amount),
            monthly_total: format_minor_units(report.monthly_total),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
