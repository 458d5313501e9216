//! Command-line front end that reports upcoming payments from a rules file.

pub mod args;
pub mod output;

use std::{env, sync::Arc};

use chrono::NaiveDate;

use crate::{
    config::{Config, ConfigManager},
    core::{
        services::{ScheduleService, UpcomingEntry, UpcomingReport},
        time::{Clock, FixedClock, SystemClock},
        RuleStore,
    },
    errors::{BalanceError, CliError},
    presentation::{format_minor_units, relative_day_label, UpcomingCard},
    schedule::UpcomingQuery,
    storage::{JsonRuleStorage, RuleStorage},
};

pub use args::{parse_args, CommandKind, Invocation};
use output::Formatter;

pub const BUILD_HASH: &str = env!("BALANCE_CORE_BUILD_HASH");
pub const BUILD_TIMESTAMP: &str = env!("BALANCE_CORE_BUILD_TIMESTAMP");
pub const BUILD_PROFILE: &str = env!("BALANCE_CORE_BUILD_PROFILE");

const USAGE: &[(&str, &str)] = &[
    ("upcoming", "List charges due within the look-ahead window"),
    ("next", "Show the next due date of every active rule"),
    ("monthly-total", "Sum of active monthly charges"),
    ("version", "Print build information"),
    ("help", "Show this overview"),
];

const OPTIONS: &[(&str, &str)] = &[
    ("--rules PATH", "Rules snapshot (defaults to the configured file)"),
    ("--from YYYY-MM-DD", "Reference date (defaults to today)"),
    ("--horizon N", "Look-ahead in days for `upcoming`"),
    ("--limit N", "Maximum rows for `upcoming`"),
    ("--json", "Emit JSON instead of text"),
    ("--plain", "Disable colors"),
];

/// Entry point used by the `balance_core_cli` binary.
pub fn run_cli() -> Result<(), CliError> {
    let invocation = parse_args(env::args().skip(1))?;
    for line in execute(&invocation)? {
        println!("{line}");
    }
    Ok(())
}

/// Runs `invocation` and returns the lines to print.
pub fn execute(invocation: &Invocation) -> Result<Vec<String>, CliError> {
    let plain_env = invocation.plain || env::var_os("NO_COLOR").is_some();
    match invocation.command {
        CommandKind::Help => return Ok(help_lines(&Formatter::new(plain_env))),
        CommandKind::Version => return Ok(vec![version_line()]),
        _ => {}
    }

    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    let formatter = Formatter::new(plain_env || !config.ui_color_enabled);
    let rules_path = invocation
        .rules
        .clone()
        .unwrap_or_else(|| manager.rules_path(&config));
    let storage = JsonRuleStorage::new(rules_path);
    let store = Arc::new(RuleStore::new(storage.load_rules()?));
    let clock: Arc<dyn Clock> = match invocation.from {
        Some(date) => Arc::new(FixedClock::new(date)),
        None => Arc::new(SystemClock),
    };
    let service = ScheduleService::new(store, clock, &config);

    match invocation.command {
        CommandKind::Upcoming => {
            let query = build_query(invocation, &config, service.today());
            let report = service.upcoming_from(query);
            if invocation.json {
                Ok(vec![serde_json::to_string_pretty(&report)
                    .map_err(BalanceError::from)?])
            } else {
                Ok(upcoming_lines(&formatter, &report))
            }
        }
        CommandKind::Next => {
            let schedule = service.schedule();
            if invocation.json {
                Ok(vec![serde_json::to_string_pretty(&schedule)
                    .map_err(BalanceError::from)?])
            } else {
                Ok(next_lines(&formatter, &schedule, service.today()))
            }
        }
        CommandKind::MonthlyTotal => {
            let total = service.monthly_total();
            if invocation.json {
                Ok(vec![format!("{{\"monthly_total\":{total}}}")])
            } else {
                Ok(vec![format!(
                    "Monthly recurring total: {}",
                    formatter.highlight_text(format_minor_units(total))
                )])
            }
        }
        CommandKind::Help | CommandKind::Version => Ok(Vec::new()),
    }
}

fn build_query(invocation: &Invocation, config: &Config, today: NaiveDate) -> UpcomingQuery {
    UpcomingQuery::new(today)
        .with_horizon(invocation.horizon.unwrap_or(config.upcoming_horizon_days))
        .with_limit(invocation.limit.unwrap_or(config.upcoming_limit))
}

fn upcoming_lines(formatter: &Formatter, report: &UpcomingReport) -> Vec<String> {
    let card = UpcomingCard::from_report(report);
    let mut lines = vec![
        formatter.header_text("Upcoming payments"),
        card.headline.clone(),
    ];
    if card.is_empty() {
        return lines;
    }
    let widths = [
        card.rows.iter().map(|row| row.name.len()).max().unwrap_or(0),
        card.rows.iter().map(|row| row.when.len()).max().unwrap_or(0),
        card.rows.iter().map(|row| row.amount.len()).max().unwrap_or(0),
    ];
    for row in &card.rows {
        lines.push(formatter.table_row(
            [row.name.as_str(), row.when.as_str(), row.amount.as_str()],
            widths,
        ));
    }
    lines.push(format!("Total: {}", formatter.highlight_text(&card.total)));
    lines.push(formatter.muted_text(format!("Monthly recurring: {}", card.monthly_total)));
    lines
}

fn next_lines(formatter: &Formatter, schedule: &[UpcomingEntry], today: NaiveDate) -> Vec<String> {
    let mut lines = vec![formatter.header_text("Next due dates")];
    if schedule.is_empty() {
        lines.push("No active recurring rules.".to_string());
        return lines;
    }
    let labels: Vec<String> = schedule
        .iter()
        .map(|entry| relative_day_label(entry.date, today))
        .collect();
    let amounts: Vec<String> = schedule
        .iter()
        .map(|entry| format_minor_units(entry.rule.amount))
        .collect();
    let widths = [
        schedule.iter().map(|e| e.rule.name.len()).max().unwrap_or(0),
        labels.iter().map(String::len).max().unwrap_or(0),
        amounts.iter().map(String::len).max().unwrap_or(0),
    ];
    for ((entry, label), amount) in schedule.iter().zip(&labels).zip(&amounts) {
        lines.push(formatter.table_row(
            [entry.rule.name.as_str(), label.as_str(), amount.as_str()],
            widths,
        ));
    }
    lines
}

fn help_lines(formatter: &Formatter) -> Vec<String> {
    let mut lines = vec![
        formatter.header_text("Balance Core"),
        "Usage: balance_core_cli <command> [options]".to_string(),
        String::new(),
        "Available commands:".to_string(),
    ];
    lines.extend(two_column(USAGE));
    lines.push(String::new());
    lines.push("Options:".to_string());
    lines.extend(two_column(OPTIONS));
    lines
}

fn two_column(entries: &[(&str, &str)]) -> Vec<String> {
    let width = entries.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|(label, description)| format!("  {:<width$}  {}", label, description))
        .collect()
}

pub fn version_line() -> String {
    format!(
        "Balance Core version {} ({}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_HASH,
        BUILD_TIMESTAMP,
        BUILD_PROFILE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Frequency, RecurringRule, RuleCategory},
        schedule::Summary,
    };

    #[test]
    fn help_lists_every_command() {
        let lines = help_lines(&Formatter::new(true));
        for (command, _) in USAGE {
            assert!(lines.iter().any(|line| line.contains(command)));
        }
    }

    #[test]
    fn upcoming_lines_render_rows_and_totals() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let due = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        let rule = RecurringRule::new("Lunch", 500, RuleCategory::Other, Frequency::Weekly, due);
        let report = UpcomingReport {
            reference: today,
            horizon_days: 7,
            entries: vec![UpcomingEntry { rule, date: due }],
            summary: Summary {
                count: 1,
                total_amount: 500,
                earliest_date: Some(due),
            },
            monthly_total: 0,
        };
        let lines = upcoming_lines(&Formatter::new(true), &report);
        assert_eq!(lines[0], "=== Upcoming payments ===");
        assert!(lines
            .iter()
            .any(|line| line.contains("Lunch") && line.contains("in 5 days")));
        assert!(lines.contains(&"Total: 5.00".to_string()));
    }

    #[test]
    fn version_mentions_package_version() {
        assert!(version_line().contains(env!("CARGO_PKG_VERSION")));
    }
}
