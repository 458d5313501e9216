use chrono::{Datelike, NaiveDate};

use super::DateWindow;
use crate::domain::RecurringRule;

/// Upper bound on projected occurrences per rule and window.
pub const MAX_PROJECTED_OCCURRENCES: usize = 1024;

/// Returns the earliest date on or after `from` at which `rule` recurs.
///
/// Occurrences are `anchor_date + k * period` for `k >= 0`. Monthly and yearly
/// cadences clamp to the last valid day of shorter months, measured from the anchor
/// so the original day of month is restored once the calendar allows it. The result
/// is `None` only when the projection leaves the representable calendar range.
pub fn next_occurrence(rule: &RecurringRule, from: NaiveDate) -> Option<NaiveDate> {
    let next = rule.frequency.first_on_or_after(rule.anchor_date, from);
    if next.is_none() {
        tracing::debug!(rule_id = %rule.id, %from, "no representable next occurrence");
    }
    next
}

/// Lists every occurrence of `rule` that falls inside `window`, in ascending order.
pub fn occurrences_in_window(rule: &RecurringRule, window: &DateWindow) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let Some(first) = next_occurrence(rule, window.start) else {
        return dates;
    };

    // Position of `first` in the anchor sequence.
    let mut step = steps_to(rule, first);
    let mut current = Some(first);
    while let Some(date) = current {
        if !window.contains(date) || dates.len() >= MAX_PROJECTED_OCCURRENCES {
            break;
        }
        dates.push(date);
        step += 1;
        current = rule.frequency.step_from(rule.anchor_date, step);
    }
    dates
}

fn steps_to(rule: &RecurringRule, occurrence: NaiveDate) -> i64 {
    if let Some(days) = rule.frequency.period_days() {
        return (occurrence - rule.anchor_date).num_days() / days;
    }
    let months = rule.frequency.period_months().unwrap_or(1) as i64;
    let anchor = rule.anchor_date;
    let elapsed = (occurrence.year() - anchor.year()) as i64 * 12 + occurrence.month() as i64
        - anchor.month() as i64;
    elapsed / months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Frequency, RuleCategory};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rule(frequency: Frequency, anchor: NaiveDate) -> RecurringRule {
        RecurringRule::new("Test", 1000, RuleCategory::Other, frequency, anchor)
    }

    #[test]
    fn weekly_projects_forward_from_anchor() {
        let weekly = rule(Frequency::Weekly, date(2025, 1, 1));
        assert_eq!(next_occurrence(&weekly, date(2025, 1, 3)), Some(date(2025, 1, 8)));
        assert_eq!(next_occurrence(&weekly, date(2025, 1, 8)), Some(date(2025, 1, 8)));
        assert_eq!(next_occurrence(&weekly, date(2025, 1, 9)), Some(date(2025, 1, 15)));
    }

    #[test]
    fn biweekly_skips_alternate_weeks() {
        let biweekly = rule(Frequency::Biweekly, date(2025, 1, 1));
        assert_eq!(
            next_occurrence(&biweekly, date(2025, 1, 9)),
            Some(date(2025, 1, 15))
        );
        assert_eq!(
            next_occurrence(&biweekly, date(2025, 1, 16)),
            Some(date(2025, 1, 29))
        );
    }

    #[test]
    fn monthly_and_yearly_follow_calendar() {
        let monthly = rule(Frequency::Monthly, date(2025, 1, 1));
        assert_eq!(next_occurrence(&monthly, date(2025, 1, 3)), Some(date(2025, 2, 1)));
        assert_eq!(next_occurrence(&monthly, date(2025, 12, 2)), Some(date(2026, 1, 1)));

        let yearly = rule(Frequency::Yearly, date(2020, 7, 4));
        assert_eq!(next_occurrence(&yearly, date(2025, 7, 4)), Some(date(2025, 7, 4)));
        assert_eq!(next_occurrence(&yearly, date(2025, 7, 5)), Some(date(2026, 7, 4)));
    }

    #[test]
    fn month_end_anchor_clamps_then_restores_day() {
        let monthly = rule(Frequency::Monthly, date(2025, 1, 31));
        assert_eq!(next_occurrence(&monthly, date(2025, 2, 1)), Some(date(2025, 2, 28)));
        assert_eq!(next_occurrence(&monthly, date(2025, 3, 1)), Some(date(2025, 3, 31)));
        assert_eq!(next_occurrence(&monthly, date(2025, 4, 1)), Some(date(2025, 4, 30)));
        assert_eq!(next_occurrence(&monthly, date(2024, 2, 1)), Some(date(2025, 1, 31)));
    }

    #[test]
    fn leap_day_yearly_anchor_clamps_in_common_years() {
        let yearly = rule(Frequency::Yearly, date(2024, 2, 29));
        assert_eq!(next_occurrence(&yearly, date(2024, 3, 1)), Some(date(2025, 2, 28)));
        assert_eq!(next_occurrence(&yearly, date(2027, 3, 1)), Some(date(2028, 2, 29)));
    }

    #[test]
    fn inactive_rules_still_project() {
        let paused = rule(Frequency::Weekly, date(2025, 1, 1)).deactivated();
        assert_eq!(next_occurrence(&paused, date(2025, 1, 2)), Some(date(2025, 1, 8)));
    }

    #[test]
    fn window_lists_all_occurrences() {
        let weekly = rule(Frequency::Weekly, date(2025, 1, 1));
        let window = DateWindow::new(date(2025, 1, 1), date(2025, 2, 1)).unwrap();
        assert_eq!(
            occurrences_in_window(&weekly, &window),
            vec![
                date(2025, 1, 1),
                date(2025, 1, 8),
                date(2025, 1, 15),
                date(2025, 1, 22),
                date(2025, 1, 29)
            ]
        );

        let monthly = rule(Frequency::Monthly, date(2024, 10, 31));
        let window = DateWindow::new(date(2025, 1, 15), date(2025, 5, 1)).unwrap();
        assert_eq!(
            occurrences_in_window(&monthly, &window),
            vec![
                date(2025, 1, 31),
                date(2025, 2, 28),
                date(2025, 3, 31),
                date(2025, 4, 30)
            ]
        );
    }

    #[test]
    fn window_before_anchor_is_empty() {
        let yearly = rule(Frequency::Yearly, date(2030, 1, 1));
        let window = DateWindow::new(date(2025, 1, 1), date(2026, 1, 1)).unwrap();
        assert!(occurrences_in_window(&yearly, &window).is_empty());
    }
}
