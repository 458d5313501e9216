//! Shared traits, cadence enums, and calendar helpers for recurring rules.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Enumerates the cadences a recurring charge can follow.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    /// Fixed day length of the period, or `None` for calendar-based cadences.
    pub fn period_days(self) -> Option<i64> {
        match self {
            Frequency::Weekly => Some(7),
            Frequency::Biweekly => Some(14),
            Frequency::Monthly | Frequency::Yearly => None,
        }
    }

    /// Calendar months per period for month-based cadences.
    pub fn period_months(self) -> Option<i32> {
        match self {
            Frequency::Monthly => Some(1),
            Frequency::Yearly => Some(12),
            Frequency::Weekly | Frequency::Biweekly => None,
        }
    }

    /// Returns the date `steps` periods after `anchor`.
    ///
    /// Month-based cadences are always measured from the anchor and clamp to the last
    /// day of a shorter target month, so a Jan 31 anchor yields Feb 28 and then Mar 31.
    pub fn step_from(self, anchor: NaiveDate, steps: i64) -> Option<NaiveDate> {
        if let Some(days) = self.period_days() {
            let offset = steps.checked_mul(days)?;
            return anchor.checked_add_signed(Duration::try_days(offset)?);
        }
        let months = self.period_months()? as i64;
        let offset = i32::try_from(steps.checked_mul(months)?).ok()?;
        shift_month(anchor, offset)
    }

    /// Returns the earliest date in `anchor + k * period` (`k >= 0`) that is on or
    /// after `from`.
    pub fn first_on_or_after(self, anchor: NaiveDate, from: NaiveDate) -> Option<NaiveDate> {
        if from <= anchor {
            return Some(anchor);
        }
        if let Some(days) = self.period_days() {
            let elapsed = (from - anchor).num_days();
            let steps = (elapsed + days - 1).div_euclid(days);
            return self.step_from(anchor, steps);
        }
        let months = self.period_months()? as i64;
        let elapsed = months_between(anchor, from) as i64;
        let steps = elapsed.div_euclid(months);
        let candidate = self.step_from(anchor, steps)?;
        if candidate >= from {
            Some(candidate)
        } else {
            self.step_from(anchor, steps + 1)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Every 2 Weeks",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display tag attached to recurring rules. Scheduling never inspects it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Housing,
    Utilities,
    Subscriptions,
    Insurance,
    Transportation,
    Health,
    Entertainment,
    Savings,
    #[default]
    Other,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RuleCategory::Housing => "Housing",
            RuleCategory::Utilities => "Utilities",
            RuleCategory::Subscriptions => "Subscriptions",
            RuleCategory::Insurance => "Insurance",
            RuleCategory::Transportation => "Transportation",
            RuleCategory::Health => "Health",
            RuleCategory::Entertainment => "Entertainment",
            RuleCategory::Savings => "Savings",
            RuleCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32
}

/// Moves `date` by `months`, clamping the day to the target month's length.
pub fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date
        .year()
        .checked_mul(12)?
        .checked_add(date.month0() as i32)?
        .checked_add(months)?;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Number of days in the given month, or `None` outside chrono's range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next_first {
        Some(next) => Some((next - first).num_days() as u32),
        // December of the last representable year.
        None => Some(31),
    }
}
