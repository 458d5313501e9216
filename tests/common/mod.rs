#![allow(dead_code)]

use std::path::{Path, PathBuf};

use balance_core::{
    domain::{Frequency, RecurringRule, RuleCategory},
    storage::{JsonRuleStorage, RuleStorage},
};
use chrono::NaiveDate;
use tempfile::TempDir;
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn rule(id: u128, name: &str, amount: u64, frequency: Frequency, anchor: NaiveDate) -> RecurringRule {
    RecurringRule::new(name, amount, RuleCategory::Other, frequency, anchor)
        .with_id(Uuid::from_u128(id))
}

/// A handful of rules with mixed cadences and one paused rule.
pub fn household_rules() -> Vec<RecurringRule> {
    vec![
        rule(1, "Rent", 120_000, Frequency::Monthly, date(2025, 1, 1)),
        rule(2, "Groceries", 8_500, Frequency::Weekly, date(2025, 1, 4)),
        rule(3, "Daycare", 30_000, Frequency::Biweekly, date(2025, 1, 6)),
        rule(4, "Car insurance", 65_000, Frequency::Yearly, date(2024, 1, 9)),
        rule(5, "Streaming", 1_599, Frequency::Monthly, date(2024, 11, 7)),
        rule(6, "Gym", 4_000, Frequency::Monthly, date(2024, 12, 5)).deactivated(),
    ]
}

/// Writes `rules` to a fresh snapshot file inside a temp dir.
pub fn write_rules(rules: &[RecurringRule]) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("rules.json");
    JsonRuleStorage::new(&path)
        .save_rules(rules)
        .expect("save rules");
    (temp, path)
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}
