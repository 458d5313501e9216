//! Domain type describing a periodically repeating charge.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Frequency, RuleCategory};

/// Template for a recurring charge such as rent or a streaming subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringRule {
    pub id: Uuid,
    pub name: String,
    /// Magnitude of the charge in minor currency units (cents).
    pub amount: u64,
    #[serde(default)]
    pub category: RuleCategory,
    pub frequency: Frequency,
    #[serde(alias = "start_date")]
    pub anchor_date: NaiveDate,
    #[serde(default = "RecurringRule::default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RecurringRule {
    /// Creates a new active rule with a freshly generated identifier.
    pub fn new(
        name: impl Into<String>,
        amount: u64,
        category: RuleCategory,
        frequency: Frequency,
        anchor_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            category,
            frequency,
            anchor_date,
            is_active: true,
            notes: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn default_active() -> bool {
        true
    }
}

impl Displayable for RecurringRule {
    fn display_label(&self) -> String {
        let state = if self.is_active { "" } else { ", paused" };
        format!("{} ({}, {}{})", self.name, self.frequency, self.category, state)
    }
}
