use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RuleStorage;
use crate::{
    domain::RecurringRule,
    errors::{BalanceError, Result},
    utils::persistence::{load_json_optional, save_json_atomic},
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// On-disk representation of the rule set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleSnapshot {
    #[serde(default = "RuleSnapshot::default_schema_version")]
    pub schema_version: u8,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub rules: Vec<RecurringRule>,
}

impl RuleSnapshot {
    pub fn new(rules: Vec<RecurringRule>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            rules,
        }
    }

    fn default_schema_version() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Stores the rule set as a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonRuleStorage {
    path: PathBuf,
}

impl JsonRuleStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the full snapshot. A missing file is an empty rule set.
    pub fn load_snapshot(&self) -> Result<RuleSnapshot> {
        let Some(snapshot) = load_json_optional::<RuleSnapshot>(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "no rules file, starting empty");
            return Ok(RuleSnapshot::new(Vec::new()));
        };
        if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(BalanceError::Persistence(format!(
                "unsupported rules schema version {} (latest supported is {})",
                snapshot.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(snapshot)
    }
}

impl RuleStorage for JsonRuleStorage {
    fn load_rules(&self) -> Result<Vec<RecurringRule>> {
        let snapshot = self.load_snapshot()?;
        tracing::info!(
            path = %self.path.display(),
            rules = snapshot.rules.len(),
            "rules loaded"
        );
        Ok(snapshot.rules)
    }

    fn save_rules(&self, rules: &[RecurringRule]) -> Result<()> {
        let snapshot = RuleSnapshot::new(rules.to_vec());
        save_json_atomic(&snapshot, &self.path)?;
        tracing::info!(path = %self.path.display(), rules = rules.len(), "rules saved");
        Ok(())
    }
}
