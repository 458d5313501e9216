pub mod json_backend;

use crate::{domain::RecurringRule, errors::Result};

/// Abstraction over persistence backends that hold the recurring rule set.
pub trait RuleStorage: Send + Sync {
    fn load_rules(&self) -> Result<Vec<RecurringRule>>;
    fn save_rules(&self, rules: &[RecurringRule]) -> Result<()>;
}

pub use json_backend::{JsonRuleStorage, RuleSnapshot, CURRENT_SCHEMA_VERSION};
