use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use super::{ServiceError, ServiceResult};
use crate::{
    core::store::RuleStore,
    domain::{Frequency, RecurringRule, RuleCategory},
    storage::RuleStorage,
};

/// Field values for creating or editing a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDraft {
    pub name: String,
    pub amount: u64,
    pub category: RuleCategory,
    pub frequency: Frequency,
    pub anchor_date: NaiveDate,
    pub notes: Option<String>,
}

impl RuleDraft {
    fn validate(&self) -> ServiceResult<()> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::Invalid("rule name must not be empty".into()));
        }
        Ok(())
    }
}

/// Creates, edits and removes recurring rules, persisting after each change when a
/// storage backend is attached.
pub struct RuleService {
    store: Arc<RuleStore>,
    storage: Option<Arc<dyn RuleStorage>>,
}

impl RuleService {
    pub fn new(store: Arc<RuleStore>) -> Self {
        Self {
            store,
            storage: None,
        }
    }

    pub fn with_storage(store: Arc<RuleStore>, storage: Arc<dyn RuleStorage>) -> Self {
        Self {
            store,
            storage: Some(storage),
        }
    }

    /// Replaces the store contents with whatever the backend holds.
    pub fn load(&self) -> ServiceResult<usize> {
        let Some(storage) = &self.storage else {
            return Ok(self.store.len());
        };
        let rules = storage.load_rules()?;
        let count = rules.len();
        self.store.replace_all(rules);
        Ok(count)
    }

    pub fn add(&self, draft: RuleDraft) -> ServiceResult<Uuid> {
        draft.validate()?;
        let mut rule = RecurringRule::new(
            draft.name.trim(),
            draft.amount,
            draft.category,
            draft.frequency,
            draft.anchor_date,
        );
        rule.notes = draft.notes;
        let id = self.store.insert(rule)?;
        tracing::info!(rule_id = %id, "recurring rule added");
        self.persist()?;
        Ok(id)
    }

    pub fn edit(&self, id: Uuid, draft: RuleDraft) -> ServiceResult<RecurringRule> {
        draft.validate()?;
        let updated = self.store.update(id, |rule| {
            rule.name = draft.name.trim().to_string();
            rule.amount = draft.amount;
            rule.category = draft.category;
            rule.frequency = draft.frequency;
            rule.anchor_date = draft.anchor_date;
            rule.notes = draft.notes;
        })?;
        self.persist()?;
        Ok(updated)
    }

    pub fn set_active(&self, id: Uuid, active: bool) -> ServiceResult<RecurringRule> {
        let updated = self.store.update(id, |rule| rule.is_active = active)?;
        tracing::info!(rule_id = %id, active, "recurring rule toggled");
        self.persist()?;
        Ok(updated)
    }

    pub fn remove(&self, id: Uuid) -> ServiceResult<RecurringRule> {
        let removed = self.store.remove(id)?;
        tracing::info!(rule_id = %id, "recurring rule removed");
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> ServiceResult<()> {
        if let Some(storage) = &self.storage {
            storage.save_rules(&self.store.snapshot())?;
        }
        Ok(())
    }
}
