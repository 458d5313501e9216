use std::sync::{
    mpsc::{self, Receiver, Sender},
    Mutex, PoisonError, RwLock,
};

use uuid::Uuid;

use crate::{
    domain::RecurringRule,
    errors::{BalanceError, Result},
};

/// Change notifications published to store subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Replaced { count: usize },
    Added(Uuid),
    Updated(Uuid),
    Removed(Uuid),
}

/// In-memory rule set that tells subscribers when it changes.
///
/// Readers take owned snapshots so a scheduling query always sees one consistent
/// rule set, even while writers continue.
#[derive(Default)]
pub struct RuleStore {
    rules: RwLock<Vec<RecurringRule>>,
    subscribers: Mutex<Vec<Sender<StoreEvent>>>,
}

impl RuleStore {
    pub fn new(rules: Vec<RecurringRule>) -> Self {
        Self {
            rules: RwLock::new(rules),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Registers a subscriber. Dropping the receiver unsubscribes it.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        receiver
    }

    pub fn snapshot(&self) -> Vec<RecurringRule> {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.rules.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: Uuid) -> Option<RecurringRule> {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|rule| rule.id == id)
            .cloned()
    }

    pub fn replace_all(&self, rules: Vec<RecurringRule>) {
        let count = rules.len();
        *self.rules.write().unwrap_or_else(PoisonError::into_inner) = rules;
        self.publish(StoreEvent::Replaced { count });
    }

    pub fn insert(&self, rule: RecurringRule) -> Result<Uuid> {
        let id = rule.id;
        {
            let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);
            if rules.iter().any(|existing| existing.id == id) {
                return Err(BalanceError::InvalidRef(format!(
                    "rule {} already exists",
                    id
                )));
            }
            rules.push(rule);
        }
        self.publish(StoreEvent::Added(id));
        Ok(id)
    }

    /// Applies `mutator` to the rule with `id`. The identifier cannot be changed.
    pub fn update<F>(&self, id: Uuid, mutator: F) -> Result<RecurringRule>
    where
        F: FnOnce(&mut RecurringRule),
    {
        let updated = {
            let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);
            let rule = rules
                .iter_mut()
                .find(|rule| rule.id == id)
                .ok_or_else(|| not_found(id))?;
            mutator(rule);
            rule.id = id;
            rule.clone()
        };
        self.publish(StoreEvent::Updated(id));
        Ok(updated)
    }

    pub fn remove(&self, id: Uuid) -> Result<RecurringRule> {
        let removed = {
            let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);
            let index = rules
                .iter()
                .position(|rule| rule.id == id)
                .ok_or_else(|| not_found(id))?;
            rules.remove(index)
        };
        self.publish(StoreEvent::Removed(id));
        Ok(removed)
    }

    fn publish(&self, event: StoreEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        tracing::debug!(?event, subscribers = subscribers.len(), "store changed");
    }
}

fn not_found(id: Uuid) -> BalanceError {
    BalanceError::InvalidRef(format!("rule {} not found", id))
}
