pub mod rule_service;
pub mod schedule_service;

pub use rule_service::{RuleDraft, RuleService};
pub use schedule_service::{ScheduleService, UpcomingEntry, UpcomingReport};

use crate::errors::BalanceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Balance(#[from] BalanceError),
    #[error("{0}")]
    Invalid(String),
}
