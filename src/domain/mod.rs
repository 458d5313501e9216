pub mod common;
pub mod recurring;

pub use common::{Displayable, Frequency, RuleCategory};
pub use recurring::RecurringRule;
