//! Recurring payment scheduling: next-occurrence projection, the upcoming-payments
//! window, headline aggregation, and the monthly recurring total.
//!
//! Every function here is a pure transformation over a snapshot of rules and an
//! explicit reference date.

pub mod monthly;
pub mod occurrence;
pub mod summary;
pub mod upcoming;
pub mod window;

pub use monthly::{is_monthly, monthly_total, projected_spend};
pub use occurrence::{next_occurrence, occurrences_in_window};
pub use summary::{summarize, Summary};
pub use upcoming::{
    upcoming_payments, UpcomingPayment, UpcomingQuery, DEFAULT_HORIZON_DAYS,
    DEFAULT_UPCOMING_LIMIT,
};
pub use window::{DateWindow, DateWindowError};
