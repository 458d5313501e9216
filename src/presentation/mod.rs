//! Display adapters that turn scheduling results into view models.

pub mod card;
pub mod labels;

pub use card::{CardRow, UpcomingCard};
pub use labels::{format_minor_units, relative_day_label};
