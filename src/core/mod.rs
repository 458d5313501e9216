//! Application services built on the pure scheduling functions.
//! Services are constructed explicitly and share state through `Arc`s.

pub mod services;
pub mod store;
pub mod time;

pub use store::{RuleStore, StoreEvent};
pub use time::{Clock, FixedClock, SystemClock};
