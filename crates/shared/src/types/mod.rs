//! Common types used across the application.

pub mod amount;
pub mod id;

pub use amount::{is_balanced, round_money, BALANCE_TOLERANCE, MONEY_SCALE};
pub use id::*;
