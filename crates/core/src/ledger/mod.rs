//! Double-entry posting logic.
//!
//! This module implements the pure side of the ledger:
//! - Domain types for posting journal entries
//! - Business rule validation executed before any persistence
//! - Totals calculation for the store's recompute contract
//! - Error types for ledger operations

pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use types::{
    AccountStatus, EntryTotals, EntryType, JournalLineInput, PostEntryInput, ResolvedLine,
    SourceModule,
};
pub use validation::{calculate_totals, validate_and_resolve};
