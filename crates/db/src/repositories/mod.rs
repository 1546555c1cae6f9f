//! Repositories owning the write contracts of the financial core.
//!
//! Every repository method that mutates state runs as one database
//! transaction: all rows for the logical operation commit or none do.
//! Derived aggregates (entry totals, reserved stock, container
//! allocable totals) are recomputed inside the same transaction as the
//! mutation that invalidated them, never by a background job.

pub mod cash;
pub mod container;
pub mod invoice;
pub mod ledger;
pub mod reconciliation;
pub mod reservation;
pub mod stock;

pub use cash::CashMovementRepository;
pub use container::ContainerRepository;
pub use invoice::InvoiceRepository;
pub use ledger::LedgerRepository;
pub use reconciliation::ReconciliationRepository;
pub use reservation::ReservationRepository;
pub use stock::StockRepository;
