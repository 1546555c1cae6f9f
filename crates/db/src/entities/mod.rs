//! `SeaORM` entity definitions.

pub mod accounts;
pub mod bank_statement_lines;
pub mod batches;
pub mod cash_movements;
pub mod containers;
pub mod invoices;
pub mod journal_entries;
pub mod journal_lines;
pub mod payment_allocations;
pub mod reservations;
pub mod sales_orders;
pub mod sea_orm_active_enums;
pub mod stock_movements;
