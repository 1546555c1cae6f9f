//! Initial database migration.
//!
//! Creates all enums and tables for the financial core, with CHECK
//! constraints backing the balance, stock, and reconciliation
//! invariants independently of any writer.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: LEDGER
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_LINES_SQL).await?;

        // ============================================================
        // PART 3: IMPORT COSTING
        // ============================================================
        db.execute_unprepared(CONTAINERS_SQL).await?;
        db.execute_unprepared(BATCHES_SQL).await?;
        db.execute_unprepared(STOCK_MOVEMENTS_SQL).await?;

        // ============================================================
        // PART 4: SALES & RESERVATIONS
        // ============================================================
        db.execute_unprepared(SALES_ORDERS_SQL).await?;
        db.execute_unprepared(RESERVATIONS_SQL).await?;

        // ============================================================
        // PART 5: CASH & RECONCILIATION
        // ============================================================
        db.execute_unprepared(CASH_MOVEMENTS_SQL).await?;
        db.execute_unprepared(BANK_STATEMENT_LINES_SQL).await?;

        // ============================================================
        // PART 6: RECEIVABLES
        // ============================================================
        db.execute_unprepared(INVOICES_SQL).await?;
        db.execute_unprepared(PAYMENT_ALLOCATIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE account_type AS ENUM ('asset', 'liability', 'equity', 'revenue', 'expense');
CREATE TYPE normal_balance AS ENUM ('debit', 'credit');
CREATE TYPE source_module AS ENUM ('purchases', 'sales', 'expenses', 'transfers', 'cash_movements', 'adjustments');
CREATE TYPE reservation_status AS ENUM ('active', 'released', 'cancelled');
CREATE TYPE order_status AS ENUM ('open', 'delivered', 'cancelled');
CREATE TYPE stock_tx_type AS ENUM ('purchase', 'delivery', 'adjustment', 'return');
CREATE TYPE cash_kind AS ENUM ('expense', 'petty_cash', 'receipt', 'payment', 'fund_transfer');
CREATE TYPE cash_channel AS ENUM ('bank', 'cash');
CREATE TYPE movement_category AS ENUM ('import', 'operating', 'logistics', 'other');
CREATE TYPE recon_status AS ENUM ('unmatched', 'suggested', 'needs_review', 'matched');
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    code VARCHAR(32) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    normal_balance normal_balance NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    entry_date DATE NOT NULL,
    source_module source_module NOT NULL,
    reference_id UUID,
    reference_number VARCHAR(64),
    description TEXT NOT NULL,
    total_debit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    total_credit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    is_posted BOOLEAN NOT NULL DEFAULT TRUE,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- a posted entry must balance within a cent, no matter who writes it
    CONSTRAINT journal_entries_balanced CHECK (
        NOT is_posted OR ABS(total_debit - total_credit) < 0.01
    )
);

CREATE INDEX idx_journal_entries_source ON journal_entries (source_module, reference_id);
CREATE INDEX idx_journal_entries_date ON journal_entries (entry_date);
";

const JOURNAL_LINES_SQL: &str = r"
CREATE TABLE journal_lines (
    id UUID PRIMARY KEY,
    entry_id UUID NOT NULL REFERENCES journal_entries (id),
    account_id UUID NOT NULL REFERENCES accounts (id),
    debit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    credit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    memo TEXT,
    customer_id UUID,
    supplier_id UUID,
    batch_id UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- a line carries a debit or a credit, never both, never negative
    CONSTRAINT journal_lines_one_side CHECK (
        (debit > 0 AND credit = 0) OR (credit > 0 AND debit = 0)
    )
);

CREATE INDEX idx_journal_lines_entry ON journal_lines (entry_id);
CREATE INDEX idx_journal_lines_account ON journal_lines (account_id);
";

const CONTAINERS_SQL: &str = r"
CREATE TABLE containers (
    id UUID PRIMARY KEY,
    code VARCHAR(64) NOT NULL UNIQUE,
    duty NUMERIC(18, 2) NOT NULL DEFAULT 0,
    freight NUMERIC(18, 2) NOT NULL DEFAULT 0,
    handling NUMERIC(18, 2) NOT NULL DEFAULT 0,
    port_charges NUMERIC(18, 2) NOT NULL DEFAULT 0,
    other_fees NUMERIC(18, 2) NOT NULL DEFAULT 0,
    import_vat NUMERIC(18, 2) NOT NULL DEFAULT 0,
    import_wht NUMERIC(18, 2) NOT NULL DEFAULT 0,
    misc_costs NUMERIC(18, 2) NOT NULL DEFAULT 0,
    total_allocable_cost NUMERIC(18, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const BATCHES_SQL: &str = r"
CREATE TABLE batches (
    id UUID PRIMARY KEY,
    container_id UUID REFERENCES containers (id),
    product_code VARCHAR(64) NOT NULL,
    import_price NUMERIC(18, 2) NOT NULL DEFAULT 0,
    import_qty NUMERIC(18, 3) NOT NULL DEFAULT 0,
    own_duty NUMERIC(18, 2) NOT NULL DEFAULT 0,
    own_freight NUMERIC(18, 2) NOT NULL DEFAULT 0,
    own_other NUMERIC(18, 2) NOT NULL DEFAULT 0,
    allocated_cost NUMERIC(18, 2) NOT NULL DEFAULT 0,
    landed_cost NUMERIC(18, 2) NOT NULL DEFAULT 0,
    landed_cost_per_unit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    current_stock NUMERIC(18, 3) NOT NULL DEFAULT 0,
    reserved_stock NUMERIC(18, 3) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT batches_stock_non_negative CHECK (current_stock >= 0),
    CONSTRAINT batches_reserved_bounds CHECK (
        reserved_stock >= 0 AND reserved_stock <= current_stock
    )
);

CREATE INDEX idx_batches_container ON batches (container_id);
";

const STOCK_MOVEMENTS_SQL: &str = r"
CREATE TABLE stock_movements (
    id UUID PRIMARY KEY,
    batch_id UUID NOT NULL REFERENCES batches (id),
    delta NUMERIC(18, 3) NOT NULL,
    tx_type stock_tx_type NOT NULL,
    reference_id UUID,
    notes TEXT,
    resulting_stock NUMERIC(18, 3) NOT NULL,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_stock_movements_batch ON stock_movements (batch_id, created_at);
";

const SALES_ORDERS_SQL: &str = r"
CREATE TABLE sales_orders (
    id UUID PRIMARY KEY,
    order_number VARCHAR(64) NOT NULL UNIQUE,
    customer_id UUID NOT NULL,
    status order_status NOT NULL DEFAULT 'open',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const RESERVATIONS_SQL: &str = r"
CREATE TABLE reservations (
    id UUID PRIMARY KEY,
    order_id UUID NOT NULL REFERENCES sales_orders (id),
    batch_id UUID NOT NULL REFERENCES batches (id),
    quantity NUMERIC(18, 3) NOT NULL,
    status reservation_status NOT NULL DEFAULT 'active',
    release_reason TEXT,
    released_at TIMESTAMPTZ,
    restored_by UUID,
    restored_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT reservations_positive_qty CHECK (quantity > 0)
);

CREATE INDEX idx_reservations_batch_status ON reservations (batch_id, status);
CREATE INDEX idx_reservations_order ON reservations (order_id);
";

const CASH_MOVEMENTS_SQL: &str = r"
CREATE TABLE cash_movements (
    id UUID PRIMARY KEY,
    kind cash_kind NOT NULL,
    channel cash_channel NOT NULL,
    category movement_category NOT NULL,
    amount NUMERIC(18, 2) NOT NULL,
    movement_date DATE NOT NULL,
    description TEXT NOT NULL,
    container_id UUID REFERENCES containers (id),
    challan_id UUID,
    bank_account_id UUID,
    journal_entry_id UUID REFERENCES journal_entries (id),
    matched_bank_line_id UUID,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT cash_movements_positive_amount CHECK (amount > 0),
    -- import movements must name their container
    CONSTRAINT cash_movements_import_container CHECK (
        category <> 'import' OR container_id IS NOT NULL
    )
);

CREATE INDEX idx_cash_movements_container ON cash_movements (container_id)
    WHERE container_id IS NOT NULL;
CREATE INDEX idx_cash_movements_unclaimed ON cash_movements (movement_date, amount)
    WHERE matched_bank_line_id IS NULL;
";

const BANK_STATEMENT_LINES_SQL: &str = r"
CREATE TABLE bank_statement_lines (
    id UUID PRIMARY KEY,
    bank_account_id UUID,
    txn_date DATE NOT NULL,
    debit_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    credit_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    description TEXT,
    recon_status recon_status NOT NULL DEFAULT 'unmatched',
    matched_movement_id UUID REFERENCES cash_movements (id),
    matched_entry_id UUID REFERENCES journal_entries (id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT bank_lines_one_side CHECK (
        (debit_amount > 0 AND credit_amount = 0)
        OR (credit_amount > 0 AND debit_amount = 0)
    ),
    -- at most one matched target, never both
    CONSTRAINT bank_lines_single_target CHECK (
        matched_movement_id IS NULL OR matched_entry_id IS NULL
    )
);

CREATE INDEX idx_bank_lines_status ON bank_statement_lines (recon_status, txn_date);
";

const INVOICES_SQL: &str = r"
CREATE TABLE invoices (
    id UUID PRIMARY KEY,
    invoice_number VARCHAR(64) NOT NULL UNIQUE,
    customer_id UUID NOT NULL,
    total_amount NUMERIC(18, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PAYMENT_ALLOCATIONS_SQL: &str = r"
CREATE TABLE payment_allocations (
    id UUID PRIMARY KEY,
    invoice_id UUID NOT NULL REFERENCES invoices (id),
    movement_id UUID REFERENCES cash_movements (id),
    amount NUMERIC(18, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT payment_allocations_positive CHECK (amount > 0)
);

CREATE INDEX idx_payment_allocations_invoice ON payment_allocations (invoice_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS payment_allocations;
DROP TABLE IF EXISTS invoices;
DROP TABLE IF EXISTS bank_statement_lines;
DROP TABLE IF EXISTS cash_movements;
DROP TABLE IF EXISTS reservations;
DROP TABLE IF EXISTS sales_orders;
DROP TABLE IF EXISTS stock_movements;
DROP TABLE IF EXISTS batches;
DROP TABLE IF EXISTS containers;
DROP TABLE IF EXISTS journal_lines;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS accounts;
DROP TYPE IF EXISTS recon_status;
DROP TYPE IF EXISTS movement_category;
DROP TYPE IF EXISTS cash_channel;
DROP TYPE IF EXISTS cash_kind;
DROP TYPE IF EXISTS stock_tx_type;
DROP TYPE IF EXISTS order_status;
DROP TYPE IF EXISTS reservation_status;
DROP TYPE IF EXISTS source_module;
DROP TYPE IF EXISTS normal_balance;
DROP TYPE IF EXISTS account_type;
";
