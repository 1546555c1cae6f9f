//! Property tests for cost allocation.
//!
//! The reconciliation guarantee is the whole point of the remainder
//! policy, so it is exercised over arbitrary batch sets.

use proptest::prelude::*;
use rust_decimal::Decimal;
use saldo_shared::types::BatchId;

use super::{allocate_costs, BatchCostInput};

fn batch_strategy() -> impl Strategy<Value = BatchCostInput> {
    ((1i64..1_000_000i64), (1i64..10_000i64)).prop_map(|(price, qty)| BatchCostInput {
        batch_id: BatchId::new(),
        import_price: Decimal::new(price, 2),
        import_qty: Decimal::from(qty),
        own_duty: Decimal::ZERO,
        own_freight: Decimal::ZERO,
        own_other: Decimal::ZERO,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any non-empty batch set with positive values, the
    /// allocations sum exactly to the allocable total.
    #[test]
    fn prop_allocation_sum_reconciles(
        total_cents in 0i64..100_000_000_000i64,
        batches in proptest::collection::vec(batch_strategy(), 1..12),
    ) {
        let total = Decimal::new(total_cents, 2);
        let result = allocate_costs(total, &batches).unwrap();

        let sum: Decimal = result.iter().map(|a| a.allocated_cost).sum();
        prop_assert_eq!(sum, total);
    }

    /// No batch ever receives a negative allocation: rounding toward
    /// zero means the last batch's remainder is always non-negative.
    #[test]
    fn prop_allocations_non_negative(
        total_cents in 0i64..100_000_000_000i64,
        batches in proptest::collection::vec(batch_strategy(), 1..12),
    ) {
        let total = Decimal::new(total_cents, 2);
        let result = allocate_costs(total, &batches).unwrap();

        for alloc in &result {
            prop_assert!(alloc.allocated_cost >= Decimal::ZERO);
        }
    }

    /// Landed cost decomposes as value + allocation for batches with
    /// no batch-own charges.
    #[test]
    fn prop_landed_cost_decomposition(
        total_cents in 0i64..10_000_000_000i64,
        batches in proptest::collection::vec(batch_strategy(), 1..8),
    ) {
        let total = Decimal::new(total_cents, 2);
        let result = allocate_costs(total, &batches).unwrap();

        for alloc in &result {
            prop_assert_eq!(alloc.landed_cost, alloc.batch_value + alloc.allocated_cost);
        }
    }
}
