//! Landed-cost allocation across import batches.
//!
//! A container's non-tax import costs are distributed across its
//! linked batches proportional to batch value. Plain proportional
//! division loses or gains cents under rounding, so the split is
//! reconciled deterministically: every batch but the last receives its
//! rounded-down share and the last batch absorbs the remainder,
//! guaranteeing the allocations sum exactly to the allocable total.

pub mod error;

#[cfg(test)]
mod allocation_props;

pub use error::AllocationError;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use saldo_shared::types::{round_money, BatchId, MONEY_SCALE};
use serde::{Deserialize, Serialize};

/// Cost fields recorded on an import container.
///
/// Duty and the two import tax fields are tracked for landed cost
/// reporting but are excluded from proportional allocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerCosts {
    /// Customs duty (excluded from allocation).
    pub duty: Decimal,
    /// Ocean/air freight.
    pub freight: Decimal,
    /// Handling charges.
    pub handling: Decimal,
    /// Port charges.
    pub port_charges: Decimal,
    /// Other container-level fees.
    pub other_fees: Decimal,
    /// Import VAT (excluded from allocation).
    pub import_vat: Decimal,
    /// Import withholding tax (excluded from allocation).
    pub import_wht: Decimal,
    /// Misc import costs rolled up from linked cash movements.
    pub misc_costs: Decimal,
}

impl ContainerCosts {
    /// Total cost eligible for allocation across batches.
    ///
    /// Excludes duty, import VAT, and import withholding tax.
    #[must_use]
    pub fn allocable_total(&self) -> Decimal {
        self.freight + self.handling + self.port_charges + self.other_fees + self.misc_costs
    }
}

/// Per-batch facts needed for allocation.
#[derive(Debug, Clone)]
pub struct BatchCostInput {
    /// The batch being costed.
    pub batch_id: BatchId,
    /// Import unit price.
    pub import_price: Decimal,
    /// Import quantity.
    pub import_qty: Decimal,
    /// Duty recorded at batch level.
    pub own_duty: Decimal,
    /// Freight recorded at batch level.
    pub own_freight: Decimal,
    /// Other charges recorded at batch level.
    pub own_other: Decimal,
}

impl BatchCostInput {
    /// Batch value: import price times import quantity.
    #[must_use]
    pub fn batch_value(&self) -> Decimal {
        self.import_price * self.import_qty
    }

    /// Charges recorded directly on the batch.
    #[must_use]
    pub fn own_charges(&self) -> Decimal {
        self.own_duty + self.own_freight + self.own_other
    }
}

/// Result of allocation for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAllocation {
    /// The batch being costed.
    pub batch_id: BatchId,
    /// Batch value used for the share calculation.
    pub batch_value: Decimal,
    /// Share of the container's allocable cost.
    pub allocated_cost: Decimal,
    /// Batch value + allocated cost + batch-own charges.
    pub landed_cost: Decimal,
    /// Landed cost divided by import quantity (0 if quantity is 0).
    pub landed_cost_per_unit: Decimal,
}

/// Distributes a container's allocable cost across its batches
/// proportional to batch value.
///
/// The last batch absorbs the rounding remainder so that
/// `sum(allocated_cost) == total_allocable` exactly. When the total
/// batch value is zero (no batches, or all values zero) every
/// allocation is reset to zero and landed cost falls back to batch
/// value plus batch-own charges; no division happens.
///
/// # Errors
///
/// Returns [`AllocationError::NegativeAllocableTotal`] if the
/// allocable total is negative, which indicates corrupted container
/// cost fields.
pub fn allocate_costs(
    total_allocable: Decimal,
    batches: &[BatchCostInput],
) -> Result<Vec<BatchAllocation>, AllocationError> {
    if total_allocable < Decimal::ZERO {
        return Err(AllocationError::NegativeAllocableTotal(total_allocable));
    }

    let total_batch_value: Decimal = batches.iter().map(BatchCostInput::batch_value).sum();

    if total_batch_value <= Decimal::ZERO {
        return Ok(batches.iter().map(|b| zero_allocation(b)).collect());
    }

    let mut allocations = Vec::with_capacity(batches.len());
    let mut distributed = Decimal::ZERO;

    for (idx, batch) in batches.iter().enumerate() {
        let is_last = idx == batches.len() - 1;
        let allocated = if is_last {
            // remainder policy: the final batch reconciles the sum
            total_allocable - distributed
        } else {
            let share = batch.batch_value() / total_batch_value;
            (total_allocable * share)
                .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToZero)
        };
        distributed += allocated;

        allocations.push(finish_allocation(batch, allocated));
    }

    Ok(allocations)
}

fn zero_allocation(batch: &BatchCostInput) -> BatchAllocation {
    finish_allocation(batch, Decimal::ZERO)
}

fn finish_allocation(batch: &BatchCostInput, allocated_cost: Decimal) -> BatchAllocation {
    let batch_value = batch.batch_value();
    let landed_cost = batch_value + allocated_cost + batch.own_charges();
    let landed_cost_per_unit = if batch.import_qty == Decimal::ZERO {
        Decimal::ZERO
    } else {
        round_money(landed_cost / batch.import_qty)
    };

    BatchAllocation {
        batch_id: batch.batch_id,
        batch_value,
        allocated_cost,
        landed_cost,
        landed_cost_per_unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn batch(price: Decimal, qty: Decimal) -> BatchCostInput {
        BatchCostInput {
            batch_id: BatchId::new(),
            import_price: price,
            import_qty: qty,
            own_duty: Decimal::ZERO,
            own_freight: Decimal::ZERO,
            own_other: Decimal::ZERO,
        }
    }

    #[test]
    fn test_allocable_total_excludes_taxes() {
        let costs = ContainerCosts {
            duty: dec!(5_000_000),
            freight: dec!(1_000_000),
            handling: dec!(200_000),
            port_charges: dec!(300_000),
            other_fees: dec!(100_000),
            import_vat: dec!(2_000_000),
            import_wht: dec!(500_000),
            misc_costs: dec!(400_000),
        };
        assert_eq!(costs.allocable_total(), dec!(2_000_000));
    }

    #[test]
    fn test_two_batches_sum_reconciles_exactly() {
        // production scenario: an allocable total that does not divide
        // evenly across the two batch values
        let total = dec!(34_299_504);
        let batches = vec![
            batch(dec!(7_333), dec!(1_000)),
            batch(dec!(11_000), dec!(400)),
        ];

        let result = allocate_costs(total, &batches).unwrap();
        let sum: Decimal = result.iter().map(|a| a.allocated_cost).sum();
        assert_eq!(sum, total);

        for alloc in &result {
            assert_eq!(alloc.landed_cost, alloc.batch_value + alloc.allocated_cost);
            assert!(alloc.allocated_cost >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_proportionality() {
        // batch values 3:1, so allocations split 75/25
        let batches = vec![batch(dec!(300), dec!(10)), batch(dec!(100), dec!(10))];
        let result = allocate_costs(dec!(1000), &batches).unwrap();

        assert_eq!(result[0].allocated_cost, dec!(750));
        assert_eq!(result[1].allocated_cost, dec!(250));
    }

    #[test]
    fn test_zero_batch_value_resets_to_zero() {
        let batches = vec![batch(dec!(0), dec!(100)), batch(dec!(500), dec!(0))];
        let result = allocate_costs(dec!(1_000_000), &batches).unwrap();

        for alloc in &result {
            assert_eq!(alloc.allocated_cost, Decimal::ZERO);
            assert_eq!(alloc.landed_cost, alloc.batch_value);
        }
    }

    #[test]
    fn test_no_batches() {
        let result = allocate_costs(dec!(1_000_000), &[]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_single_batch_takes_everything() {
        let batches = vec![batch(dec!(250), dec!(40))];
        let result = allocate_costs(dec!(123_456.78), &batches).unwrap();

        assert_eq!(result[0].allocated_cost, dec!(123_456.78));
        assert_eq!(result[0].landed_cost, dec!(10_000) + dec!(123_456.78));
    }

    #[test]
    fn test_own_charges_in_landed_cost() {
        let mut b = batch(dec!(100), dec!(50));
        b.own_duty = dec!(2_000);
        b.own_freight = dec!(500);

        let result = allocate_costs(dec!(0), &[b]).unwrap();
        // total allocable 0: landed = value + own charges
        assert_eq!(result[0].allocated_cost, Decimal::ZERO);
        assert_eq!(result[0].landed_cost, dec!(5_000) + dec!(2_500));
        assert_eq!(result[0].landed_cost_per_unit, dec!(150));
    }

    #[test]
    fn test_per_unit_zero_qty_guard() {
        let b = BatchCostInput {
            batch_id: BatchId::new(),
            import_price: dec!(100),
            import_qty: dec!(0),
            own_duty: Decimal::ZERO,
            own_freight: Decimal::ZERO,
            own_other: Decimal::ZERO,
        };
        let result = allocate_costs(dec!(0), &[b]).unwrap();
        assert_eq!(result[0].landed_cost_per_unit, Decimal::ZERO);
    }

    #[test]
    fn test_negative_allocable_rejected() {
        let batches = vec![batch(dec!(100), dec!(10))];
        assert!(matches!(
            allocate_costs(dec!(-1), &batches),
            Err(AllocationError::NegativeAllocableTotal(_))
        ));
    }

    #[test]
    fn test_uneven_thirds_remainder_to_last() {
        // 100 across three equal batches: 33.33 + 33.33 + 33.34
        let batches = vec![
            batch(dec!(10), dec!(1)),
            batch(dec!(10), dec!(1)),
            batch(dec!(10), dec!(1)),
        ];
        let result = allocate_costs(dec!(100), &batches).unwrap();

        assert_eq!(result[0].allocated_cost, dec!(33.33));
        assert_eq!(result[1].allocated_cost, dec!(33.33));
        assert_eq!(result[2].allocated_cost, dec!(33.34));
    }
}
