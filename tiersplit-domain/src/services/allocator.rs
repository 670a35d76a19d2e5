//! Proportional bill allocation with largest-remainder reconciliation.
//!
//! Splits a discounted total across price levels so that:
//! 1. Each level's share is proportional to its weight (max price x head count)
//! 2. Every person within a level pays the identical integer price
//! 3. The floor-rounding deficit is closed by promoting whole levels to their
//!    ceiling price, largest fractional remainder first
//!
//! Promotion is per level, not per person. When a promoted level has more
//! than one person the final promotion can overshoot the target total; that
//! block-rounding behavior is intentional and covered by tests.

use crate::model::{Bill, Level, LevelAllocation, Money, PersonCharge, PricedBill};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

/// Decimal places kept when quantizing exact per-person shares.
///
/// Shares are carried as `Decimal` and quantized once, before flooring, so
/// that boundary detection does not depend on repeating-division tails.
pub const WORKING_SCALE: u32 = 12;

/// Tolerance below which a fractional remainder counts as an exact integer
/// boundary. Shares within this distance of an integer contribute nothing to
/// the remainder queue and are never promoted.
pub fn fraction_epsilon() -> Decimal {
    Decimal::new(1, 9)
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// Total weight of all levels is zero. Unreachable through
    /// [`Bill::try_new`]; surfaced as a contract violation rather than a
    /// division by zero.
    #[error("total weight of all levels is zero")]
    DegenerateInput,
    /// An amount does not fit the integer currency unit range.
    #[error("amount {0} exceeds the integer unit range")]
    AmountOutOfRange(Decimal),
}

/// Computes the final integer price per person for a validated bill.
///
/// Deterministic and side-effect free: identical bills always reconcile
/// identically, including the tie-break by level id.
pub fn allocate<'a>(bill: &Bill<'a>) -> Result<PricedBill<'a>, AllocationError> {
    let total_amount = bill.total_amount().as_decimal();
    let total_weight = total_weight(bill.levels())?;

    tracing::debug!(
        level_count = bill.levels().len(),
        total_amount = %total_amount,
        total_weight = %total_weight,
        "Bill allocation started"
    );

    let mut allocations = bill
        .levels()
        .iter()
        .map(|level| floor_share(level, total_weight, total_amount))
        .collect::<Result<Vec<_>, AllocationError>>()?;

    let target = integer_target(total_amount)?;
    let charged = reconcile(&mut allocations, target);

    let promoted_count = allocations.iter().filter(|a| a.promoted).count();
    tracing::debug!(
        target_total = target,
        charged,
        promoted_count,
        "Bill allocation reconciled"
    );

    let charges = bill
        .levels()
        .iter()
        .zip(&allocations)
        .flat_map(|(level, allocation)| {
            level.people.iter().map(|&name| PersonCharge {
                name,
                price: allocation.final_price,
            })
        })
        .collect();

    Ok(PricedBill {
        charges,
        levels: allocations,
        charged_total: Money::from_i64(charged),
    })
}

/// Phase 1: sum of level weights, guarded against the division-by-zero hazard.
fn total_weight(levels: &[Level<'_>]) -> Result<Decimal, AllocationError> {
    let total: Decimal = levels.iter().map(Level::weight).sum();
    if total.is_zero() {
        tracing::error!(
            level_count = levels.len(),
            "Allocation rejected: total weight is zero"
        );
        return Err(AllocationError::DegenerateInput);
    }
    Ok(total)
}

/// Phases 2 and 3: exact proportional share, then floor and fractional
/// remainder for one level.
fn floor_share(
    level: &Level<'_>,
    total_weight: Decimal,
    total_amount: Decimal,
) -> Result<LevelAllocation, AllocationError> {
    let people_count = level.people_count();
    let exact_share = level.weight() / total_weight * total_amount;
    let per_person_exact = (exact_share / Decimal::from(people_count as u64))
        .round_dp_with_strategy(WORKING_SCALE, RoundingStrategy::MidpointAwayFromZero);

    let mut floor = per_person_exact.floor();
    let mut fractional = per_person_exact - floor;
    let epsilon = fraction_epsilon();
    if fractional <= epsilon {
        fractional = Decimal::ZERO;
    } else if Decimal::ONE - fractional <= epsilon {
        // Within epsilon of the next integer: the share IS that integer.
        floor += Decimal::ONE;
        fractional = Decimal::ZERO;
    }

    let floor_price = floor
        .to_i64()
        .ok_or(AllocationError::AmountOutOfRange(floor))?;
    let ceil_price = if fractional.is_zero() {
        floor_price
    } else {
        floor_price + 1
    };

    Ok(LevelAllocation {
        id: level.id,
        people_count,
        exact_share,
        per_person_exact,
        floor_price,
        ceil_price,
        fractional,
        final_price: floor_price,
        promoted: false,
    })
}

/// Reconciliation target: the total bill rounded half-up to the integer unit.
fn integer_target(total_amount: Decimal) -> Result<i64, AllocationError> {
    total_amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(AllocationError::AmountOutOfRange(total_amount))
}

/// Phase 4: largest-remainder promotion.
///
/// Walks levels by fractional remainder descending (ties by level id
/// ascending) and lifts each to its ceiling price until the running total
/// reaches the target. Returns the total actually charged.
fn reconcile(allocations: &mut [LevelAllocation], target: i64) -> i64 {
    let mut charged: i64 = allocations
        .iter()
        .map(|a| a.floor_price * a.people_count as i64)
        .sum();

    let mut order: Vec<usize> = (0..allocations.len()).collect();
    order.sort_by(|&a, &b| {
        allocations[b]
            .fractional
            .cmp(&allocations[a].fractional)
            .then_with(|| allocations[a].id.cmp(&allocations[b].id))
    });

    for idx in order {
        if charged >= target {
            break;
        }
        let allocation = &mut allocations[idx];
        let increment =
            (allocation.ceil_price - allocation.floor_price) * allocation.people_count as i64;
        allocation.final_price = allocation.ceil_price;
        allocation.promoted = increment > 0;
        charged += increment;
    }

    charged
}
