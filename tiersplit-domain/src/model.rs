use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use fxhash::FxHashSet;
use rust_decimal::Decimal;
use thiserror::Error;

/// Upper bound on the number of price levels in a single bill.
pub const MAX_LEVELS: usize = 5;

/// A monetary amount with decimal precision.
///
/// Intermediate shares are carried at full `Decimal` precision; only the
/// final per-person prices collapse to integer currency units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Builds a money value of `num * 10^(-scale)`, e.g. `new(1050, 2)` is 10.50.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// Identifier of a price level, unique within one bill (1..=N).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LevelId(pub u8);

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A price tier: everyone in it nominally pays the same pre-discount
/// maximum price. Names borrow from the caller's storage.
#[derive(Clone, Debug, PartialEq)]
pub struct Level<'a> {
    pub id: LevelId,
    pub max_price: Money,
    pub people: Vec<&'a str>,
}

impl<'a> Level<'a> {
    pub fn new(id: LevelId, max_price: Money, people: Vec<&'a str>) -> Self {
        Self {
            id,
            max_price,
            people,
        }
    }

    pub fn people_count(&self) -> usize {
        self.people.len()
    }

    /// A level's influence on the split: nominal price times head count.
    pub fn weight(&self) -> Decimal {
        self.max_price.as_decimal() * Decimal::from(self.people.len() as u64)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BillBuildError<'a> {
    #[error("total amount must be positive (got {0})")]
    InvalidTotal(Money),
    #[error("level count must be between 1 and {max} (got {given})")]
    LevelCountOutOfRange { given: usize, max: usize },
    #[error("duplicate level id {0}")]
    DuplicateLevelId(LevelId),
    #[error("level {level}: max price must be positive (got {max_price})")]
    NonPositiveMaxPrice { level: LevelId, max_price: Money },
    #[error("level {level}: at least one person is required")]
    NoPeople { level: LevelId },
    #[error("level {level}: person name is blank")]
    BlankPersonName { level: LevelId },
    #[error("level {level}: duplicate person name {name:?}")]
    DuplicatePersonName { level: LevelId, name: &'a str },
}

/// A validated, immutable bill ready for allocation.
///
/// Construction via [`Bill::try_new`] is the single validation point; the
/// allocator relies on these invariants and never re-checks them.
#[derive(Clone, Debug, PartialEq)]
pub struct Bill<'a> {
    total_amount: Money,
    levels: Vec<Level<'a>>,
}

impl<'a> Bill<'a> {
    pub fn try_new(
        total_amount: Money,
        levels: Vec<Level<'a>>,
    ) -> Result<Self, BillBuildError<'a>> {
        if !total_amount.is_positive() {
            return Err(BillBuildError::InvalidTotal(total_amount));
        }
        if levels.is_empty() || levels.len() > MAX_LEVELS {
            return Err(BillBuildError::LevelCountOutOfRange {
                given: levels.len(),
                max: MAX_LEVELS,
            });
        }

        let mut seen_ids: FxHashSet<LevelId> = FxHashSet::default();
        for level in &levels {
            if !seen_ids.insert(level.id) {
                return Err(BillBuildError::DuplicateLevelId(level.id));
            }
            if !level.max_price.is_positive() {
                return Err(BillBuildError::NonPositiveMaxPrice {
                    level: level.id,
                    max_price: level.max_price,
                });
            }
            if level.people.is_empty() {
                return Err(BillBuildError::NoPeople { level: level.id });
            }

            let mut seen_names: FxHashSet<&str> = FxHashSet::default();
            for name in &level.people {
                if name.trim().is_empty() {
                    return Err(BillBuildError::BlankPersonName { level: level.id });
                }
                if !seen_names.insert(name) {
                    return Err(BillBuildError::DuplicatePersonName {
                        level: level.id,
                        name,
                    });
                }
            }
        }

        Ok(Self {
            total_amount,
            levels,
        })
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn levels(&self) -> &[Level<'a>] {
        &self.levels
    }
}

/// Per-level outcome of the allocation, kept in original level order.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelAllocation {
    pub id: LevelId,
    pub people_count: usize,
    /// Exact proportional share of the whole level before rounding.
    pub exact_share: Decimal,
    /// Exact per-person share before rounding.
    pub per_person_exact: Decimal,
    pub floor_price: i64,
    pub ceil_price: i64,
    /// Fractional remainder of `per_person_exact` in [0, 1).
    pub fractional: Decimal,
    pub final_price: i64,
    /// Whether the reconciliation pass lifted this level to its ceiling.
    pub promoted: bool,
}

/// One participant's final integer price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonCharge<'a> {
    pub name: &'a str,
    pub price: i64,
}

/// The finalized per-person price list.
///
/// Charges are grouped by level in original level order and keep each
/// level's original name order.
#[derive(Clone, Debug, PartialEq)]
pub struct PricedBill<'a> {
    pub charges: Vec<PersonCharge<'a>>,
    pub levels: Vec<LevelAllocation>,
    /// Sum of all final prices actually charged.
    pub charged_total: Money,
}
