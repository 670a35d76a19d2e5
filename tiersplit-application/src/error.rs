use thiserror::Error;
use tiersplit_domain::{AllocationError, BillBuildError, MAX_LEVELS, Money};

/// User-correctable input errors during intake.
///
/// Returned as values, never thrown: on any of these the intake state is
/// unchanged and the shell re-asks the same prompt.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("not a valid number: {0:?}")]
    InvalidNumber(String),
    #[error("amount must be positive (got {0})")]
    NonPositiveAmount(Money),
    #[error("level count must be between 1 and {MAX_LEVELS} (got {0})")]
    LevelCountOutOfRange(i64),
    #[error("at least one name is required")]
    NoNames,
    #[error("duplicate name {0:?}")]
    DuplicateName(String),
}

/// Failure while turning a completed draft into a priced bill.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PricingError<'a> {
    /// The draft violated a bill precondition; user-correctable.
    #[error(transparent)]
    InvalidBill(BillBuildError<'a>),
    /// The allocator rejected a bill that passed validation; a contract
    /// violation, not a user error.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

impl<'a> From<BillBuildError<'a>> for PricingError<'a> {
    fn from(err: BillBuildError<'a>) -> Self {
        Self::InvalidBill(err)
    }
}
