#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Bill, BillBuildError, Level, LevelAllocation, LevelId, MAX_LEVELS, Money, PersonCharge,
    PricedBill,
};
pub use services::{AllocationError, allocate};
