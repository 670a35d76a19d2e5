pub mod allocator;

pub use allocator::{AllocationError, WORKING_SCALE, allocate, fraction_epsilon};
