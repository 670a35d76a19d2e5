#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod intake;
pub mod model;
pub mod pricing;
pub mod session;

pub use error::{IntakeError, PricingError};
pub use intake::BillIntake;
pub use model::{BillDraft, ChatId, IntakeOutcome, LevelDraft, Prompt};
pub use pricing::price_bill;
pub use session::SessionStore;
