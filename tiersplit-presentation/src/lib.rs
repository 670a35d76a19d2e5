#![warn(clippy::uninlined_format_args)]

pub mod price_list_presenter;

pub use price_list_presenter::PriceListPresenter;
