use std::fmt::Write;

use tiersplit_domain::PricedBill;

/// Renders the finalized price list as the user-facing text block.
pub struct PriceListPresenter;

impl PriceListPresenter {
    /// One line per participant, original level and name order.
    pub fn render(priced: &PricedBill<'_>) -> String {
        let mut out = String::from("Final prices:\n");
        for charge in &priced.charges {
            let _ = writeln!(out, "{}: {}", charge.name, charge.price);
        }
        out
    }
}
