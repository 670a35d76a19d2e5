//! Draft-to-price-list orchestration.

use tiersplit_domain::{PricedBill, allocate};

use crate::{error::PricingError, model::BillDraft};

/// Validates a completed draft and allocates the final per-person prices.
///
/// Any error is user-correctable from the shell's point of view: it should
/// re-prompt rather than abort. [`PricingError::Allocation`] additionally
/// indicates a validation gap upstream and is logged as such.
pub fn price_bill(draft: &BillDraft) -> Result<PricedBill<'_>, PricingError<'_>> {
    let bill = draft.to_bill()?;
    let priced = allocate(&bill).inspect_err(|err| {
        tracing::error!(error = %err, "Allocator rejected a validated bill");
    })?;
    Ok(priced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LevelDraft;
    use tiersplit_domain::{BillBuildError, LevelId, Money};

    fn draft(total: i64, levels: Vec<(i64, Vec<&str>)>) -> BillDraft {
        BillDraft {
            total_amount: Money::from_i64(total),
            levels: levels
                .into_iter()
                .map(|(price, people)| LevelDraft {
                    max_price: Money::from_i64(price),
                    people: people.into_iter().map(str::to_string).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn prices_a_complete_draft() {
        let draft = draft(100, vec![(10, vec!["Alice", "Bob"])]);
        let priced = price_bill(&draft).expect("pricing should succeed");

        assert_eq!(priced.charges.len(), 2);
        assert!(priced.charges.iter().all(|c| c.price == 50));
        assert_eq!(priced.charged_total, Money::from_i64(100));
    }

    #[test]
    fn invalid_draft_surfaces_build_error() {
        let draft = draft(100, vec![(10, vec!["Alice", "Alice"])]);
        let result = price_bill(&draft);

        assert_eq!(
            result.unwrap_err(),
            PricingError::InvalidBill(BillBuildError::DuplicatePersonName {
                level: LevelId(1),
                name: "Alice",
            })
        );
    }
}
