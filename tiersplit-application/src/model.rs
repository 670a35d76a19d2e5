use tiersplit_domain::{Bill, BillBuildError, Level, LevelId, Money};

/// Identifier of one conversation; every chat gets its own intake session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub u64);

/// What the shell should ask the user for next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// Total bill after discount.
    Total,
    /// Number of price levels (1..=5).
    LevelCount,
    /// Max pre-discount price for one level.
    MaxPrice { level: LevelId },
    /// Comma-separated participant names for one level.
    Names { level: LevelId },
    /// All input collected; the draft is ready.
    Done,
}

/// One collected level: price plus the names entered for it.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelDraft {
    pub max_price: Money,
    pub people: Vec<String>,
}

/// Fully collected, owned input for one bill.
///
/// Owns the name strings; [`BillDraft::to_bill`] borrows them into the
/// domain `Bill`, which is where the preconditions are enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct BillDraft {
    pub total_amount: Money,
    pub levels: Vec<LevelDraft>,
}

impl BillDraft {
    pub fn to_bill(&self) -> Result<Bill<'_>, BillBuildError<'_>> {
        let levels = self
            .levels
            .iter()
            .enumerate()
            .map(|(idx, draft)| {
                Level::new(
                    LevelId(idx as u8 + 1),
                    draft.max_price,
                    draft.people.iter().map(String::as_str).collect(),
                )
            })
            .collect();
        Bill::try_new(self.total_amount, levels)
    }
}

/// Result of feeding one user message into a session.
#[derive(Debug, PartialEq)]
pub enum IntakeOutcome {
    /// Still collecting; ask this next.
    Prompt(Prompt),
    /// Input complete; the session is closed and the draft handed back.
    Completed(BillDraft),
}
