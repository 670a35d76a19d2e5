//! Conversation state machine for collecting one bill.
//!
//! Replays the prompt sequence total -> level count -> (max price -> names)
//! per level, free of any transport. One `BillIntake` exists per session;
//! there is no shared state between conversations.

use std::str::FromStr;

use fxhash::FxHashSet;
use rust_decimal::Decimal;
use tiersplit_domain::{LevelId, MAX_LEVELS, Money};

use crate::{
    error::IntakeError,
    model::{BillDraft, LevelDraft, Prompt},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IntakeState {
    AwaitingTotal,
    AwaitingLevelCount,
    AwaitingMaxPrice { level: u8 },
    AwaitingNames { level: u8 },
    Done,
}

/// Per-session intake context.
///
/// `apply` consumes one user message and either advances to the next prompt
/// or returns an [`IntakeError`] leaving the state untouched, so the caller
/// re-asks the same question.
#[derive(Clone, Debug)]
pub struct BillIntake {
    state: IntakeState,
    total_amount: Money,
    level_count: u8,
    levels: Vec<LevelDraft>,
}

impl BillIntake {
    pub fn new() -> Self {
        Self {
            state: IntakeState::AwaitingTotal,
            total_amount: Money::ZERO,
            level_count: 0,
            levels: Vec::new(),
        }
    }

    /// The question the shell should currently be asking.
    pub fn prompt(&self) -> Prompt {
        match self.state {
            IntakeState::AwaitingTotal => Prompt::Total,
            IntakeState::AwaitingLevelCount => Prompt::LevelCount,
            IntakeState::AwaitingMaxPrice { level } => Prompt::MaxPrice {
                level: LevelId(level),
            },
            IntakeState::AwaitingNames { level } => Prompt::Names {
                level: LevelId(level),
            },
            IntakeState::Done => Prompt::Done,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == IntakeState::Done
    }

    /// Feeds one user message into the conversation.
    pub fn apply(&mut self, input: &str) -> Result<Prompt, IntakeError> {
        match self.state {
            IntakeState::AwaitingTotal => {
                self.total_amount = parse_positive_amount(input)?;
                self.state = IntakeState::AwaitingLevelCount;
            }
            IntakeState::AwaitingLevelCount => {
                self.level_count = parse_level_count(input)?;
                self.state = IntakeState::AwaitingMaxPrice { level: 1 };
            }
            IntakeState::AwaitingMaxPrice { level } => {
                let max_price = parse_positive_amount(input)?;
                self.levels.push(LevelDraft {
                    max_price,
                    people: Vec::new(),
                });
                self.state = IntakeState::AwaitingNames { level };
            }
            IntakeState::AwaitingNames { level } => {
                let people = parse_names(input)?;
                if let Some(draft) = self.levels.last_mut() {
                    draft.people = people;
                }
                self.state = if level < self.level_count {
                    IntakeState::AwaitingMaxPrice { level: level + 1 }
                } else {
                    IntakeState::Done
                };
            }
            IntakeState::Done => {}
        }
        Ok(self.prompt())
    }

    /// Discards all collected input and starts over.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Hands back the collected draft once the conversation is complete.
    pub fn into_draft(self) -> Option<BillDraft> {
        if self.state != IntakeState::Done {
            return None;
        }
        Some(BillDraft {
            total_amount: self.total_amount,
            levels: self.levels,
        })
    }
}

impl Default for BillIntake {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_positive_amount(input: &str) -> Result<Money, IntakeError> {
    let value = Decimal::from_str(input.trim())
        .map_err(|_| IntakeError::InvalidNumber(input.trim().to_string()))?;
    let amount = Money::from_decimal(value);
    if !amount.is_positive() {
        return Err(IntakeError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

fn parse_level_count(input: &str) -> Result<u8, IntakeError> {
    let count: i64 = input
        .trim()
        .parse()
        .map_err(|_| IntakeError::InvalidNumber(input.trim().to_string()))?;
    if !(1..=MAX_LEVELS as i64).contains(&count) {
        return Err(IntakeError::LevelCountOutOfRange(count));
    }
    Ok(count as u8)
}

fn parse_names(input: &str) -> Result<Vec<String>, IntakeError> {
    let names: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        return Err(IntakeError::NoNames);
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for name in &names {
        if !seen.insert(name) {
            return Err(IntakeError::DuplicateName(name.clone()));
        }
    }
    Ok(names)
}
