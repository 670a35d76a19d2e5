//! Chat-keyed session storage.
//!
//! Each conversation owns an isolated [`BillIntake`]; nothing is shared
//! between chats, so concurrent sessions need no coordination beyond the map
//! itself.

use std::sync::Arc;

use dashmap::DashMap;

use crate::{
    error::IntakeError,
    intake::BillIntake,
    model::{ChatId, IntakeOutcome, Prompt},
};

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<ChatId, BillIntake>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Starts (or restarts) the conversation for a chat and returns the
    /// first prompt.
    pub fn begin(&self, chat: ChatId) -> Prompt {
        let intake = BillIntake::new();
        let prompt = intake.prompt();
        if self.inner.insert(chat, intake).is_some() {
            tracing::debug!(chat = chat.0, "Restarted in-flight intake session");
        }
        prompt
    }

    /// Feeds one user message into the chat's session.
    ///
    /// Returns `None` when no session exists for the chat. A completed
    /// session is removed from the store and its draft handed back.
    pub fn apply(&self, chat: ChatId, input: &str) -> Option<Result<IntakeOutcome, IntakeError>> {
        let result = {
            let mut intake = self.inner.get_mut(&chat)?;
            intake.apply(input)
        };

        match result {
            Ok(Prompt::Done) => {
                let (_, intake) = self.inner.remove(&chat)?;
                let draft = intake.into_draft()?;
                Some(Ok(IntakeOutcome::Completed(draft)))
            }
            Ok(prompt) => Some(Ok(IntakeOutcome::Prompt(prompt))),
            Err(err) => Some(Err(err)),
        }
    }

    /// Drops the chat's session, if any. Returns whether one existed.
    pub fn cancel(&self, chat: ChatId) -> bool {
        self.inner.remove(&chat).is_some()
    }

    pub fn is_active(&self, chat: ChatId) -> bool {
        self.inner.contains_key(&chat)
    }
}
