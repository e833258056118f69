use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::GREETING;
use crate::intent::{classify_with, response_for, MatchMode};
use crate::models::{ChatMessage, ResponseCategory};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("utterance is empty or whitespace-only")]
    EmptyUtterance,
}

/// "Show `content` as an assistant message once `delay_ms` has elapsed."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyDirective {
    pub category: ResponseCategory,
    pub content: String,
    pub delay_ms: u64,
}

impl ReplyDirective {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Caller-owned chat history. Every mutation goes through `submit` and
/// `deliver`; nothing else writes to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    #[serde(default)]
    pending_replies: usize,
}

impl Transcript {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING, at)],
            pending_replies: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending_replies
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn submit(
        &mut self,
        text: &str,
        at: DateTime<Utc>,
        delay: Duration,
    ) -> Result<ReplyDirective, TurnError> {
        self.submit_with_mode(text, MatchMode::Substring, at, delay)
    }

    pub fn submit_with_mode(
        &mut self,
        text: &str,
        mode: MatchMode,
        at: DateTime<Utc>,
        delay: Duration,
    ) -> Result<ReplyDirective, TurnError> {
        if text.trim().is_empty() {
            return Err(TurnError::EmptyUtterance);
        }

        let category = classify_with(text, mode);
        self.messages.push(ChatMessage::user(text, at));
        self.pending_replies += 1;

        Ok(ReplyDirective {
            category,
            content: response_for(category).to_string(),
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        })
    }

    pub fn deliver(&mut self, directive: &ReplyDirective, at: DateTime<Utc>) -> &ChatMessage {
        self.pending_replies = self.pending_replies.saturating_sub(1);
        self.messages
            .push(ChatMessage::assistant(directive.content.clone(), at));
        &self.messages[self.messages.len() - 1]
    }

    /// Drops the oldest messages so at most `max` remain.
    pub fn retain_recent(&mut self, max: usize) {
        if self.messages.len() > max {
            let keep_from = self.messages.len() - max;
            self.messages = self.messages.split_off(keep_from);
        }
    }
}
