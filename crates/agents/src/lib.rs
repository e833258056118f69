use std::sync::Arc;
use std::time::Instant;

use campus_core::{
    classify_with, response_for, ChatMessage, MatchMode, ReplyDirective, ReplyPacing,
    ResponseCategory, Transcript, TurnError,
};
use campus_observability::AppMetrics;
use chrono::Utc;
use rand::{rng, Rng};
use serde::Serialize;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub category: ResponseCategory,
    pub reply: &'static str,
}

#[derive(Debug, Clone)]
pub struct CampusAssistant {
    pacing: ReplyPacing,
    match_mode: MatchMode,
    metrics: Arc<AppMetrics>,
}

impl CampusAssistant {
    pub fn new(pacing: ReplyPacing, metrics: Arc<AppMetrics>) -> Self {
        Self {
            pacing,
            match_mode: MatchMode::Substring,
            metrics,
        }
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn pacing(&self) -> ReplyPacing {
        self.pacing
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    pub fn start_transcript(&self) -> Transcript {
        Transcript::new(Utc::now())
    }

    /// Stateless lookup; any text, including empty, gets an answer.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub fn answer(&self, text: &str) -> Answer {
        let started = Instant::now();
        self.metrics.inc_request();

        let category = classify_with(text, self.match_mode);
        self.metrics.record_reply(category.as_code());
        self.metrics.observe_latency(started.elapsed());

        info!(category = category.as_code(), "answer resolved");
        Answer {
            category,
            reply: response_for(category),
        }
    }

    /// Records the user's message and returns the reply to show once its delay passes.
    #[instrument(skip(self, transcript, text), fields(messages = transcript.len()))]
    pub fn handle_turn(
        &self,
        transcript: &mut Transcript,
        text: &str,
    ) -> Result<ReplyDirective, TurnError> {
        let started = Instant::now();
        self.metrics.inc_request();

        let delay = self.pacing.delay_from(rng().next_u64());
        let directive =
            match transcript.submit_with_mode(text, self.match_mode, Utc::now(), delay) {
                Ok(directive) => directive,
                Err(err) => {
                    self.metrics.inc_rejected_input();
                    debug!(error = %err, "turn rejected");
                    return Err(err);
                }
            };

        self.metrics.record_reply(directive.category.as_code());
        self.metrics.observe_latency(started.elapsed());

        info!(
            category = directive.category.as_code(),
            delay_ms = directive.delay_ms,
            pending = transcript.pending_replies(),
            "turn handled"
        );
        Ok(directive)
    }

    pub fn deliver(&self, transcript: &mut Transcript, directive: &ReplyDirective) -> ChatMessage {
        transcript.deliver(directive, Utc::now()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::Sender;

    fn assistant() -> CampusAssistant {
        CampusAssistant::new(ReplyPacing::default(), AppMetrics::shared())
    }

    #[test]
    fn answer_uses_first_matching_rule() {
        let answer = assistant().answer("Where is the computer science building?");
        assert_eq!(answer.category, ResponseCategory::Facilities);
        assert_eq!(answer.reply, response_for(ResponseCategory::Facilities));
    }

    #[test]
    fn turn_delay_stays_in_pacing_window() {
        let assistant = assistant();
        let mut transcript = assistant.start_transcript();

        for _ in 0..32 {
            let directive = assistant.handle_turn(&mut transcript, "parking").unwrap();
            assert!((1_000..=2_000).contains(&directive.delay_ms));
            assistant.deliver(&mut transcript, &directive);
        }
        assert_eq!(transcript.len(), 1 + 32 * 2);
    }

    #[test]
    fn rejected_turn_is_counted_and_leaves_transcript() {
        let assistant = assistant();
        let mut transcript = assistant.start_transcript();

        assert_eq!(
            assistant.handle_turn(&mut transcript, "   "),
            Err(TurnError::EmptyUtterance)
        );
        assert_eq!(transcript.len(), 1);

        let snapshot = assistant.metrics().snapshot();
        assert_eq!(snapshot.requests_total, 1);
        assert_eq!(snapshot.rejected_inputs_total, 1);
    }

    #[test]
    fn delivered_reply_is_assistant_message() {
        let assistant = CampusAssistant::new(ReplyPacing::immediate(), AppMetrics::shared())
            .with_match_mode(MatchMode::WholeWord);
        let mut transcript = assistant.start_transcript();

        let directive = assistant.handle_turn(&mut transcript, "roommate trouble").unwrap();
        assert_eq!(directive.delay_ms, 0);
        let message = assistant.deliver(&mut transcript, &directive);
        assert_eq!(message.sender, Sender::Assistant);
        assert_eq!(message.content, response_for(ResponseCategory::Default));
        assert_eq!(assistant.metrics().snapshot().default_replies_total, 1);
    }
}
