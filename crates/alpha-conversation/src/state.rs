// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation state machine.
//!
//! Two independent lanes (classification and search) each allow one call in
//! flight. Every remote result, success or failure, is turned into appended
//! messages; no error escapes [`ConversationState`].

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use alpha_config::AssistConfig;
use alpha_core::{
    AlphaError, ClassificationResult, DEFAULT_INTENT_THRESHOLD, IntentCategory, IntentClassifier,
    Message, MessageId, SearchAnswer, WebSearch, dedup_links,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::lane::{Lane, LaneState};
use crate::log::MessageLog;

/// Reply shown when the classifier is not confident enough.
pub const NOT_SURE_REPLY: &str =
    "I'm not quite sure I have that information in my knowledge base.";

/// Reply shown when an in-scope classification carries no answer text.
pub const NO_ANSWER_REPLY: &str = "I'm sorry, I couldn't retrieve the answer.";

/// Reply shown when the classifier call fails.
pub const CLASSIFICATION_ERROR_REPLY: &str =
    "I encountered a system error processing your request.";

/// Reply shown when a search fails and search errors are surfaced.
pub const SEARCH_ERROR_REPLY: &str = "I'm sorry, I encountered an error while searching the web.";

/// Tunables for a [`ConversationState`].
#[derive(Debug, Clone)]
pub struct ConversationOptions {
    /// Confidence below which a classification is out-of-scope.
    pub threshold: f64,
    /// Deadline for each remote call. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Append an error message when a search fails instead of dropping it silently.
    pub surface_search_errors: bool,
    /// Greeting seeded into the log on creation.
    pub welcome_message: Option<String>,
}

impl Default for ConversationOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_INTENT_THRESHOLD,
            request_timeout: None,
            surface_search_errors: true,
            welcome_message: None,
        }
    }
}

impl ConversationOptions {
    pub fn from_config(config: &AssistConfig) -> Self {
        let welcome = config.agent.welcome_message.trim();
        Self {
            threshold: config.intent.threshold,
            request_timeout: Some(Duration::from_secs(config.gemini.timeout_secs)),
            surface_search_errors: config.search.surface_errors,
            welcome_message: (!welcome.is_empty()).then(|| welcome.to_string()),
        }
    }
}

/// Why a submission was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The text was empty or whitespace only.
    Empty,
    /// A classification is already in flight.
    Busy,
}

/// Result of [`ConversationState::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was appended.
    Rejected(RejectReason),
    /// The user message and exactly one bot reply were appended.
    Answered { user: MessageId, reply: MessageId },
}

/// Result of [`ConversationState::trigger_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A search was already in flight; nothing happened.
    Ignored,
    /// The search answer was appended as a new bot message.
    Appended(MessageId),
    /// The search failed. `surfaced` holds the error message id when one was appended.
    Failed { surfaced: Option<MessageId> },
}

/// Owns the message log and mediates the classifier and search calls.
pub struct ConversationState {
    classifier: Arc<dyn IntentClassifier>,
    search: Arc<dyn WebSearch>,
    options: ConversationOptions,
    log: MessageLog,
    classification_lane: Lane,
    search_lane: Lane,
    cancel: Mutex<CancellationToken>,
}

impl ConversationState {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        search: Arc<dyn WebSearch>,
        options: ConversationOptions,
    ) -> Self {
        let log = MessageLog::default();
        if let Some(welcome) = &options.welcome_message {
            log.append(Message::bot(
                welcome.clone(),
                IntentCategory::Greeting.to_string(),
                1.0,
            ));
        }

        info!(
            classifier = classifier.name(),
            search = search.name(),
            threshold = options.threshold,
            "conversation started"
        );

        Self {
            classifier,
            search,
            options,
            log,
            classification_lane: Lane::new("classification"),
            search_lane: Lane::new("search"),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn options(&self) -> &ConversationOptions {
        &self.options
    }

    pub fn classification_state(&self) -> LaneState {
        self.classification_lane.state()
    }

    pub fn search_state(&self) -> LaneState {
        self.search_lane.state()
    }

    /// A copy of the log in display order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.log.snapshot()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn message(&self, id: &MessageId) -> Option<Message> {
        self.log.get(id)
    }

    /// The suggested query of the most recent message offering a web search.
    pub fn last_search_offer(&self) -> Option<String> {
        self.log
            .find_last(Message::offers_search)
            .and_then(|m| m.suggested_search_query)
    }

    /// Appends the user's text and one bot reply built from the classifier result.
    ///
    /// Rejected without side effects when `text` is blank or a classification
    /// is already pending.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            debug!("empty submission ignored");
            return SubmitOutcome::Rejected(RejectReason::Empty);
        }

        let Some(_guard) = self.classification_lane.try_acquire() else {
            debug!("submission rejected: classification pending");
            return SubmitOutcome::Rejected(RejectReason::Busy);
        };

        let user = self.log.append(Message::user(text));
        let pending = PendingReply::new(&self.log);

        let reply = match self.bounded(self.classifier.classify(text)).await {
            Ok(result) => self.reply_for(&result, text),
            Err(e) => {
                warn!(error = %e, "classification failed");
                Message::error(CLASSIFICATION_ERROR_REPLY)
            }
        };

        debug!(
            intent = reply.intent.as_deref().unwrap_or_default(),
            confidence = reply.confidence.unwrap_or_default(),
            is_oos = reply.is_oos.unwrap_or(false),
            "bot reply appended"
        );
        let reply = pending.complete(reply);

        SubmitOutcome::Answered { user, reply }
    }

    /// Runs the web search fallback for `query` and appends the answer as a new message.
    ///
    /// A call made while another search is pending is ignored, not queued.
    pub async fn trigger_search(&self, query: &str) -> SearchOutcome {
        let Some(_guard) = self.search_lane.try_acquire() else {
            debug!("search ignored: another search pending");
            return SearchOutcome::Ignored;
        };

        match self.bounded(self.search.search(query)).await {
            Ok(answer) => {
                let links = dedup_links(answer.links);
                debug!(links = links.len(), "search answer appended");
                let id = self.log.append(Message::search_result(SearchAnswer {
                    summary: answer.summary,
                    links,
                }));
                SearchOutcome::Appended(id)
            }
            Err(e) => {
                warn!(error = %e, query, "web search failed");
                let surfaced = self
                    .options
                    .surface_search_errors
                    .then(|| self.log.append(Message::error(SEARCH_ERROR_REPLY)));
                SearchOutcome::Failed { surfaced }
            }
        }
    }

    /// Cancels every in-flight remote call.
    ///
    /// Each cancelled call takes its lane's failure path. Returns true if any
    /// lane was pending.
    pub fn cancel_pending(&self) -> bool {
        let fresh = CancellationToken::new();
        let old = {
            let mut token = self.cancel.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *token, fresh)
        };
        old.cancel();

        let was_pending = self.classification_state() == LaneState::Pending
            || self.search_state() == LaneState::Pending;
        if was_pending {
            info!("in-flight requests cancelled");
        }
        was_pending
    }

    fn reply_for(&self, result: &ClassificationResult, query: &str) -> Message {
        if result.is_out_of_scope(self.options.threshold) {
            let suggestion = result
                .suggested_search_query
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(query);
            Message::out_of_scope(
                NOT_SURE_REPLY,
                result.intent.clone(),
                result.confidence,
                suggestion,
            )
        } else {
            Message::in_scope(
                result.answer_text().unwrap_or(NO_ANSWER_REPLY),
                result.intent.clone(),
                result.confidence,
            )
        }
    }

    /// Races `call` against the request timeout and the current cancellation token.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, AlphaError>>,
    ) -> Result<T, AlphaError> {
        let token = self
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let timed = async {
            match self.options.request_timeout {
                Some(duration) => match tokio::time::timeout(duration, call).await {
                    Ok(result) => result,
                    Err(_) => Err(AlphaError::Timeout { duration }),
                },
                None => call.await,
            }
        };

        tokio::select! {
            _ = token.cancelled() => Err(AlphaError::Cancelled),
            result = timed => result,
        }
    }
}

/// Owes the log one bot reply for an accepted user message.
///
/// If `submit` is dropped mid-call the error reply is appended on drop, so
/// every user entry is still followed by exactly one bot entry.
struct PendingReply<'a> {
    log: &'a MessageLog,
    done: bool,
}

impl<'a> PendingReply<'a> {
    fn new(log: &'a MessageLog) -> Self {
        Self { log, done: false }
    }

    fn complete(mut self, reply: Message) -> MessageId {
        self.done = true;
        self.log.append(reply)
    }
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        if !self.done {
            warn!("classification abandoned before completion");
            self.log.append(Message::error(CLASSIFICATION_ERROR_REPLY));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_config::AssistConfig;

    #[test]
    fn options_from_default_config() {
        let options = ConversationOptions::from_config(&AssistConfig::default());
        assert_eq!(options.threshold, 0.65);
        assert_eq!(options.request_timeout, Some(Duration::from_secs(30)));
        assert!(options.surface_search_errors);
        assert!(options.welcome_message.is_some());
    }

    #[test]
    fn blank_welcome_message_disables_greeting() {
        let mut config = AssistConfig::default();
        config.agent.welcome_message = "   ".into();
        let options = ConversationOptions::from_config(&config);
        assert!(options.welcome_message.is_none());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn failures_are_logged_for_operators() {
        use alpha_test_utils::{MockClassifier, MockSearch};

        let failure = || AlphaError::Internal("backend down".into());
        let state = ConversationState::new(
            Arc::new(MockClassifier::with_responses(vec![Err(failure())])),
            Arc::new(MockSearch::with_responses(vec![Err(failure())])),
            ConversationOptions {
                surface_search_errors: false,
                ..ConversationOptions::default()
            },
        );

        state.submit("hello").await;
        state.trigger_search("hello").await;

        assert!(logs_contain("classification failed"));
        assert!(logs_contain("web search failed"));
        assert!(logs_contain("backend down"));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn unfinished_pending_reply_appends_error() {
        let log = MessageLog::default();
        log.append(Message::user("hello"));
        drop(PendingReply::new(&log));

        let entries = log.snapshot();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].content, CLASSIFICATION_ERROR_REPLY);
        assert!(entries[1].is_error());
    }

    #[test]
    fn completed_pending_reply_appends_once() {
        let log = MessageLog::default();
        let id = PendingReply::new(&log).complete(Message::bot("hi", "Greeting", 0.9));
        assert_eq!(log.len(), 1);
        assert_eq!(log.snapshot()[0].id, id);
    }

    #[test]
    fn default_options_have_no_timeout() {
        let options = ConversationOptions::default();
        assert!(options.request_timeout.is_none());
        assert_eq!(options.threshold, DEFAULT_INTENT_THRESHOLD);
    }
}
