// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state for the Alpha-Assist front end.
//!
//! [`ConversationState`] owns the append-only message log and drives the two
//! remote collaborators:
//! - the intent classifier, called once per submitted query
//! - the web search, called when the user accepts an out-of-scope offer
//!
//! Each collaborator has its own single-flight lane, so a search may run
//! while a classification is pending and vice versa.

mod lane;
mod log;
pub mod state;

pub use lane::LaneState;
pub use state::{
    CLASSIFICATION_ERROR_REPLY, ConversationOptions, ConversationState, NO_ANSWER_REPLY,
    NOT_SURE_REPLY, RejectReason, SEARCH_ERROR_REPLY, SearchOutcome, SubmitOutcome,
};
