// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for remote collaborators.
//!
//! All adapters extend the [`RemoteAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod classifier;
pub mod search;

pub use adapter::RemoteAdapter;
pub use classifier::IntentClassifier;
pub use search::WebSearch;
