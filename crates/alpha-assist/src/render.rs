// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal presentation of messages and the intents sidebar.

use alpha_config::AssistConfig;
use alpha_core::{KnowledgeBase, Message, Role};
use colored::{ColoredString, Colorize};
use serde::Serialize;

/// Color band a confidence score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.9 {
            Self::High
        } else if confidence >= 0.7 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Whole-percent rendering of a confidence score.
pub fn format_confidence(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round() as i64)
}

fn paint(text: &str, color: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

/// Renders one log entry as terminal lines.
pub fn render_message(message: &Message, color: bool) -> String {
    let mut out = String::new();

    match message.role {
        Role::User => {
            out.push_str(&paint("you", color, |s| s.bold().blue()));
            out.push_str(" > ");
            out.push_str(&message.content);
            return out;
        }
        Role::System => {
            return paint(&message.content, color, |s| s.dimmed());
        }
        Role::Bot => {}
    }

    out.push_str(&paint("alpha", color, |s| s.bold().green()));
    if let (Some(intent), Some(confidence)) = (message.intent.as_deref(), message.confidence) {
        let badge = format!("[{intent}]");
        out.push(' ');
        out.push_str(&paint(&badge, color, |s| s.cyan()));
        if !message.is_error() {
            let pct = format_confidence(confidence);
            out.push(' ');
            out.push_str(&match ConfidenceBand::of(confidence) {
                ConfidenceBand::High => paint(&pct, color, |s| s.green()),
                ConfidenceBand::Medium => paint(&pct, color, |s| s.yellow()),
                ConfidenceBand::Low => paint(&pct, color, |s| s.red()),
            });
        }
    }
    out.push('\n');

    if message.is_error() {
        out.push_str(&paint(&message.content, color, |s| s.red()));
    } else {
        out.push_str(&message.content);
    }

    if message.offers_search()
        && let Some(query) = message.suggested_search_query.as_deref()
    {
        out.push('\n');
        let offer = format!("Search the web for \"{query}\"? Type /search");
        out.push_str(&paint(&offer, color, |s| s.yellow()));
    }

    if let Some(links) = message.search_results.as_deref()
        && !links.is_empty()
    {
        out.push('\n');
        out.push_str(&paint("Sources:", color, |s| s.bold()));
        for (i, link) in links.iter().enumerate() {
            out.push_str(&format!(
                "\n  {}. {} {}",
                i + 1,
                link.title,
                paint(&format!("<{}>", link.url), color, |s| s.dimmed())
            ));
        }
    }

    out
}

/// Sidebar contents: the knowledge base categories plus the model settings.
#[derive(Debug, Serialize)]
pub struct IntentsView {
    pub categories: Vec<CategoryView>,
    pub faq_entries: usize,
    pub model: String,
    pub threshold: f64,
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub intent: String,
    pub faqs: usize,
}

impl IntentsView {
    pub fn new(knowledge: &KnowledgeBase, config: &AssistConfig) -> Self {
        Self {
            categories: knowledge
                .categories()
                .into_iter()
                .map(|(intent, faqs)| CategoryView {
                    intent: intent.to_string(),
                    faqs,
                })
                .collect(),
            faq_entries: knowledge.len(),
            model: config.gemini.model.clone(),
            threshold: config.intent.threshold,
        }
    }
}

pub fn intents_json(knowledge: &KnowledgeBase, config: &AssistConfig) -> serde_json::Value {
    serde_json::to_value(IntentsView::new(knowledge, config)).unwrap_or_default()
}

/// Renders the "Hierarchical Intents" sidebar.
pub fn render_intents(knowledge: &KnowledgeBase, config: &AssistConfig, color: bool) -> String {
    let view = IntentsView::new(knowledge, config);
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        paint("Hierarchical Intents", color, |s| s.bold())
    ));
    out.push_str(&format!("  {}\n", "-".repeat(40)));
    for category in &view.categories {
        let noun = if category.faqs == 1 { "FAQ" } else { "FAQs" };
        out.push_str(&format!(
            "    {:<22} {} {noun}\n",
            category.intent, category.faqs
        ));
    }
    out.push('\n');
    out.push_str(&format!("  {:<24} {}\n", "Model", view.model));
    out.push_str(&format!(
        "  {:<24} {}\n",
        "Confidence threshold",
        format_confidence(view.threshold)
    ));
    out.push('\n');
    out
}
