// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static FAQ knowledge base and the classifier instruction built from it.
//!
//! The knowledge base is never matched locally. It is serialized into the
//! system instruction so the remote classifier can score queries against it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;

use crate::error::AlphaError;

/// Confidence below which a classification is treated as out-of-scope.
pub const DEFAULT_INTENT_THRESHOLD: f64 = 0.65;

/// Topical categories the FAQ entries are grouped by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum IntentCategory {
    #[strum(serialize = "Enrollment")]
    #[serde(rename = "Enrollment")]
    Enrollment,
    #[strum(serialize = "Payment")]
    #[serde(rename = "Payment")]
    Payment,
    #[strum(serialize = "Technical Support")]
    #[serde(rename = "Technical Support")]
    TechnicalSupport,
    #[strum(serialize = "Course Content")]
    #[serde(rename = "Course Content")]
    CourseContent,
    #[strum(serialize = "Greeting")]
    #[serde(rename = "Greeting")]
    Greeting,
    #[strum(serialize = "Unknown/OOS")]
    #[serde(rename = "Unknown/OOS")]
    Unknown,
}

/// A single question/answer pair with its intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
    pub intent: IntentCategory,
}

impl FaqItem {
    fn new(question: &str, answer: &str, intent: IntentCategory) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            intent,
        }
    }
}

/// On-disk layout of a knowledge base file: a list of `[[faq]]` tables.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FaqFile {
    #[serde(default)]
    faq: Vec<FaqItem>,
}

/// Ordered, immutable list of FAQ entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    items: Vec<FaqItem>,
}

impl KnowledgeBase {
    /// Creates a knowledge base from the given entries.
    pub fn new(items: Vec<FaqItem>) -> Self {
        Self { items }
    }

    /// The built-in FAQ set shipped with the assistant.
    pub fn builtin() -> Self {
        use IntentCategory::*;

        Self::new(vec![
            FaqItem::new(
                "How do I enroll in a new course?",
                "You can enroll by navigating to the 'Catalog' tab, selecting your desired course, and clicking the 'Enroll Now' button.",
                Enrollment,
            ),
            FaqItem::new(
                "What is the deadline for dropping a class?",
                "The drop deadline is 14 days after the course start date. You will receive a full refund if dropped within this window.",
                Enrollment,
            ),
            FaqItem::new(
                "Can I audit a course?",
                "Yes, auditing is available for most courses. Select 'Audit Mode' during the checkout process.",
                Enrollment,
            ),
            FaqItem::new(
                "What payment methods do you accept?",
                "We accept Visa, Mastercard, American Express, PayPal, and direct bank transfers.",
                Payment,
            ),
            FaqItem::new(
                "How can I get a receipt for my payment?",
                "Receipts are automatically emailed to you upon purchase. You can also download them from your 'Billing History' page.",
                Payment,
            ),
            FaqItem::new(
                "Do you offer student discounts?",
                "Yes, verified students receive a 20% discount. Please upload your student ID in the profile settings to apply.",
                Payment,
            ),
            FaqItem::new(
                "I cannot reset my password.",
                "Please ensure you are using the email associated with your account. If you don't receive the reset link within 5 minutes, check your spam folder.",
                TechnicalSupport,
            ),
            FaqItem::new(
                "The video player is not loading.",
                "Try clearing your browser cache or disabling ad-blockers. If the issue persists, try a different browser like Chrome or Firefox.",
                TechnicalSupport,
            ),
            FaqItem::new(
                "Where can I download the mobile app?",
                "The Alpha-Assist app is available on both the Apple App Store and Google Play Store under 'Alpha Learning'.",
                TechnicalSupport,
            ),
            FaqItem::new(
                "Are the certificates accredited?",
                "Our professional certificates are industry-recognized but are not equivalent to a university degree.",
                CourseContent,
            ),
            FaqItem::new(
                "How long do I have access to the course materials?",
                "You have lifetime access to all course materials for any course you have purchased.",
                CourseContent,
            ),
        ])
    }

    /// Parses a knowledge base from TOML `[[faq]]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self, AlphaError> {
        let file: FaqFile = toml::from_str(content)
            .map_err(|e| AlphaError::Config(format!("invalid knowledge base file: {e}")))?;
        if file.faq.is_empty() {
            return Err(AlphaError::Config(
                "knowledge base file contains no [[faq]] entries".into(),
            ));
        }
        Ok(Self::new(file.faq))
    }

    /// Loads a knowledge base file from disk.
    pub fn load(path: &Path) -> Result<Self, AlphaError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AlphaError::Config(format!(
                "failed to read knowledge base file {}: {e}",
                path.display()
            ))
        })?;
        let kb = Self::from_toml_str(&content)?;
        info!(path = %path.display(), entries = kb.len(), "loaded knowledge base");
        Ok(kb)
    }

    pub fn items(&self) -> &[FaqItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct categories in first-seen order, each with its FAQ count.
    pub fn categories(&self) -> Vec<(IntentCategory, usize)> {
        let mut out: Vec<(IntentCategory, usize)> = Vec::new();
        for item in &self.items {
            match out.iter_mut().find(|(cat, _)| *cat == item.intent) {
                Some((_, count)) => *count += 1,
                None => out.push((item.intent, 1)),
            }
        }
        out
    }

    /// Renders the classifier system instruction with this knowledge base embedded.
    pub fn system_instruction(&self, threshold: f64) -> String {
        let kb_json = serde_json::to_string(&self.items).unwrap_or_default();
        format!(
            "You are the Alpha-Assist Intent Bot. Your goal is to strictly classify user queries based on a provided Knowledge Base (FAQs) and retrieve the correct answer.

Adhere to this Hierarchical Intent Logic:
1.  **Analyze**: Compare the user's input semantic meaning against the provided FAQ Intents.
2.  **Classify**: Specify the 'intent' (e.g., Enrollment, Payment).
3.  **Score**: Assign a confidence score (0.0 to 1.0) based on how closely the query matches a known FAQ topic.
4.  **Retrieve**: If confidence is >= {threshold}, return the exact 'answer' from the matched FAQ.
5.  **Fallback**: If confidence is < {threshold} (Out-of-Scope), set 'answer' to null and provide a 'suggestedSearchQuery' optimized for Google Search.

Do NOT hallucinate answers not in the KB. If in doubt, lower the confidence score.

Here is the Knowledge Base:
{kb_json}
"
        )
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn builtin_has_eleven_entries() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.len(), 11);
        assert!(!kb.is_empty());
    }

    #[test]
    fn categories_keep_first_seen_order_and_counts() {
        let cats = KnowledgeBase::builtin().categories();
        assert_eq!(
            cats,
            vec![
                (IntentCategory::Enrollment, 3),
                (IntentCategory::Payment, 3),
                (IntentCategory::TechnicalSupport, 3),
                (IntentCategory::CourseContent, 2),
            ]
        );
    }

    #[test]
    fn intent_category_display_strings() {
        assert_eq!(IntentCategory::TechnicalSupport.to_string(), "Technical Support");
        assert_eq!(IntentCategory::Unknown.to_string(), "Unknown/OOS");
        assert_eq!(
            IntentCategory::from_str("Course Content").unwrap(),
            IntentCategory::CourseContent
        );
    }

    #[test]
    fn system_instruction_embeds_threshold_and_kb() {
        let kb = KnowledgeBase::builtin();
        let instruction = kb.system_instruction(DEFAULT_INTENT_THRESHOLD);
        assert!(instruction.contains("confidence is >= 0.65"));
        assert!(instruction.contains("confidence is < 0.65"));
        assert!(instruction.contains("\"intent\":\"Technical Support\""));
        assert!(instruction.contains("What payment methods do you accept?"));
    }

    #[test]
    fn parses_faq_file() {
        let toml = r#"
[[faq]]
question = "Is there a refund policy?"
answer = "Refunds are available within 14 days."
intent = "Payment"

[[faq]]
question = "Hi"
answer = "Hello!"
intent = "Greeting"
"#;
        let kb = KnowledgeBase::from_toml_str(toml).unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.items()[1].intent, IntentCategory::Greeting);
    }

    #[test]
    fn rejects_unknown_intent_in_faq_file() {
        let toml = r#"
[[faq]]
question = "q"
answer = "a"
intent = "Shipping"
"#;
        let err = KnowledgeBase::from_toml_str(toml).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn rejects_empty_faq_file() {
        let err = KnowledgeBase::from_toml_str("").unwrap_err();
        assert!(err.to_string().contains("no [[faq]] entries"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq.toml");
        std::fs::write(
            &path,
            "[[faq]]\nquestion = \"q\"\nanswer = \"a\"\nintent = \"Enrollment\"\n",
        )
        .unwrap();
        let kb = KnowledgeBase::load(&path).unwrap();
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = KnowledgeBase::load(Path::new("/nonexistent/faq.toml")).unwrap_err();
        assert!(err.is_config());
    }
}
