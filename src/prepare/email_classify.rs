//! Guest email classification.
//!
//! Keyword/pattern matching over subject and thread body, driven entirely by
//! the tables in `constants`. No I/O; the same email always yields the same
//! notice.

use std::sync::OnceLock;

use indexmap::IndexSet;
use regex::{Regex, RegexBuilder};

use super::constants::{
    CategorySpec, CELEBRATION_CATEGORY, DIETARY_CATEGORY, EMAIL_CATEGORIES, OCCASION_KEYWORDS,
    RESTRICTION_KEYWORDS,
};
use crate::types::{EmailNotice, EmailThread, NoticeType, Priority};

/// Compile a case-insensitive pattern. Invalid patterns are logged and dropped
/// so a bad table row degrades to "no match" instead of failing the briefing.
fn compile(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Skipping invalid email pattern '{}': {}", pattern, e);
            None
        }
    }
}

/// A compiled category rule.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub label: String,
    pub patterns: Vec<Regex>,
    pub priority: Priority,
    pub action_required: bool,
}

impl CategoryRule {
    pub fn new(label: &str, patterns: &[&str], priority: Priority, action_required: bool) -> Self {
        Self {
            label: label.to_string(),
            patterns: patterns.iter().filter_map(|p| compile(p)).collect(),
            priority,
            action_required,
        }
    }

    fn from_spec(spec: &CategorySpec) -> Self {
        Self::new(spec.label, spec.patterns, spec.priority, spec.action_required)
    }

    /// True on the first pattern hit in either field.
    fn matches(&self, subject: &str, thread: &str) -> bool {
        self.patterns
            .iter()
            .any(|re| re.is_match(subject) || re.is_match(thread))
    }
}

/// A compiled keyword → label mapping.
#[derive(Debug, Clone)]
struct KeywordRule {
    pattern: Regex,
    label: String,
    tallied: bool,
}

impl KeywordRule {
    fn new(pattern: &str, label: &str, tallied: bool) -> Option<Self> {
        compile(pattern).map(|pattern| Self {
            pattern,
            label: label.to_string(),
            tallied,
        })
    }
}

/// Classifies guest emails into a [`EmailNotice`].
///
/// Three passes over the text:
/// 1. every category rule, in table order, raising priority and action flag
/// 2. dietary restriction keywords, which add `dietary` plus a specific label
///    and force `high` / needs-action
/// 3. occasion keywords, which name the occasion behind a celebration
#[derive(Debug, Clone)]
pub struct EmailClassifier {
    rules: Vec<CategoryRule>,
    restrictions: Vec<KeywordRule>,
    occasions: Vec<KeywordRule>,
}

impl Default for EmailClassifier {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl EmailClassifier {
    /// Classifier over a custom category table, keeping the built-in dietary
    /// and occasion keyword passes.
    pub fn with_rules(rules: Vec<CategoryRule>) -> Self {
        Self {
            rules,
            restrictions: RESTRICTION_KEYWORDS
                .iter()
                .filter_map(|k| KeywordRule::new(k.pattern, k.label, k.tallied))
                .collect(),
            occasions: OCCASION_KEYWORDS
                .iter()
                .filter_map(|(pattern, label)| KeywordRule::new(pattern, label, false))
                .collect(),
        }
    }

    /// The built-in classifier, compiled once.
    pub fn standard() -> &'static EmailClassifier {
        static STANDARD: OnceLock<EmailClassifier> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Self::with_rules(EMAIL_CATEGORIES.iter().map(CategoryRule::from_spec).collect())
        })
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Classify one email from `guest_name`.
    pub fn classify(&self, email: &EmailThread, guest_name: &str) -> EmailNotice {
        let subject = email.subject.as_str();
        let thread = email.combined_thread.as_str();

        let mut categories: IndexSet<String> = IndexSet::new();
        let mut priority = Priority::Low;
        let mut needs_action = false;

        for rule in &self.rules {
            if !rule.matches(subject, thread) {
                continue;
            }
            categories.insert(rule.label.clone());
            if rule.action_required {
                needs_action = true;
            }
            priority = priority.raise(rule.priority);
        }

        // Restriction keywords escalate unconditionally.
        let full_text = format!("{} {}", subject, thread);
        for keyword in &self.restrictions {
            if keyword.pattern.is_match(&full_text) {
                categories.insert(DIETARY_CATEGORY.to_string());
                categories.insert(keyword.label.clone());
                priority = Priority::High;
                needs_action = true;
            }
        }

        if categories.contains(CELEBRATION_CATEGORY) {
            for occasion in &self.occasions {
                if occasion.pattern.is_match(&full_text) {
                    categories.insert(occasion.label.clone());
                }
            }
        }

        let notice_type = resolve_type(&categories, needs_action);
        log::debug!(
            "Classified email '{}' for {}: {} / {} ({} categories)",
            subject,
            guest_name,
            notice_type.as_str(),
            priority.as_str(),
            categories.len()
        );

        EmailNotice {
            guest_name: guest_name.to_string(),
            subject: email.subject.clone(),
            content: email.combined_thread.clone(),
            notice_type,
            priority,
            needs_action,
            categories,
        }
    }

    /// Restriction labels mentioned in an email that count toward the daily
    /// dietary tally, deduplicated, in table order.
    pub fn tallied_restrictions(&self, email: &EmailThread) -> IndexSet<String> {
        self.restrictions
            .iter()
            .filter(|k| k.tallied)
            .filter(|k| {
                k.pattern.is_match(&email.subject) || k.pattern.is_match(&email.combined_thread)
            })
            .map(|k| k.label.clone())
            .collect()
    }
}

/// Primary type precedence: dietary, then special occasion, then any other
/// actionable request, else general.
fn resolve_type(categories: &IndexSet<String>, needs_action: bool) -> NoticeType {
    if categories.contains(DIETARY_CATEGORY) {
        NoticeType::Dietary
    } else if categories.contains(CELEBRATION_CATEGORY) {
        NoticeType::SpecialOccasion
    } else if needs_action {
        NoticeType::Request
    } else {
        NoticeType::General
    }
}

/// Classify with the built-in category table.
pub fn classify_email(email: &EmailThread, guest_name: &str) -> EmailNotice {
    EmailClassifier::standard().classify(email, guest_name)
}
