//! Email extraction from plain text

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

static EMAIL_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap()
});

/// One extracted address with its inferred company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailRecord {
    pub email: String,
    pub company: String,
}

/// Ordered, deduplicated result of a single extraction run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Addresses in display order (case-insensitive sort)
    pub emails: Vec<String>,

    /// Per-address records, same order and cardinality as `emails`
    pub data: Vec<EmailRecord>,
}

impl ExtractionReport {
    /// Extract every email address from `text`
    ///
    /// Duplicates are dropped case-insensitively, keeping the first-seen
    /// casing; the surviving addresses are sorted case-insensitively.
    #[must_use]
    pub fn extract(text: &str) -> Self {
        let emails = extract_emails(text);
        let data = emails
            .iter()
            .map(|email| EmailRecord {
                email: email.clone(),
                company: company_for(email),
            })
            .collect();

        debug!("Extracted {} unique addresses", emails.len());

        Self { emails, data }
    }

    /// Number of addresses found
    #[must_use]
    pub const fn total(&self) -> usize {
        self.emails.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

/// Find all unique email addresses in `text`, sorted case-insensitively
#[must_use]
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut emails: Vec<String> = EMAIL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|email| seen.insert(email.to_lowercase()))
        .collect();

    emails.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    emails
}

/// Infer a company name from an address: the domain label before the
/// first dot, capitalized. Empty when the address has no `@`.
#[must_use]
pub fn company_for(email: &str) -> String {
    let Some((_, domain)) = email.split_once('@') else {
        return String::new();
    };

    let label = domain.split('.').next().unwrap_or("");
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}
