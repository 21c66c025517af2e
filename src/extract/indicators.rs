//! Contact-indicator extraction: emails, phones, crypto-style addresses.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-zA-Z0-9._%+\-]{1,64}@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap()
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s-]?)?(?:\(?\d{2,4}\)?[\s-]?)?\d{3,4}[\s-]?\d{3,4}").unwrap()
});

// Shape check for BTC/ETH-like strings, not checksum validation.
static CRYPTO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(0x[a-fA-F0-9]{30,64}|[13][a-km-zA-HJ-NP-Z1-9]{25,34})\b").unwrap()
});

static PHONE_SEPARATORS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\-()]+").unwrap());

/// Deduplicated, ascending-sorted contact indicators from one blob of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactIndicators {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub crypto_addrs: Vec<String>,
}

impl ContactIndicators {
    /// True when nothing of any kind was found.
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty() && self.crypto_addrs.is_empty()
    }
}

/// Scan text for contact indicators.
///
/// Pure function of its input: identical text yields identical output, and
/// empty result sets are the normal case for text with nothing to find.
pub fn extract_indicators(text: &str) -> ContactIndicators {
    let emails: BTreeSet<String> = EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let phones: BTreeSet<String> = PHONE_RE
        .find_iter(text)
        .filter_map(|m| normalize_phone(m.as_str()))
        .collect();

    let crypto_addrs: BTreeSet<String> = CRYPTO_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    ContactIndicators {
        emails: emails.into_iter().collect(),
        phones: phones.into_iter().collect(),
        crypto_addrs: crypto_addrs.into_iter().collect(),
    }
}

/// Strip separators from a phone candidate; discard it below 7 digits.
/// A leading `+` survives the stripping.
fn normalize_phone(candidate: &str) -> Option<String> {
    let cleaned = PHONE_SEPARATORS_RE.replace_all(candidate, "").into_owned();
    let digits = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
    (digits >= 7).then_some(cleaned)
}
